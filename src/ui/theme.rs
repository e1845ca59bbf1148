//! Visual theme and styling.

use console::{Style, Term};

/// Whether diagnostic lines carry ANSI colors.
///
/// Decided once at startup and passed to whatever renders output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Plain text tags.
    #[default]
    Plain,
    /// Green / red bold tags.
    Colored,
}

impl OutputStyle {
    /// Pick a style for stdout.
    ///
    /// `no_color` comes from `--no-color`; `NO_COLOR` is honoured as well.
    pub fn detect(no_color: bool) -> Self {
        if no_color || std::env::var_os("NO_COLOR").is_some() {
            return OutputStyle::Plain;
        }
        Self::for_terminal(&Term::stdout())
    }

    /// Colored when the terminal is a TTY that supports colors.
    pub fn for_terminal(term: &Term) -> Self {
        if term.is_term() && term.features().colors_supported() {
            OutputStyle::Colored
        } else {
            OutputStyle::Plain
        }
    }
}

/// Styles for check output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for passing tags (green bold).
    pub ok: Style,
    /// Style for failing tags (red bold).
    pub fail: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the colored theme.
    ///
    /// Styling is forced so the decision made by [`OutputStyle`] wins over
    /// console's own global detection.
    pub fn new() -> Self {
        Self {
            ok: Style::new().green().bold().force_styling(true),
            fail: Style::new().red().bold().force_styling(true),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            ok: Style::new(),
            fail: Style::new(),
        }
    }

    /// The theme for an output style.
    pub fn for_style(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Plain => Self::plain(),
            OutputStyle::Colored => Self::new(),
        }
    }
}
