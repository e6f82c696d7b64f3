use inksac::prelude::*;

/// Terminal colors for prompts, values and diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    color_support: ColorSupport,
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

impl Theme {
    pub fn detect() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.color_support, ColorSupport::NoColor)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        text.style(style).to_string()
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, Style::builder().bold().build())
    }

    /// Questions and caret padding.
    pub fn attention(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Yellow).build())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Red).build())
    }

    pub fn label(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Green).build())
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Green).bold().build())
    }

    pub fn key(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Cyan).build())
    }

    pub fn string(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Green).build())
    }

    /// Numbers and booleans.
    pub fn literal(&self, text: &str) -> String {
        self.paint(text, Style::builder().foreground(Color::Yellow).build())
    }

    pub fn null(&self, text: &str) -> String {
        self.paint(
            text,
            Style::builder().foreground(Color::RGB(128, 128, 128)).build(),
        )
    }
}
