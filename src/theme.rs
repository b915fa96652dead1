use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

pub const DEFAULT_THEME: &str = "Catppuccin Mocha";

const fn rgb(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colors by role rather than by palette name.
///
/// Widgets ask for `theme.error()` or `theme.border_focused()` and never for a
/// specific hue, so a flavor only has to decide the mapping once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    background: Color,
    surface: Color,
    border: Color,
    border_focused: Color,
    text: Color,
    muted: Color,
    dim: Color,
    accent: Color,
    title: Color,
    key: Color,
    success: Color,
    error: Color,
    selection: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            background: rgb(&c.base),
            surface: rgb(&c.surface0),
            border: rgb(&c.surface1),
            border_focused: rgb(&c.lavender),
            text: rgb(&c.text),
            muted: rgb(&c.subtext0),
            dim: rgb(&c.overlay0),
            accent: rgb(&c.mauve),
            title: rgb(&c.yellow),
            key: rgb(&c.peach),
            success: rgb(&c.green),
            error: rgb(&c.red),
            selection: rgb(&c.surface1),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Fill for overlays (modals, toasts).
    #[must_use]
    pub const fn surface(&self) -> Color {
        self.surface
    }

    #[must_use]
    pub const fn border(&self) -> Color {
        self.border
    }

    #[must_use]
    pub const fn border_focused(&self) -> Color {
        self.border_focused
    }

    #[must_use]
    pub const fn text(&self) -> Color {
        self.text
    }

    #[must_use]
    pub const fn muted(&self) -> Color {
        self.muted
    }

    /// Placeholders and separators.
    #[must_use]
    pub const fn dim(&self) -> Color {
        self.dim
    }

    #[must_use]
    pub const fn accent(&self) -> Color {
        self.accent
    }

    #[must_use]
    pub const fn title(&self) -> Color {
        self.title
    }

    /// Key labels in hints.
    #[must_use]
    pub const fn key(&self) -> Color {
        self.key
    }

    #[must_use]
    pub const fn success(&self) -> Color {
        self.success
    }

    #[must_use]
    pub const fn error(&self) -> Color {
        self.error
    }

    #[must_use]
    pub const fn selection(&self) -> Color {
        self.selection
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

/// Built-in themes by display name.
pub fn available_themes() -> [(&'static str, Theme); 4] {
    [
        (DEFAULT_THEME, Theme::catppuccin_mocha()),
        ("Catppuccin Macchiato", Theme::catppuccin_macchiato()),
        ("Catppuccin Frappé", Theme::catppuccin_frappe()),
        ("Catppuccin Latte", Theme::catppuccin_latte()),
    ]
}

/// Look up a theme by name, ignoring case. Unknown names fall back to the
/// default theme.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
        .map_or_else(
            || {
                tracing::warn!(name, "Unknown theme, using {DEFAULT_THEME}");
                Theme::default()
            },
            |(_, theme)| theme,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup() {
        assert_eq!(theme_from_name("Catppuccin Latte"), Theme::catppuccin_latte());
        assert_eq!(theme_from_name("catppuccin frappé"), Theme::catppuccin_frappe());
        assert_eq!(theme_from_name("solarized"), Theme::default());
    }

    #[test]
    fn test_flavors_differ() {
        assert_ne!(
            Theme::catppuccin_mocha().background(),
            Theme::catppuccin_latte().background()
        );
    }
}
