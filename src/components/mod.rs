pub mod catalog;
pub mod detail;
pub mod not_found;
pub mod search_bar;
pub mod type_badges;
pub mod welcome;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog::{CatalogScreen, CatalogScreenProps};
pub use detail::{DetailScreen, DetailScreenProps};
pub use not_found::{NotFoundScreen, NotFoundScreenProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use type_badges::{badge_span, TypeBadges, TypeBadgesProps};
pub use welcome::{WelcomeScreen, WelcomeScreenProps};

pub mod theme {
    use ratatui::style::{Color, Style};
    use tui_dispatch_components::{BaseStyle, Padding, TextInputStyle};

    pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
    pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
    pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
    pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
    pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
    pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
    pub const ERROR_RED: Color = Color::Rgb(232, 96, 88);

    pub const BG_INPUT: Color = Color::Rgb(26, 40, 58);

    pub fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(BG_INPUT),
                fg: Some(TEXT_MAIN),
            },
            placeholder_style: Some(Style::default().fg(TEXT_DIM)),
            cursor_style: Some(Style::default().bg(ACCENT_GOLD).fg(BG_BASE)),
        }
    }
}

fn ui_render(_: usize) -> crate::action::Action {
    crate::action::Action::Render
}
