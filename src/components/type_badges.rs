use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::theme::{ACCENT_GOLD, BG_HIGHLIGHT, ERROR_RED, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::CategoryTag;
use crate::type_icons::icon_for;

/// Coloured `glyph name` chip for one category.
pub fn badge_span(name: &str) -> Span<'static> {
    let icon = icon_for(name);
    Span::styled(
        format!(" {} {} ", icon.glyph, name.to_ascii_uppercase()),
        Style::default()
            .fg(Color::Black)
            .bg(icon.color)
            .add_modifier(Modifier::BOLD),
    )
}

pub struct TypeBadgesProps<'a> {
    pub tags: &'a [CategoryTag],
    pub active: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Filter bar: "All" followed by one chip per category.
#[derive(Default)]
pub struct TypeBadges;

impl TypeBadges {
    fn line(props: &TypeBadgesProps<'_>) -> Line<'static> {
        let mut spans = vec![Span::styled("Filter: ", Style::default().fg(TEXT_DIM))];
        let all_style = if props.active.is_none() {
            Style::default()
                .fg(TEXT_MAIN)
                .bg(BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        spans.push(Span::styled(" ALL ", all_style));

        for tag in props.tags {
            spans.push(Span::raw(" "));
            if props.active == Some(tag.name.as_str()) {
                spans.push(
                    badge_span(&tag.name)
                        .patch_style(Style::default().add_modifier(Modifier::UNDERLINED)),
                );
            } else {
                let icon = icon_for(&tag.name);
                spans.push(Span::styled(
                    format!("{} {}", icon.glyph, tag.name.to_ascii_uppercase()),
                    Style::default().fg(icon.color),
                ));
            }
        }

        if let Some(error) = props.error {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(error.to_string(), Style::default().fg(ERROR_RED)));
        } else if props.tags.is_empty() {
            spans.push(Span::styled(
                "  loading types...",
                Style::default().fg(ACCENT_GOLD),
            ));
        }
        Line::from(spans)
    }
}

impl Component<Action> for TypeBadges {
    type Props<'a> = TypeBadgesProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let paragraph = Paragraph::new(Self::line(&props)).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
