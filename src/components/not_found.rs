use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_TEAL, ERROR_RED, TEXT_DIM};
use super::Component;
use crate::action::Action;
use crate::route::Route;

pub struct NotFoundScreenProps<'a> {
    pub path: &'a str,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct NotFoundScreen;

impl Component<Action> for NotFoundScreen {
    type Props<'a> = NotFoundScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::Navigate(Route::Welcome)),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let text = Text::from(vec![
            Line::from(Span::styled(
                "404 Not Found",
                Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(props.path.to_string(), Style::default().fg(TEXT_DIM))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(ACCENT_TEAL)),
                Span::styled(" home  ", Style::default().fg(TEXT_DIM)),
                Span::styled("q", Style::default().fg(ACCENT_TEAL)),
                Span::styled(" quit", Style::default().fg(TEXT_DIM)),
            ]),
        ]);
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
    }
}
