use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
    TextInput, TextInputProps,
};

use super::theme::{input_style, ACCENT_TEAL, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN};
use super::{ui_render, Component};
use crate::action::Action;

const PLACEHOLDER: &str = "Your trainer name";

pub struct WelcomeScreenProps<'a> {
    pub name_input: &'a str,
    pub notice: Option<&'a str>,
    pub is_focused: bool,
}

fn submit_trainer(_: String) -> Action {
    Action::WelcomeSubmit
}

/// Trainer name form shown at `/`.
pub struct WelcomeScreen {
    input: TextInput,
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl WelcomeScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WelcomeScreen {
    type Props<'a> = WelcomeScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
                return vec![Action::Quit];
            }
        }
        let input_props = TextInputProps {
            value: props.name_input,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: Action::WelcomeNameChange,
            on_submit: submit_trainer,
            on_cursor_move: Some(ui_render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        let form_area = centered_rect(50, 9, chunks[0]);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" POKÉDEX ")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_TEAL));
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // Greeting
            Constraint::Length(1), // Prompt
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Notice
        ])
        .split(inner);

        let greeting = Line::from(Span::styled(
            "Welcome, Trainer!",
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(greeting), rows[0]);

        let prompt = Line::from(Span::styled(
            "Enter your name to open the Pokédex.",
            Style::default().fg(TEXT_DIM),
        ))
        .centered();
        frame.render_widget(Paragraph::new(prompt), rows[1]);

        let input_props = TextInputProps {
            value: props.name_input,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: Action::WelcomeNameChange,
            on_submit: submit_trainer,
            on_cursor_move: Some(ui_render),
        };
        self.input.render(frame, rows[3], input_props);

        if let Some(notice) = props.notice {
            let line = Line::from(Span::styled(notice, Style::default().fg(ERROR_RED))).centered();
            frame.render_widget(Paragraph::new(line), rows[5]);
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "enter"),
                    StatusBarHint::new("Esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
