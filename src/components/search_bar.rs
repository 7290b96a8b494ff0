use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{layout::Rect, Frame};
use tui_dispatch::EventKind;
use tui_dispatch_components::{TextInput, TextInputProps};

use super::theme::input_style;
use super::{ui_render, Component};
use crate::action::Action;

const PLACEHOLDER: &str = "Search by name (press /)";

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

/// Name search field above the catalog list. Submitting sends the raw
/// query; trimming and lower-casing happen in the reducer.
pub struct SearchBar {
    input: TextInput,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

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
                return vec![Action::CatalogSearchCancel];
            }
        }
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(ui_render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(ui_render),
        };
        self.input.render(frame, area, input_props);
    }
}
