use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::theme::{
    ACCENT_GOLD, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN,
};
use super::{badge_span, Component, SearchBar, SearchBarProps, TypeBadges, TypeBadgesProps};
use crate::action::Action;
use crate::state::{dex_number, AppState, CatalogEntry};

pub struct CatalogScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// List screen at `/pokedex`: filter bar, search field, paginated list.
pub struct CatalogScreen {
    list: SelectList,
    search: SearchBar,
    status_bar: StatusBar,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            search: SearchBar::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(entries: &[CatalogEntry]) -> Vec<Line<'static>> {
        entries
            .iter()
            .map(|entry| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:<6}", dex_number(entry.id)),
                        Style::default().fg(TEXT_DIM),
                    ),
                    Span::styled(
                        format!("{:<14}", entry.name.to_ascii_uppercase()),
                        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
                    ),
                ];
                for tag in &entry.tags {
                    spans.push(Span::raw(" "));
                    spans.push(badge_span(&tag.name));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: Some(TEXT_MAIN),
            },
            selection: SelectionStyle {
                style: Some(
                    Style::default()
                        .bg(BG_HIGHLIGHT)
                        .fg(TEXT_MAIN)
                        .add_modifier(Modifier::BOLD),
                ),
                marker: None,
                disabled: false,
            },
            ..SelectListStyle::default()
        }
    }

    fn list_behavior() -> SelectListBehavior {
        SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        }
    }

    /// Text shown instead of the list when there is nothing to select.
    fn placeholder(state: &AppState) -> Option<Text<'static>> {
        let catalog = &state.catalog;
        if let Some(error) = &catalog.error {
            return Some(Text::from(vec![
                Line::from(Span::styled(error.clone(), Style::default().fg(ERROR_RED))),
                Line::from(""),
                Line::from(vec![
                    Span::styled("r", Style::default().fg(ACCENT_TEAL)),
                    Span::styled(" retry", Style::default().fg(TEXT_DIM)),
                ]),
            ]));
        }
        if !catalog.entries.is_empty() {
            return None;
        }
        if catalog.loading {
            return Some(Text::from(Span::styled(
                "Loading Pokémon...",
                Style::default().fg(ACCENT_GOLD),
            )));
        }
        let message = match &catalog.active_tag {
            Some(tag) => format!("No Pokémon of type {tag}."),
            None => "No Pokémon to show.".to_string(),
        };
        Some(Text::from(Span::styled(message, Style::default().fg(TEXT_DIM))))
    }

    fn footer_line(state: &AppState) -> Line<'static> {
        let catalog = &state.catalog;
        if catalog.loading && !catalog.entries.is_empty() {
            Line::from(Span::styled("Loading more...", Style::default().fg(ACCENT_GOLD)))
        } else if catalog.has_more() && catalog.error.is_none() {
            Line::from(vec![
                Span::styled("n", Style::default().fg(ACCENT_TEAL)),
                Span::styled(" load more", Style::default().fg(TEXT_DIM)),
            ])
        } else {
            Line::from("")
        }
    }

    fn hints(search_active: bool) -> Vec<StatusBarHint<'static>> {
        if search_active {
            return vec![
                StatusBarHint::new("Enter", "search"),
                StatusBarHint::new("Esc", "cancel"),
            ];
        }
        vec![
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("[ ]", "type"),
            StatusBarHint::new("n", "more"),
            StatusBarHint::new("r", "reload"),
            StatusBarHint::new("L", "logout"),
            StatusBarHint::new("q", "quit"),
        ]
    }

    /// Entry count, or the last storage failure when there is one.
    fn status_span(state: &AppState) -> Span<'static> {
        if let Some(error) = &state.storage_error {
            return Span::styled(error.clone(), Style::default().fg(ERROR_RED));
        }
        let catalog = &state.catalog;
        let text = match catalog.total {
            Some(total) => format!("{} of {total} shown", catalog.entries.len()),
            None => format!("{} shown", catalog.entries.len()),
        };
        Span::styled(text, Style::default().fg(TEXT_DIM))
    }
}

impl Component<Action> for CatalogScreen {
    type Props<'a> = CatalogScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let catalog = &props.state.catalog;

        if catalog.search.active {
            let search_props = SearchBarProps {
                query: &catalog.search.query,
                is_focused: true,
                on_change: Action::CatalogSearchChange,
                on_submit: Action::CatalogSearch,
            };
            return self
                .search
                .handle_event(event, search_props)
                .into_iter()
                .collect();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        match key.code {
            KeyCode::Char('/') => vec![Action::CatalogSearchStart],
            KeyCode::Char('n') | KeyCode::PageDown => vec![Action::CatalogNextPage],
            KeyCode::Char(']') | KeyCode::Tab => vec![Action::CatalogFilterNext],
            KeyCode::Char('[') | KeyCode::BackTab => vec![Action::CatalogFilterPrev],
            KeyCode::Char('a') => vec![Action::CatalogFilter(None)],
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::CatalogReload],
            KeyCode::Char('L') => vec![Action::Logout],
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Enter => vec![Action::CatalogOpenSelected],
            _ => {
                let items = Self::items(&catalog.entries);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: catalog.selected.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: Self::list_style(),
                    behavior: Self::list_behavior(),
                    on_select: Action::CatalogSelect,
                    render_item: &|item| item.clone(),
                };
                self.list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let catalog = &state.catalog;
        let chunks = Layout::vertical([
            Constraint::Length(1), // Trainer
            Constraint::Length(2), // Type badges
            Constraint::Length(1), // Search
            Constraint::Min(3),    // List
            Constraint::Length(1), // Load more + count
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let trainer = state.trainer().unwrap_or_default();
        let header = Line::from(vec![
            Span::styled(
                "POKÉDEX",
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Trainer: ", Style::default().fg(TEXT_DIM)),
            Span::styled(trainer.to_string(), Style::default().fg(ACCENT_GOLD)),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let mut badges = TypeBadges;
        badges.render(
            frame,
            chunks[1],
            TypeBadgesProps {
                tags: &catalog.tags,
                active: catalog.active_tag.as_deref(),
                error: catalog.tag_error.as_deref(),
            },
        );

        self.search.render(
            frame,
            chunks[2],
            SearchBarProps {
                query: &catalog.search.query,
                is_focused: props.is_focused && catalog.search.active,
                on_change: Action::CatalogSearchChange,
                on_submit: Action::CatalogSearch,
            },
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" DEX  Enter open ")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let inner = block.inner(chunks[3]);
        frame.render_widget(block, chunks[3]);

        if let Some(text) = Self::placeholder(state) {
            let paragraph = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, inner);
        } else {
            let items = Self::items(&catalog.entries);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: catalog.selected.min(items.len().saturating_sub(1)),
                is_focused: props.is_focused && !catalog.search.active,
                style: Self::list_style(),
                behavior: Self::list_behavior(),
                on_select: Action::CatalogSelect,
                render_item: &|item| item.clone(),
            };
            self.list.render(frame, inner, list_props);
        }

        let [more_area, status_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(32)]).areas(chunks[4]);
        frame.render_widget(Paragraph::new(Self::footer_line(state)), more_area);
        frame.render_widget(
            Paragraph::new(Line::from(Self::status_span(state))).alignment(Alignment::Right),
            status_area,
        );

        let hints = Self::hints(catalog.search.active);
        Component::<Action>::render(
            &mut self.status_bar,
            frame,
            chunks[5],
            StatusBarProps {
                left: StatusBarSection::hints(&hints).with_separator("  "),
                center: StatusBarSection::empty(),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
