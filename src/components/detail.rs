use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::theme::{ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN};
use super::{badge_span, Component};
use crate::action::Action;
use crate::route::Route;
use crate::state::{dex_number, display_label, BaseStat, DetailRecord, DetailState};
use crate::type_icons::icon_for;

const STAT_BAR_WIDTH: usize = 24;

pub struct DetailScreenProps<'a> {
    pub detail: &'a DetailState,
    pub is_focused: bool,
}

/// Full record for `/pokedex/{name}`.
pub struct DetailScreen {
    status_bar: StatusBar,
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

fn stat_line(stat: &BaseStat) -> Line<'static> {
    let filled = (stat.ratio() * STAT_BAR_WIDTH as f64).round() as usize;
    Line::from(vec![
        Span::styled(
            format!("{:<16}", display_label(&stat.name)),
            Style::default().fg(TEXT_DIM),
        ),
        Span::styled(format!("{:>3} ", stat.value), Style::default().fg(TEXT_MAIN)),
        Span::styled("█".repeat(filled), Style::default().fg(ACCENT_TEAL)),
        Span::styled(
            "░".repeat(STAT_BAR_WIDTH - filled),
            Style::default().fg(TEXT_DIM),
        ),
    ])
}

fn profile_text(record: &DetailRecord) -> Text<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(TEXT_MAIN);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Height   ", label),
            Span::styled(record.height_label(), value),
        ]),
        Line::from(vec![
            Span::styled("Weight   ", label),
            Span::styled(record.weight_label(), value),
        ]),
        Line::from(""),
        Line::from(Span::styled("ABILITIES", Style::default().fg(ACCENT_GOLD))),
    ];
    lines.extend(
        record
            .abilities
            .iter()
            .map(|ability| Line::from(Span::styled(format!("  {}", display_label(ability)), value))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("TYPES", Style::default().fg(ACCENT_GOLD))));
    for tag in &record.tags {
        let icon = icon_for(&tag.name);
        lines.push(Line::from(Span::styled(
            format!("  {} {}", icon.glyph, display_label(&tag.name)),
            Style::default().fg(icon.color),
        )));
        lines.push(Line::from(Span::styled(format!("    {}", icon.asset), label)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("ARTWORK", Style::default().fg(ACCENT_GOLD))));
    lines.push(Line::from(Span::styled(record.artwork_url.clone(), label)));
    Text::from(lines)
}

fn moves_text(record: &DetailRecord) -> Text<'static> {
    if record.moves.is_empty() {
        return Text::from(Span::styled("No moves.", Style::default().fg(TEXT_DIM)));
    }
    Text::from(
        record
            .moves
            .iter()
            .map(|name| {
                Line::from(Span::styled(
                    display_label(name),
                    Style::default().fg(TEXT_MAIN),
                ))
            })
            .collect::<Vec<_>>(),
    )
}

fn panel(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
}

impl DetailScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_record(frame: &mut Frame, area: Rect, record: &DetailRecord) {
        let rows = Layout::vertical([
            Constraint::Length(2), // Title + badges
            Constraint::Min(8),    // Panels
        ])
        .split(area);

        let mut title = vec![
            Span::styled(
                format!("{} ", dex_number(record.id)),
                Style::default().fg(TEXT_DIM),
            ),
            Span::styled(
                record.name.to_ascii_uppercase(),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ];
        for tag in &record.tags {
            title.push(badge_span(&tag.name));
            title.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(title)), rows[0]);

        let columns =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(rows[1]);
        let right = Layout::vertical([
            Constraint::Length(record.stats.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(columns[1]);

        frame.render_widget(
            Paragraph::new(profile_text(record))
                .block(panel(" PROFILE "))
                .wrap(Wrap { trim: true }),
            columns[0],
        );

        let stats: Vec<Line<'static>> = record.stats.iter().map(stat_line).collect();
        frame.render_widget(
            Paragraph::new(Text::from(stats)).block(panel(" BASE STATS ")),
            right[0],
        );

        frame.render_widget(
            Paragraph::new(moves_text(record))
                .block(panel(" MOVES "))
                .wrap(Wrap { trim: true }),
            right[1],
        );
    }

    fn render_message(frame: &mut Frame, area: Rect, text: Text<'static>) {
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl Component<Action> for DetailScreen {
    type Props<'a> = DetailScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Action::Navigate(Route::Catalog))
                }
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::DetailRetry),
                KeyCode::Char('L') => Some(Action::Logout),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let body = chunks[0];

        match &props.detail.record {
            DataResource::Loaded(record) => Self::render_record(frame, body, record),
            DataResource::Loading => {
                let name = props.detail.name.as_deref().unwrap_or_default();
                Self::render_message(
                    frame,
                    body,
                    Text::from(Span::styled(
                        format!("Loading {name}..."),
                        Style::default().fg(ACCENT_GOLD),
                    )),
                );
            }
            DataResource::Failed(error) => {
                Self::render_message(
                    frame,
                    body,
                    Text::from(vec![
                        Line::from(Span::styled(error.clone(), Style::default().fg(ERROR_RED))),
                        Line::from(""),
                        Line::from(vec![
                            Span::styled("r", Style::default().fg(ACCENT_TEAL)),
                            Span::styled(" retry  ", Style::default().fg(TEXT_DIM)),
                            Span::styled("Esc", Style::default().fg(ACCENT_TEAL)),
                            Span::styled(" back to list", Style::default().fg(TEXT_DIM)),
                        ]),
                    ]),
                );
            }
            DataResource::Empty => {
                Self::render_message(
                    frame,
                    body,
                    Text::from(Span::styled(
                        "No Pokémon selected.",
                        Style::default().fg(TEXT_DIM),
                    )),
                );
            }
        }

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Esc", "back"),
                    StatusBarHint::new("r", "retry"),
                    StatusBarHint::new("L", "logout"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
