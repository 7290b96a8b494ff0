//! Trainer Pokédex - terminal catalog over PokeAPI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend, layout::Rect, style::Style, widgets::Block, Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api::{self, PokeApi, DEFAULT_BASE_URL};
use pokedex::components::{
    theme, CatalogScreen, CatalogScreenProps, Component, DetailScreen, DetailScreenProps,
    NotFoundScreen, NotFoundScreenProps, WelcomeScreen, WelcomeScreenProps,
};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::reducer::reducer;
use pokedex::route::Route;
use pokedex::session::{self, Session, SessionStore};
use pokedex::state::AppState;

/// Trainer Pokédex - browse, filter and search PokeAPI from the terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI catalog as a named trainer")]
struct Args {
    /// PokeAPI base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Entries fetched per page
    #[arg(long, default_value = "9", value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Directory holding the saved trainer name
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Start location, e.g. `/pokedex` or `/pokedex/pikachu`
    #[arg(long, default_value = "/")]
    route: String,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ScreenId {
    Welcome,
    Catalog,
    Detail,
    NotFound,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ScreenContext {
    Welcome,
    Catalog,
    Detail,
    NotFound,
}

impl EventRoutingState<ScreenId, ScreenContext> for AppState {
    fn focused(&self) -> Option<ScreenId> {
        Some(match self.route {
            Route::Welcome => ScreenId::Welcome,
            Route::Catalog => ScreenId::Catalog,
            Route::Detail { .. } => ScreenId::Detail,
            Route::NotFound { .. } => ScreenId::NotFound,
        })
    }

    fn modal(&self) -> Option<ScreenId> {
        None
    }

    fn binding_context(&self, id: ScreenId) -> ScreenContext {
        match id {
            ScreenId::Welcome => ScreenContext::Welcome,
            ScreenId::Catalog => ScreenContext::Catalog,
            ScreenId::Detail => ScreenContext::Detail,
            ScreenId::NotFound => ScreenContext::NotFound,
        }
    }

    fn default_context(&self) -> ScreenContext {
        ScreenContext::Welcome
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        page_size,
        timeout_secs,
        storage_dir,
        route,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        logging::init(path)?;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let client = PokeApi::new(&base_url, Duration::from_secs(timeout_secs)).map_err(io::Error::other)?;
    api::install(client);
    session::install(SessionStore::new(
        storage_dir.unwrap_or_else(SessionStore::default_dir),
    ));

    let start = Route::parse(&route);
    let state = debug
        .load_state_or_else_async(move || async move {
            let session = match session::store().load().await {
                Ok(session) => session,
                Err(error) => {
                    tracing::warn!(%error, "could not read saved trainer");
                    Session::default()
                }
            };
            Ok::<AppState, io::Error>(AppState::new(page_size as usize, session, start))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct PokedexUi {
    welcome: WelcomeScreen,
    catalog: CatalogScreen,
    detail: DetailScreen,
    not_found: NotFoundScreen,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            welcome: WelcomeScreen::new(),
            catalog: CatalogScreen::new(),
            detail: DetailScreen::new(),
            not_found: NotFoundScreen,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ScreenId>,
    ) {
        frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);
        event_ctx.component_areas.clear();
        let is_focused = render_ctx.is_focused();

        match &state.route {
            Route::Welcome => {
                event_ctx.set_component_area(ScreenId::Welcome, area);
                let props = WelcomeScreenProps {
                    name_input: &state.welcome.name_input,
                    notice: state.welcome.notice.as_deref(),
                    is_focused,
                };
                self.welcome.render(frame, area, props);
            }
            Route::Catalog => {
                event_ctx.set_component_area(ScreenId::Catalog, area);
                let props = CatalogScreenProps { state, is_focused };
                self.catalog.render(frame, area, props);
            }
            Route::Detail { .. } => {
                event_ctx.set_component_area(ScreenId::Detail, area);
                let props = DetailScreenProps {
                    detail: &state.detail,
                    is_focused,
                };
                self.detail.render(frame, area, props);
            }
            Route::NotFound { path } => {
                event_ctx.set_component_area(ScreenId::NotFound, area);
                let props = NotFoundScreenProps { path, is_focused };
                self.not_found.render(frame, area, props);
            }
        }
    }

    fn handle_event(
        &mut self,
        id: ScreenId,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<Action> = match id {
            ScreenId::Welcome => {
                let props = WelcomeScreenProps {
                    name_input: &state.welcome.name_input,
                    notice: state.welcome.notice.as_deref(),
                    is_focused: true,
                };
                self.welcome.handle_event(event, props).into_iter().collect()
            }
            ScreenId::Catalog => {
                let props = CatalogScreenProps {
                    state,
                    is_focused: true,
                };
                self.catalog.handle_event(event, props).into_iter().collect()
            }
            ScreenId::Detail => {
                let props = DetailScreenProps {
                    detail: &state.detail,
                    is_focused: true,
                };
                self.detail.handle_event(event, props).into_iter().collect()
            }
            ScreenId::NotFound => {
                let path = match &state.route {
                    Route::NotFound { path } => path.as_str(),
                    _ => "",
                };
                let props = NotFoundScreenProps {
                    path,
                    is_focused: true,
                };
                self.not_found
                    .handle_event(event, props)
                    .into_iter()
                    .collect()
            }
        };
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, ScreenId, ScreenContext> = EventBus::new();
    let keybindings: Keybindings<ScreenContext> = Keybindings::new();

    for id in [
        ScreenId::Welcome,
        ScreenId::Catalog,
        ScreenId::Detail,
        ScreenId::NotFound,
    ] {
        let ui_screen = Rc::clone(&ui);
        bus.register(id, move |event, state| {
            ui_screen.borrow_mut().handle_event(id, &event.kind, state)
        });
    }

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Every catalog request shares one key so
/// a newer request aborts the one in flight.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadPage { seq, offset, limit } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::client().fetch_catalog_page(limit, offset).await {
                    Ok(page) => Action::CatalogPageDidLoad {
                        seq,
                        offset,
                        entries: page.entries,
                        next: page.next,
                        total: page.count as usize,
                    },
                    Err(error) => {
                        tracing::warn!(%error, offset, "catalog page failed");
                        Action::CatalogDidError { seq, error }
                    }
                }
            });
        }
        Effect::LoadTypeMembers { seq, tag } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::client().fetch_type_members(&tag).await {
                    Ok(members) => Action::CatalogTypeMembersDidLoad { seq, tag, members },
                    Err(error) => {
                        tracing::warn!(%error, %tag, "type membership failed");
                        Action::CatalogDidError { seq, error }
                    }
                }
            });
        }
        Effect::LoadEntries { seq, offset, names } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::client().fetch_entries(&names).await {
                    Ok(entries) => Action::CatalogEntriesDidLoad {
                        seq,
                        offset,
                        entries,
                    },
                    Err(error) => {
                        tracing::warn!(%error, offset, "filtered page failed");
                        Action::CatalogDidError { seq, error }
                    }
                }
            });
        }
        Effect::SearchByName { seq, name } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::client().fetch_record(&name).await {
                    Ok(record) => Action::CatalogSearchDidLoad {
                        seq,
                        entry: record.summary(),
                    },
                    Err(error) => {
                        tracing::debug!(%error, %name, "search failed");
                        Action::CatalogSearchDidError { seq, name, error }
                    }
                }
            });
        }
        Effect::LoadTypes => {
            ctx.tasks().spawn(TaskKey::new("types"), async {
                match api::client().fetch_types().await {
                    Ok(tags) => Action::TypesDidLoad(tags),
                    Err(error) => {
                        tracing::warn!(%error, "type list failed");
                        Action::TypesDidError(error)
                    }
                }
            });
        }
        Effect::LoadDetail { seq, name } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match api::client().fetch_record(&name).await {
                    Ok(record) => Action::DetailDidLoad { seq, record },
                    Err(error) => {
                        tracing::warn!(%error, %name, "detail failed");
                        Action::DetailDidError { seq, name, error }
                    }
                }
            });
        }
        Effect::SaveTrainer { name } => {
            ctx.tasks().spawn(TaskKey::new("session"), async move {
                match session::store().save(&name).await {
                    Ok(()) => Action::SessionDidPersist,
                    Err(error) => {
                        tracing::warn!(%error, "could not save trainer");
                        Action::SessionDidError(error.to_string())
                    }
                }
            });
        }
        Effect::ClearTrainer => {
            ctx.tasks().spawn(TaskKey::new("session"), async {
                match session::store().clear().await {
                    Ok(()) => Action::SessionDidPersist,
                    Err(error) => {
                        tracing::warn!(%error, "could not clear trainer");
                        Action::SessionDidError(error.to_string())
                    }
                }
            });
        }
    }
}
