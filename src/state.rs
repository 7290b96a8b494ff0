//! Application state - single source of truth

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::route::Route;
use crate::session::Session;

/// Entries fetched per page, both for remote and type-filtered pagination.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Upper bound of a base stat, used to scale stat bars.
pub const MAX_BASE_STAT: u16 = 255;

const ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

pub const LOAD_FAILED_MESSAGE: &str = "Could not load Pokémon. Try again.";
pub const TYPES_FAILED_MESSAGE: &str = "Could not load Pokémon types.";
pub const DETAIL_FAILED_MESSAGE: &str = "Could not load Pokémon details. Try again.";
pub const EMPTY_TRAINER_NOTICE: &str = "Trainer name cannot be empty!";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct CategoryTag {
    pub name: String,
}

impl CategoryTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One creature as shown in the catalog list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub artwork_url: String,
    pub tags: Vec<CategoryTag>,
}

impl CatalogEntry {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BaseStat {
    pub name: String,
    pub value: u16,
}

impl BaseStat {
    /// Fill ratio of a stat bar, clamped to `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        f64::from(self.value.min(MAX_BASE_STAT)) / f64::from(MAX_BASE_STAT)
    }
}

/// Full record shown on the detail screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailRecord {
    pub id: u32,
    pub name: String,
    pub artwork_url: String,
    pub tags: Vec<CategoryTag>,
    /// Decimetres.
    pub height: u16,
    /// Hectograms.
    pub weight: u16,
    pub abilities: Vec<String>,
    pub stats: Vec<BaseStat>,
    pub moves: Vec<String>,
}

impl DetailRecord {
    pub fn summary(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id,
            name: self.name.clone(),
            artwork_url: artwork_url(self.id),
            tags: self.tags.clone(),
        }
    }

    pub fn height_label(&self) -> String {
        format!("{:.1} m", f64::from(self.height) / 10.0)
    }

    pub fn weight_label(&self) -> String {
        format!("{:.1} kg", f64::from(self.weight) / 10.0)
    }
}

pub fn artwork_url(id: u32) -> String {
    format!("{ARTWORK_BASE}/{id}.png")
}

/// `25` -> `#025`
pub fn dex_number(id: u32) -> String {
    format!("#{id:03}")
}

/// `special-attack` -> `SPECIAL ATTACK`
pub fn display_label(name: &str) -> String {
    name.replace('-', " ").to_uppercase()
}

/// Where the next "load more" request starts.
///
/// Remote pages are addressed by the URL the collection endpoint hands back;
/// type-filtered pages by an offset into the membership list held in state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PageCursor {
    Remote(String),
    Local(usize),
}

impl PageCursor {
    /// Decodes the `offset` query parameter of a remote next-page URL.
    pub fn remote_offset(url: &str) -> Option<usize> {
        let url = reqwest::Url::parse(url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "offset")
            .and_then(|(_, value)| value.parse().ok())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct CatalogState {
    pub entries: Vec<CatalogEntry>,
    pub loading: bool,
    pub error: Option<String>,
    pub offset: usize,
    pub next: Option<PageCursor>,
    /// Size of the collection being paged: the server count unfiltered, the
    /// membership length under a filter.
    pub total: Option<usize>,
    pub page_size: usize,
    pub tags: Vec<CategoryTag>,
    pub tags_requested: bool,
    pub tag_error: Option<String>,
    pub active_tag: Option<String>,
    /// Membership of the active tag; only meaningful while `active_tag` is set.
    pub type_members: Vec<String>,
    pub type_cache: HashMap<String, Vec<String>>,
    pub request_seq: u64,
    pub selected: usize,
    pub search: SearchState,
    pub initialized: bool,
}

impl CatalogState {
    pub fn new(page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            loading: false,
            error: None,
            offset: 0,
            next: None,
            total: None,
            page_size: page_size.max(1),
            tags: Vec::new(),
            tags_requested: false,
            tag_error: None,
            active_tag: None,
            type_members: Vec::new(),
            type_cache: HashMap::new(),
            request_seq: 0,
            selected: 0,
            search: SearchState::default(),
            initialized: false,
        }
    }

    /// Starts a new request and returns its sequence number.
    pub fn begin_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.loading = true;
        self.error = None;
        self.request_seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.request_seq
    }

    /// Back to a fresh session; anything still in flight is discarded.
    pub fn reset(&mut self) {
        let request_seq = self.request_seq + 1;
        *self = Self::new(self.page_size);
        self.request_seq = request_seq;
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub fn member_slice(&self, offset: usize) -> Vec<String> {
        self.type_members
            .iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect()
    }

    pub fn local_cursor(&self) -> Option<PageCursor> {
        let next = self.offset + self.page_size;
        (next < self.type_members.len()).then_some(PageCursor::Local(next))
    }

    /// Replaces the list on the first page, appends afterwards. Ids already
    /// on screen are skipped.
    pub fn apply_page(&mut self, entries: Vec<CatalogEntry>) {
        if self.offset == 0 {
            self.entries = entries;
            self.selected = 0;
            return;
        }
        for entry in entries {
            if !self.entries.iter().any(|existing| existing.id == entry.id) {
                self.entries.push(entry);
            }
        }
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.entries.get(self.selected)
    }

    pub fn set_selected(&mut self, index: usize) -> bool {
        if self.entries.is_empty() {
            self.selected = 0;
            return false;
        }
        let bounded = index.min(self.entries.len() - 1);
        if bounded != self.selected {
            self.selected = bounded;
            return true;
        }
        false
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct DetailState {
    /// Normalized identifier of the record being shown.
    pub name: Option<String>,
    pub record: DataResource<DetailRecord>,
    pub request_seq: u64,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            name: None,
            record: DataResource::Empty,
            request_seq: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WelcomeState {
    pub name_input: String,
    pub notice: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub route: Route,
    pub session: Session,
    pub welcome: WelcomeState,
    pub catalog: CatalogState,
    pub detail: DetailState,
    /// Last durable-storage failure, shown in the status bar.
    pub storage_error: Option<String>,
}

impl AppState {
    pub fn new(page_size: usize, session: Session, route: Route) -> Self {
        Self {
            route,
            session,
            welcome: WelcomeState::default(),
            catalog: CatalogState::new(page_size),
            detail: DetailState::default(),
            storage_error: None,
        }
    }

    pub fn trainer(&self) -> Option<&str> {
        self.session.trainer.as_deref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, Session::default(), Route::Welcome)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Session")
                .entry("route", ron_string(&self.route.path()))
                .entry("trainer", ron_string(&self.session.trainer))
                .entry("storage_error", ron_string(&self.storage_error)),
            DebugSection::new("Catalog")
                .entry("entries", ron_string(&self.catalog.entries.len()))
                .entry("offset", ron_string(&self.catalog.offset))
                .entry("next", ron_string(&self.catalog.next))
                .entry("total", ron_string(&self.catalog.total))
                .entry("filter", ron_string(&self.catalog.active_tag))
                .entry("members", ron_string(&self.catalog.type_members.len()))
                .entry("seq", ron_string(&self.catalog.request_seq))
                .entry("loading", ron_string(&self.catalog.loading))
                .entry("error", ron_string(&self.catalog.error)),
            DebugSection::new("Detail")
                .entry("name", ron_string(&self.detail.name))
                .entry("loading", ron_string(&self.detail.record.is_loading()))
                .entry("error", ron_string(&self.detail.record.error()))
                .entry("seq", ron_string(&self.detail.request_seq)),
        ]
    }
}
