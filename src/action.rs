//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::route::Route;
use crate::state::{CatalogEntry, CategoryTag, DetailRecord};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Enter the start route through the session guard
    Init,
    Navigate(Route),

    // ===== Welcome / session =====
    WelcomeNameChange(String),
    WelcomeSubmit,
    Logout,
    SessionDidPersist,
    SessionDidError(String),

    // ===== Catalog =====
    /// Unfiltered first page; also the retry control
    CatalogReload,
    CatalogNextPage,
    CatalogSearch(String),
    CatalogFilter(Option<String>),
    CatalogFilterNext,
    CatalogFilterPrev,
    CatalogSelect(usize),
    CatalogSelectionMove(i16),
    CatalogOpenSelected,

    CatalogSearchStart,
    CatalogSearchCancel,
    CatalogSearchChange(String),

    CatalogPageDidLoad {
        seq: u64,
        offset: usize,
        entries: Vec<CatalogEntry>,
        next: Option<String>,
        /// Size of the whole collection as reported by the server.
        total: usize,
    },
    CatalogTypeMembersDidLoad {
        seq: u64,
        tag: String,
        members: Vec<String>,
    },
    CatalogEntriesDidLoad {
        seq: u64,
        offset: usize,
        entries: Vec<CatalogEntry>,
    },
    CatalogDidError {
        seq: u64,
        error: ApiError,
    },
    CatalogSearchDidLoad {
        seq: u64,
        entry: CatalogEntry,
    },
    CatalogSearchDidError {
        seq: u64,
        name: String,
        error: ApiError,
    },

    TypesDidLoad(Vec<CategoryTag>),
    TypesDidError(ApiError),

    // ===== Detail =====
    DetailLoad(Option<String>),
    DetailRetry,
    DetailDidLoad {
        seq: u64,
        record: DetailRecord,
    },
    DetailDidError {
        seq: u64,
        name: String,
        error: ApiError,
    },

    // ===== Uncategorized (global) =====
    /// Force a re-render
    Render,
    Quit,
}
