//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::ApiError;
use crate::effect::Effect;
use crate::route::{guard, Route};
use crate::session::Session;
use crate::state::{
    AppState, CatalogState, DetailState, PageCursor, SearchState, WelcomeState,
    DETAIL_FAILED_MESSAGE, EMPTY_TRAINER_NOTICE, LOAD_FAILED_MESSAGE, TYPES_FAILED_MESSAGE,
};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            // A trainer restored from storage resumes at the catalog.
            let route = match &state.route {
                Route::Welcome if state.session.is_active() => Route::Catalog,
                route => route.clone(),
            };
            DispatchResult::changed_with_many(enter_route(state, route))
        }

        Action::Navigate(route) => DispatchResult::changed_with_many(enter_route(state, route)),

        // ===== Welcome / session =====
        Action::WelcomeNameChange(name) => {
            state.welcome.name_input = name;
            state.welcome.notice = None;
            DispatchResult::changed()
        }

        Action::WelcomeSubmit => {
            let name = state.welcome.name_input.trim().to_string();
            if name.is_empty() {
                state.welcome.notice = Some(EMPTY_TRAINER_NOTICE.to_string());
                return DispatchResult::changed();
            }
            state.session = Session::new(name.clone());
            state.welcome = WelcomeState::default();
            let mut effects = vec![Effect::SaveTrainer { name }];
            effects.extend(enter_route(state, Route::Catalog));
            DispatchResult::changed_with_many(effects)
        }

        Action::Logout => {
            state.session = Session::default();
            state.welcome = WelcomeState::default();
            state.catalog.reset();
            reset_detail(&mut state.detail);
            state.route = Route::Welcome;
            DispatchResult::changed_with(Effect::ClearTrainer)
        }

        Action::SessionDidPersist => {
            if state.storage_error.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SessionDidError(error) => {
            state.storage_error = Some(error);
            DispatchResult::changed()
        }

        // ===== Catalog =====
        Action::CatalogReload => DispatchResult::changed_with(reload(&mut state.catalog)),

        Action::CatalogNextPage => next_page(&mut state.catalog),

        Action::CatalogSearch(name) => search(&mut state.catalog, &name),

        Action::CatalogFilter(tag) => {
            let catalog = &mut state.catalog;
            let tag = tag.filter(|tag| catalog.active_tag.as_ref() != Some(tag));
            apply_filter(catalog, tag)
        }

        Action::CatalogFilterNext => cycle_filter(&mut state.catalog, 1),
        Action::CatalogFilterPrev => cycle_filter(&mut state.catalog, -1),

        Action::CatalogSelect(index) => {
            if state.catalog.set_selected(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CatalogSelectionMove(delta) => {
            let index = (state.catalog.selected as i64 + i64::from(delta)).max(0) as usize;
            if state.catalog.set_selected(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CatalogOpenSelected => {
            let Some(entry) = state.catalog.selected_entry() else {
                return DispatchResult::unchanged();
            };
            let route = Route::detail(entry.name.clone());
            DispatchResult::changed_with_many(enter_route(state, route))
        }

        Action::CatalogSearchStart => {
            if state.catalog.search.active {
                return DispatchResult::unchanged();
            }
            state.catalog.search.active = true;
            DispatchResult::changed()
        }

        Action::CatalogSearchCancel => {
            if !state.catalog.search.active {
                return DispatchResult::unchanged();
            }
            state.catalog.search.active = false;
            DispatchResult::changed()
        }

        Action::CatalogSearchChange(query) => {
            if state.catalog.search.query == query {
                return DispatchResult::unchanged();
            }
            state.catalog.search.query = query;
            DispatchResult::changed()
        }

        Action::CatalogPageDidLoad {
            seq,
            offset,
            entries,
            next,
            total,
        } => {
            let catalog = &mut state.catalog;
            if !catalog.is_current(seq) {
                return DispatchResult::unchanged();
            }
            catalog.loading = false;
            catalog.offset = offset;
            catalog.apply_page(entries);
            catalog.next = next.map(PageCursor::Remote);
            catalog.total = Some(total);
            DispatchResult::changed()
        }

        Action::CatalogTypeMembersDidLoad { seq, tag, members } => {
            let catalog = &mut state.catalog;
            if !catalog.is_current(seq) || catalog.active_tag.as_ref() != Some(&tag) {
                return DispatchResult::unchanged();
            }
            catalog.type_cache.insert(tag, members.clone());
            catalog.total = Some(members.len());
            catalog.type_members = members;
            load_member_slice(catalog, seq, 0)
        }

        Action::CatalogEntriesDidLoad {
            seq,
            offset,
            entries,
        } => {
            let catalog = &mut state.catalog;
            if !catalog.is_current(seq) {
                return DispatchResult::unchanged();
            }
            catalog.loading = false;
            catalog.offset = offset;
            catalog.apply_page(entries);
            catalog.next = catalog.local_cursor();
            DispatchResult::changed()
        }

        Action::CatalogDidError { seq, error: _ } => {
            let catalog = &mut state.catalog;
            if !catalog.is_current(seq) {
                return DispatchResult::unchanged();
            }
            fail_catalog(catalog, LOAD_FAILED_MESSAGE.to_string());
            DispatchResult::changed()
        }

        Action::CatalogSearchDidLoad { seq, entry } => {
            let catalog = &mut state.catalog;
            if !catalog.is_current(seq) {
                return DispatchResult::unchanged();
            }
            catalog.loading = false;
            catalog.error = None;
            catalog.offset = 0;
            catalog.next = None;
            catalog.total = None;
            catalog.active_tag = None;
            catalog.type_members.clear();
            catalog.entries = vec![entry];
            catalog.selected = 0;
            DispatchResult::changed()
        }

        Action::CatalogSearchDidError { seq, name, error } => {
            let catalog = &mut state.catalog;
            if !catalog.is_current(seq) {
                return DispatchResult::unchanged();
            }
            fail_catalog(catalog, search_error_message(&name, &error));
            DispatchResult::changed()
        }

        Action::TypesDidLoad(tags) => {
            if !state.catalog.tags_requested {
                return DispatchResult::unchanged();
            }
            state.catalog.tags = tags;
            state.catalog.tag_error = None;
            DispatchResult::changed()
        }

        Action::TypesDidError(_) => {
            if !state.catalog.tags_requested {
                return DispatchResult::unchanged();
            }
            state.catalog.tag_error = Some(TYPES_FAILED_MESSAGE.to_string());
            DispatchResult::changed()
        }

        // ===== Detail =====
        Action::DetailLoad(identifier) => {
            DispatchResult::changed_with_many(load_detail(&mut state.detail, identifier.as_deref()))
        }

        Action::DetailRetry => {
            let Some(name) = state.detail.name.clone() else {
                return DispatchResult::unchanged();
            };
            if state.detail.record.is_loading() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(load_detail(&mut state.detail, Some(&name)))
        }

        Action::DetailDidLoad { seq, record } => {
            if seq != state.detail.request_seq {
                return DispatchResult::unchanged();
            }
            state.detail.record = DataResource::Loaded(record);
            DispatchResult::changed()
        }

        Action::DetailDidError { seq, name, error } => {
            if seq != state.detail.request_seq {
                return DispatchResult::unchanged();
            }
            state.detail.record = DataResource::Failed(detail_error_message(&name, &error));
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Moves to `route` after the session guard and returns the loads the new
/// screen needs.
fn enter_route(state: &mut AppState, route: Route) -> Vec<Effect> {
    let route = guard(route, &state.session);
    state.route = route.clone();
    match route {
        Route::Catalog => enter_catalog(&mut state.catalog),
        Route::Detail { name } => load_detail(&mut state.detail, Some(&name)),
        Route::Welcome | Route::NotFound { .. } => Vec::new(),
    }
}

/// The first visit in a session loads the list and the tag set; later
/// visits keep whatever is already on screen.
fn enter_catalog(catalog: &mut CatalogState) -> Vec<Effect> {
    if catalog.initialized {
        return Vec::new();
    }
    catalog.initialized = true;
    let mut effects = vec![reload(catalog)];
    if !catalog.tags_requested {
        catalog.tags_requested = true;
        effects.push(Effect::LoadTypes);
    }
    effects
}

fn reload(catalog: &mut CatalogState) -> Effect {
    catalog.initialized = true;
    catalog.offset = 0;
    catalog.next = None;
    catalog.active_tag = None;
    catalog.type_members.clear();
    let seq = catalog.begin_request();
    Effect::LoadPage {
        seq,
        offset: 0,
        limit: catalog.page_size,
    }
}

fn next_page(catalog: &mut CatalogState) -> DispatchResult<Effect> {
    if catalog.loading {
        return DispatchResult::unchanged();
    }
    match catalog.next.clone() {
        None => DispatchResult::unchanged(),
        Some(PageCursor::Remote(url)) => {
            let offset = PageCursor::remote_offset(&url)
                .unwrap_or(catalog.offset + catalog.page_size);
            let seq = catalog.begin_request();
            DispatchResult::changed_with(Effect::LoadPage {
                seq,
                offset,
                limit: catalog.page_size,
            })
        }
        Some(PageCursor::Local(offset)) => {
            let seq = catalog.begin_request();
            load_member_slice(catalog, seq, offset)
        }
    }
}

fn search(catalog: &mut CatalogState, name: &str) -> DispatchResult<Effect> {
    let term = name.trim().to_lowercase();
    catalog.search.active = false;
    if term.is_empty() {
        return DispatchResult::changed_with(reload(catalog));
    }
    let seq = catalog.begin_request();
    DispatchResult::changed_with(Effect::SearchByName { seq, name: term })
}

fn apply_filter(catalog: &mut CatalogState, tag: Option<String>) -> DispatchResult<Effect> {
    catalog.search = SearchState::default();
    let Some(tag) = tag else {
        return DispatchResult::changed_with(reload(catalog));
    };

    catalog.initialized = true;
    catalog.active_tag = Some(tag.clone());
    catalog.offset = 0;
    catalog.next = None;
    let seq = catalog.begin_request();
    if let Some(members) = catalog.type_cache.get(&tag).cloned() {
        catalog.total = Some(members.len());
        catalog.type_members = members;
        return load_member_slice(catalog, seq, 0);
    }
    catalog.type_members.clear();
    catalog.total = None;
    DispatchResult::changed_with(Effect::LoadTypeMembers { seq, tag })
}

/// Requests full records for one page of the held membership list. An
/// empty slice settles immediately.
fn load_member_slice(catalog: &mut CatalogState, seq: u64, offset: usize) -> DispatchResult<Effect> {
    let names = catalog.member_slice(offset);
    if names.is_empty() {
        catalog.loading = false;
        catalog.offset = offset;
        catalog.apply_page(Vec::new());
        catalog.next = None;
        return DispatchResult::changed();
    }
    DispatchResult::changed_with(Effect::LoadEntries { seq, offset, names })
}

fn cycle_filter(catalog: &mut CatalogState, step: i16) -> DispatchResult<Effect> {
    if catalog.tags.is_empty() {
        return DispatchResult::unchanged();
    }

    // Index 0 is "All"; tags follow in list order.
    let slots = catalog.tags.len() as i16 + 1;
    let current = catalog
        .active_tag
        .as_ref()
        .and_then(|name| catalog.tags.iter().position(|tag| &tag.name == name))
        .map(|index| index as i16 + 1)
        .unwrap_or(0);
    let next = (current + step).rem_euclid(slots);
    let tag = (next > 0).then(|| catalog.tags[(next - 1) as usize].name.clone());
    apply_filter(catalog, tag)
}

fn fail_catalog(catalog: &mut CatalogState, message: String) {
    catalog.loading = false;
    catalog.entries.clear();
    catalog.selected = 0;
    catalog.next = None;
    catalog.total = None;
    catalog.error = Some(message);
}

fn load_detail(detail: &mut DetailState, identifier: Option<&str>) -> Vec<Effect> {
    let name = identifier
        .map(|raw| raw.trim().to_lowercase())
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        reset_detail(detail);
        return Vec::new();
    };
    detail.request_seq += 1;
    detail.name = Some(name.clone());
    detail.record = DataResource::Loading;
    vec![Effect::LoadDetail {
        seq: detail.request_seq,
        name,
    }]
}

fn reset_detail(detail: &mut DetailState) {
    detail.request_seq += 1;
    detail.name = None;
    detail.record = DataResource::Empty;
}

fn search_error_message(name: &str, error: &ApiError) -> String {
    if error.is_not_found() {
        format!("No Pokémon found named \"{name}\".")
    } else {
        format!("Search for \"{name}\" failed. Try again.")
    }
}

fn detail_error_message(name: &str, error: &ApiError) -> String {
    if error.is_not_found() {
        format!("Pokémon '{name}' was not found.")
    } else {
        DETAIL_FAILED_MESSAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{artwork_url, CatalogEntry, CategoryTag, DetailRecord};
    use pretty_assertions::assert_eq;

    fn entry(id: u32, name: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            artwork_url: artwork_url(id),
            tags: vec![],
        }
    }

    fn signed_in() -> AppState {
        AppState::new(9, Session::new("Ash"), Route::Catalog)
    }

    fn record(id: u32, name: &str) -> DetailRecord {
        DetailRecord {
            id,
            name: name.to_string(),
            artwork_url: artwork_url(id),
            tags: vec![CategoryTag::new("electric")],
            height: 4,
            weight: 60,
            abilities: vec!["static".into()],
            stats: vec![],
            moves: vec![],
        }
    }

    #[test]
    fn test_init_on_catalog_loads_page_and_tags() {
        let mut state = signed_in();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.catalog.loading);
        assert_eq!(
            result.effects,
            vec![
                Effect::LoadPage {
                    seq: 1,
                    offset: 0,
                    limit: 9
                },
                Effect::LoadTypes,
            ]
        );
    }

    #[test]
    fn test_init_without_trainer_lands_on_welcome() {
        let mut state = AppState::new(9, Session::default(), Route::detail("pikachu"));
        let result = reducer(&mut state, Action::Init);

        assert_eq!(state.route, Route::Welcome);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_init_resumes_saved_trainer_at_catalog() {
        let mut state = AppState::new(9, Session::new("Ash"), Route::parse("/"));
        let result = reducer(&mut state, Action::Init);

        assert_eq!(state.route, Route::Catalog);
        assert_eq!(
            result.effects,
            vec![
                Effect::LoadPage {
                    seq: 1,
                    offset: 0,
                    limit: 9
                },
                Effect::LoadTypes,
            ]
        );
    }

    #[test]
    fn test_init_keeps_explicit_detail_route() {
        let mut state = AppState::new(9, Session::new("Ash"), Route::detail("mew"));
        reducer(&mut state, Action::Init);
        assert_eq!(state.route, Route::detail("mew"));
    }

    #[test]
    fn test_returning_to_catalog_keeps_list() {
        let mut state = signed_in();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                seq: 1,
                offset: 0,
                entries: vec![entry(1, "bulbasaur")],
                next: None,
                total: 1302,
            },
        );
        reducer(&mut state, Action::Navigate(Route::detail("bulbasaur")));
        let result = reducer(&mut state, Action::Navigate(Route::Catalog));

        assert!(result.effects.is_empty());
        assert_eq!(state.catalog.entries.len(), 1);
    }

    #[test]
    fn test_next_page_decodes_remote_offset() {
        let mut state = signed_in();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                seq: 1,
                offset: 0,
                entries: vec![entry(1, "bulbasaur")],
                next: Some("https://pokeapi.co/api/v2/pokemon?offset=9&limit=9".into()),
                total: 1302,
            },
        );

        let result = reducer(&mut state, Action::CatalogNextPage);
        assert_eq!(
            result.effects,
            vec![Effect::LoadPage {
                seq: 2,
                offset: 9,
                limit: 9
            }]
        );
    }

    #[test]
    fn test_next_page_falls_back_when_offset_missing() {
        let mut state = signed_in();
        state.catalog.offset = 9;
        state.catalog.next = Some(PageCursor::Remote("not a url".into()));

        let result = reducer(&mut state, Action::CatalogNextPage);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadPage { offset: 18, .. }]
        ));
    }

    #[test]
    fn test_next_page_is_noop_while_loading_or_exhausted() {
        let mut state = signed_in();
        assert!(!reducer(&mut state, Action::CatalogNextPage).changed);

        state.catalog.next = Some(PageCursor::Local(9));
        state.catalog.loading = true;
        let result = reducer(&mut state, Action::CatalogNextPage);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_stale_page_is_ignored() {
        let mut state = signed_in();
        reducer(&mut state, Action::Init);
        reducer(&mut state, Action::CatalogReload);

        let result = reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                seq: 1,
                offset: 0,
                entries: vec![entry(1, "bulbasaur")],
                next: None,
                total: 1302,
            },
        );
        assert!(!result.changed);
        assert!(state.catalog.entries.is_empty());
        assert!(state.catalog.loading);
    }

    #[test]
    fn test_load_failure_clears_list() {
        let mut state = signed_in();
        state.catalog.entries = vec![entry(1, "bulbasaur")];
        state.catalog.next = Some(PageCursor::Remote("x".into()));
        let seq = state.catalog.begin_request();

        reducer(
            &mut state,
            Action::CatalogDidError {
                seq,
                error: ApiError::Request("timeout".into()),
            },
        );
        assert!(state.catalog.entries.is_empty());
        assert!(!state.catalog.loading);
        assert!(!state.catalog.has_more());
        assert_eq!(state.catalog.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn test_blank_search_restores_default_list() {
        let mut state = signed_in();
        state.catalog.active_tag = Some("fire".into());
        let result = reducer(&mut state, Action::CatalogSearch("   ".into()));

        assert_eq!(state.catalog.active_tag, None);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadPage { offset: 0, .. }]
        ));
    }

    #[test]
    fn test_search_lowercases_and_replaces_list() {
        let mut state = signed_in();
        state.catalog.entries = vec![entry(1, "bulbasaur"), entry(4, "charmander")];
        state.catalog.error = Some("old".into());

        let result = reducer(&mut state, Action::CatalogSearch(" Pikachu ".into()));
        let seq = state.catalog.request_seq;
        assert_eq!(
            result.effects,
            vec![Effect::SearchByName {
                seq,
                name: "pikachu".into()
            }]
        );

        reducer(
            &mut state,
            Action::CatalogSearchDidLoad {
                seq,
                entry: entry(25, "pikachu"),
            },
        );
        assert_eq!(state.catalog.entries, vec![entry(25, "pikachu")]);
        assert_eq!(state.catalog.error, None);
        assert!(!state.catalog.has_more());
    }

    #[test]
    fn test_search_error_messages() {
        let mut state = signed_in();
        let seq = state.catalog.begin_request();
        reducer(
            &mut state,
            Action::CatalogSearchDidError {
                seq,
                name: "zzz".into(),
                error: ApiError::NotFound("pokemon/zzz".into()),
            },
        );
        assert_eq!(
            state.catalog.error.as_deref(),
            Some("No Pokémon found named \"zzz\".")
        );

        let seq = state.catalog.begin_request();
        reducer(
            &mut state,
            Action::CatalogSearchDidError {
                seq,
                name: "mew".into(),
                error: ApiError::Request("500".into()),
            },
        );
        assert_eq!(
            state.catalog.error.as_deref(),
            Some("Search for \"mew\" failed. Try again.")
        );
        assert!(state.catalog.entries.is_empty());
    }

    #[test]
    fn test_filter_fetches_members_then_first_slice() {
        let mut state = signed_in();
        state.catalog.search.query = "pika".into();

        let result = reducer(&mut state, Action::CatalogFilter(Some("fire".into())));
        let seq = state.catalog.request_seq;
        assert_eq!(state.catalog.search.query, "");
        assert_eq!(
            result.effects,
            vec![Effect::LoadTypeMembers {
                seq,
                tag: "fire".into()
            }]
        );

        let members: Vec<String> = (0..20).map(|i| format!("mon{i}")).collect();
        let result = reducer(
            &mut state,
            Action::CatalogTypeMembersDidLoad {
                seq,
                tag: "fire".into(),
                members: members.clone(),
            },
        );
        assert_eq!(
            result.effects,
            vec![Effect::LoadEntries {
                seq,
                offset: 0,
                names: members[..9].to_vec()
            }]
        );

        reducer(
            &mut state,
            Action::CatalogEntriesDidLoad {
                seq,
                offset: 0,
                entries: vec![entry(4, "mon0")],
            },
        );
        assert_eq!(state.catalog.next, Some(PageCursor::Local(9)));
        assert!(state.catalog.type_cache.contains_key("fire"));
    }

    #[test]
    fn test_cached_filter_skips_membership_fetch() {
        let mut state = signed_in();
        state
            .catalog
            .type_cache
            .insert("ice".into(), vec!["a".into(), "b".into()]);

        let result = reducer(&mut state, Action::CatalogFilter(Some("ice".into())));
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadEntries { offset: 0, names, .. }] if names.len() == 2
        ));
    }

    #[test]
    fn test_selecting_active_filter_toggles_to_all() {
        let mut state = signed_in();
        state.catalog.active_tag = Some("fire".into());

        let result = reducer(&mut state, Action::CatalogFilter(Some("fire".into())));
        assert_eq!(state.catalog.active_tag, None);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadPage { .. }]
        ));
    }

    #[test]
    fn test_empty_membership_settles_without_fetch() {
        let mut state = signed_in();
        reducer(&mut state, Action::CatalogFilter(Some("shadow".into())));
        let seq = state.catalog.request_seq;

        let result = reducer(
            &mut state,
            Action::CatalogTypeMembersDidLoad {
                seq,
                tag: "shadow".into(),
                members: vec![],
            },
        );
        assert!(result.effects.is_empty());
        assert!(!state.catalog.loading);
        assert!(state.catalog.entries.is_empty());
        assert!(!state.catalog.has_more());
    }

    #[test]
    fn test_filter_cycle_wraps_through_all() {
        let mut state = signed_in();
        state.catalog.tags = vec![CategoryTag::new("fire"), CategoryTag::new("water")];

        reducer(&mut state, Action::CatalogFilterNext);
        assert_eq!(state.catalog.active_tag.as_deref(), Some("fire"));
        reducer(&mut state, Action::CatalogFilterNext);
        assert_eq!(state.catalog.active_tag.as_deref(), Some("water"));
        reducer(&mut state, Action::CatalogFilterNext);
        assert_eq!(state.catalog.active_tag, None);
        reducer(&mut state, Action::CatalogFilterPrev);
        assert_eq!(state.catalog.active_tag.as_deref(), Some("water"));
    }

    #[test]
    fn test_blank_trainer_name_shows_notice() {
        let mut state = AppState::default();
        state.welcome.name_input = "   ".into();

        let result = reducer(&mut state, Action::WelcomeSubmit);
        assert!(result.effects.is_empty());
        assert_eq!(state.welcome.notice.as_deref(), Some(EMPTY_TRAINER_NOTICE));
        assert_eq!(state.route, Route::Welcome);
        assert!(!state.session.is_active());
    }

    #[test]
    fn test_submit_trainer_persists_and_enters_catalog() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WelcomeNameChange(" Misty ".into()));
        let result = reducer(&mut state, Action::WelcomeSubmit);

        assert_eq!(state.trainer(), Some("Misty"));
        assert_eq!(state.route, Route::Catalog);
        assert_eq!(
            result.effects[0],
            Effect::SaveTrainer {
                name: "Misty".into()
            }
        );
        assert!(result
            .effects
            .iter()
            .any(|effect| matches!(effect, Effect::LoadPage { .. })));
    }

    #[test]
    fn test_logout_resets_and_guards() {
        let mut state = signed_in();
        reducer(&mut state, Action::Init);
        let stale = state.catalog.request_seq;

        let result = reducer(&mut state, Action::Logout);
        assert_eq!(result.effects, vec![Effect::ClearTrainer]);
        assert_eq!(state.route, Route::Welcome);
        assert!(!state.catalog.is_current(stale));

        reducer(&mut state, Action::Navigate(Route::Catalog));
        assert_eq!(state.route, Route::Welcome);
        reducer(&mut state, Action::Navigate(Route::detail("x")));
        assert_eq!(state.route, Route::Welcome);
    }

    #[test]
    fn test_detail_blank_identifier_clears_without_fetch() {
        let mut state = signed_in();
        state.detail.name = Some("mew".into());
        state.detail.record = DataResource::Failed("old".into());

        let result = reducer(&mut state, Action::DetailLoad(Some("  ".into())));
        assert!(result.effects.is_empty());
        assert!(state.detail.record.is_empty());
        assert_eq!(state.detail.name, None);
    }

    #[test]
    fn test_detail_not_found_message() {
        let mut state = signed_in();
        let result = reducer(&mut state, Action::DetailLoad(Some("MissingNo".into())));
        let seq = state.detail.request_seq;
        assert_eq!(
            result.effects,
            vec![Effect::LoadDetail {
                seq,
                name: "missingno".into()
            }]
        );

        reducer(
            &mut state,
            Action::DetailDidError {
                seq,
                name: "missingno".into(),
                error: ApiError::NotFound("pokemon/missingno".into()),
            },
        );
        assert_eq!(
            state.detail.record.error(),
            Some("Pokémon 'missingno' was not found.")
        );
    }

    #[test]
    fn test_detail_generic_failure_and_retry() {
        let mut state = signed_in();
        reducer(&mut state, Action::Navigate(Route::detail("pikachu")));
        let seq = state.detail.request_seq;
        reducer(
            &mut state,
            Action::DetailDidError {
                seq,
                name: "pikachu".into(),
                error: ApiError::Request("timeout".into()),
            },
        );
        assert_eq!(state.detail.record.error(), Some(DETAIL_FAILED_MESSAGE));

        let result = reducer(&mut state, Action::DetailRetry);
        assert!(state.detail.record.is_loading());
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadDetail { name, .. }] if name == "pikachu"
        ));
    }

    #[test]
    fn test_stale_detail_is_ignored() {
        let mut state = signed_in();
        reducer(&mut state, Action::DetailLoad(Some("pikachu".into())));
        let first = state.detail.request_seq;
        reducer(&mut state, Action::DetailLoad(Some("mew".into())));

        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                seq: first,
                record: record(25, "pikachu"),
            },
        );
        assert!(!result.changed);
        assert!(state.detail.record.is_loading());
        assert_eq!(state.detail.name.as_deref(), Some("mew"));
    }

    #[test]
    fn test_open_selected_navigates_to_detail() {
        let mut state = signed_in();
        state.catalog.entries = vec![entry(1, "bulbasaur"), entry(4, "charmander")];
        reducer(&mut state, Action::CatalogSelectionMove(1));
        let result = reducer(&mut state, Action::CatalogOpenSelected);

        assert_eq!(state.route, Route::detail("charmander"));
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadDetail { name, .. }] if name == "charmander"
        ));
    }
}
