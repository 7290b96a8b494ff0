//! Navigation locations and the session guard

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::Session;

const CATALOG_PATH: &str = "/pokedex";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Route {
    #[default]
    Welcome,
    Catalog,
    Detail {
        name: String,
    },
    NotFound {
        path: String,
    },
}

impl Route {
    pub fn detail(name: impl Into<String>) -> Self {
        Route::Detail { name: name.into() }
    }

    /// `/` -> welcome, `/pokedex` -> catalog, `/pokedex/{name}` -> detail.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Welcome,
            ["pokedex"] => Route::Catalog,
            ["pokedex", name] => Route::detail(*name),
            _ => Route::NotFound {
                path: trimmed.to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Welcome => "/".to_string(),
            Route::Catalog => CATALOG_PATH.to_string(),
            Route::Detail { name } => format!("{CATALOG_PATH}/{name}"),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Catalog | Route::Detail { .. })
    }
}

/// Catalog and detail are only reachable with a trainer in session.
pub fn guard(route: Route, session: &Session) -> Route {
    if route.requires_session() && !session.is_active() {
        Route::Welcome
    } else {
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_locations() {
        assert_eq!(Route::parse("/"), Route::Welcome);
        assert_eq!(Route::parse(""), Route::Welcome);
        assert_eq!(Route::parse("/pokedex"), Route::Catalog);
        assert_eq!(Route::parse("/pokedex/"), Route::Catalog);
        assert_eq!(Route::parse("/pokedex/pikachu"), Route::detail("pikachu"));
    }

    #[test]
    fn test_parse_unknown_location() {
        assert_eq!(
            Route::parse("/berries"),
            Route::NotFound {
                path: "/berries".into()
            }
        );
        assert!(matches!(
            Route::parse("/pokedex/pikachu/moves"),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn test_path_round_trips_for_detail() {
        let route = Route::detail("bulbasaur");
        assert_eq!(route.path(), "/pokedex/bulbasaur");
        assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn test_guard_redirects_without_trainer() {
        let anonymous = Session::default();
        assert_eq!(guard(Route::Catalog, &anonymous), Route::Welcome);
        assert_eq!(guard(Route::detail("mew"), &anonymous), Route::Welcome);

        let not_found = Route::NotFound { path: "/x".into() };
        assert_eq!(guard(not_found.clone(), &anonymous), not_found);
    }

    #[test]
    fn test_guard_allows_active_session() {
        let session = Session::new("Ash");
        assert_eq!(guard(Route::Catalog, &session), Route::Catalog);
        assert_eq!(guard(Route::detail("mew"), &session), Route::detail("mew"));
    }
}
