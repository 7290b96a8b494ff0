//! PokeAPI client

use std::sync::OnceLock;
use std::time::Duration;

use futures_util::future::try_join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{artwork_url, BaseStat, CatalogEntry, CategoryTag, DetailRecord};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder categories that are never offered as filters.
const EXCLUDED_TAGS: [&str; 2] = ["stellar", "unknown"];
const MOVE_LIMIT: usize = 10;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PageResponse {
    results: Vec<NamedResource>,
    next: Option<String>,
    count: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u16,
    weight: u16,
    #[serde(default)]
    sprites: serde_json::Value,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    stats: Vec<PokemonStatSlot>,
    moves: Vec<PokemonMoveSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

/// One hydrated page of the unfiltered collection.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    pub next: Option<String>,
    pub count: u32,
}

// ============================================================================
// Client
// ============================================================================

pub struct PokeApi {
    base_url: String,
    http: reqwest::Client,
}

impl PokeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Request(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First page is `offset == 0`; the detail for every entry is fetched
    /// concurrently and the page fails if any of them fails.
    pub async fn fetch_catalog_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<CatalogPage, ApiError> {
        let page: PageResponse = self
            .get_json(&format!("pokemon?limit={limit}&offset={offset}"))
            .await?;
        let names: Vec<String> = page.results.into_iter().map(|entry| entry.name).collect();
        let entries = self.fetch_entries(&names).await?;
        Ok(CatalogPage {
            entries,
            next: page.next,
            count: page.count,
        })
    }

    /// Fans out one detail request per name, keeping the input order.
    pub async fn fetch_entries(&self, names: &[String]) -> Result<Vec<CatalogEntry>, ApiError> {
        let records = try_join_all(names.iter().map(|name| self.fetch_record(name))).await?;
        Ok(records.iter().map(DetailRecord::summary).collect())
    }

    pub async fn fetch_record(&self, name_or_id: &str) -> Result<DetailRecord, ApiError> {
        let path = format!("pokemon/{}", urlencoding::encode(name_or_id));
        let response: PokemonResponse = self.get_json(&path).await?;
        Ok(record_from_response(response))
    }

    pub async fn fetch_types(&self) -> Result<Vec<CategoryTag>, ApiError> {
        let response: TypeListResponse = self.get_json("type?limit=100").await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| entry.name)
            .filter(|name| is_selectable_tag(name))
            .map(CategoryTag::new)
            .collect())
    }

    pub async fn fetch_type_members(&self, tag: &str) -> Result<Vec<String>, ApiError> {
        let path = format!("type/{}", urlencoding::encode(tag));
        let response: TypeDetailResponse = self.get_json(&path).await?;
        Ok(response
            .pokemon
            .into_iter()
            .map(|entry| entry.pokemon.name)
            .collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        let response = response
            .error_for_status()
            .map_err(|err| ApiError::Request(err.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

static API: OnceLock<PokeApi> = OnceLock::new();

/// Installs the process-wide client. Later calls keep the first client.
pub fn install(api: PokeApi) {
    if API.set(api).is_err() {
        tracing::warn!("api client already installed");
    }
}

pub fn client() -> &'static PokeApi {
    API.get_or_init(|| {
        PokeApi::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap_or_else(|error| {
            tracing::warn!(%error, "http client without timeout");
            PokeApi {
                base_url: DEFAULT_BASE_URL.to_string(),
                http: reqwest::Client::new(),
            }
        })
    })
}

// ============================================================================
// Conversions
// ============================================================================

fn is_selectable_tag(name: &str) -> bool {
    !EXCLUDED_TAGS.contains(&name)
}

fn record_from_response(response: PokemonResponse) -> DetailRecord {
    let artwork = pointer_string(&response.sprites, "/other/official-artwork/front_default")
        .or_else(|| pointer_string(&response.sprites, "/front_default"))
        .unwrap_or_else(|| artwork_url(response.id));

    DetailRecord {
        id: response.id,
        name: response.name,
        artwork_url: artwork,
        tags: response
            .types
            .into_iter()
            .map(|slot| CategoryTag::new(slot.type_info.name))
            .collect(),
        height: response.height,
        weight: response.weight,
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        stats: response
            .stats
            .into_iter()
            .map(|slot| BaseStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
        moves: response
            .moves
            .into_iter()
            .take(MOVE_LIMIT)
            .map(|slot| slot.move_info.name)
            .collect(),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
