//! HTTP status mapping and page hydration against a local server
//!
//! Each test starts a one-route-table HTTP/1.1 server on a loopback port and
//! points a `PokeApi` at it.

use std::time::Duration;

use pokedex::api::{ApiError, PokeApi};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Route = (String, u16, String);

fn pokemon_body(id: u32, name: &str) -> String {
    serde_json::json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "sprites": {},
        "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
        "abilities": [],
        "stats": [],
        "moves": []
    })
    .to_string()
}

fn route(path: &str, status: u16, body: impl Into<String>) -> Route {
    (format!("/api/v2/{path}"), status, body.into())
}

/// Serves `routes` until the test ends. Unknown paths answer 404.
async fn serve(routes: Vec<Route>) -> PokeApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    read += n;
                    let done = buf[..read].windows(4).any(|w| w == b"\r\n\r\n");
                    if n == 0 || done || read == buf.len() {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, status, body)| (*status, body.clone()))
                    .unwrap_or((404, r#"{"detail":"Not found."}"#.to_string()));
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Internal Server Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    PokeApi::new(&format!("http://{addr}/api/v2"), Duration::from_secs(5)).unwrap()
}

// ============================================================================
// Status mapping
// ============================================================================

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let api = serve(vec![route("pokemon/missingno", 404, "Not Found")]).await;

    let error = api.fetch_record("missingno").await.unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error, ApiError::NotFound("pokemon/missingno".into()));
}

#[tokio::test]
async fn test_server_error_is_generic_failure() {
    let api = serve(vec![route("pokemon/mew", 500, "oops")]).await;

    let error = api.fetch_record("mew").await.unwrap_err();
    assert!(!error.is_not_found());
    assert!(matches!(error, ApiError::Request(_)), "got {error:?}");
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let api = serve(vec![route("pokemon/ditto", 200, "not json")]).await;

    let error = api.fetch_record("ditto").await.unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)), "got {error:?}");
}

#[tokio::test]
async fn test_record_is_decoded() {
    let api = serve(vec![route("pokemon/pikachu", 200, pokemon_body(25, "pikachu"))]).await;

    let record = api.fetch_record("pikachu").await.unwrap();
    assert_eq!(record.id, 25);
    assert_eq!(record.name, "pikachu");
    assert_eq!(record.height_label(), "0.4 m");
}

// ============================================================================
// Hydration
// ============================================================================

#[tokio::test]
async fn test_entries_keep_request_order() {
    let api = serve(vec![
        route("pokemon/pikachu", 200, pokemon_body(25, "pikachu")),
        route("pokemon/raichu", 200, pokemon_body(26, "raichu")),
    ])
    .await;

    let entries = api
        .fetch_entries(&["raichu".to_string(), "pikachu".to_string()])
        .await
        .unwrap();
    let ids: Vec<u32> = entries.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![26, 25]);
}

#[tokio::test]
async fn test_one_failing_entry_fails_the_batch() {
    let api = serve(vec![
        route("pokemon/pikachu", 200, pokemon_body(25, "pikachu")),
        route("pokemon/raichu", 500, "oops"),
    ])
    .await;

    let result = api
        .fetch_entries(&["pikachu".to_string(), "raichu".to_string()])
        .await;
    assert!(matches!(result, Err(ApiError::Request(_))), "got {result:?}");
}

#[tokio::test]
async fn test_page_fails_when_any_record_is_missing() {
    let listing = serde_json::json!({
        "count": 1302,
        "next": "http://localhost/api/v2/pokemon?offset=2&limit=2",
        "previous": null,
        "results": [
            { "name": "pikachu", "url": "" },
            { "name": "missingno", "url": "" }
        ]
    })
    .to_string();
    let api = serve(vec![
        route("pokemon?limit=2&offset=0", 200, listing),
        route("pokemon/pikachu", 200, pokemon_body(25, "pikachu")),
    ])
    .await;

    let error = api.fetch_catalog_page(2, 0).await.unwrap_err();
    assert!(error.is_not_found(), "got {error:?}");
}

#[tokio::test]
async fn test_page_carries_cursor_and_count() {
    let listing = serde_json::json!({
        "count": 1302,
        "next": "http://localhost/api/v2/pokemon?offset=1&limit=1",
        "previous": null,
        "results": [{ "name": "pikachu", "url": "" }]
    })
    .to_string();
    let api = serve(vec![
        route("pokemon?limit=1&offset=0", 200, listing),
        route("pokemon/pikachu", 200, pokemon_body(25, "pikachu")),
    ])
    .await;

    let page = api.fetch_catalog_page(1, 0).await.unwrap();
    assert_eq!(page.count, 1302);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(
        page.next.as_deref(),
        Some("http://localhost/api/v2/pokemon?offset=1&limit=1")
    );
}
