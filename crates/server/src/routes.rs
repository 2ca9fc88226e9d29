use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use tempocache_common::{MAX_BODY_SIZE, PayloadError};
use tempocache_storage::{Entry, Store, Value};

use crate::error::{ApiError, ApiResult};

/// Corpo de uma escrita. `deathTime`, se vier, é ignorado: o servidor
/// sempre recalcula a partir do `ttl`.
#[derive(Debug, Deserialize)]
struct NewItem {
    value: Value,
    /// Nanosegundos.
    ttl: i64,
}

/// Decodifica o corpo de um POST numa `Entry` nova.
pub fn decode_item(body: &[u8]) -> Result<Entry, PayloadError> {
    let item: NewItem = serde_json::from_slice(body)?;
    let nanos = u64::try_from(item.ttl).map_err(|_| PayloadError::NegativeTtl(item.ttl))?;
    Ok(Entry::new(item.value, Duration::from_nanos(nanos)))
}

/// Rotas HTTP sobre o `Store`.
///
/// | método | caminho        | resposta                           |
/// |--------|----------------|------------------------------------|
/// | POST   | /items/{key}   | 201 + entrada gravada              |
/// | GET    | /items/keys    | 200 + chaves por instante de morte |
/// | DELETE | /items/keys    | 204                                |
/// | GET    | /items/{key}   | 200 + entrada, ou 404              |
/// | DELETE | /items/{key}   | 204, ou 404                        |
///
/// `POST /items/keys` grava um item chamado "keys", como qualquer outra chave.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route(
            "/items/keys",
            post(create_item_named_keys).get(read_keys).delete(clear),
        )
        .route(
            "/items/{key}",
            post(create_item).get(read_item).delete(delete_item),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(store)
}

fn no_content() -> Response {
    (
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "application/json")],
    )
        .into_response()
}

async fn create_item(
    State(store): State<Store>,
    Path(key): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    upsert(&store, key, &body)
}

// A rota fixa /items/keys tem prioridade sobre /items/{key}, sem parâmetro
async fn create_item_named_keys(
    State(store): State<Store>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    upsert(&store, "keys".to_string(), &body)
}

fn upsert(store: &Store, key: String, body: &[u8]) -> ApiResult<(StatusCode, Json<Entry>)> {
    let entry = decode_item(body)?;
    store.set(key, entry.clone());
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn read_item(State(store): State<Store>, Path(key): Path<String>) -> ApiResult<Json<Entry>> {
    store.get(&key).map(Json).ok_or(ApiError::NotFound(key))
}

async fn read_keys(State(store): State<Store>) -> Json<Vec<String>> {
    Json(store.get_keys())
}

async fn delete_item(State(store): State<Store>, Path(key): Path<String>) -> ApiResult<Response> {
    if !store.delete(&key) {
        return Err(ApiError::NotFound(key));
    }
    debug!("chave removida: {key}");
    Ok(no_content())
}

async fn clear(State(store): State<Store>) -> Response {
    store.clear();
    no_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_text_item() {
        let entry = decode_item(br#"{"value": "Ioann", "ttl": 60000000000}"#).unwrap();
        assert_eq!(entry.value(), &Value::from("Ioann"));
        assert_eq!(entry.ttl(), Duration::from_secs(60));
        assert!(!entry.is_expired());
    }

    #[test]
    fn decode_ignores_client_death_time() {
        let body = br#"{"value": "v", "ttl": 60000000000, "deathTime": "2000-01-01T00:00:00Z"}"#;
        let entry = decode_item(body).unwrap();
        assert!(!entry.is_expired());
    }

    #[test]
    fn decode_rejects_negative_ttl() {
        let err = decode_item(br#"{"value": "v", "ttl": -1}"#).unwrap_err();
        assert!(matches!(err, PayloadError::NegativeTtl(-1)));
    }

    #[test]
    fn decode_rejects_malformed() {
        assert!(matches!(
            decode_item(b"not json"),
            Err(PayloadError::Malformed(_))
        ));
        assert!(matches!(
            decode_item(br#"{"value": "v"}"#),
            Err(PayloadError::Malformed(_))
        ));
        assert!(matches!(
            decode_item(br#"{"value": 42, "ttl": 1}"#),
            Err(PayloadError::Malformed(_))
        ));
    }
}
