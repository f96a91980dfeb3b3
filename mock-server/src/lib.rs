use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Field the backend writes its assigned identity under.
pub const ID_FIELD: &str = "_id";

pub type Record = Map<String, Value>;

/// Records per `(instance, resource)`, in insertion order.
pub type Db = Arc<RwLock<HashMap<(String, String), Vec<Record>>>>;

#[derive(Clone, Default)]
pub struct AppState {
    db: Db,
    token: Option<Arc<str>>,
}

#[derive(Deserialize)]
pub struct InstanceQuery {
    #[serde(rename = "Instance")]
    pub instance: String,
}

pub fn app() -> Router {
    router(AppState::default())
}

/// Like `app`, but every request must carry `Authorization: Bearer {token}`.
pub fn app_with_token(token: &str) -> Router {
    router(AppState {
        token: Some(Arc::from(token)),
        ..AppState::default()
    })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/read/{resource}", get(read_records))
        .route("/create/{resource}", post(create_record))
        .route("/update/{resource}/{id}", put(update_record))
        .route("/delete/{resource}/{id}", delete(delete_record))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: Option<String>) -> Result<(), std::io::Error> {
    let app = match token.as_deref() {
        Some(token) => app_with_token(token),
        None => app(),
    };
    axum::serve(listener, app).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(token) = state.token.as_deref() else {
        return Ok(());
    };
    let expected = format!("Bearer {token}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn id_matches(record: &Record, id: &str) -> bool {
    record.get(ID_FIELD).and_then(Value::as_str) == Some(id)
}

async fn read_records(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<InstanceQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorize(&state, &headers)?;
    let db = state.db.read().await;
    let records = db.get(&(query.instance, resource)).cloned().unwrap_or_default();
    Ok(Json(json!({ "data": records })))
}

async fn create_record(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<InstanceQuery>,
    headers: HeaderMap,
    Json(mut record): Json<Record>,
) -> Result<(StatusCode, Json<Record>), StatusCode> {
    authorize(&state, &headers)?;
    record.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
    state
        .db
        .write()
        .await
        .entry((query.instance, resource))
        .or_default()
        .push(record.clone());
    tracing::debug!(id = %record[ID_FIELD], "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<InstanceQuery>,
    headers: HeaderMap,
    Json(mut record): Json<Record>,
) -> Result<Json<Record>, StatusCode> {
    authorize(&state, &headers)?;
    let mut db = state.db.write().await;
    let records = db.get_mut(&(query.instance, resource)).ok_or(StatusCode::NOT_FOUND)?;
    let slot = records
        .iter_mut()
        .find(|r| id_matches(r, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    record.insert(ID_FIELD.to_string(), Value::String(id));
    *slot = record.clone();
    Ok(Json(record))
}

async fn delete_record(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<InstanceQuery>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authorize(&state, &headers)?;
    let mut db = state.db.write().await;
    let records = db.get_mut(&(query.instance, resource)).ok_or(StatusCode::NOT_FOUND)?;
    let index = records
        .iter()
        .position(|r| id_matches(r, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    records.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
