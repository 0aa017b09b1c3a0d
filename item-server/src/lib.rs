use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

/// In-memory collection. Ids are sequential from 1 and never reused.
#[derive(Debug)]
pub struct Db {
    items: Vec<Item>,
    next_id: u64,
}

impl Default for Db {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", get(get_item).delete(delete_item))
        .with_state(db)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to Item API",
        "mode": "development",
    }))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
    })
}

async fn list_items(State(db): State<SharedDb>) -> Json<Vec<Item>> {
    let db = db.read().await;
    Json(db.items.clone())
}

async fn create_item(State(db): State<SharedDb>, Json(input): Json<CreateItem>) -> Json<Item> {
    let mut db = db.write().await;
    let item = Item {
        id: db.next_id,
        title: input.title,
        description: input.description,
    };
    db.next_id += 1;
    db.items.push(item.clone());
    info!(id = item.id, "item stored");
    Json(item)
}

async fn get_item(
    State(db): State<SharedDb>,
    Path(id): Path<u64>,
) -> Result<Json<Item>, (StatusCode, Json<Detail>)> {
    let db = db.read().await;
    db.items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(Detail {
                    detail: "Item not found".to_string(),
                }),
            )
        })
}

/// Idempotent: deleting an unknown id still answers 200.
async fn delete_item(State(db): State<SharedDb>, Path(id): Path<u64>) -> Json<Message> {
    let mut db = db.write().await;
    let before = db.items.len();
    db.items.retain(|item| item.id != id);
    info!(id, removed = before != db.items.len(), "item delete handled");
    Json(Message {
        message: "Item deleted".to_string(),
    })
}
