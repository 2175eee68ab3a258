//! In-memory product catalog server for adapter integration tests.
//!
//! # Design
//! Stands in for an OData backend exposing a classic Products resource.
//! State is a shared map behind a `RwLock`; `app()` builds the router for
//! in-process testing and `run()` serves it on a real listener. Missing
//! resources answer 404 with a `not found` body so clients can assert on the
//! error text, and `/echo/headers` reflects the request headers back as JSON
//! so clients can verify configuration merging over the wire.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i64,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub price_cents: i64,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Product>>>;

const NOT_FOUND: (StatusCode, &str) = (StatusCode::NOT_FOUND, "not found");

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/echo/headers", get(echo_headers))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let products = db.read().await;
    Json(products.values().cloned().collect())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    let product = Product {
        id: Uuid::new_v4(),
        name: input.name,
        price_cents: input.price_cents,
    };
    db.write().await.insert(product.id, product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, (StatusCode, &'static str)> {
    let products = db.read().await;
    products.get(&id).cloned().map(Json).ok_or(NOT_FOUND)
}

async fn replace_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateProduct>,
) -> Result<Json<Product>, (StatusCode, &'static str)> {
    let mut products = db.write().await;
    let product = products.get_mut(&id).ok_or(NOT_FOUND)?;
    product.name = input.name;
    product.price_cents = input.price_cents;
    Ok(Json(product.clone()))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, (StatusCode, &'static str)> {
    let mut products = db.write().await;
    let product = products.get_mut(&id).ok_or(NOT_FOUND)?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(price_cents) = input.price_cents {
        product.price_cents = price_cents;
    }
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    let mut products = db.write().await;
    products
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(NOT_FOUND)
}

/// Reflect the request headers back as a JSON object with lowercase names.
async fn echo_headers(headers: HeaderMap) -> Json<HashMap<String, String>> {
    Json(
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
    )
}
