//! Handler tests for the catalog endpoints
//!
//! The routers are exercised with an in-memory store and a fixed identity
//! injected as an extension, standing in for the auth middleware.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::Identity;
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn identity(username: &str) -> Identity {
    Identity {
        user_id: Uuid::new_v4(),
        username: username.to_string(),
    }
}

fn product_router(store: Arc<InMemoryCatalog>, caller: Identity) -> Router {
    product_handlers::router(ProductService::new(store.clone(), store)).layer(Extension(caller))
}

fn category_router(store: Arc<InMemoryCatalog>, caller: Identity) -> Router {
    category_handlers::router(CategoryService::new(store)).layer(Extension(caller))
}

async fn create_category(app: &Router, name: &str) -> Category {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "name": name })).unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn create_product(app: &Router, name: &str, category_id: Uuid, stock: i32) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": name,
                "category_id": category_id,
                "price": 9.99,
                "stock": stock,
                "low_stock_threshold": 10
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_annotates_stock_status() {
    let store = Arc::new(InMemoryCatalog::new());
    let caller = identity("ada");
    store.insert_user(caller.user_id, "ada").await;
    let categories = category_router(store.clone(), caller.clone());
    let products = product_router(store, caller);

    let category = create_category(&categories, "Widgets").await;
    let created = create_product(&products, "Widget", category.id, 5).await;

    assert_eq!(created["stock_status"], "yellow");
    assert_eq!(created["category"]["name"], "Widgets");
    assert_eq!(created["creator"]["username"], "ada");
}

#[tokio::test]
async fn test_create_product_with_missing_category_returns_404() {
    let store = Arc::new(InMemoryCatalog::new());
    let products = product_router(store, identity("ada"));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Orphan",
                "category_id": Uuid::new_v4()
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = products.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_pagination_metadata() {
    let store = Arc::new(InMemoryCatalog::new());
    let caller = identity("ada");
    let categories = category_router(store.clone(), caller.clone());
    let products = product_router(store, caller);

    let category = create_category(&categories, "Widgets").await;
    for i in 0..5 {
        create_product(&products, &format!("widget-{i}"), category.id, 20).await;
    }

    let request = Request::builder()
        .method("GET")
        .uri("/?skip=2&limit=2&sort_by=name")
        .body(Body::empty())
        .unwrap();
    let response = products.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["metadata"]["total"], 5);
    assert_eq!(body["metadata"]["page"], 2);
    assert_eq!(body["metadata"]["total_pages"], 3);
    assert_eq!(body["data"][0]["name"], "widget-2");
}

#[tokio::test]
async fn test_list_products_rejects_out_of_range_limit() {
    let store = Arc::new(InMemoryCatalog::new());
    let products = product_router(store, identity("ada"));

    let request = Request::builder()
        .method("GET")
        .uri("/?limit=101")
        .body(Body::empty())
        .unwrap();
    let response = products.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products_unknown_sort_is_not_an_error() {
    let store = Arc::new(InMemoryCatalog::new());
    let products = product_router(store, identity("ada"));

    let request = Request::builder()
        .method("GET")
        .uri("/?sort_by=nonsense&stock_status=purple")
        .body(Body::empty())
        .unwrap();
    let response = products.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_partial_update_preserves_untouched_fields() {
    let store = Arc::new(InMemoryCatalog::new());
    let caller = identity("ada");
    let categories = category_router(store.clone(), caller.clone());
    let products = product_router(store, caller);

    let category = create_category(&categories, "Widgets").await;
    let created = create_product(&products, "Widget", category.id, 7).await;
    let id = created["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "price": 19.99 })).unwrap(),
        ))
        .unwrap();
    let response = products.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = products.oneshot(request).await.unwrap();
    let fetched: Value = json_body(response.into_body()).await;

    assert_eq!(fetched["price"], 19.99);
    assert_eq!(fetched["name"], "Widget");
    assert_eq!(fetched["stock"], 7);
    assert_eq!(
        fetched["category"]["id"].as_str().unwrap(),
        category.id.to_string()
    );
}

#[tokio::test]
async fn test_get_product_with_malformed_id_returns_400() {
    let store = Arc::new(InMemoryCatalog::new());
    let products = product_router(store, identity("ada"));

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = products.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cross_owner_category_mutation_is_forbidden() {
    let store = Arc::new(InMemoryCatalog::new());
    let owner_router = category_router(store.clone(), identity("ada"));
    let stranger_router = category_router(store, identity("grace"));

    let category = create_category(&owner_router, "Widgets").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", category.id))
        .body(Body::empty())
        .unwrap();
    let response = stranger_router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner succeeds and the category is gone afterwards.
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", category.id))
        .body(Body::empty())
        .unwrap();
    let response = owner_router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", category.id))
        .body(Body::empty())
        .unwrap();
    let response = owner_router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_product_name_returns_400() {
    let store = Arc::new(InMemoryCatalog::new());
    let caller = identity("ada");
    let categories = category_router(store.clone(), caller.clone());
    let products = product_router(store, caller);

    let category = create_category(&categories, "Widgets").await;
    create_product(&products, "Widget", category.id, 1).await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Widget",
                "category_id": category.id
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = products.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
