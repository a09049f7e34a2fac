use axum::{response::Redirect, routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::store::traits::YarnStore;

pub fn create_router<S: YarnStore + 'static>(static_dir: &str) -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Pages
        .route("/", get(handlers::library::<S>))
        .route("/discover/", get(handlers::discover))
        .route("/discover", get(|| async { Redirect::permanent("/discover/") }))
        .route("/settings/", get(handlers::settings))
        .route("/settings", get(|| async { Redirect::permanent("/settings/") }))
        // JSON API
        .route("/api/yarns", get(handlers::list_yarns::<S>))
        .route("/api/yarns/:id", get(handlers::get_yarn::<S>))
        // Thumbnails and other static files
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewYarn, Yarn, YarnFilter, YarnId, YarnWeight};
    use crate::seed::load_seed_data;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    /// Store whose every call fails, standing in for an unreachable database
    struct UnavailableStore;

    #[async_trait::async_trait]
    impl YarnStore for UnavailableStore {
        async fn list_yarns(&self, _filter: &YarnFilter) -> anyhow::Result<Vec<Yarn>> {
            anyhow::bail!("database unavailable")
        }
        async fn get_yarn(&self, _id: YarnId) -> anyhow::Result<Option<Yarn>> {
            anyhow::bail!("database unavailable")
        }
        async fn find_by_color_and_weight(
            &self,
            _color: &str,
            _weight: YarnWeight,
        ) -> anyhow::Result<Option<Yarn>> {
            anyhow::bail!("database unavailable")
        }
        async fn insert_yarn(&self, _yarn: NewYarn) -> anyhow::Result<Yarn> {
            anyhow::bail!("database unavailable")
        }
        async fn count_yarns(&self) -> anyhow::Result<i64> {
            anyhow::bail!("database unavailable")
        }
    }

    fn app<S: YarnStore + 'static>(store: S) -> Router {
        create_router("static").with_state(Arc::new(store))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_library_lists_every_stored_yarn() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();
        let yarns = store.list_yarns(&YarnFilter::default()).await.unwrap();

        let (status, body) = get_body(app(store), "/").await;

        assert_eq!(status, StatusCode::OK);
        for yarn in &yarns {
            assert!(body.contains(&format!(r#"<tr id="yarn-{}">"#, yarn.id)));
        }
        assert!(body.contains(&format!("{} yarns", yarns.len())));
    }

    #[tokio::test]
    async fn test_library_weight_filter() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();

        let (status, body) = get_body(app(store), "/?weight=Jumbo").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Cloud"));
        assert!(!body.contains("Oatmeal"));
        assert!(body.contains("1 yarn<"));
    }

    #[tokio::test]
    async fn test_library_rejects_unknown_weight() {
        let (status, body) = get_body(app(MemoryStore::new()), "/?weight=worsted").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("unknown yarn weight"));
    }

    #[tokio::test]
    async fn test_library_store_failure_is_500_page() {
        let (status, body) = get_body(app(UnavailableStore), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("could not be loaded"));
    }

    #[tokio::test]
    async fn test_stub_pages_ignore_database_state() {
        for uri in ["/discover/", "/settings/"] {
            let (status, _) = get_body(app(UnavailableStore), uri).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, discover) = get_body(app(MemoryStore::new()), "/discover/").await;
        assert!(discover.contains("<h1>Discover</h1>"));
        let (_, settings) = get_body(app(MemoryStore::new()), "/settings/").await;
        assert!(settings.contains("<h1>Settings</h1>"));
    }

    #[tokio::test]
    async fn test_missing_trailing_slash_redirects() {
        let response = app(MemoryStore::new())
            .oneshot(Request::builder().uri("/settings").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/settings/");
    }

    #[tokio::test]
    async fn test_json_listing_and_lookup() {
        let store = MemoryStore::new();
        store
            .insert_yarn(NewYarn::new("Sage", YarnWeight::Medium).with_num_skeins(2))
            .await
            .unwrap();
        let app = app(store);

        let (status, body) = get_body(app.clone(), "/api/yarns").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["items"][0]["color"], "Sage");

        let (status, body) = get_body(app.clone(), "/api/yarns/1").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["numSkeins"], 2);

        let (status, body) = get_body(app, "/api/yarns/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Yarn 42 not found");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_json_error() {
        let (status, body) = get_body(app(MemoryStore::new()), "/api/yarns/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_thumbnail_with_space_is_served() {
        let static_dir = tempfile::tempdir().unwrap();
        std::fs::write(static_dir.path().join("forest tweed.jpg"), b"jpeg bytes").unwrap();

        let store = MemoryStore::new();
        store
            .insert_yarn(NewYarn::new("Moss", YarnWeight::Bulky).with_thumbnail("forest tweed.jpg"))
            .await
            .unwrap();
        let app = create_router(static_dir.path().to_str().unwrap()).with_state(Arc::new(store));

        let (_, page) = get_body(app.clone(), "/").await;
        let src = page
            .split(r#"<img src=""#)
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap()
            .to_string();
        assert_eq!(src, "/static/forest%20tweed.jpg");

        let (status, body) = get_body(app, &src).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "jpeg bytes");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_page() {
        let (status, body) = get_body(app(MemoryStore::new()), "/patterns").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_body(app(MemoryStore::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""status":"healthy""#));
    }
}
