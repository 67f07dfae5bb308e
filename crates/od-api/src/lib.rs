//! # od-api
//!
//! The web routing and orchestration layer for OpsDesk. Every operation of
//! the ticket & help-content store is exposed one-to-one as a JSON route;
//! attachments ride a multipart endpoint in front of the `MediaStore` port.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the portal API.
///
/// # Developer Note
/// We use a scoped configuration so the binary can mount the API under a
/// different prefix if needed. Registration order matters for
/// `/tickets/search` vs `/tickets/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Tickets
            .route("/tickets", web::post().to(handlers::submit_ticket))
            .route("/tickets", web::get().to(handlers::list_tickets))
            .route("/tickets/search", web::get().to(handlers::search_tickets))
            .route("/tickets/{id}", web::get().to(handlers::get_ticket))
            .route("/tickets/{id}/status", web::put().to(handlers::update_status))
            .route(
                "/tickets/{id}/priority",
                web::put().to(handlers::update_priority),
            )
            .route(
                "/tickets/{id}/comments",
                web::post().to(handlers::add_comment),
            )
            // Analytics
            .route(
                "/analytics/tickets",
                web::get().to(handlers::ticket_analytics),
            )
            // Help Center
            .route("/help-topics", web::post().to(handlers::save_topic))
            .route("/help-topics", web::get().to(handlers::published_topics))
            .route("/help-topics/drafts", web::get().to(handlers::draft_topics))
            .route("/help-topics/publish", web::post().to(handlers::publish))
            .route("/help-topics/{id}", web::delete().to(handlers::delete_topic))
            // Attachments
            .route("/attachments", web::post().to(handlers::upload_attachment))
            .route(
                "/attachments/{id}/url",
                web::get().to(handlers::attachment_url),
            )
            // Admin gate (non-authoritative)
            .route("/admin/verify", web::post().to(handlers::verify_admin)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::AppState;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use od_core::clock::SystemClock;
    use od_core::error::Result;
    use od_core::models::BlobRef;
    use od_core::traits::{AdminGate, MediaStore};
    use od_store_memory::MemoryOpsStore;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct NullMedia;

    #[async_trait]
    impl MediaStore for NullMedia {
        async fn save_upload(&self, _data: Vec<u8>, _content_type: &str) -> Result<BlobRef> {
            Ok(BlobRef("deadbeef".into()))
        }

        async fn blob_url(&self, blob: &BlobRef) -> String {
            format!("/static/attachments/{}", blob.0)
        }
    }

    struct ClosedGate;

    #[async_trait]
    impl AdminGate for ClosedGate {
        async fn verify_admin_password(&self, _password: &str) -> bool {
            false
        }
    }

    fn app_state() -> web::Data<AppState> {
        let store = Arc::new(MemoryOpsStore::new(Arc::new(SystemClock)));
        web::Data::new(AppState {
            tickets: store.clone(),
            help: store,
            media: Arc::new(NullMedia),
            admin: Arc::new(ClosedGate),
        })
    }

    fn ticket_payload() -> Value {
        json!({
            "platform": "OneSpan",
            "brand": "AMAXTX",
            "issue_description": "envelope stuck in review",
            "office_name": "Austin South",
            "agent_name": "Priya Nair",
            "employee_id": "3301",
            "email": "pnair@example.com"
        })
    }

    #[actix_web::test]
    async fn submit_then_fetch_roundtrip() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/tickets")
                .set_json(ticket_payload())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_u64().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/tickets/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let ticket: Value = test::read_body_json(resp).await;
        assert_eq!(ticket["display_name"], "OS-1");
        assert_eq!(ticket["status"], "Submitted");
        assert_eq!(ticket["priority"], "empty");
    }

    #[actix_web::test]
    async fn mutating_an_unknown_ticket_is_a_404() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/tickets/999/status")
                .set_json(json!({ "status": "Resolved" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn list_filters_and_search_ride_the_query_string() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(configure_routes),
        )
        .await;

        for _ in 0..2 {
            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/tickets")
                    .set_json(ticket_payload())
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), 201);
        }

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/tickets?platform=Freshworks")
                .to_request(),
        )
        .await;
        let filtered: Value = test::read_body_json(resp).await;
        assert_eq!(filtered.as_array().unwrap().len(), 0);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/tickets/search?q=priya")
                .to_request(),
        )
        .await;
        let hits: Value = test::read_body_json(resp).await;
        assert_eq!(hits.as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn help_topic_publish_flow_over_http() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/help-topics")
                .set_json(json!({
                    "topic_name": "Resetting a session",
                    "platform": "ObserveAI",
                    "explanation": "Steps..."
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);

        // Nothing published yet.
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/help-topics").to_request(),
        )
        .await;
        let topics: Value = test::read_body_json(resp).await;
        assert_eq!(topics.as_array().unwrap().len(), 0);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/help-topics/publish")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 204);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/help-topics").to_request(),
        )
        .await;
        let topics: Value = test::read_body_json(resp).await;
        assert_eq!(topics.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn admin_verify_is_labeled_non_authoritative() {
        let app = test::init_service(
            App::new().app_data(app_state()).configure(configure_routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/verify")
                .set_json(json!({ "password": "guess" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["authoritative"], false);
    }
}
