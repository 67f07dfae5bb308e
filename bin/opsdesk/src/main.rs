//! # OpsDesk Binary
//!
//! The entry point that assembles the portal API from the compiled-in
//! plugins: the in-memory ticket & help-content store, the local
//! attachment store, and the (non-authoritative) admin gate.

use actix_web::{web, App, HttpServer};
use od_api::handlers::AppState;
use od_api::{configure_routes, middleware};
use od_core::clock::SystemClock;
use std::sync::Arc;

#[cfg(feature = "store-memory")]
use od_store_memory::MemoryOpsStore;

#[cfg(feature = "storage-local")]
use od_storage_local::LocalMediaStore;

#[cfg(feature = "auth-simple")]
use od_auth_simple::SimpleAdminGate;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let bind = std::env::var("OPSDESK_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let data_dir =
        std::env::var("OPSDESK_DATA_DIR").unwrap_or_else(|_| "./data/attachments".to_string());
    let admin_hash = std::env::var("OPSDESK_ADMIN_HASH").unwrap_or_default();
    if admin_hash.is_empty() {
        log::warn!("OPSDESK_ADMIN_HASH is unset; the admin gate will reject every password");
    }

    // 1. The single in-memory store owns tickets, help topics, and all
    //    counters; state lives for the process lifetime only.
    #[cfg(feature = "store-memory")]
    let store = Arc::new(MemoryOpsStore::new(Arc::new(SystemClock)));

    // 2. Content-addressed attachment storage
    #[cfg(feature = "storage-local")]
    let media = LocalMediaStore::new(data_dir.into(), "/static/attachments".to_string());

    // 3. Admin gate (UI convenience, not access control)
    #[cfg(feature = "auth-simple")]
    let admin = SimpleAdminGate::new(&admin_hash);

    let state = web::Data::new(AppState {
        tickets: store.clone(),
        help: store,
        media: Arc::new(media),
        admin: Arc::new(admin),
    });

    log::info!("🚀 OpsDesk portal API starting on http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
