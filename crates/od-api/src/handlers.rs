//! # od-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! ports. Handlers stay thin: decode, call the port, encode. All store
//! semantics (sorting, search, counters, publish snapshots) live behind
//! the traits.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::{StreamExt, TryStreamExt};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use od_core::error::AppError;
use od_core::models::{
    AnalyticsQuery, BlobRef, HelpTopicInput, NewTicket, Priority, Status, TicketFilter,
};
use od_core::traits::{AdminGate, HelpRepo, MediaStore, TicketRepo};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub tickets: Arc<dyn TicketRepo>,
    pub help: Arc<dyn HelpRepo>,
    pub media: Arc<dyn MediaStore>,
    pub admin: Arc<dyn AdminGate>,
}

/// Maps a core error onto the wire. `NotFound` is the store aborting a
/// mutator against a missing id; nothing was changed.
fn error_response(err: AppError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        AppError::NotFound(..) => HttpResponse::NotFound().json(body),
        AppError::Validation(_) => HttpResponse::BadRequest().json(body),
        AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
        AppError::Internal(_) => HttpResponse::InternalServerError().json(body),
    }
}

// ── Tickets ─────────────────────────────────────────────────────────────────

pub async fn submit_ticket(
    data: web::Data<AppState>,
    input: web::Json<NewTicket>,
) -> impl Responder {
    match data.tickets.submit_ticket(input.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(json!({ "id": id })),
        Err(err) => error_response(err),
    }
}

pub async fn get_ticket(data: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match data.tickets.get_ticket(path.into_inner()).await {
        Ok(Some(ticket)) => HttpResponse::Ok().json(ticket),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "ticket not found" })),
        Err(err) => error_response(err),
    }
}

/// Filtered listing; every query parameter is optional.
pub async fn list_tickets(
    data: web::Data<AppState>,
    filter: web::Query<TicketFilter>,
) -> impl Responder {
    match data.tickets.get_tickets(filter.into_inner()).await {
        Ok(tickets) => HttpResponse::Ok().json(tickets),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search_tickets(
    data: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    match data.tickets.search_tickets(&params.q).await {
        Ok(tickets) => HttpResponse::Ok().json(tickets),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Status,
}

pub async fn update_status(
    data: web::Data<AppState>,
    path: web::Path<u64>,
    input: web::Json<StatusUpdate>,
) -> impl Responder {
    match data.tickets.update_status(path.into_inner(), input.status).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct PriorityUpdate {
    pub priority: Priority,
}

pub async fn update_priority(
    data: web::Data<AppState>,
    path: web::Path<u64>,
    input: web::Json<PriorityUpdate>,
) -> impl Responder {
    match data
        .tickets
        .update_priority(path.into_inner(), input.priority)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentInput {
    pub author: String,
    pub content: String,
}

pub async fn add_comment(
    data: web::Data<AppState>,
    path: web::Path<u64>,
    input: web::Json<CommentInput>,
) -> impl Responder {
    match data
        .tickets
        .add_comment(path.into_inner(), &input.author, &input.content)
        .await
    {
        Ok(()) => HttpResponse::Created().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn ticket_analytics(
    data: web::Data<AppState>,
    query: web::Query<AnalyticsQuery>,
) -> impl Responder {
    match data.tickets.ticket_analytics(query.into_inner()).await {
        Ok(buckets) => HttpResponse::Ok().json(buckets),
        Err(err) => error_response(err),
    }
}

// ── Help Center ─────────────────────────────────────────────────────────────

pub async fn save_topic(
    data: web::Data<AppState>,
    input: web::Json<HelpTopicInput>,
) -> impl Responder {
    match data.help.save_topic(input.into_inner()).await {
        Ok(id) => HttpResponse::Ok().json(json!({ "id": id })),
        Err(err) => error_response(err),
    }
}

pub async fn delete_topic(data: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    match data.help.delete_topic(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn publish(data: web::Data<AppState>) -> impl Responder {
    match data.help.publish().await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn published_topics(data: web::Data<AppState>) -> impl Responder {
    match data.help.published_topics().await {
        Ok(topics) => HttpResponse::Ok().json(topics),
        Err(err) => error_response(err),
    }
}

pub async fn draft_topics(data: web::Data<AppState>) -> impl Responder {
    match data.help.draft_topics().await {
        Ok(topics) => HttpResponse::Ok().json(topics),
        Err(err) => error_response(err),
    }
}

// ── Attachments ─────────────────────────────────────────────────────────────

/// Accepts a multipart upload, stores the first file field, and returns
/// the opaque ref plus its direct URL. The ticket store never sees bytes,
/// only the ref.
pub async fn upload_attachment(data: web::Data<AppState>, mut payload: Multipart) -> HttpResponse {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(chunk) => bytes.extend_from_slice(&chunk),
                Err(err) => {
                    return HttpResponse::BadRequest()
                        .json(json!({ "error": format!("malformed upload: {}", err) }))
                }
            }
        }

        return match data.media.save_upload(bytes, &content_type).await {
            Ok(blob) => {
                let url = data.media.blob_url(&blob).await;
                HttpResponse::Created().json(json!({ "ref": blob, "url": url }))
            }
            Err(err) => error_response(err),
        };
    }
    HttpResponse::BadRequest().json(json!({ "error": "no file field in upload" }))
}

pub async fn attachment_url(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let blob = BlobRef(path.into_inner());
    let url = data.media.blob_url(&blob).await;
    HttpResponse::Ok().json(json!({ "url": url }))
}

// ── Admin gate ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AdminVerify {
    pub password: String,
}

/// Non-authoritative: a "true" here unlocks UI affordances only. Every
/// store operation remains callable without it.
pub async fn verify_admin(
    data: web::Data<AppState>,
    input: web::Json<AdminVerify>,
) -> impl Responder {
    let valid = data.admin.verify_admin_password(&input.password).await;
    HttpResponse::Ok().json(json!({ "valid": valid, "authoritative": false }))
}
