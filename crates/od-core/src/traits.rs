//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use crate::error::Result;
use crate::models::{
    AnalyticsBucket, AnalyticsQuery, BlobRef, HelpTopic, HelpTopicInput, NewTicket, Priority,
    Status, Ticket, TicketFilter,
};

/// Ticket lifecycle and query contract.
///
/// One implementation owns the whole ticket collection; operations are
/// serialized by the implementation so every call observes a consistent
/// snapshot.
#[async_trait]
pub trait TicketRepo: Send + Sync {
    /// Creates a ticket and returns its new id. Display name, submission
    /// time, initial status (`Submitted`) and priority (`Empty`) are
    /// assigned here.
    async fn submit_ticket(&self, input: NewTicket) -> Result<u64>;

    /// Lookup by id. Absence is data, not an error.
    async fn get_ticket(&self, id: u64) -> Result<Option<Ticket>>;

    /// All tickets matching the filter, sorted by submission time
    /// descending (most recent first).
    async fn get_tickets(&self, filter: TicketFilter) -> Result<Vec<Ticket>>;

    /// Case-insensitive substring search across the ticket's text fields
    /// and its comments. Results come back in insertion order, unsorted.
    async fn search_tickets(&self, term: &str) -> Result<Vec<Ticket>>;

    /// Replaces only the status field. Errors with `NotFound` on an
    /// unknown id; any status may move to any other.
    async fn update_status(&self, id: u64, status: Status) -> Result<()>;

    /// Replaces only the priority field. Errors with `NotFound` on an
    /// unknown id.
    async fn update_priority(&self, id: u64, priority: Priority) -> Result<()>;

    /// Appends a comment stamped with the current wall clock. Errors with
    /// `NotFound` on an unknown id; prior comments are never touched.
    async fn add_comment(&self, id: u64, author: &str, content: &str) -> Result<()>;

    /// Time-bucketed submission counts per platform over an inclusive
    /// window. Always returns at least one bucket (a zero bucket keyed to
    /// today when nothing matches). Bucket order is unspecified.
    async fn ticket_analytics(&self, query: AnalyticsQuery) -> Result<Vec<AnalyticsBucket>>;
}

/// Help Center draft/publish contract.
#[async_trait]
pub trait HelpRepo: Send + Sync {
    /// Creates or updates a draft topic; returns the resulting id.
    async fn save_topic(&self, input: HelpTopicInput) -> Result<u64>;

    /// Removes a draft. No-op when the id is absent. The published copy,
    /// if any, survives until the next publish.
    async fn delete_topic(&self, id: u64) -> Result<()>;

    /// Wholesale replaces the published collection with a snapshot of the
    /// current draft collection. Full replace, not a merge.
    async fn publish(&self) -> Result<()>;

    /// Everything currently published, unordered.
    async fn published_topics(&self) -> Result<Vec<HelpTopic>>;

    /// Everything currently drafted, unordered.
    async fn draft_topics(&self) -> Result<Vec<HelpTopic>>;
}

/// Blob storage contract for ticket attachments.
///
/// The ticket store treats `BlobRef` values as opaque; only this plugin
/// knows how to turn them back into bytes or URLs.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Saves raw bytes and returns the opaque ref to record on a ticket.
    async fn save_upload(&self, data: Vec<u8>, content_type: &str) -> Result<BlobRef>;

    /// Direct URL for a previously stored blob.
    async fn blob_url(&self, blob: &BlobRef) -> String;
}

/// Admin-gate contract.
///
/// Explicitly non-authoritative: the store's operations are universally
/// callable and this check only gates UI affordances.
#[async_trait]
pub trait AdminGate: Send + Sync {
    /// Verifies a candidate admin password against the configured hash.
    async fn verify_admin_password(&self, password: &str) -> bool;
}

/// Wall-clock source. Nanoseconds since the Unix epoch, monotonically
/// non-decreasing. The only external input the store reads besides call
/// arguments.
pub trait Clock: Send + Sync {
    fn now_ns(&self) -> u64;
}
