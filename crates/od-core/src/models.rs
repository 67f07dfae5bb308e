//! # Domain Models
//!
//! These structs represent the core entities of OpsDesk: support tickets
//! submitted against one of the integrated third-party platforms, and the
//! draft/published Help Center topics.
//!
//! Timestamps are wall-clock nanoseconds since the Unix epoch, stored as
//! plain integers (see `Clock` in `traits.rs`).

use serde::{Deserialize, Serialize};

/// The third-party platform a ticket is filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// E-signature (prefix "OS")
    OneSpan,
    /// Speech analytics (prefix "OAI")
    #[serde(rename = "ObserveAI")]
    ObserveAi,
    /// Helpdesk (prefix "FW")
    Freshworks,
}

impl Platform {
    /// Fixed display-name prefix for this platform ("OS-7" etc.).
    pub fn prefix(&self) -> &'static str {
        match self {
            Platform::OneSpan => "OS",
            Platform::ObserveAi => "OAI",
            Platform::Freshworks => "FW",
        }
    }
}

/// The business brand the submitting office belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brand {
    #[serde(rename = "AMAXTX")]
    AmaxTx,
    #[serde(rename = "ALPA")]
    Alpa,
    #[serde(rename = "AMAXCA")]
    AmaxCa,
    VirtualStore,
}

/// Triage status. Transitions are free-form: any status may move to any
/// other status, there is no enforced state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Submitted,
    InProgress,
    Resolved,
}

/// Triage priority. New tickets start at `Empty` (unset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Empty,
    Low,
    Medium,
    High,
}

/// Opaque reference to an uploaded attachment.
///
/// The ticket store records these as given and never interprets them;
/// resolving a ref to bytes or a URL is the `MediaStore` plugin's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(pub String);

/// One admin annotation on a ticket. Append-only: comments are never
/// edited or removed once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub content: String,
    /// Nanoseconds since epoch, captured at append time.
    pub timestamp: u64,
}

/// A submitted support request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    /// Human-readable per-platform code (e.g. "OS-7"); assigned once,
    /// immutable thereafter.
    pub display_name: String,
    pub platform: Platform,
    pub brand: Brand,
    pub issue_description: String,
    pub office_name: String,
    pub agent_name: String,
    pub employee_id: String,
    pub email: String,
    pub freshworks_email: Option<String>,
    pub phone_extension: Option<String>,
    pub policy_number: Option<String>,
    pub attachments: Vec<BlobRef>,
    /// Nanoseconds since epoch, captured at creation.
    pub submission_time: u64,
    pub status: Status,
    pub priority: Priority,
    pub comments: Vec<Comment>,
}

/// The caller-supplied portion of a new ticket. Id, display name,
/// submission time, status, priority and comments are all assigned by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    pub platform: Platform,
    pub brand: Brand,
    pub issue_description: String,
    pub office_name: String,
    pub agent_name: String,
    pub employee_id: String,
    pub email: String,
    #[serde(default)]
    pub freshworks_email: Option<String>,
    #[serde(default)]
    pub phone_extension: Option<String>,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub attachments: Vec<BlobRef>,
}

/// A Help Center article. The same shape lives in two independent
/// collections: the editable draft set and the published snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpTopic {
    pub id: u64,
    pub topic_name: String,
    pub platform: Platform,
    /// Free text; may embed simple hyperlink markup. Rendered by the UI,
    /// never parsed here.
    pub explanation: String,
    /// Set once at first creation of the draft, preserved across edits.
    pub created_time: u64,
    /// Refreshed on every save and on every publish.
    pub modified_time: u64,
}

/// Save request for a help topic. `id: None` (or an id that matches no
/// existing draft) creates a new draft; a known id updates it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpTopicInput {
    #[serde(default)]
    pub id: Option<u64>,
    pub topic_name: String,
    pub platform: Platform,
    pub explanation: String,
}

/// Optional exact-match filters for listing tickets. An absent field
/// matches everything; the date bounds are inclusive and independently
/// optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketFilter {
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub start_time: Option<u64>,
    #[serde(default)]
    pub end_time: Option<u64>,
}

/// Requested bucketing resolution for analytics.
///
/// Week and month currently bucket identically to day: the period key is
/// always the calendar-date string. Kept as distinct variants so the wire
/// contract is stable if real week/month bucketing lands later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

/// Analytics request: an inclusive submission-time window plus the
/// bucketing selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub start_time: u64,
    pub end_time: u64,
    pub granularity: Granularity,
}

/// Per-period ticket counts, one bucket per period key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsBucket {
    /// Calendar-date key, e.g. "2024-3-7" (unpadded).
    pub period: String,
    pub one_span: u64,
    pub observe_ai: u64,
    pub freshworks: u64,
    pub total: u64,
}

impl AnalyticsBucket {
    /// Zero-count bucket for a period key.
    pub fn empty(period: String) -> Self {
        Self {
            period,
            one_span: 0,
            observe_ai: 0,
            freshworks: 0,
            total: 0,
        }
    }
}
