//! # od-store-memory
//!
//! The in-memory implementation of `TicketRepo` and `HelpRepo`. One store
//! owns every ticket, both help-topic collections, and all id/display-name
//! counters; a single mutex serializes operations so each call runs to
//! completion against a consistent snapshot (actor-style, no torn updates).
//!
//! State lives for the process lifetime only. There is no durability layer
//! by design.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use od_core::error::{AppError, Result};
use od_core::models::{
    AnalyticsBucket, AnalyticsQuery, Comment, Granularity, HelpTopic, HelpTopicInput, NewTicket,
    Platform, Priority, Status, Ticket, TicketFilter,
};
use od_core::period::period_key;
use od_core::traits::{Clock, HelpRepo, TicketRepo};

/// One running display-name counter per platform. Each starts at 1 and is
/// consumed-then-incremented, so the first ticket per platform is
/// "OS-1" / "OAI-1" / "FW-1". Never reset or decremented.
struct DisplayCounters {
    one_span: u64,
    observe_ai: u64,
    freshworks: u64,
}

impl Default for DisplayCounters {
    fn default() -> Self {
        Self {
            one_span: 1,
            observe_ai: 1,
            freshworks: 1,
        }
    }
}

impl DisplayCounters {
    /// Returns the current value for the platform and advances it by one.
    fn take(&mut self, platform: Platform) -> u64 {
        let slot = match platform {
            Platform::OneSpan => &mut self.one_span,
            Platform::ObserveAi => &mut self.observe_ai,
            Platform::Freshworks => &mut self.freshworks,
        };
        let current = *slot;
        *slot += 1;
        current
    }
}

/// Everything the actor owns. BTreeMaps keep iteration in id order, which
/// doubles as insertion order since ids are assigned monotonically — the
/// search contract depends on that.
#[derive(Default)]
struct StoreState {
    tickets: BTreeMap<u64, Ticket>,
    /// Dedicated monotonic ticket-id sequence. Collection size would
    /// collide after any deletion path, so ids never derive from it.
    next_ticket_id: u64,
    display_counters: DisplayCounters,
    drafts: BTreeMap<u64, HelpTopic>,
    published: BTreeMap<u64, HelpTopic>,
    next_topic_id: u64,
}

/// The process-wide ticket & help-content store.
pub struct MemoryOpsStore {
    clock: Arc<dyn Clock>,
    state: Mutex<StoreState>,
}

impl MemoryOpsStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// A poisoned mutex only means another caller panicked mid-operation;
    /// the state itself is still structurally valid, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Exact-match filters plus inclusive date bounds; absent fields match
/// everything.
fn matches_filter(ticket: &Ticket, filter: &TicketFilter) -> bool {
    if let Some(platform) = filter.platform {
        if ticket.platform != platform {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if ticket.status != status {
            return false;
        }
    }
    if let Some(brand) = filter.brand {
        if ticket.brand != brand {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if ticket.priority != priority {
            return false;
        }
    }
    if let Some(start) = filter.start_time {
        if ticket.submission_time < start {
            return false;
        }
    }
    if let Some(end) = filter.end_time {
        if ticket.submission_time > end {
            return false;
        }
    }
    true
}

/// Substring match against every searchable field. `needle` must already
/// be lowercased. Literal substring semantics: the empty needle matches
/// every ticket.
fn matches_term(ticket: &Ticket, needle: &str) -> bool {
    let haystacks = [
        &ticket.display_name,
        &ticket.issue_description,
        &ticket.office_name,
        &ticket.agent_name,
        &ticket.employee_id,
        &ticket.email,
    ];
    if haystacks
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    {
        return true;
    }
    if let Some(fw_email) = &ticket.freshworks_email {
        if fw_email.to_lowercase().contains(needle) {
            return true;
        }
    }
    ticket.comments.iter().any(|comment| {
        comment.author.to_lowercase().contains(needle)
            || comment.content.to_lowercase().contains(needle)
    })
}

#[async_trait]
impl TicketRepo for MemoryOpsStore {
    async fn submit_ticket(&self, input: NewTicket) -> Result<u64> {
        let now = self.clock.now_ns();
        let mut state = self.lock();

        let sequence = state.display_counters.take(input.platform);
        let display_name = format!("{}-{}", input.platform.prefix(), sequence);

        let id = state.next_ticket_id;
        state.next_ticket_id += 1;

        let ticket = Ticket {
            id,
            display_name: display_name.clone(),
            platform: input.platform,
            brand: input.brand,
            issue_description: input.issue_description,
            office_name: input.office_name,
            agent_name: input.agent_name,
            employee_id: input.employee_id,
            email: input.email,
            freshworks_email: input.freshworks_email,
            phone_extension: input.phone_extension,
            policy_number: input.policy_number,
            attachments: input.attachments,
            submission_time: now,
            status: Status::Submitted,
            priority: Priority::Empty,
            comments: Vec::new(),
        };
        state.tickets.insert(id, ticket);

        log::info!("ticket {} submitted as {}", id, display_name);
        Ok(id)
    }

    async fn get_ticket(&self, id: u64) -> Result<Option<Ticket>> {
        Ok(self.lock().tickets.get(&id).cloned())
    }

    async fn get_tickets(&self, filter: TicketFilter) -> Result<Vec<Ticket>> {
        let state = self.lock();
        let mut matches: Vec<Ticket> = state
            .tickets
            .values()
            .filter(|ticket| matches_filter(ticket, &filter))
            .cloned()
            .collect();
        // Most recent first; the stable sort keeps id order within ties.
        matches.sort_by(|a, b| b.submission_time.cmp(&a.submission_time));
        Ok(matches)
    }

    async fn search_tickets(&self, term: &str) -> Result<Vec<Ticket>> {
        let needle = term.to_lowercase();
        let state = self.lock();
        // Insertion order, no sort — distinct from get_tickets.
        Ok(state
            .tickets
            .values()
            .filter(|ticket| matches_term(ticket, &needle))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: u64, status: Status) -> Result<()> {
        let mut state = self.lock();
        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or(AppError::NotFound("Ticket", id))?;
        ticket.status = status;
        Ok(())
    }

    async fn update_priority(&self, id: u64, priority: Priority) -> Result<()> {
        let mut state = self.lock();
        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or(AppError::NotFound("Ticket", id))?;
        ticket.priority = priority;
        Ok(())
    }

    async fn add_comment(&self, id: u64, author: &str, content: &str) -> Result<()> {
        let now = self.clock.now_ns();
        let mut state = self.lock();
        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or(AppError::NotFound("Ticket", id))?;
        ticket.comments.push(Comment {
            author: author.to_string(),
            content: content.to_string(),
            timestamp: now,
        });
        Ok(())
    }

    async fn ticket_analytics(&self, query: AnalyticsQuery) -> Result<Vec<AnalyticsBucket>> {
        let state = self.lock();
        let mut buckets: HashMap<String, AnalyticsBucket> = HashMap::new();

        for ticket in state.tickets.values() {
            if ticket.submission_time < query.start_time
                || ticket.submission_time > query.end_time
            {
                continue;
            }
            // Week and month currently share the daily key; the selector
            // is accepted for wire stability but does not change bucketing.
            let key = match query.granularity {
                Granularity::Day | Granularity::Week | Granularity::Month => {
                    period_key(ticket.submission_time)
                }
            };
            let bucket = buckets
                .entry(key.clone())
                .or_insert_with(|| AnalyticsBucket::empty(key));
            match ticket.platform {
                Platform::OneSpan => bucket.one_span += 1,
                Platform::ObserveAi => bucket.observe_ai += 1,
                Platform::Freshworks => bucket.freshworks += 1,
            }
            bucket.total += 1;
        }

        if buckets.is_empty() {
            // Callers always get at least one data point: a zero bucket
            // keyed to today.
            return Ok(vec![AnalyticsBucket::empty(period_key(
                self.clock.now_ns(),
            ))]);
        }
        Ok(buckets.into_values().collect())
    }
}

#[async_trait]
impl HelpRepo for MemoryOpsStore {
    async fn save_topic(&self, input: HelpTopicInput) -> Result<u64> {
        let now = self.clock.now_ns();
        let mut state = self.lock();

        if let Some(id) = input.id {
            if let Some(existing) = state.drafts.get_mut(&id) {
                // Update in place: id and created_time survive, the rest
                // is overwritten wholesale.
                existing.topic_name = input.topic_name;
                existing.platform = input.platform;
                existing.explanation = input.explanation;
                existing.modified_time = now;
                return Ok(id);
            }
        }

        // New draft: sentinel id, or an id no draft carries anymore.
        let id = state.next_topic_id;
        state.next_topic_id += 1;
        state.drafts.insert(
            id,
            HelpTopic {
                id,
                topic_name: input.topic_name,
                platform: input.platform,
                explanation: input.explanation,
                created_time: now,
                modified_time: now,
            },
        );
        Ok(id)
    }

    async fn delete_topic(&self, id: u64) -> Result<()> {
        // No-op when absent. The published copy survives until the next
        // publish omits it.
        self.lock().drafts.remove(&id);
        Ok(())
    }

    async fn publish(&self) -> Result<()> {
        let now = self.clock.now_ns();
        let mut state = self.lock();
        state.published = state
            .drafts
            .iter()
            .map(|(id, draft)| {
                let mut copy = draft.clone();
                copy.modified_time = now;
                (*id, copy)
            })
            .collect();
        log::info!("published {} help topics", state.published.len());
        Ok(())
    }

    async fn published_topics(&self) -> Result<Vec<HelpTopic>> {
        Ok(self.lock().published.values().cloned().collect())
    }

    async fn draft_topics(&self) -> Result<Vec<HelpTopic>> {
        Ok(self.lock().drafts.values().cloned().collect())
    }
}
