//! Content loading modes and stale-delivery detection.

use crate::model::ItemIndex;
use serde::{Deserialize, Serialize};

/// How bound pages receive their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLoading {
    /// Fetch synchronously while binding.
    #[default]
    Immediate,
    /// Bind with a placeholder and queue a [`ContentRequest`]; the embedder fetches
    /// and calls `deliver_content` later.
    Deferred,
}

/// Identifies one binding of one page.
///
/// Every bind gets a fresh ticket, so a ticket from before a page was recycled never
/// matches the page's current binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BindingTicket(u64);

impl BindingTicket {
    /// Ticket with the given sequence number.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Sequence number of this ticket.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A pending content fetch for a page bound in deferred mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentRequest {
    /// Item whose content is wanted.
    pub index: ItemIndex,
    /// Binding the content is destined for.
    pub ticket: BindingTicket,
}

/// Result of delivering fetched content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The page is still bound to the request; content was applied.
    Applied,
    /// The load failed; the page keeps its placeholder.
    Failed,
    /// The page was recycled or rebound since the request; result discarded.
    Stale,
}
