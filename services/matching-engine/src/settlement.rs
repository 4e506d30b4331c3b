//! Settlement seam
//!
//! Balance transfer is an external ledger concern. The lifecycle manager
//! receives a `SettlementSink` capability and commits fills to it only after
//! a whole match loop has applied, in fill-sequence order. The sequence
//! number is the idempotency token: a sink must treat redelivery of an
//! already-committed sequence as a no-op so retries cannot double-credit.

use std::collections::BTreeSet;
use types::fill::Fill;

/// Capability for committing executed fills to an external ledger
pub trait SettlementSink {
    fn commit(&mut self, fill: &Fill);
}

/// Sink that drops fills; for callers that settle from the event stream
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SettlementSink for NullSink {
    fn commit(&mut self, _fill: &Fill) {}
}

/// In-memory sink recording each committed fill exactly once
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    committed: Vec<Fill>,
    seen: BTreeSet<u64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed fills in delivery order
    pub fn fills(&self) -> &[Fill] {
        &self.committed
    }
}

impl SettlementSink for RecordingSink {
    fn commit(&mut self, fill: &Fill) {
        if self.seen.insert(fill.sequence) {
            self.committed.push(fill.clone());
        }
    }
}
