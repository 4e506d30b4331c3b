//! Fill record generation
//!
//! Allocates the global monotonic fill sequence and materializes `Fill`
//! records. The sequence is the idempotency token settlement keys on.

use types::fill::Fill;
use types::ids::PairId;
use types::numeric::{Price, Quantity};
use types::order::Order;

/// Fill recorder with sequence generation
#[derive(Debug)]
pub struct FillRecorder {
    sequence_counter: u64,
}

impl FillRecorder {
    /// Create a new recorder with a starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get the next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Record a fill of `quantity` base units between a resting maker and an
    /// incoming taker, at the maker's price
    pub fn record(
        &mut self,
        pair: PairId,
        maker: &Order,
        taker: &Order,
        price: Price,
        quantity: Quantity,
    ) -> Fill {
        Fill {
            sequence: self.next_sequence(),
            pair,
            maker_order_id: maker.order_id,
            taker_order_id: taker.order_id,
            maker_owner: maker.owner,
            taker_owner: taker.owner,
            taker_side: taker.side,
            price,
            quantity,
        }
    }
}
