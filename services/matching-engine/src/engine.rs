//! Matching engine core
//!
//! Owns one order book per trading pair and runs the matching loop. All
//! mutation goes through `&mut self`, so operations against one engine are
//! strictly serialized; books of different pairs share no state and may live
//! in separate engine instances.

use std::collections::HashMap;
use tracing::debug;
use types::errors::BookError;
use types::fill::Fill;
use types::ids::{OrderId, PairId};
use types::order::Order;

use crate::book::OrderBook;
use crate::matching::{crossing, FillRecorder};

/// Matching engine: pair-keyed book registry plus fill sequencing
#[derive(Debug)]
pub struct MatchingEngine {
    /// Order books per trading pair
    books: HashMap<PairId, OrderBook>,
    /// Fill recorder with sequence generation
    recorder: FillRecorder,
}

/// Result of submitting an order
#[derive(Debug)]
pub enum SubmitOutcome {
    /// No match; the order rests untouched in the book
    Rested,
    /// Some quantity matched; the remainder rests in the book
    PartiallyFilled { fills: Vec<Fill> },
    /// The order matched completely and never rested
    Filled { fills: Vec<Fill> },
}

impl SubmitOutcome {
    /// Fills produced by the submission, in match order
    pub fn fills(&self) -> &[Fill] {
        match self {
            SubmitOutcome::Rested => &[],
            SubmitOutcome::PartiallyFilled { fills } | SubmitOutcome::Filled { fills } => fills,
        }
    }
}

impl MatchingEngine {
    /// Create a new matching engine with a starting fill sequence
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            books: HashMap::new(),
            recorder: FillRecorder::new(starting_sequence),
        }
    }

    /// Submit a validated order against its pair's book
    ///
    /// Crosses the order against the opposite side until it is exhausted or
    /// no longer crossing, then rests any remainder at its limit price with
    /// fresh time priority. The book is never left crossed.
    pub fn submit_order(&mut self, mut order: Order) -> Result<SubmitOutcome, BookError> {
        let book = self
            .books
            .entry(order.pair.clone())
            .or_insert_with_key(|pair| OrderBook::new(pair.clone()));

        // Defensive: the lifecycle allocator never reissues an id
        if book.contains(&order.order_id) {
            return Err(BookError::DuplicateOrderId {
                order_id: order.order_id,
            });
        }

        // Split borrows: book and recorder are disjoint fields
        let fills = Self::match_incoming(book, &mut self.recorder, &mut order);

        if order.is_filled() {
            book.record_terminal(order)?;
            Ok(SubmitOutcome::Filled { fills })
        } else {
            debug!(
                order_id = %order.order_id,
                price = %order.limit_price(),
                remaining = %order.remaining(),
                "resting order"
            );
            book.insert_open_order(order)?;
            if fills.is_empty() {
                Ok(SubmitOutcome::Rested)
            } else {
                Ok(SubmitOutcome::PartiallyFilled { fills })
            }
        }
    }

    /// Cross an incoming order against the opposite side of its book
    ///
    /// Each iteration fills `min(remaining(incoming), remaining(maker))`
    /// base units at the maker's price, applies both fill updates back to
    /// back with no intervening control flow, and de-indexes the maker once
    /// it is exhausted. A partially filled maker keeps its queue position.
    fn match_incoming(
        book: &mut OrderBook,
        recorder: &mut FillRecorder,
        order: &mut Order,
    ) -> Vec<Fill> {
        let mut fills = Vec::new();

        while !order.is_filled() {
            let Some((maker_price, maker_id)) = book.peek_best_opposite(order.side) else {
                break;
            };
            if !crossing::crosses(order.side, order.limit_price(), maker_price) {
                break;
            }

            let maker = book
                .order_mut(&maker_id)
                .expect("indexed order must exist in the table");

            let fill_quantity = maker.remaining().min(order.remaining());

            // Both fill states advance together; a failure in either assert
            // aborts the whole operation rather than leaving one side
            // credited.
            maker.apply_fill(fill_quantity);
            order.apply_fill(fill_quantity);

            let maker_filled = maker.is_filled();
            let fill = recorder.record(
                order.pair.clone(),
                maker,
                order,
                maker_price,
                fill_quantity,
            );
            debug!(
                sequence = fill.sequence,
                maker = %fill.maker_order_id,
                taker = %fill.taker_order_id,
                price = %fill.price,
                quantity = %fill.quantity,
                "fill"
            );
            fills.push(fill);

            if maker_filled {
                let popped = book.pop_best_opposite(order.side);
                debug_assert_eq!(popped, Some(maker_id));
            }
        }

        fills
    }

    /// De-index an open order and mark it cancelled
    ///
    /// Returns false when the pair or order is unknown or the order is
    /// already terminal; callers decide how to surface that.
    pub fn cancel_order(&mut self, pair: &PairId, order_id: &OrderId) -> bool {
        let Some(book) = self.books.get_mut(pair) else {
            return false;
        };
        if !book.remove_order(order_id) {
            return false;
        }
        if let Some(order) = book.order_mut(order_id) {
            order.cancel();
            debug!(order_id = %order_id, "order cancelled");
        }
        true
    }

    /// Get the book for a pair, if any order ever reached it
    pub fn book(&self, pair: &PairId) -> Option<&OrderBook> {
        self.books.get(pair)
    }
}
