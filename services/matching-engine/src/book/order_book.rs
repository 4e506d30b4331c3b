//! Per-pair order book
//!
//! Owns the authoritative order table (id -> Order) and the two side
//! indices. The table is append-only: filled and cancelled orders stay in it
//! as terminal audit records; only the indices shrink. Index entries are bare
//! ids, so the table is the single source of truth for fill state.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::errors::BookError;
use types::ids::{OrderId, PairId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::ask_book::AskBook;
use super::bid_book::BidBook;

/// Order book for a single trading pair
#[derive(Debug, Clone)]
pub struct OrderBook {
    pair: PairId,
    /// Authoritative order table; append-only
    orders: HashMap<OrderId, Order>,
    bids: BidBook,
    asks: AskBook,
}

impl OrderBook {
    /// Create a new empty book for one pair
    pub fn new(pair: PairId) -> Self {
        Self {
            pair,
            orders: HashMap::new(),
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    pub fn pair(&self) -> &PairId {
        &self.pair
    }

    /// Check whether an id has ever been admitted to this book
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    /// Get an order (open or terminal) by id
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub(crate) fn order_mut(&mut self, order_id: &OrderId) -> Option<&mut Order> {
        self.orders.get_mut(order_id)
    }

    /// Admit an open order into the table and its side index
    ///
    /// Fails with `DuplicateOrderId` if the id was ever admitted before.
    /// With allocator-issued ids this is unreachable; the check is defensive
    /// and callers treat a failure as fatal.
    pub fn insert_open_order(&mut self, order: Order) -> Result<(), BookError> {
        if self.orders.contains_key(&order.order_id) {
            return Err(BookError::DuplicateOrderId {
                order_id: order.order_id,
            });
        }
        debug_assert!(!order.status.is_terminal(), "resting order must be open");

        let order_id = order.order_id;
        let price = order.limit_price();
        match order.side {
            Side::Buy => self.bids.insert(order_id, price),
            Side::Sell => self.asks.insert(order_id, price),
        }
        self.orders.insert(order_id, order);
        Ok(())
    }

    /// Record a terminal order in the table without touching the indices
    ///
    /// Used for incoming orders that fully filled before resting; the table
    /// keeps their audit record.
    pub(crate) fn record_terminal(&mut self, order: Order) -> Result<(), BookError> {
        if self.orders.contains_key(&order.order_id) {
            return Err(BookError::DuplicateOrderId {
                order_id: order.order_id,
            });
        }
        debug_assert!(order.status.is_terminal(), "record_terminal needs a terminal order");
        self.orders.insert(order.order_id, order);
        Ok(())
    }

    /// Remove an order from its side index
    ///
    /// A missing id (never admitted, or already terminal and de-indexed) is
    /// a tolerated no-op returning false; cancellation racing a fill that
    /// just emptied the order must not be fatal.
    pub fn remove_order(&mut self, order_id: &OrderId) -> bool {
        let Some(order) = self.orders.get(order_id) else {
            return false;
        };
        if order.status.is_terminal() {
            return false;
        }
        let price = order.limit_price();
        match order.side {
            Side::Buy => self.bids.remove(order_id, price),
            Side::Sell => self.asks.remove(order_id, price),
        }
    }

    /// Best bid: highest-priced open buy, earliest first within the level
    pub fn best_bid(&self) -> Option<(Price, OrderId)> {
        self.bids.peek_best()
    }

    /// Best ask: lowest-priced open sell, earliest first within the level
    pub fn best_ask(&self) -> Option<(Price, OrderId)> {
        self.asks.peek_best()
    }

    /// Best resting order on the side a taker would match against
    pub(crate) fn peek_best_opposite(&self, taker_side: Side) -> Option<(Price, OrderId)> {
        match taker_side {
            Side::Buy => self.asks.peek_best(),
            Side::Sell => self.bids.peek_best(),
        }
    }

    /// Pop the best opposite-side order id (after it fully filled)
    pub(crate) fn pop_best_opposite(&mut self, taker_side: Side) -> Option<OrderId> {
        match taker_side {
            Side::Buy => self.asks.pop_best(),
            Side::Sell => self.bids.pop_best(),
        }
    }

    /// Open buy order ids, best-priced first, admission order within a level
    pub fn snapshot_bids(&self) -> Vec<OrderId> {
        self.bids.iter().collect()
    }

    /// Open sell order ids, best-priced first, admission order within a level
    pub fn snapshot_asks(&self) -> Vec<OrderId> {
        self.asks.iter().collect()
    }

    /// Number of orders resident in the indices
    pub fn open_order_count(&self) -> usize {
        self.bids.order_count() + self.asks.order_count()
    }

    /// Read-only sweep of the opposite side: how much of `target` base units
    /// could a taker fill right now, and at what quote cost
    ///
    /// Does not mutate the book. Returns (fillable base, quote cost).
    pub fn sweep(&self, taker_side: Side, target: Quantity) -> (Quantity, Decimal) {
        let mut outstanding = target;
        let mut filled = Quantity::zero();
        let mut cost = Decimal::ZERO;

        let ids: Box<dyn Iterator<Item = (Price, OrderId)> + '_> = match taker_side {
            Side::Buy => Box::new(
                self.asks
                    .iter_levels()
                    .flat_map(|(price, level)| level.iter().map(move |id| (price, *id))),
            ),
            Side::Sell => Box::new(
                self.bids
                    .iter_levels()
                    .flat_map(|(price, level)| level.iter().map(move |id| (price, *id))),
            ),
        };

        for (price, order_id) in ids {
            if outstanding.is_zero() {
                break;
            }
            let Some(order) = self.orders.get(&order_id) else {
                continue;
            };
            let take = order.remaining().min(outstanding);
            filled = filled + take;
            cost += take.as_decimal() * price.as_decimal();
            outstanding = outstanding
                .checked_sub(take)
                .unwrap_or_else(Quantity::zero);
        }

        (filled, cost)
    }

    /// Assert the book's structural invariants; test and debug support
    ///
    /// # Panics
    /// Panics on any violation.
    pub fn check_invariants(&self) {
        let mut seen = std::collections::HashSet::new();

        for (side, ids) in [
            (Side::Buy, self.snapshot_bids()),
            (Side::Sell, self.snapshot_asks()),
        ] {
            for id in ids {
                assert!(seen.insert(id), "order {} indexed twice", id);
                let order = self
                    .orders
                    .get(&id)
                    .unwrap_or_else(|| panic!("indexed order {} missing from table", id));
                assert_eq!(order.side, side, "order {} on wrong side", id);
                assert!(
                    !order.status.is_terminal(),
                    "terminal order {} still indexed",
                    id
                );
                assert!(order.check_invariant(), "order {} over-filled", id);
            }
        }

        // Open orders must be resident; terminal ones must not be
        for (id, order) in &self.orders {
            let resident = seen.contains(id);
            assert_eq!(
                !order.status.is_terminal(),
                resident,
                "order {} residency disagrees with status {}",
                id,
                order.status
            );
        }

        // The spread never crosses between operations
        if let (Some(bid), Some(ask)) = (self.bids.best_price(), self.asks.best_price()) {
            assert!(bid < ask, "book is crossed: bid {} >= ask {}", bid, ask);
        }
    }
}
