//! Bid (buy-side) book index
//!
//! Maintains open buy order ids sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order; within a price level,
//! ids sit in admission order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Bid (buy) side index
///
/// The highest price is the best bid. At each price level, orders are
/// maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels; iterated in reverse for best-first order
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order id at the back of its price level
    pub fn insert(&mut self, order_id: OrderId, price: Price) {
        self.levels
            .entry(price)
            .or_insert_with(PriceLevel::new)
            .push_back(order_id);
    }

    /// Remove an order id from its price level
    ///
    /// Returns true if the id was found and removed
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(order_id) {
                // Remove empty price levels to keep the book clean
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Peek the best bid: highest price, earliest admission within it
    pub fn peek_best(&self) -> Option<(Price, OrderId)> {
        // BTreeMap iter is ascending, so the last level is the best bid
        self.levels
            .iter()
            .next_back()
            .and_then(|(price, level)| level.front().map(|id| (*price, id)))
    }

    /// Pop the best bid's front order id
    pub fn pop_best(&mut self) -> Option<OrderId> {
        let (price, order_id) = {
            let (price, level) = self.levels.iter_mut().next_back()?;
            (*price, level.pop_front()?)
        };
        if self.levels.get(&price).is_some_and(|l| l.is_empty()) {
            self.levels.remove(&price);
        }
        Some(order_id)
    }

    /// Get the best bid price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Iterate all resident ids in priority order (price descending, then
    /// admission order)
    pub fn iter(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.levels
            .iter()
            .rev()
            .flat_map(|(_, level)| level.iter().copied())
    }

    /// Iterate price levels best-first
    pub fn iter_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    pub fn contains(&self, order_id: &OrderId, price: Price) -> bool {
        self.levels
            .get(&price)
            .is_some_and(|level| level.contains(order_id))
    }

    /// Check if the bid side is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total resident order count
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::len).sum()
    }
}
