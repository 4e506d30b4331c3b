//! Ask (sell-side) book index
//!
//! Maintains open sell order ids sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order; within a price level,
//! ids sit in admission order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Ask (sell) side index
///
/// The lowest price is the best ask. At each price level, orders are
/// maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels; natural iteration order is best-first
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
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

    /// Peek the best ask: lowest price, earliest admission within it
    pub fn peek_best(&self) -> Option<(Price, OrderId)> {
        self.levels
            .iter()
            .next()
            .and_then(|(price, level)| level.front().map(|id| (*price, id)))
    }

    /// Pop the best ask's front order id
    pub fn pop_best(&mut self) -> Option<OrderId> {
        let (price, order_id) = {
            let (price, level) = self.levels.iter_mut().next()?;
            (*price, level.pop_front()?)
        };
        if self.levels.get(&price).is_some_and(|l| l.is_empty()) {
            self.levels.remove(&price);
        }
        Some(order_id)
    }

    /// Get the best ask price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Iterate all resident ids in priority order (price ascending, then
    /// admission order)
    pub fn iter(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.levels
            .iter()
            .flat_map(|(_, level)| level.iter().copied())
    }

    /// Iterate price levels best-first
    pub fn iter_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    pub fn contains(&self, order_id: &OrderId, price: Price) -> bool {
        self.levels
            .get(&price)
            .is_some_and(|level| level.contains(order_id))
    }

    /// Check if the ask side is empty
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_is_lowest_price() {
        let mut book = AskBook::new();
        book.insert(OrderId::from_u64(1), Price::from_u64(200));
        book.insert(OrderId::from_u64(2), Price::from_u64(190));
        book.insert(OrderId::from_u64(3), Price::from_u64(210));

        let (price, id) = book.peek_best().unwrap();
        assert_eq!(price, Price::from_u64(190));
        assert_eq!(id, OrderId::from_u64(2));
    }

    #[test]
    fn test_fifo_within_level() {
        let mut book = AskBook::new();
        book.insert(OrderId::from_u64(1), Price::from_u64(100));
        book.insert(OrderId::from_u64(2), Price::from_u64(100));

        assert_eq!(book.pop_best(), Some(OrderId::from_u64(1)));
        assert_eq!(book.pop_best(), Some(OrderId::from_u64(2)));
        assert!(book.is_empty());
    }

    #[test]
    fn test_remove_clears_empty_level() {
        let mut book = AskBook::new();
        book.insert(OrderId::from_u64(1), Price::from_u64(100));
        assert!(book.remove(&OrderId::from_u64(1), Price::from_u64(100)));
        assert!(book.is_empty());
    }

    #[test]
    fn test_iter_priority_order() {
        let mut book = AskBook::new();
        book.insert(OrderId::from_u64(1), Price::from_u64(110));
        book.insert(OrderId::from_u64(2), Price::from_u64(100));
        book.insert(OrderId::from_u64(3), Price::from_u64(110));

        let ids: Vec<_> = book.iter().collect();
        assert_eq!(
            ids,
            vec![
                OrderId::from_u64(2),
                OrderId::from_u64(1),
                OrderId::from_u64(3)
            ]
        );
    }
}
