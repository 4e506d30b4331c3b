//! Order lifecycle types
//!
//! An order is submitted as a pair of legs (amount offered, amount
//! requested). Both sides are normalized onto a single quote-per-base price
//! axis at admission so the matching comparators are side-symmetric:
//!
//! - SELL offers base and requests quote: price = requested / offered,
//!   size = offered.
//! - BUY offers quote and requests base: price = offered / requested,
//!   size = requested.
//!
//! `quantity` and `filled` are base-denominated for both sides. Execution is
//! always at the resting order's price, so a BUY can never spend more quote
//! than it offered.

use crate::ids::{AccountId, OrderId, PairId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order pricing variant
///
/// Only limit orders ship today. The tagged representation keeps the
/// matching loop's price-cross test total when a market variant is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit { price: Price },
}

/// Order status
///
/// `Open -> PartiallyFilled* -> Filled | Cancelled`; `Filled` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Normalize an order's submitted legs into (limit price, base size).
///
/// Returns None when either leg is zero.
pub fn normalize_legs(
    side: Side,
    amount_offered: Quantity,
    amount_requested: Quantity,
) -> Option<(Price, Quantity)> {
    match side {
        // Selling base for quote: size is the offered base
        Side::Sell => {
            let price = Price::from_legs(amount_requested, amount_offered)?;
            Some((price, amount_offered))
        }
        // Buying base with quote: size is the requested base
        Side::Buy => {
            let price = Price::from_legs(amount_offered, amount_requested)?;
            Some((price, amount_requested))
        }
    }
}

/// A limit order with immutable identity and mutable fill state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub owner: AccountId,
    pub pair: PairId,
    pub side: Side,
    pub order_type: OrderType,
    /// Submitted legs, retained verbatim for audit
    pub amount_offered: Quantity,
    pub amount_requested: Quantity,
    /// Base-denominated size derived from the legs
    pub quantity: Quantity,
    /// Base units matched so far; never decreases, never exceeds `quantity`
    pub filled: Quantity,
    pub status: OrderStatus,
    /// Logical admission timestamp (engine-assigned, strictly increasing)
    pub submitted_at: u64,
}

impl Order {
    /// Create a new open order from pre-validated parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: OrderId,
        owner: AccountId,
        pair: PairId,
        side: Side,
        price: Price,
        amount_offered: Quantity,
        amount_requested: Quantity,
        quantity: Quantity,
        submitted_at: u64,
    ) -> Self {
        Self {
            order_id,
            owner,
            pair,
            side,
            order_type: OrderType::Limit { price },
            amount_offered,
            amount_requested,
            quantity,
            filled: Quantity::zero(),
            status: OrderStatus::Open,
            submitted_at,
        }
    }

    /// The normalized limit price (total over all order types)
    pub fn limit_price(&self) -> Price {
        match self.order_type {
            OrderType::Limit { price } => price,
        }
    }

    /// Base units still unmatched
    pub fn remaining(&self) -> Quantity {
        self.quantity
            .checked_sub(self.filled)
            .unwrap_or_else(Quantity::zero)
    }

    /// Check the fill-conservation invariant: filled <= quantity
    pub fn check_invariant(&self) -> bool {
        self.filled <= self.quantity
    }

    /// Check if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled == self.quantity
    }

    /// Check if the order has any fills
    pub fn has_fills(&self) -> bool {
        !self.filled.is_zero()
    }

    /// Apply a fill and advance the status machine
    ///
    /// # Panics
    /// Panics if the fill would exceed the order's size; over-filling is a
    /// matching-loop logic error, never a recoverable condition.
    pub fn apply_fill(&mut self, fill_quantity: Quantity) {
        let new_filled = self.filled + fill_quantity;
        assert!(
            new_filled <= self.quantity,
            "fill would exceed order quantity"
        );
        assert!(
            !self.status.is_terminal(),
            "cannot fill a terminal order"
        );

        self.filled = new_filled;
        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
    }

    /// Mark the order cancelled
    ///
    /// # Panics
    /// Panics if the order is already terminal (callers gate on
    /// `AlreadyTerminal` first).
    pub fn cancel(&mut self) {
        assert!(!self.status.is_terminal(), "cannot cancel terminal order");
        self.status = OrderStatus::Cancelled;
    }
}
