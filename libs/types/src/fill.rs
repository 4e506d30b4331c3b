//! Fill records
//!
//! A fill is the atomic unit of matching: one resting (maker) order crossed
//! by one incoming (taker) order at the maker's price. Fills produced by a
//! single submission form an ordered list and are delivered downstream in
//! exactly that order.

use crate::ids::{AccountId, OrderId, PairId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed match between a maker and a taker order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Global monotonic fill sequence; also the idempotency token for
    /// settlement retry
    pub sequence: u64,
    pub pair: PairId,

    // Order references
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,

    // Owner references
    pub maker_owner: AccountId,
    pub taker_owner: AccountId,

    /// Side of the incoming (taker) order
    pub taker_side: Side,
    /// Execution price: always the resting order's price
    pub price: Price,
    /// Base units exchanged
    pub quantity: Quantity,
}

impl Fill {
    /// Quote-leg value of the fill (price x quantity)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.quantity.as_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fill() -> Fill {
        Fill {
            sequence: 7,
            pair: PairId::new("BTC/USDT"),
            maker_order_id: OrderId::from_u64(1),
            taker_order_id: OrderId::from_u64(2),
            maker_owner: AccountId::new(),
            taker_owner: AccountId::new(),
            taker_side: Side::Buy,
            price: Price::from_u64(200),
            quantity: Quantity::from_u64(50),
        }
    }

    #[test]
    fn test_notional() {
        let fill = sample_fill();
        assert_eq!(fill.notional(), Decimal::from(10000));
    }

    #[test]
    fn test_fill_serialization_round_trip() {
        let fill = sample_fill();
        let json = serde_json::to_string(&fill).unwrap();
        let back: Fill = serde_json::from_str(&json).unwrap();
        assert_eq!(fill, back);
    }
}
