//! Engine event structures
//!
//! The only facts downstream settlement/audit/UI layers may rely on. Within
//! one operation events are emitted in contract order: `OrderPlaced` first,
//! then one `OrderFilled` per consumed maker in match order; a cancellation
//! emits a single `OrderCancelled`.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Order admitted to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub order_id: OrderId,
    pub owner: AccountId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    /// Logical admission timestamp
    pub timestamp: u64,
}

/// One maker/taker match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFilledEvent {
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub sequence: u64,
}

/// Order cancelled by its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub order_id: OrderId,
    pub owner: AccountId,
}

/// Ordered event stream item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    OrderPlaced(OrderPlacedEvent),
    OrderFilled(OrderFilledEvent),
    OrderCancelled(OrderCancelledEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tags() {
        let event = EngineEvent::OrderCancelled(OrderCancelledEvent {
            order_id: OrderId::from_u64(1),
            owner: AccountId::new(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"ORDER_CANCELLED\""));
    }

    #[test]
    fn test_event_round_trip() {
        let event = EngineEvent::OrderFilled(OrderFilledEvent {
            maker_order_id: OrderId::from_u64(1),
            taker_order_id: OrderId::from_u64(2),
            price: Price::from_u64(200),
            quantity: Quantity::from_u64(50),
            sequence: 9,
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
