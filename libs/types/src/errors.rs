//! Error types for the matching engine
//!
//! Taxonomy using thiserror. None of these are retried by the engine itself;
//! retry policy belongs to the caller. `BookError::DuplicateOrderId` is a
//! defensive check on an invariant breach and is treated as fatal by the
//! engine rather than recovered silently.

use crate::ids::OrderId;
use crate::numeric::Quantity;
use crate::order::OrderStatus;
use thiserror::Error;

/// Errors surfaced to callers of the order lifecycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("invalid order parameters: {reason}")]
    InvalidOrderParams { reason: String },

    #[error("requester does not own order {order_id}")]
    NotOwner { order_id: OrderId },

    #[error("order {order_id} already in terminal state: {status}")]
    AlreadyTerminal {
        order_id: OrderId,
        status: OrderStatus,
    },

    #[error("order not found: {order_id}")]
    NotFound { order_id: OrderId },

    #[error("insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        requested: Quantity,
        available: Quantity,
    },
}

/// Errors internal to order book bookkeeping
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    #[error("duplicate order id inserted into book: {order_id}")]
    DuplicateOrderId { order_id: OrderId },
}
