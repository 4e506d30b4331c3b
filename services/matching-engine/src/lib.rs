//! Limit order matching engine
//!
//! Price-time priority matching over per-pair order books.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced; ties broken by admission order,
//!   never by a caller-supplied clock
//! - Deterministic matching (same inputs, same outputs)
//! - Fill conservation: an order's filled amount only grows and never
//!   exceeds its size
//! - A crossed book is never observable between operations

pub mod book;
pub mod engine;
pub mod events;
pub mod lifecycle;
pub mod matching;
pub mod settlement;

pub use engine::MatchingEngine;
pub use lifecycle::OrderLifecycleManager;
