//! Order lifecycle management
//!
//! The outer surface of the engine: placement validation, id and logical
//! clock allocation, cancellation authorization, idempotency guards, and
//! settlement/event emission. All state mutation funnels through `&mut self`
//! methods, which serializes every operation against the engine.
//!
//! Logical time is an internal counter ticked once per admitted order.
//! Priority within a price level is governed solely by admission order;
//! neither wall clocks nor caller-supplied timestamps exist anywhere in the
//! pipeline, so clock manipulation cannot affect priority.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};
use types::errors::OrderError;
use types::fill::Fill;
use types::ids::{AccountId, OrderId, PairId};
use types::numeric::Quantity;
use types::order::{normalize_legs, Order, Side};

use crate::book::OrderBook;
use crate::engine::{MatchingEngine, SubmitOutcome};
use crate::events::{EngineEvent, OrderCancelledEvent, OrderFilledEvent, OrderPlacedEvent};
use crate::settlement::SettlementSink;

/// Order submission request
///
/// Balance custody for the offered leg is the caller's concern and is
/// assumed verified before this reaches the engine.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub owner: AccountId,
    pub base_token: String,
    pub quote_token: String,
    pub side: Side,
    pub amount_offered: Decimal,
    pub amount_requested: Decimal,
}

/// Result of an accepted placement
#[derive(Debug)]
pub struct Placement {
    /// The allocated id, returned whether the order filled, partially
    /// filled, or rested untouched
    pub order_id: OrderId,
    /// Fills in match order
    pub fills: Vec<Fill>,
    /// Events in contract order: placed first, then fills
    pub events: Vec<EngineEvent>,
}

/// Read-only execution estimate from current depth
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteEstimate {
    /// Base units that would fill
    pub base_quantity: Quantity,
    /// Quote units they would cost at resting prices
    pub quote_cost: Decimal,
}

/// Lifecycle manager wrapping the matching engine
pub struct OrderLifecycleManager<S: SettlementSink> {
    engine: MatchingEngine,
    settlement: S,
    /// id -> pair routing; append-only, terminal ids stay resolvable
    placements: HashMap<OrderId, PairId>,
    /// Next order id; strictly increasing, never reused
    next_order_id: u64,
    /// Logical clock; ticks once per admitted order
    logical_clock: u64,
}

impl<S: SettlementSink> OrderLifecycleManager<S> {
    /// Create a lifecycle manager around a fresh engine
    pub fn new(settlement: S) -> Self {
        Self {
            engine: MatchingEngine::new(1),
            settlement,
            placements: HashMap::new(),
            next_order_id: 1,
            logical_clock: 0,
        }
    }

    fn allocate_order_id(&mut self) -> OrderId {
        let id = OrderId::from_u64(self.next_order_id);
        self.next_order_id += 1;
        id
    }

    fn tick(&mut self) -> u64 {
        self.logical_clock += 1;
        self.logical_clock
    }

    /// Validate and submit a new order
    ///
    /// Rejections happen before any state change. On acceptance the order is
    /// matched to completion, any remainder rests, fills are committed to
    /// the settlement sink in sequence order, and the id is returned.
    pub fn place(&mut self, request: PlaceOrder) -> Result<Placement, OrderError> {
        let pair = PairId::from_tokens(&request.base_token, &request.quote_token)
            .ok_or_else(|| Self::reject("pair tokens must be non-empty and distinct"))?;
        let amount_offered = Quantity::try_positive(request.amount_offered)
            .ok_or_else(|| Self::reject("amount offered must be positive"))?;
        let amount_requested = Quantity::try_positive(request.amount_requested)
            .ok_or_else(|| Self::reject("amount requested must be positive"))?;
        let (price, quantity) = normalize_legs(request.side, amount_offered, amount_requested)
            .ok_or_else(|| Self::reject("order legs must form a positive price"))?;

        let order_id = self.allocate_order_id();
        let submitted_at = self.tick();
        let order = Order::new(
            order_id,
            request.owner,
            pair.clone(),
            request.side,
            price,
            amount_offered,
            amount_requested,
            quantity,
            submitted_at,
        );

        self.placements.insert(order_id, pair);

        let outcome = match self.engine.submit_order(order) {
            Ok(outcome) => outcome,
            // The allocator never reissues ids, so a duplicate means the
            // book state is corrupt; halt instead of matching against it.
            Err(err) => panic!("order book invariant violated: {}", err),
        };

        let fills = match outcome {
            SubmitOutcome::Rested => Vec::new(),
            SubmitOutcome::PartiallyFilled { fills } | SubmitOutcome::Filled { fills } => fills,
        };

        // Commit after the whole loop has applied, in sequence order
        for fill in &fills {
            self.settlement.commit(fill);
        }

        let mut events = Vec::with_capacity(1 + fills.len());
        events.push(EngineEvent::OrderPlaced(OrderPlacedEvent {
            order_id,
            owner: request.owner,
            side: request.side,
            price,
            quantity,
            timestamp: submitted_at,
        }));
        for fill in &fills {
            events.push(EngineEvent::OrderFilled(OrderFilledEvent {
                maker_order_id: fill.maker_order_id,
                taker_order_id: fill.taker_order_id,
                price: fill.price,
                quantity: fill.quantity,
                sequence: fill.sequence,
            }));
        }

        debug!(
            order_id = %order_id,
            fills = fills.len(),
            "order placed"
        );

        Ok(Placement {
            order_id,
            fills,
            events,
        })
    }

    /// Cancel an open order on behalf of `requester`
    ///
    /// Only the owner may cancel. Terminal orders answer `AlreadyTerminal`
    /// no matter how often the cancel is retried; nothing is mutated.
    pub fn cancel(
        &mut self,
        order_id: OrderId,
        requester: AccountId,
    ) -> Result<Vec<EngineEvent>, OrderError> {
        let Some(pair) = self.placements.get(&order_id).cloned() else {
            return Err(OrderError::NotFound { order_id });
        };
        let Some(order) = self.engine.book(&pair).and_then(|book| book.get(&order_id)) else {
            return Err(OrderError::NotFound { order_id });
        };

        // Ownership is checked before status so a non-owner learns nothing
        // beyond the order's existence
        if order.owner != requester {
            warn!(order_id = %order_id, requester = %requester, "cancel by non-owner rejected");
            return Err(OrderError::NotOwner { order_id });
        }
        if order.status.is_terminal() {
            return Err(OrderError::AlreadyTerminal {
                order_id,
                status: order.status,
            });
        }
        let owner = order.owner;

        let removed = self.engine.cancel_order(&pair, &order_id);
        debug_assert!(removed, "non-terminal order must be cancellable");

        Ok(vec![EngineEvent::OrderCancelled(OrderCancelledEvent {
            order_id,
            owner,
        })])
    }

    /// Snapshot of one order, open or terminal
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let pair = self.placements.get(&order_id)?;
        self.engine.book(pair)?.get(&order_id).cloned()
    }

    /// Open buy order ids for a pair, best price first, admission order
    /// within a level
    pub fn buy_orders(&self, pair: &PairId) -> Vec<OrderId> {
        self.engine
            .book(pair)
            .map(OrderBook::snapshot_bids)
            .unwrap_or_default()
    }

    /// Open sell order ids for a pair, best price first, admission order
    /// within a level
    pub fn sell_orders(&self, pair: &PairId) -> Vec<OrderId> {
        self.engine
            .book(pair)
            .map(OrderBook::snapshot_asks)
            .unwrap_or_default()
    }

    /// Estimate the cost of taking `base_quantity` units from current depth
    ///
    /// Read-only; never mutates the book and never matches anything.
    pub fn quote(
        &self,
        pair: &PairId,
        side: Side,
        base_quantity: Decimal,
    ) -> Result<QuoteEstimate, OrderError> {
        let target = Quantity::try_positive(base_quantity)
            .ok_or_else(|| Self::reject("quote quantity must be positive"))?;

        let (available, cost) = match self.engine.book(pair) {
            Some(book) => book.sweep(side, target),
            None => (Quantity::zero(), Decimal::ZERO),
        };

        if available < target {
            return Err(OrderError::InsufficientLiquidity {
                requested: target,
                available,
            });
        }
        Ok(QuoteEstimate {
            base_quantity: target,
            quote_cost: cost,
        })
    }

    /// Direct read access to a pair's book
    pub fn book(&self, pair: &PairId) -> Option<&OrderBook> {
        self.engine.book(pair)
    }

    /// Read access to the injected settlement sink
    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    fn reject(reason: &str) -> OrderError {
        warn!(reason = %reason, "order request rejected");
        OrderError::InvalidOrderParams {
            reason: reason.to_string(),
        }
    }
}
