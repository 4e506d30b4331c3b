//! Property-based tests over random order flow.

use matching_engine::lifecycle::{OrderLifecycleManager, PlaceOrder};
use matching_engine::settlement::RecordingSink;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use types::fill::Fill;
use types::ids::{AccountId, OrderId, PairId};
use types::numeric::Quantity;
use types::order::Side;

fn manager() -> OrderLifecycleManager<RecordingSink> {
    OrderLifecycleManager::new(RecordingSink::new())
}

fn pair() -> PairId {
    PairId::new("BTC/USDT")
}

/// Build a request with a given quote-per-base price and base quantity
fn request(owner: AccountId, side: Side, price: u64, quantity: u64) -> PlaceOrder {
    let (offered, requested) = match side {
        Side::Buy => (price * quantity, quantity),
        Side::Sell => (quantity, price * quantity),
    };
    PlaceOrder {
        owner,
        base_token: "BTC".to_string(),
        quote_token: "USDT".to_string(),
        side,
        amount_offered: Decimal::from(offered),
        amount_requested: Decimal::from(requested),
    }
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

proptest! {
    /// After any order flow, the two snapshots never share or repeat an id,
    /// the book is never crossed, and every structural invariant holds.
    #[test]
    fn prop_snapshots_have_no_duplicates(
        flow in prop::collection::vec((arb_side(), 1u64..20, 1u64..50), 1..60),
    ) {
        let mut manager = manager();
        let owner = AccountId::new();

        for (side, price, quantity) in flow {
            manager.place(request(owner, side, price, quantity)).unwrap();

            let bids = manager.buy_orders(&pair());
            let asks = manager.sell_orders(&pair());
            let mut seen = HashSet::new();
            for id in bids.iter().chain(asks.iter()) {
                prop_assert!(seen.insert(*id), "duplicate id {} in snapshots", id);
            }
            manager.book(&pair()).unwrap().check_invariants();
        }
    }

    /// Every fill only grows an order's filled amount, the total per order
    /// never exceeds its size, and the sum of fill quantities naming an
    /// order as maker equals that maker's filled amount (unless it also
    /// took fills of its own).
    #[test]
    fn prop_fill_conservation(
        flow in prop::collection::vec((arb_side(), 1u64..15, 1u64..40), 1..60),
    ) {
        let mut manager = manager();
        let owner = AccountId::new();
        let mut all_fills: Vec<Fill> = Vec::new();
        let mut placed: Vec<OrderId> = Vec::new();

        for (side, price, quantity) in flow {
            let placement = manager.place(request(owner, side, price, quantity)).unwrap();
            all_fills.extend(placement.fills);
            placed.push(placement.order_id);
        }

        // Aggregate fill quantity per participating order
        let mut matched: HashMap<OrderId, Quantity> = HashMap::new();
        for fill in &all_fills {
            for id in [fill.maker_order_id, fill.taker_order_id] {
                let entry = matched.entry(id).or_insert_with(Quantity::zero);
                *entry = *entry + fill.quantity;
            }
        }

        for id in placed {
            let order = manager.get_order(id).unwrap();
            prop_assert!(order.check_invariant(), "order {} over-filled", id);
            let expected = matched.remove(&id).unwrap_or_else(Quantity::zero);
            prop_assert_eq!(
                order.filled, expected,
                "order {} filled {} but fills sum to {}",
                id, order.filled, expected
            );
        }
    }

    /// Orders at one price fill strictly in admission order, regardless of
    /// how many and how large they are.
    #[test]
    fn prop_price_time_priority(
        quantities in prop::collection::vec(1u64..30, 2..12),
        take_ratio in 1u64..100,
    ) {
        let mut manager = manager();

        let mut admitted = Vec::new();
        let mut total = 0u64;
        for quantity in &quantities {
            let placement = manager
                .place(request(AccountId::new(), Side::Sell, 10, *quantity))
                .unwrap();
            admitted.push(placement.order_id);
            total += quantity;
        }

        // Take some fraction of the resting base, at least one unit
        let take = (total * take_ratio / 100).max(1);
        let taker = manager
            .place(request(AccountId::new(), Side::Buy, 10, take))
            .unwrap();

        // Makers appear in admission order with no gaps
        let makers: Vec<OrderId> = taker.fills.iter().map(|f| f.maker_order_id).collect();
        prop_assert_eq!(&makers[..], &admitted[..makers.len()]);

        // Everything before the last consumed maker is fully filled
        for id in &makers[..makers.len().saturating_sub(1)] {
            let order = manager.get_order(*id).unwrap();
            prop_assert!(order.is_filled(), "skipped maker {} left partial", id);
        }
    }

    /// The settlement sink sees exactly the fills the placements reported,
    /// in global sequence order.
    #[test]
    fn prop_settlement_matches_reported_fills(
        flow in prop::collection::vec((arb_side(), 1u64..10, 1u64..30), 1..40),
    ) {
        let mut manager = manager();
        let owner = AccountId::new();
        let mut reported: Vec<u64> = Vec::new();

        for (side, price, quantity) in flow {
            let placement = manager.place(request(owner, side, price, quantity)).unwrap();
            reported.extend(placement.fills.iter().map(|f| f.sequence));
        }

        let committed: Vec<u64> = manager
            .settlement()
            .fills()
            .iter()
            .map(|f| f.sequence)
            .collect();
        prop_assert_eq!(&committed, &reported);
        prop_assert!(committed.windows(2).all(|w| w[0] < w[1]));
    }
}
