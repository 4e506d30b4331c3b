//! Crossing detection
//!
//! Determines when an incoming order's limit price reaches a resting order's
//! price. Both prices are already normalized onto the quote-per-base axis,
//! so the test is a plain comparison with side-dependent direction.

use types::numeric::Price;
use types::order::Side;

/// Check if an incoming order crosses a resting order's price
///
/// A buy crosses when it bids at least the resting ask; a sell crosses when
/// it asks at most the resting bid.
pub fn crosses(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_crosses_lower_ask() {
        assert!(crosses(
            Side::Buy,
            Price::from_u64(200),
            Price::from_u64(190)
        ));
    }

    #[test]
    fn test_equal_prices_cross() {
        let price = Price::from_u64(200);
        assert!(crosses(Side::Buy, price, price));
        assert!(crosses(Side::Sell, price, price));
    }

    #[test]
    fn test_buy_below_ask_does_not_cross() {
        assert!(!crosses(
            Side::Buy,
            Price::from_u64(190),
            Price::from_u64(200)
        ));
    }

    #[test]
    fn test_sell_crosses_higher_bid() {
        assert!(crosses(
            Side::Sell,
            Price::from_u64(100),
            Price::from_u64(200)
        ));
    }

    #[test]
    fn test_sell_above_bid_does_not_cross() {
        assert!(!crosses(
            Side::Sell,
            Price::from_u64(210),
            Price::from_u64(200)
        ));
    }
}
