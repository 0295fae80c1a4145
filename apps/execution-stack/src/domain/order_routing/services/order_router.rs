//! Posture and price selection.
//!
//! Rules, first match wins:
//!
//! 1. spread above `wide_spread_bps` → `neutral`, LIMIT at mid
//! 2. urgency `high` → `take`; MARKET stays market, LIMIT moves to the far touch
//! 3. otherwise → `join`, LIMIT at the passive touch
//!
//! A book without a usable two-sided quote has zero spread, and `join` then
//! keeps the caller's order type and price.

use rust_decimal::Decimal;

use crate::domain::order_execution::value_objects::{BookContext, OrderSide, OrderType, Urgency};
use crate::domain::order_routing::value_objects::{QueuePosture, RouterConfig, RoutingDecision};

/// Stateless router.
#[derive(Debug, Clone, Default)]
pub struct OrderRouter {
    config: RouterConfig,
}

impl OrderRouter {
    /// Create a router.
    #[must_use]
    pub const fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Router parameters.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Choose posture, order type and price.
    #[must_use]
    pub fn route(
        &self,
        side: OrderSide,
        urgency: Urgency,
        order_type: OrderType,
        limit_price: Option<Decimal>,
        book: &BookContext,
    ) -> RoutingDecision {
        let route = self.config.route.as_str();
        let quoted = book.has_two_sided_quote();
        let spread_bps = if quoted {
            book.spread_bps()
        } else {
            Decimal::ZERO
        };

        if spread_bps > self.config.wide_spread_bps {
            return RoutingDecision::limit(QueuePosture::Neutral, book.mid(), route);
        }

        if urgency == Urgency::High {
            return match order_type {
                OrderType::Market => RoutingDecision::market(QueuePosture::Take, route),
                OrderType::Limit => {
                    let price = if quoted {
                        let far = far_touch(side, book);
                        limit_price.map_or(far, |hint| more_aggressive(side, hint, far))
                    } else {
                        limit_price.unwrap_or(book.last)
                    };
                    RoutingDecision::limit(QueuePosture::Take, price, route)
                }
            };
        }

        if quoted {
            return RoutingDecision::limit(QueuePosture::Join, passive_touch(side, book), route);
        }

        match (order_type, limit_price) {
            (OrderType::Limit, Some(price)) => {
                RoutingDecision::limit(QueuePosture::Join, price, route)
            }
            (OrderType::Limit, None) => {
                RoutingDecision::limit(QueuePosture::Join, book.last, route)
            }
            (OrderType::Market, _) => RoutingDecision::market(QueuePosture::Join, route),
        }
    }
}

const fn far_touch(side: OrderSide, book: &BookContext) -> Decimal {
    match side {
        OrderSide::Buy => book.ask,
        OrderSide::Sell => book.bid,
    }
}

const fn passive_touch(side: OrderSide, book: &BookContext) -> Decimal {
    match side {
        OrderSide::Buy => book.bid,
        OrderSide::Sell => book.ask,
    }
}

/// The price more willing to trade: higher for buys, lower for sells.
fn more_aggressive(side: OrderSide, a: Decimal, b: Decimal) -> Decimal {
    match side {
        OrderSide::Buy => a.max(b),
        OrderSide::Sell => a.min(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // 10 bps spread
    fn tight() -> BookContext {
        BookContext::new(dec!(99.95), dec!(100.05), dec!(100))
    }

    // 50 bps spread
    fn wide() -> BookContext {
        BookContext::new(dec!(99.75), dec!(100.25), dec!(100))
    }

    #[test]
    fn wide_spread_is_neutral_for_every_urgency() {
        let router = OrderRouter::default();
        for urgency in [Urgency::Normal, Urgency::High] {
            for order_type in [OrderType::Market, OrderType::Limit] {
                let decision = router.route(OrderSide::Buy, urgency, order_type, None, &wide());
                assert_eq!(decision.posture, QueuePosture::Neutral);
                assert_eq!(decision.order_type, OrderType::Limit);
                assert_eq!(decision.limit_price, Some(dec!(100)));
            }
        }
    }

    #[test]
    fn high_urgency_market_stays_market() {
        let decision = OrderRouter::default().route(
            OrderSide::Buy,
            Urgency::High,
            OrderType::Market,
            None,
            &tight(),
        );
        assert_eq!(decision, RoutingDecision::market(QueuePosture::Take, "primary"));
    }

    #[test]
    fn high_urgency_limit_goes_to_far_touch() {
        let router = OrderRouter::default();
        let buy = router.route(
            OrderSide::Buy,
            Urgency::High,
            OrderType::Limit,
            Some(dec!(99.90)),
            &tight(),
        );
        assert_eq!(buy.posture, QueuePosture::Take);
        assert_eq!(buy.limit_price, Some(dec!(100.05)));

        let sell = router.route(
            OrderSide::Sell,
            Urgency::High,
            OrderType::Limit,
            Some(dec!(100.10)),
            &tight(),
        );
        assert_eq!(sell.limit_price, Some(dec!(99.95)));
    }

    #[test]
    fn high_urgency_keeps_more_aggressive_hint() {
        let decision = OrderRouter::default().route(
            OrderSide::Buy,
            Urgency::High,
            OrderType::Limit,
            Some(dec!(100.50)),
            &tight(),
        );
        assert_eq!(decision.limit_price, Some(dec!(100.50)));
    }

    #[test]
    fn normal_urgency_joins_passive_touch() {
        let router = OrderRouter::default();
        let buy = router.route(OrderSide::Buy, Urgency::Normal, OrderType::Market, None, &tight());
        assert_eq!(buy.posture, QueuePosture::Join);
        assert_eq!(buy.order_type, OrderType::Limit);
        assert_eq!(buy.limit_price, Some(dec!(99.95)));

        let sell = router.route(
            OrderSide::Sell,
            Urgency::Normal,
            OrderType::Market,
            None,
            &tight(),
        );
        assert_eq!(sell.limit_price, Some(dec!(100.05)));
    }

    #[test]
    fn no_quote_join_keeps_hint() {
        let router = OrderRouter::default();
        let last_only = BookContext::new(Decimal::ZERO, Decimal::ZERO, dec!(100));

        let market = router.route(
            OrderSide::Buy,
            Urgency::Normal,
            OrderType::Market,
            None,
            &last_only,
        );
        assert_eq!(market, RoutingDecision::market(QueuePosture::Join, "primary"));

        let limit = router.route(
            OrderSide::Buy,
            Urgency::Normal,
            OrderType::Limit,
            Some(dec!(99.5)),
            &last_only,
        );
        assert_eq!(limit.limit_price, Some(dec!(99.5)));
    }

    #[test]
    fn crossed_book_is_not_quoted() {
        let crossed = BookContext::new(dec!(100.10), dec!(99.90), dec!(100));
        let decision = OrderRouter::default().route(
            OrderSide::Buy,
            Urgency::Normal,
            OrderType::Market,
            None,
            &crossed,
        );
        assert_eq!(decision.order_type, OrderType::Market);
        assert_eq!(decision.posture, QueuePosture::Join);
    }

    #[test]
    fn threshold_is_exclusive() {
        // exactly 12 bps
        let at_threshold = BookContext::new(dec!(99.94), dec!(100.06), dec!(100));
        let decision = OrderRouter::default().route(
            OrderSide::Buy,
            Urgency::Normal,
            OrderType::Market,
            None,
            &at_threshold,
        );
        assert_eq!(decision.posture, QueuePosture::Join);
    }
}
