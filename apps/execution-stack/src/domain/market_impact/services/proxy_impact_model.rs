//! Square-root-style proxy impact model.
//!
//! ```text
//! typical  = volume_rate if > 0 else parent_quantity
//! ratio    = clamp(child / typical, min_ratio, 1)
//! score    = ratio^exponent × (1 + participation)
//! slippage = half_spread + last × coefficient × score
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::ImpactEstimator;
use crate::domain::market_impact::value_objects::{ImpactEstimate, ImpactModelConfig};
use crate::domain::order_execution::value_objects::{BookContext, OrderSide};

const SLIPPAGE_DP: u32 = 4;

/// Default impact estimator.
#[derive(Debug, Clone, Default)]
pub struct ProxyImpactModel {
    config: ImpactModelConfig,
}

impl ProxyImpactModel {
    /// Create a model with the given parameters.
    #[must_use]
    pub const fn new(config: ImpactModelConfig) -> Self {
        Self { config }
    }

    /// Model parameters.
    #[must_use]
    pub const fn config(&self) -> &ImpactModelConfig {
        &self.config
    }

    fn half_spread(&self, book: &BookContext) -> Decimal {
        let spread = if book.has_two_sided_quote() {
            book.spread()
        } else {
            let fraction =
                Decimal::from_f64(self.config.fallback_spread_fraction).unwrap_or_default();
            book.last * fraction
        };
        spread / Decimal::TWO
    }

    fn impact_score(&self, book: &BookContext, participation: f64, child: u64, parent: u64) -> f64 {
        let typical = if book.volume_rate > 0.0 {
            book.volume_rate
        } else {
            parent.max(1) as f64
        };
        let ratio = (child as f64 / typical).clamp(self.config.min_ratio, 1.0);
        ratio.powf(self.config.exponent) * (1.0 + participation)
    }
}

impl ImpactEstimator for ProxyImpactModel {
    fn estimate(
        &self,
        book: &BookContext,
        side: OrderSide,
        participation_rate: f64,
        child_quantity: u64,
        parent_quantity: u64,
    ) -> ImpactEstimate {
        let score = self.impact_score(book, participation_rate, child_quantity, parent_quantity);
        let price_impact = Decimal::from_f64(self.config.coefficient * score)
            .map_or(Decimal::ZERO, |factor| book.last * factor);

        let slippage = (self.half_spread(book) + price_impact).round_dp(SLIPPAGE_DP);
        ImpactEstimate::new(slippage * side.sign(), score)
    }
}
