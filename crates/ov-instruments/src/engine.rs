//! The pricing-engine seam.

use crate::{MarketParameters, OptionSpec, PriceEstimate};
use ov_core::Result;

/// A pricing engine: configured with a model, it prices an option under a
/// given market.
///
/// Engines hold no cross-call state, so one engine may price many
/// strikes or maturities concurrently.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// Price `option` under `market`.
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate>;
}
