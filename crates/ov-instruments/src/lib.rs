//! # ov-instruments
//!
//! Option contract terms and market inputs: payoffs, exercise styles,
//! barriers, spot/rate/maturity parameters, and the price-estimate result
//! type returned by the engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod exercise;
pub mod market;
pub mod option;
pub mod payoff;
pub mod results;

pub use engine::PricingEngine;
pub use exercise::ExerciseType;
pub use market::MarketParameters;
pub use option::{Barrier, BarrierType, OptionSpec};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
pub use results::PriceEstimate;
