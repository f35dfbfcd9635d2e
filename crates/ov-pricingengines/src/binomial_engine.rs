//! Binomial (CRR lattice) engine for European and American vanilla options.

use ov_core::{ensure, errors::require_positive, Real, Result, Time, Volatility};
use ov_instruments::{
    ExerciseType, MarketParameters, OptionSpec, OptionType, PriceEstimate, PricingEngine,
};
use ov_methods::lattice::{price_american, price_european, BinomialTree};
use ov_models::VolatilityInput;

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 200;

/// Cox-Ross-Rubinstein lattice engine.
///
/// American exercise compares continuation with intrinsic value at every
/// node; barriers are not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialEngine {
    volatility: Volatility,
    steps: usize,
}

impl BinomialEngine {
    /// Create an engine with [`DEFAULT_STEPS`] steps.
    pub fn new(volatility: Volatility) -> Result<Self> {
        require_positive("sigma", volatility)?;
        Ok(Self {
            volatility,
            steps: DEFAULT_STEPS,
        })
    }

    /// Create an engine from a [`VolatilityInput`]; only the flat case is accepted.
    pub fn from_input(input: &VolatilityInput) -> Result<Self> {
        Self::new(input.require_flat()?)
    }

    /// Set the number of time steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Price `option` under `market`.
    pub fn price(&self, market: &MarketParameters, option: &OptionSpec) -> Result<Real> {
        market.validate()?;
        ensure!(option.barrier.is_none(), "the binomial engine does not price barriers");
        crr_price(
            market.spot,
            option.strike,
            market.rate,
            market.dividend_yield,
            self.volatility,
            market.maturity,
            self.steps,
            option.option_type,
            option.exercise,
        )
    }
}

impl PricingEngine for BinomialEngine {
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate> {
        self.price(market, option).map(PriceEstimate::exact)
    }
}

/// Price a vanilla option on an `steps`-step CRR lattice.
///
/// `maturity == 0` returns intrinsic value without building the lattice. A
/// risk-neutral probability outside `[0, 1]` is reported as
/// [`Error::NumericalDegenerate`](ov_core::Error::NumericalDegenerate).
#[allow(clippy::too_many_arguments)]
pub fn crr_price(
    spot: Real,
    strike: Real,
    rate: Real,
    dividend_yield: Real,
    volatility: Volatility,
    maturity: Time,
    steps: usize,
    option_type: OptionType,
    exercise: ExerciseType,
) -> Result<Real> {
    ensure!(steps >= 1, "binomial engine needs at least one step, got {steps}");
    require_positive("spot", spot)?;
    require_positive("strike", strike)?;
    require_positive("sigma", volatility)?;
    ensure!(
        maturity >= 0.0,
        "maturity must be non-negative, got {maturity}"
    );
    if maturity == 0.0 {
        tracing::trace!("binomial: expired option, returning intrinsic value");
        return Ok(option_type.intrinsic(spot, strike));
    }

    let tree =
        BinomialTree::cox_ross_rubinstein(spot, rate, dividend_yield, volatility, maturity, steps)?;
    let discount = (-rate * tree.dt()).exp();
    let payoff = |s: Real| option_type.intrinsic(s, strike);
    let value = if exercise.is_american() {
        price_american(&tree, &payoff, discount)
    } else {
        price_european(&tree, &payoff, discount)
    };
    tracing::debug!(
        steps,
        pu = tree.pu(),
        %option_type,
        %exercise,
        value,
        "binomial lattice rolled back"
    );
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::black_scholes_merton;

    #[test]
    fn european_call_converges_to_black_scholes() {
        let bs = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0).price;
        let price = crr_price(
            100.0,
            100.0,
            0.05,
            0.0,
            0.2,
            1.0,
            800,
            OptionType::Call,
            ExerciseType::European,
        )
        .unwrap();
        assert!((price - bs).abs() < 0.01, "crr={price}, bs={bs}");
    }

    #[test]
    fn engine_prices_american_put() {
        let engine = BinomialEngine::new(0.2).unwrap();
        assert_eq!(engine.steps(), DEFAULT_STEPS);
        let market = MarketParameters::new(100.0, 0.05, 0.0, 1.0).unwrap();
        let am = engine
            .price(&market, &OptionSpec::american(OptionType::Put, 100.0).unwrap())
            .unwrap();
        let eu = engine
            .price(&market, &OptionSpec::european(OptionType::Put, 100.0).unwrap())
            .unwrap();
        // Reference American put ≈ 6.09
        assert!((am - 6.09).abs() < 0.02, "American put = {am}");
        assert!(am > eu);
    }

    #[test]
    fn expired_option_is_intrinsic() {
        let p = crr_price(90.0, 100.0, 0.05, 0.0, 0.2, 0.0, 50, OptionType::Put, ExerciseType::American)
            .unwrap();
        assert_eq!(p, 10.0);
    }

    #[test]
    fn invalid_inputs() {
        let call = OptionType::Call;
        let eu = ExerciseType::European;
        assert!(crr_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, 0, call, eu)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(crr_price(100.0, 100.0, 0.05, 0.0, 0.0, 1.0, 10, call, eu).is_err());
        assert!(crr_price(100.0, 100.0, 0.05, 0.0, 0.2, -1.0, 10, call, eu).is_err());
        assert!(BinomialEngine::new(-0.2).is_err());
    }

    #[test]
    fn degenerate_lattice_is_flagged() {
        let err = crr_price(
            100.0,
            100.0,
            0.5,
            0.0,
            0.01,
            1.0,
            1,
            OptionType::Call,
            ExerciseType::European,
        )
        .unwrap_err();
        assert!(err.is_degenerate());
    }
}
