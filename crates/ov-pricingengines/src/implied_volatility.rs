//! Implied volatility: invert the Black-Scholes price for σ.

use crate::analytic_european_engine::black_scholes_merton;
use ov_core::{
    ensure,
    errors::{require_non_negative, require_positive, Error},
    Real, Result, Time, Volatility,
};
use ov_instruments::OptionType;
use ov_math::solvers1d::{brent_with_budget, newton};

/// Lower end of the volatility search bracket.
pub const MIN_VOLATILITY: Volatility = 1e-8;
/// Upper end of the volatility search bracket.
pub const MAX_VOLATILITY: Volatility = 5.0;

const BRENT_ACCURACY: Real = 1e-10;
const MAX_ITERATIONS: u32 = 100;

/// Implied volatility by Brent's method over `[1e-8, 5]`.
///
/// Returns `NaN` when no volatility in the bracket reproduces
/// `market_price`. Use [`try_implied_volatility`] for the error.
pub fn implied_volatility(
    market_price: Real,
    spot: Real,
    strike: Real,
    time_to_expiry: Time,
    rate: Real,
    dividend_yield: Real,
    option_type: OptionType,
) -> Volatility {
    try_implied_volatility(
        market_price,
        spot,
        strike,
        time_to_expiry,
        rate,
        dividend_yield,
        option_type,
    )
    .unwrap_or(Real::NAN)
}

/// Implied volatility by Brent's method, reporting why it failed.
pub fn try_implied_volatility(
    market_price: Real,
    spot: Real,
    strike: Real,
    time_to_expiry: Time,
    rate: Real,
    dividend_yield: Real,
    option_type: OptionType,
) -> Result<Volatility> {
    validate(market_price, spot, strike, time_to_expiry)?;
    let objective = |sigma: Real| {
        black_scholes_merton(option_type, spot, strike, rate, dividend_yield, sigma, time_to_expiry)
            .price
            - market_price
    };
    let lo = objective(MIN_VOLATILITY);
    let hi = objective(MAX_VOLATILITY);
    if lo * hi > 0.0 {
        return Err(Error::NonConvergence(format!(
            "price {market_price} outside the attainable range [{}, {}]",
            lo + market_price,
            hi + market_price
        )));
    }
    brent_with_budget(objective, MIN_VOLATILITY, MAX_VOLATILITY, BRENT_ACCURACY, MAX_ITERATIONS)
}

/// Implied volatility by vega-driven Newton iteration from σ = 0.2.
///
/// Steps are clamped to `[1e-6, 5]`; converges when the price error drops
/// below `1e-6`.
pub fn implied_volatility_newton(
    market_price: Real,
    spot: Real,
    strike: Real,
    time_to_expiry: Time,
    rate: Real,
    dividend_yield: Real,
    option_type: OptionType,
) -> Result<Volatility> {
    validate(market_price, spot, strike, time_to_expiry)?;
    newton(
        |sigma| {
            let res = black_scholes_merton(
                option_type,
                spot,
                strike,
                rate,
                dividend_yield,
                sigma,
                time_to_expiry,
            );
            (res.price - market_price, res.vega)
        },
        0.2,
        1e-6,
        MAX_VOLATILITY,
        1e-6,
    )
}

fn validate(market_price: Real, spot: Real, strike: Real, time_to_expiry: Time) -> Result<()> {
    require_positive("spot", spot)?;
    require_positive("strike", strike)?;
    require_non_negative("market price", market_price)?;
    ensure!(
        time_to_expiry > 0.0,
        "implied volatility needs a positive time to expiry, got {time_to_expiry}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::black_scholes_price;
    use approx::assert_abs_diff_eq;

    #[test]
    fn recovers_input_volatility() {
        for (k, sigma) in [(80.0, 0.15), (100.0, 0.2), (120.0, 0.45)] {
            let price = black_scholes_price(100.0, k, 1.0, 0.05, sigma, OptionType::Call);
            let iv = implied_volatility(price, 100.0, k, 1.0, 0.05, 0.0, OptionType::Call);
            assert_abs_diff_eq!(iv, sigma, epsilon = 1e-6);
        }
    }

    #[test]
    fn newton_agrees_with_brent() {
        let price = black_scholes_merton(OptionType::Put, 100.0, 105.0, 0.02, 0.01, 0.3, 0.5).price;
        let brent =
            try_implied_volatility(price, 100.0, 105.0, 0.5, 0.02, 0.01, OptionType::Put).unwrap();
        let newton =
            implied_volatility_newton(price, 100.0, 105.0, 0.5, 0.02, 0.01, OptionType::Put)
                .unwrap();
        assert_abs_diff_eq!(brent, 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(newton, 0.3, epsilon = 1e-4);
    }

    #[test]
    fn unattainable_price_is_nan() {
        // a call can never be worth more than the spot
        let iv = implied_volatility(150.0, 100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call);
        assert!(iv.is_nan());
        let err = try_implied_volatility(150.0, 100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call)
            .unwrap_err();
        assert!(err.is_non_convergence());
    }

    #[test]
    fn invalid_inputs() {
        assert!(try_implied_volatility(5.0, 100.0, 100.0, 0.0, 0.05, 0.0, OptionType::Call)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(implied_volatility(-1.0, 100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call).is_nan());
    }
}
