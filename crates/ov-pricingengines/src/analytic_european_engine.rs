//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Prices European vanilla options with the closed-form Black-Scholes-Merton
//! formula and computes first and second-order Greeks. Also serves as the
//! reference oracle for the lattice, Heston and Monte Carlo engines.

use ov_core::{ensure, errors::require_positive, Real, Result, Time, Volatility};
use ov_instruments::{MarketParameters, OptionSpec, OptionType, PriceEstimate, PricingEngine};
use ov_math::distributions::{normal_cdf, normal_pdf};
use ov_models::VolatilityInput;

/// Black-Scholes price and Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholesResults {
    /// Present value.
    pub price: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ per 1.0 absolute vol.
    pub vega: Real,
    /// ∂V/∂t per year.
    pub theta: Real,
    /// ∂V/∂r per 1.0 rate shift.
    pub rho: Real,
}

/// Compute Black-Scholes price and Greeks for a European option.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// When `time_to_expiry <= 0` or `volatility <= 0` the price is the
/// intrinsic value `max(φ(S − K), 0)` and every Greek is zero.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Volatility,
    time_to_expiry: Time,
) -> BlackScholesResults {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 || volatility <= 0.0 {
        return BlackScholesResults {
            price: option_type.intrinsic(spot, strike),
            ..Default::default()
        };
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    let d2 = d1 - std_dev;

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let price = phi * (spot * df_q * nd1 - strike * df_r * nd2);
    let delta = phi * df_q * nd1;
    let gamma = df_q * npd1 / (spot * std_dev);
    let vega = spot * df_q * npd1 * sqrt_t;
    let theta = {
        let term1 = -(spot * df_q * npd1 * sigma) / (2.0 * sqrt_t);
        let term2 = -phi * r * strike * df_r * nd2;
        let term3 = phi * q * spot * df_q * nd1;
        term1 + term2 + term3
    };
    let rho = phi * strike * t * df_r * nd2;

    BlackScholesResults {
        price,
        delta,
        gamma,
        vega,
        theta,
        rho,
    }
}

/// Black-Scholes price without dividends.
pub fn black_scholes_price(
    spot: Real,
    strike: Real,
    time_to_expiry: Time,
    risk_free_rate: Real,
    volatility: Volatility,
    option_type: OptionType,
) -> Real {
    black_scholes_merton(option_type, spot, strike, risk_free_rate, 0.0, volatility, time_to_expiry)
        .price
}

/// Black-Scholes vega (per 1.0 vol) with dividend yield `q`.
pub fn black_scholes_vega(
    spot: Real,
    strike: Real,
    time_to_expiry: Time,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Volatility,
) -> Real {
    black_scholes_merton(
        OptionType::Call,
        spot,
        strike,
        risk_free_rate,
        dividend_yield,
        volatility,
        time_to_expiry,
    )
    .vega
}

/// Analytic pricing engine for European vanilla options at a flat volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyticEuropeanEngine {
    volatility: Volatility,
}

impl AnalyticEuropeanEngine {
    /// Create a new engine; the volatility must be positive.
    pub fn new(volatility: Volatility) -> Result<Self> {
        require_positive("sigma", volatility)?;
        Ok(Self { volatility })
    }

    /// Create an engine from a [`VolatilityInput`]; only the flat case is accepted.
    pub fn from_input(input: &VolatilityInput) -> Result<Self> {
        Self::new(input.require_flat()?)
    }

    /// Price and Greeks of a European vanilla option.
    pub fn results(
        &self,
        market: &MarketParameters,
        option: &OptionSpec,
    ) -> Result<BlackScholesResults> {
        market.validate()?;
        ensure!(
            !option.exercise.is_american() && option.barrier.is_none(),
            "the analytic European engine prices European vanillas only"
        );
        Ok(black_scholes_merton(
            option.option_type,
            market.spot,
            option.strike,
            market.rate,
            market.dividend_yield,
            self.volatility,
            market.maturity,
        ))
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate> {
        self.results(market, option).map(|r| PriceEstimate::exact(r.price))
    }
}
