//! Analytic (semi-analytic) Heston model pricing engine.
//!
//! Prices European options under the Heston stochastic volatility model by
//! adaptive Gauss-Kronrod integration of the characteristic function.

use std::f64::consts::PI;

use num_complex::Complex64;
use ov_core::{ensure, Real, Result, Time};
use ov_instruments::{MarketParameters, OptionSpec, OptionType, PriceEstimate, PricingEngine};
use ov_math::integrals::GaussKronrodAdaptive;
use ov_models::{HestonParameters, VolatilityInput};

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Decay exponent at the truncation limit below which the integrand is
/// considered not to have vanished.
pub const MIN_TRUNCATION_DECAY: Real = 15.0;

/// Quadrature settings for the Heston probability integrals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonIntegrationSettings {
    /// Upper truncation of the `[0, ∞)` integral.
    ///
    /// The integrands decay roughly like `exp(−½·v̄·T·u²)`, so at very short
    /// maturities a fixed limit cuts off mass and the price is biased low.
    /// [`truncation_decay`](Self::truncation_decay) measures this; a warning
    /// is logged when it falls below [`MIN_TRUNCATION_DECAY`].
    pub limit: Real,
    /// Absolute tolerance.
    pub absolute_accuracy: Real,
    /// Relative tolerance.
    pub relative_accuracy: Real,
    /// Subinterval budget; exceeding it is a non-convergence error.
    pub max_subintervals: usize,
}

impl Default for HestonIntegrationSettings {
    fn default() -> Self {
        Self {
            limit: 200.0,
            absolute_accuracy: 1e-6,
            relative_accuracy: 1e-6,
            max_subintervals: 200,
        }
    }
}

impl HestonIntegrationSettings {
    /// Set the truncation limit.
    pub fn with_limit(mut self, limit: Real) -> Self {
        self.limit = limit;
        self
    }

    /// Set both tolerances.
    pub fn with_accuracy(mut self, absolute: Real, relative: Real) -> Self {
        self.absolute_accuracy = absolute;
        self.relative_accuracy = relative;
        self
    }

    /// Set the subinterval budget.
    pub fn with_max_subintervals(mut self, max_subintervals: usize) -> Self {
        self.max_subintervals = max_subintervals;
        self
    }

    /// `½·v̄·T·limit²`, with `v̄` the mean variance over `[0, T]`: the
    /// approximate log-decay of the integrands at the truncation point.
    pub fn truncation_decay(&self, params: &HestonParameters, maturity: Time) -> Real {
        0.5 * params.mean_variance(maturity).max(0.0) * maturity * self.limit * self.limit
    }

    fn integrator(&self) -> Result<GaussKronrodAdaptive> {
        ensure!(
            self.limit.is_finite() && self.limit > 0.0,
            "integration limit must be positive, got {}",
            self.limit
        );
        ensure!(
            self.absolute_accuracy > 0.0 || self.relative_accuracy > 0.0,
            "at least one integration tolerance must be positive"
        );
        Ok(GaussKronrodAdaptive::new(
            self.absolute_accuracy,
            self.relative_accuracy,
            self.max_subintervals,
        ))
    }
}

// ─── Characteristic function ──────────────────────────────────────────────────

/// Characteristic function `E[exp(iu·ln S_T)]` of the log-spot under Heston.
///
/// Uses the rotation-free form with `g = (b − d)/(b + d)`. The terms
/// `(b − d)/σ_v²` and `g/σ_v²` are computed as `−a/(b + d)` and
/// `−a/(b + d)²`, so `σ_v = 0` gives the Black-Scholes limit without
/// dividing by zero. `u` may be complex (`u − i` for the share measure).
///
/// ```text
/// a = iu + u²,  b = κ − ρσ_v·iu,  d = √(b² + σ_v²·a)
/// D = (b − d)/σ_v² · (1 − e^{−dT}) / (1 − g e^{−dT})
/// C = (r − q)iuT + κθ/σ_v² · [(b − d)T − 2 ln((1 − g e^{−dT})/(1 − g))]
/// φ = exp(C + D·v0 + iu·ln S0)
/// ```
pub fn heston_characteristic_function(
    u: Complex64,
    spot: Real,
    rate: Real,
    dividend_yield: Real,
    maturity: Time,
    params: &HestonParameters,
) -> Complex64 {
    let HestonParameters {
        kappa,
        theta,
        sigma_v,
        rho,
        v0,
    } = *params;
    let i = Complex64::i();
    let iu = i * u;
    let sigma2 = sigma_v * sigma_v;

    let a = iu + u * u;
    let b = kappa - rho * sigma_v * iu;
    let d = (b * b + sigma2 * a).sqrt();
    let b_plus_d = b + d;
    // (b − d)/σ_v²
    let dm = -a / b_plus_d;
    // g/σ_v²
    let gs = dm / b_plus_d;
    let g = sigma2 * gs;

    let e = (-d * maturity).exp();
    let one_minus_e = 1.0 - e;
    let big_d = dm * one_minus_e / (1.0 - g * e);

    // ln((1 − g e)/(1 − g)) = ln(1 + w), w = g·m
    let m = one_minus_e / (1.0 - g);
    let w = g * m;
    let big_c = (rate - dividend_yield) * iu * maturity
        + kappa * theta * (dm * maturity - 2.0 * gs * m * log1p_over(w));

    (big_c + big_d * v0 + iu * spot.ln()).exp()
}

/// `ln(1 + w)/w`, continuous at `w = 0`.
fn log1p_over(w: Complex64) -> Complex64 {
    if w.norm() < 1e-8 {
        1.0 - w / 2.0 + w * w / 3.0
    } else {
        (1.0 + w).ln() / w
    }
}

// ─── Probabilities and price ──────────────────────────────────────────────────

/// Exercise probabilities `(P1, P2)`.
///
/// `P2` is the risk-neutral probability of finishing in the money and `P1`
/// the same probability under the share measure:
///
/// ```text
/// P2 = ½ + 1/π ∫ Re[e^{−iu ln K} φ(u) / (iu)] du
/// P1 = ½ + 1/π ∫ Re[e^{−iu ln K} φ(u − i) / (iu·φ(−i))] du
/// ```
///
/// with `φ(−i) = S·e^{(r−q)T}`.
pub fn heston_probabilities(
    spot: Real,
    strike: Real,
    rate: Real,
    dividend_yield: Real,
    maturity: Time,
    params: &HestonParameters,
    settings: &HestonIntegrationSettings,
) -> Result<(Real, Real)> {
    let integrator = settings.integrator()?;
    let decay = settings.truncation_decay(params, maturity);
    if decay < MIN_TRUNCATION_DECAY {
        tracing::warn!(
            decay,
            limit = settings.limit,
            maturity,
            "Heston integrand has not decayed at the truncation limit; price may be biased"
        );
    }
    let i = Complex64::i();
    let ln_k = strike.ln();
    let phi = |u: Complex64| {
        heston_characteristic_function(u, spot, rate, dividend_yield, maturity, params)
    };
    let forward = spot * ((rate - dividend_yield) * maturity).exp();

    let p2_integrand = |u: Real| {
        let z = Complex64::new(u, 0.0);
        ((-i * z * ln_k).exp() * phi(z) / (i * z)).re
    };
    let p1_integrand = |u: Real| {
        let z = Complex64::new(u, 0.0);
        ((-i * z * ln_k).exp() * phi(z - i) / (i * z * forward)).re
    };

    let i1 = integrator.integrate_with_error(p1_integrand, 0.0, settings.limit)?;
    let i2 = integrator.integrate_with_error(p2_integrand, 0.0, settings.limit)?;
    tracing::debug!(
        p1_evaluations = i1.evaluations,
        p2_evaluations = i2.evaluations,
        p1_error = i1.error,
        p2_error = i2.error,
        "Heston probability integrals converged"
    );

    Ok((0.5 + i1.value / PI, 0.5 + i2.value / PI))
}

/// Price a European option under the Heston model.
///
/// `Call = S e^{−qT} P1 − K e^{−rT} P2`; puts follow from put-call parity.
/// At `maturity == 0` the intrinsic value is returned.
#[allow(clippy::too_many_arguments)]
pub fn heston_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Real,
    dividend_yield: Real,
    maturity: Time,
    params: &HestonParameters,
    settings: &HestonIntegrationSettings,
) -> Result<Real> {
    let market = MarketParameters::new(spot, rate, dividend_yield, maturity)?;
    let option = OptionSpec::european(option_type, strike)?;
    AnalyticHestonEngine::new(*params)
        .with_settings(*settings)
        .price(&market, &option)
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Semi-analytic Heston pricing engine.
///
/// $$dS = (r-q) S \, dt + \sqrt{v} S \, dW_1$$
/// $$dv = \kappa(\theta - v) \, dt + \sigma_v \sqrt{v} \, dW_2$$
/// $$dW_1 dW_2 = \rho \, dt$$
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyticHestonEngine {
    params: HestonParameters,
    settings: HestonIntegrationSettings,
}

impl AnalyticHestonEngine {
    /// Create a new engine with default integration settings.
    pub fn new(params: HestonParameters) -> Self {
        Self {
            params,
            settings: HestonIntegrationSettings::default(),
        }
    }

    /// Create an engine from a [`VolatilityInput`]; only a Heston set is accepted.
    pub fn from_input(input: &VolatilityInput) -> Result<Self> {
        Ok(Self::new(input.require_heston()?))
    }

    /// Replace the integration settings.
    pub fn with_settings(mut self, settings: HestonIntegrationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the integration truncation limit.
    pub fn with_integration_limit(mut self, limit: Real) -> Self {
        self.settings.limit = limit;
        self
    }

    /// Model parameters.
    pub fn parameters(&self) -> &HestonParameters {
        &self.params
    }

    /// `(P1, P2)` for `strike` under `market`.
    pub fn probabilities(&self, market: &MarketParameters, strike: Real) -> Result<(Real, Real)> {
        market.validate()?;
        self.params.validate()?;
        ov_core::errors::require_positive("strike", strike)?;
        ensure!(
            market.maturity > 0.0,
            "probabilities need a positive maturity, got {}",
            market.maturity
        );
        heston_probabilities(
            market.spot,
            strike,
            market.rate,
            market.dividend_yield,
            market.maturity,
            &self.params,
            &self.settings,
        )
    }

    /// Price a European vanilla option.
    pub fn price(&self, market: &MarketParameters, option: &OptionSpec) -> Result<Real> {
        market.validate()?;
        self.params.validate()?;
        ensure!(
            !option.exercise.is_american() && option.barrier.is_none(),
            "the Heston engine prices European vanillas only"
        );
        if market.is_expired() {
            tracing::trace!("Heston: expired option, returning intrinsic value");
            return Ok(option.option_type.intrinsic(market.spot, option.strike));
        }
        tracing::debug!(
            feller = self.params.satisfies_feller(),
            strike = option.strike,
            maturity = market.maturity,
            "pricing under Heston"
        );

        let (p1, p2) = self.probabilities(market, option.strike)?;
        let spot_leg = market.spot * market.dividend_discount();
        let strike_leg = option.strike * market.discount();
        let call = spot_leg * p1 - strike_leg * p2;
        Ok(match option.option_type {
            OptionType::Call => call,
            OptionType::Put => call - spot_leg + strike_leg,
        })
    }
}

impl PricingEngine for AnalyticHestonEngine {
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate> {
        self.price(market, option).map(PriceEstimate::exact)
    }
}
