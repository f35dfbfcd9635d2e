//! Cross-engine properties: lattice convergence, limits, Heston reduction
//! and bounds, Monte Carlo variance reduction, reproducibility and barrier
//! monotonicity.

use approx::assert_relative_eq;
use ov_instruments::{
    Barrier, BarrierType, ExerciseType, MarketParameters, OptionSpec, OptionType, PricingEngine,
};
use ov_methods::monte_carlo::generate_paths;
use ov_models::{HestonParameters, VolatilityInput};
use ov_pricingengines::{
    asian_price, barrier_price, black_scholes_merton, black_scholes_price, crr_price,
    AnalyticEuropeanEngine, AnalyticHestonEngine, BinomialEngine, McAsianEngine, McBarrierEngine,
    McEuropeanEngine, McSettings,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ─── Binomial lattice ─────────────────────────────────────────────────────────

#[test]
fn binomial_error_shrinks_with_steps() {
    init_tracing();
    let (s, k, r, q, sigma, t) = (100.0, 100.0, 0.05, 0.02, 0.25, 1.0);
    let bs = black_scholes_merton(OptionType::Call, s, k, r, q, sigma, t).price;
    let errors: Vec<f64> = [10, 200, 800]
        .into_iter()
        .map(|n| {
            let p = crr_price(s, k, r, q, sigma, t, n, OptionType::Call, ExerciseType::European)
                .unwrap();
            (p - bs).abs()
        })
        .collect();
    assert!(errors[1] <= errors[0] + 1e-6, "{errors:?}");
    assert!(errors[2] <= errors[1] + 1e-6, "{errors:?}");
    assert!(errors[2] < 5e-3, "{errors:?}");
}

#[test]
fn american_call_without_dividends_has_no_premium() {
    let eu = crr_price(100.0, 95.0, 0.04, 0.0, 0.3, 2.0, 300, OptionType::Call, ExerciseType::European)
        .unwrap();
    let am = crr_price(100.0, 95.0, 0.04, 0.0, 0.3, 2.0, 300, OptionType::Call, ExerciseType::American)
        .unwrap();
    assert_relative_eq!(am, eu, max_relative = 1e-10);
}

// ─── Black-Scholes limits ─────────────────────────────────────────────────────

#[test]
fn black_scholes_intrinsic_limits() {
    for (s, k) in [(110.0, 100.0), (90.0, 100.0), (100.0, 100.0)] {
        for kind in [OptionType::Call, OptionType::Put] {
            let intrinsic = kind.intrinsic(s, k);
            let short = black_scholes_price(s, k, 1e-8, 0.05, 1e-8, kind);
            assert!((short - intrinsic).abs() < 1e-6, "{kind} T→0: {short} vs {intrinsic}");
            if s != k {
                let short_vol = black_scholes_price(s, k, 1e-8, 0.05, 0.2, kind);
                assert!((short_vol - intrinsic).abs() < 1e-6, "{kind} T→0: {short_vol} vs {intrinsic}");
            }
            let flat = black_scholes_price(s, k, 1.0, 0.05, 1e-8, kind);
            let discounted = (kind.sign() * (s - k * (-0.05_f64).exp())).max(0.0);
            assert!(
                (flat - discounted).abs() < 1e-6,
                "{kind} σ→0: {flat} vs {discounted}"
            );
        }
    }
}

// ─── Heston ───────────────────────────────────────────────────────────────────

#[test]
fn heston_reduces_to_black_scholes() {
    init_tracing();
    let market = MarketParameters::new(100.0, 0.03, 0.01, 1.5).unwrap();
    for sigma_v in [0.0, 1e-8] {
        let params = HestonParameters::new(10.0, 0.04, sigma_v, 0.0, 0.04).unwrap();
        let engine = AnalyticHestonEngine::new(params);
        for (kind, k) in [(OptionType::Call, 90.0), (OptionType::Call, 110.0), (OptionType::Put, 100.0)] {
            let heston = engine
                .price(&market, &OptionSpec::european(kind, k).unwrap())
                .unwrap();
            let bs = black_scholes_merton(kind, 100.0, k, 0.03, 0.01, 0.2, 1.5).price;
            assert_relative_eq!(heston, bs, max_relative = 1e-2);
        }
    }
}

#[test]
fn heston_prices_respect_bounds() {
    let market = MarketParameters::new(100.0, 0.05, 0.0, 1.0).unwrap();
    let params = HestonParameters::new(1.5, 0.06, 0.6, -0.6, 0.03).unwrap();
    let engine = AnalyticHestonEngine::new(params);
    for k in [70.0, 100.0, 130.0] {
        let call = engine
            .price(&market, &OptionSpec::european(OptionType::Call, k).unwrap())
            .unwrap();
        let put = engine
            .price(&market, &OptionSpec::european(OptionType::Put, k).unwrap())
            .unwrap();
        assert!(call > 0.0 && call < 100.0, "call({k}) = {call}");
        assert!(put > 0.0 && put < k * (-0.05_f64).exp(), "put({k}) = {put}");
        let parity = 100.0 - k * (-0.05_f64).exp();
        assert!((call - put - parity).abs() < 1e-5, "parity at {k}");
    }
}

#[test]
fn heston_share_and_money_probabilities_differ() {
    // Collapsing P1 onto P2 misprices by S·e^{-qT}·(P1 − P2)
    let market = MarketParameters::new(100.0, 0.02, 0.0, 1.0).unwrap();
    let params = HestonParameters::new(2.0, 0.09, 0.5, -0.5, 0.09).unwrap();
    let (p1, p2) = AnalyticHestonEngine::new(params)
        .probabilities(&market, 100.0)
        .unwrap();
    assert!(p1 - p2 > 0.05, "P1 = {p1}, P2 = {p2}");
}

// ─── Monte Carlo ──────────────────────────────────────────────────────────────

#[test]
fn antithetic_does_not_inflate_asian_error() {
    init_tracing();
    let base = McSettings::default().with_steps(50).with_paths(2_000).with_seed(42);
    let run = |antithetic| {
        asian_price(
            100.0,
            100.0,
            0.01,
            0.0,
            0.25,
            0.5,
            OptionType::Call,
            base.with_antithetic(antithetic),
            None,
        )
        .unwrap()
    };
    let plain = run(false);
    let anti = run(true);
    assert!(
        anti.std_error <= plain.std_error * 1.1,
        "antithetic {anti} vs plain {plain}"
    );
}

#[test]
fn path_ensembles_are_reproducible() {
    let a = generate_paths(100.0, 0.01, 0.0, 0.25, 0.5, 50, 1_000, 7, true).unwrap();
    let b = generate_paths(100.0, 0.01, 0.0, 0.25, 0.5, 50, 1_000, 7, true).unwrap();
    assert_eq!(a.paths(), b.paths());
    assert!(a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .all(|(x, y)| x.to_bits() == y.to_bits()));

    let settings = McSettings::default().with_paths(500).with_steps(20);
    let first = asian_price(100.0, 95.0, 0.02, 0.0, 0.3, 1.0, OptionType::Put, settings, None).unwrap();
    let second = asian_price(100.0, 95.0, 0.02, 0.0, 0.3, 1.0, OptionType::Put, settings, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn up_and_out_never_exceeds_vanilla() {
    let settings = McSettings::default().with_steps(52).with_paths(3_000).with_seed(5);
    let market = MarketParameters::new(100.0, 0.03, 0.0, 1.0).unwrap();
    let vanilla = McEuropeanEngine::new(0.3)
        .unwrap()
        .with_settings(settings)
        .calculate(&market, &OptionSpec::european(OptionType::Call, 100.0).unwrap())
        .unwrap();
    for level in [101.0, 110.0, 150.0, 1_000.0] {
        let out = barrier_price(
            100.0,
            100.0,
            0.03,
            0.0,
            0.3,
            1.0,
            OptionType::Call,
            level,
            BarrierType::UpOut,
            settings,
        )
        .unwrap();
        assert!(out.price <= vanilla.price + 1e-12, "B = {level}: {out} > {vanilla}");
    }
    // a barrier no path reaches leaves the vanilla untouched
    let far = Barrier::new(BarrierType::UpOut, 1e9).unwrap();
    let option = OptionSpec::european(OptionType::Call, 100.0).unwrap().with_barrier(far);
    let untouched = ov_pricingengines::McBarrierEngine::new(0.3)
        .unwrap()
        .with_settings(settings)
        .calculate(&market, &option)
        .unwrap();
    assert_relative_eq!(untouched.price, vanilla.price, max_relative = 1e-12);
}

// ─── Volatility input ─────────────────────────────────────────────────────────

#[test]
fn engines_built_from_volatility_input() {
    let market = MarketParameters::new(100.0, 0.05, 0.0, 1.0).unwrap();
    let call = OptionSpec::european(OptionType::Call, 100.0).unwrap();
    let flat = VolatilityInput::flat(0.2).unwrap();
    let heston = VolatilityInput::from(HestonParameters::black_scholes_limit(0.2, 1.0).unwrap());
    let settings = McSettings::default().with_steps(10);

    let engines: Vec<Box<dyn PricingEngine>> = vec![
        Box::new(AnalyticEuropeanEngine::from_input(&flat).unwrap()),
        Box::new(BinomialEngine::from_input(&flat).unwrap()),
        Box::new(AnalyticHestonEngine::from_input(&heston).unwrap()),
        Box::new(McEuropeanEngine::from_input(&flat).unwrap().with_settings(settings)),
    ];
    let bs = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call);
    for engine in &engines {
        let price = engine.calculate(&market, &call).unwrap().price;
        assert!((price - bs).abs() < 0.6, "{engine:?}: {price} vs {bs}");
    }
}

#[test]
fn mismatched_volatility_input_is_rejected() {
    let flat = VolatilityInput::Flat(0.2);
    let heston = VolatilityInput::from(HestonParameters::black_scholes_limit(0.2, 1.0).unwrap());

    assert!(AnalyticHestonEngine::from_input(&flat).unwrap_err().is_invalid_parameter());
    assert!(AnalyticEuropeanEngine::from_input(&heston).unwrap_err().is_invalid_parameter());
    assert!(BinomialEngine::from_input(&heston).unwrap_err().is_invalid_parameter());
    assert!(McEuropeanEngine::from_input(&heston).unwrap_err().is_invalid_parameter());
    assert!(McAsianEngine::from_input(&heston).unwrap_err().is_invalid_parameter());
    assert!(McBarrierEngine::from_input(&heston).unwrap_err().is_invalid_parameter());
    assert!(BinomialEngine::from_input(&VolatilityInput::Flat(0.0))
        .unwrap_err()
        .is_invalid_parameter());
}
