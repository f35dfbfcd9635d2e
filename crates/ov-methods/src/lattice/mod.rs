//! Lattice methods for option pricing.
//!
//! * [`BinomialTree`]: CRR recombining tree
//! * [`price_european`] / [`price_american`]: backward induction

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use ov_core::Real;

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Price a European option by backward induction on a binomial tree.
///
/// # Arguments
/// * `tree`: the binomial tree
/// * `payoff`: payoff function `S → value`
/// * `discount`: per-step discount factor, typically `exp(−r·Δt)`
pub fn price_european(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real, discount: Real) -> Real {
    roll_back(tree, payoff, discount, false)
}

/// Price an American option by backward induction on a binomial tree.
///
/// After each collapse the continuation value is compared with the
/// immediate-exercise value at the node's own level `S·u^j·d^(i−j)`.
pub fn price_american(tree: &BinomialTree, payoff: &dyn Fn(Real) -> Real, discount: Real) -> Real {
    roll_back(tree, payoff, discount, true)
}

fn roll_back(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: Real,
    early_exercise: bool,
) -> Real {
    let n = tree.steps();
    let pu = tree.pu();
    let pd = tree.pd();

    let mut values: Vec<Real> = (0..tree.size(n))
        .map(|j| payoff(tree.underlying(n, j)))
        .collect();

    for i in (0..n).rev() {
        // values[j + 1] is still the step-(i+1) value when values[j] is overwritten
        for j in 0..tree.size(i) {
            let hold = discount * (pu * values[j + 1] + pd * values[j]);
            values[j] = if early_exercise {
                hold.max(payoff(tree.underlying(i, j)))
            } else {
                hold
            };
        }
        values.truncate(tree.size(i));
    }

    values[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(steps: usize, q: Real) -> BinomialTree {
        BinomialTree::cox_ross_rubinstein(100.0, 0.05, q, 0.2, 1.0, steps).unwrap()
    }

    #[test]
    fn one_step_call_by_hand() {
        let t = tree(1, 0.0);
        let disc = (-0.05_f64).exp();
        let up_value = (t.underlying(1, 1) - 100.0).max(0.0);
        let expected = disc * t.pu() * up_value;
        let price = price_european(&t, &|s| (s - 100.0).max(0.0), disc);
        assert!((price - expected).abs() < 1e-12);
    }

    #[test]
    fn european_call_near_black_scholes() {
        let t = tree(500, 0.0);
        let disc = (-0.05 * t.dt()).exp();
        let price = price_european(&t, &|s| (s - 100.0).max(0.0), disc);
        // BS = 10.4506
        assert!((price - 10.4506).abs() < 0.02, "CRR call = {price}");
    }

    #[test]
    fn american_put_dominates_european_put() {
        let t = tree(200, 0.0);
        let disc = (-0.05 * t.dt()).exp();
        let put = |s: Real| (100.0 - s).max(0.0);
        let eu = price_european(&t, &put, disc);
        let am = price_american(&t, &put, disc);
        assert!(am > eu, "American {am} vs European {eu}");
        assert!(am >= 0.0);
    }

    #[test]
    fn american_call_without_dividends_matches_european() {
        let t = tree(200, 0.0);
        let disc = (-0.05 * t.dt()).exp();
        let call = |s: Real| (s - 100.0).max(0.0);
        let eu = price_european(&t, &call, disc);
        let am = price_american(&t, &call, disc);
        assert!((am - eu).abs() < 1e-10);
    }

    #[test]
    fn deep_itm_american_put_is_at_least_intrinsic() {
        let t = BinomialTree::cox_ross_rubinstein(50.0, 0.05, 0.0, 0.2, 1.0, 100).unwrap();
        let disc = (-0.05 * t.dt()).exp();
        let am = price_american(&t, &|s| (100.0 - s).max(0.0), disc);
        assert!(am >= 50.0 - 1e-12);
    }

    proptest::proptest! {
        #[test]
        fn lattice_prices_within_bounds(
            spot in 50.0f64..150.0,
            sigma in 0.1f64..0.6,
            steps in 20usize..120,
        ) {
            let t = BinomialTree::cox_ross_rubinstein(spot, 0.03, 0.0, sigma, 1.0, steps).unwrap();
            let disc = (-0.03 * t.dt()).exp();
            let put = |s: Real| (100.0 - s).max(0.0);
            let eu = price_european(&t, &put, disc);
            let am = price_american(&t, &put, disc);
            proptest::prop_assert!(eu >= 0.0);
            proptest::prop_assert!(am >= eu - 1e-12);
            proptest::prop_assert!(am >= put(spot) - 1e-12);
            proptest::prop_assert!(am <= 100.0);
        }
    }
}
