//! 1D root-finding solvers.
//!
//! Failing to bracket a root or running out of iterations is reported as
//! [`Error::NonConvergence`].

use ov_core::{
    errors::{Error, Result},
    Real,
};

/// Default iteration budget.
pub const MAX_ITERATIONS: u32 = 100;
const DEFAULT_ACCURACY: Real = 1.0e-11;

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    brent_with_budget(f, x_min, x_max, accuracy, MAX_ITERATIONS)
}

/// [`brent`] with an explicit iteration budget.
pub fn brent_with_budget<F>(
    f: F,
    x_min: Real,
    x_max: Real,
    accuracy: Real,
    max_iterations: u32,
) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let mut fb = f(b);

    if !(fa.is_finite() && fb.is_finite()) {
        return Err(Error::NonConvergence(format!(
            "Brent: non-finite function value at bracket ends f({a})={fa}, f({b})={fb}"
        )));
    }
    if fa * fb > 0.0 {
        return Err(Error::NonConvergence(format!(
            "Brent: root not bracketed, f({a})={fa} and f({b})={fb} have the same sign"
        )));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..max_iterations {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                let p = 2.0 * xm * s;
                let q = 1.0 - s;
                (p, q)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                let q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                (p, q)
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
    }
    Err(Error::NonConvergence(format!(
        "Brent: no convergence after {max_iterations} iterations"
    )))
}

// ── Newton-Raphson ────────────────────────────────────────────────────────────

/// Newton-Raphson iteration on `f_df(x) = (f(x), f'(x))`.
///
/// Iterates from `x0` until `|f(x)| < accuracy`. Steps leaving `[x_min, x_max]`
/// are clamped back onto the boundary. A vanishing or non-finite
/// derivative aborts with [`Error::NonConvergence`].
pub fn newton<F>(f_df: F, x0: Real, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> (Real, Real),
{
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let mut x = x0.clamp(x_min, x_max);

    for _ in 0..MAX_ITERATIONS {
        let (fx, dfx) = f_df(x);
        if !fx.is_finite() {
            return Err(Error::NonConvergence(format!(
                "Newton: non-finite function value at x={x}"
            )));
        }
        if fx.abs() < acc {
            return Ok(x);
        }
        if !dfx.is_finite() || dfx.abs() <= f64::EPSILON {
            return Err(Error::NonConvergence(format!(
                "Newton: derivative vanished at x={x}"
            )));
        }
        x = (x - fx / dfx).clamp(x_min, x_max);
    }
    Err(Error::NonConvergence(
        "Newton: maximum iterations reached".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn brent_sqrt2() {
        let root = brent(|x| x * x - 2.0, 0.0, 2.0, 1e-12).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn brent_root_at_endpoint() {
        assert_eq!(brent(|x| x - 1.0, 1.0, 3.0, 1e-12).unwrap(), 1.0);
    }

    #[test]
    fn brent_not_bracketed() {
        let err = brent(|x| x * x + 1.0, -1.0, 1.0, 1e-12).unwrap_err();
        assert!(err.is_non_convergence());
    }

    #[test]
    fn brent_budget_exhausted() {
        let err = brent_with_budget(|x| x.powi(3) - 7.0, 0.0, 100.0, 1e-15, 2).unwrap_err();
        assert!(err.is_non_convergence());
    }

    #[test]
    fn newton_cube_root() {
        let root = newton(|x| (x * x * x - 27.0, 3.0 * x * x), 1.0, 0.0, 10.0, 1e-12).unwrap();
        assert_abs_diff_eq!(root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn newton_flat_derivative() {
        let err = newton(|_| (1.0, 0.0), 1.0, 0.0, 2.0, 1e-12).unwrap_err();
        assert!(err.is_non_convergence());
    }
}
