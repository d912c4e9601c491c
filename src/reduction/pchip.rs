//! Shape-preserving piecewise-cubic Hermite interpolation.
//!
//! Monotone (Fritsch-Carlson) derivative selection keeps the interpolant
//! free of overshoot between data points, which matters when evaluating
//! water-column properties between sparsely spaced levels. Definite
//! integrals are evaluated in closed form over the cubic pieces.

use thiserror::Error;

/// Why an interpolant could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PchipError {
    #[error("need at least two points, got {0}")]
    TooFewPoints(usize),

    #[error("coordinate and value lengths differ: {x} vs {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("coordinates must be strictly increasing at index {0}")]
    NotIncreasing(usize),
}

/// Monotone piecewise-cubic interpolant through `(x, y)` pairs.
///
/// Coordinates must be strictly increasing. NaN values are tolerated:
/// they poison the pieces they touch and propagate into evaluations
/// there, matching the missing-value semantics of the rest of the
/// pipeline.
#[derive(Debug, Clone)]
pub struct PchipInterpolator {
    x: Vec<f64>,
    y: Vec<f64>,
    d: Vec<f64>,
}

impl PchipInterpolator {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, PchipError> {
        if x.len() != y.len() {
            return Err(PchipError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(PchipError::TooFewPoints(x.len()));
        }
        for i in 1..x.len() {
            if !(x[i] > x[i - 1]) {
                return Err(PchipError::NotIncreasing(i));
            }
        }
        let d = derivatives(x, y);
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            d,
        })
    }

    /// Evaluate the interpolant at `t`. Outside the data range the
    /// nearest end piece extrapolates.
    pub fn evaluate(&self, t: f64) -> f64 {
        let k = self.piece(t);
        let h = self.x[k + 1] - self.x[k];
        let s = (t - self.x[k]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * self.y[k] + h * h10 * self.d[k] + h01 * self.y[k + 1] + h * h11 * self.d[k + 1]
    }

    /// Definite integral of the interpolant from `a` to `b`, clamped to
    /// the data range.
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        if b < a {
            return -self.integrate(b, a);
        }
        let lo = a.max(self.x[0]);
        let hi = b.min(self.x[self.x.len() - 1]);
        if hi <= lo {
            return 0.0;
        }

        let mut total = 0.0;
        for k in self.piece(lo)..=self.piece(hi) {
            let (xk, xk1) = (self.x[k], self.x[k + 1]);
            let h = xk1 - xk;
            let s0 = (lo.max(xk) - xk) / h;
            let s1 = (hi.min(xk1) - xk) / h;
            total += self.piece_antiderivative(k, s1) - self.piece_antiderivative(k, s0);
        }
        total
    }

    /// Index of the cubic piece whose interval evaluates `t`.
    fn piece(&self, t: f64) -> usize {
        self.x.partition_point(|&v| v <= t).clamp(1, self.x.len() - 1) - 1
    }

    /// Antiderivative of piece `k` at normalized position `s`, taken from
    /// the piece's left knot.
    fn piece_antiderivative(&self, k: usize, s: f64) -> f64 {
        let h = self.x[k + 1] - self.x[k];
        let s2 = s * s;
        let s3 = s2 * s;
        let s4 = s3 * s;

        let h00 = 0.5 * s4 - s3 + s;
        let h10 = 0.25 * s4 - (2.0 / 3.0) * s3 + 0.5 * s2;
        let h01 = -0.5 * s4 + s3;
        let h11 = 0.25 * s4 - s3 / 3.0;

        h * (self.y[k] * h00 + h * self.d[k] * h10 + self.y[k + 1] * h01 + h * self.d[k + 1] * h11)
    }
}

/// Knot derivatives per Fritsch-Carlson: a weighted harmonic mean of the
/// adjacent secant slopes, zeroed at local extrema so the interpolant
/// never overshoots, with a one-sided three-point rule at the ends.
fn derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let m: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    if n == 2 {
        // Two points: the interpolant degenerates to the secant line.
        return vec![m[0], m[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (m0, m1) = (m[k - 1], m[k]);
        if sign(m0) * sign(m1) <= 0 {
            d[k] = 0.0;
        } else {
            let w1 = 2.0 * h[k] + h[k - 1];
            let w2 = h[k] + 2.0 * h[k - 1];
            d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
        }
    }
    d[0] = edge_derivative(h[0], h[1], m[0], m[1]);
    d[n - 1] = edge_derivative(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
    d
}

/// One-sided three-point estimate for an end knot, clipped to preserve
/// shape near the boundary.
fn edge_derivative(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
