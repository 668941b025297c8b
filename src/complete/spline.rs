//! Natural cubic spline over a uniform parameter.
//!
//! Knots sit at `t_i = i / (n - 1)`; the second derivative vanishes at both
//! ends. The tridiagonal system for the interior second derivatives is solved
//! with the Thomas algorithm (the matrix is strictly diagonally dominant).

use crate::types::Point;

/// Scalar natural cubic spline on `[0, 1]`.
#[derive(Clone, Debug)]
pub struct NaturalSpline {
    values: Vec<f64>,
    second: Vec<f64>,
    h: f64,
}

impl NaturalSpline {
    /// `None` for fewer than two values.
    pub fn new(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }
        let h = 1.0 / (n - 1) as f64;
        let mut second = vec![0.0; n];
        if n > 2 {
            // M[i-1] + 4 M[i] + M[i+1] = 6/h² (y[i+1] - 2 y[i] + y[i-1])
            let m = n - 2;
            let scale = 6.0 / (h * h);
            let mut diag = vec![4.0; m];
            let mut rhs: Vec<f64> = (1..n - 1)
                .map(|i| scale * (values[i + 1] - 2.0 * values[i] + values[i - 1]))
                .collect();
            for i in 1..m {
                let w = 1.0 / diag[i - 1];
                diag[i] -= w;
                rhs[i] -= w * rhs[i - 1];
            }
            second[m] = rhs[m - 1] / diag[m - 1];
            for i in (0..m - 1).rev() {
                second[i + 1] = (rhs[i] - second[i + 2]) / diag[i];
            }
        }
        Some(Self {
            values: values.to_vec(),
            second,
            h,
        })
    }

    /// Value at `t`, clamped to `[0, 1]`.
    pub fn eval(&self, t: f64) -> f64 {
        let last = self.values.len() - 2;
        let t = t.clamp(0.0, 1.0);
        let i = ((t / self.h).floor() as usize).min(last);
        let t0 = i as f64 * self.h;
        let b = (t - t0) / self.h;
        let a = 1.0 - b;
        a * self.values[i]
            + b * self.values[i + 1]
            + ((a * a * a - a) * self.second[i] + (b * b * b - b) * self.second[i + 1])
                * self.h
                * self.h
                / 6.0
    }
}

/// Interpolates `points` in order and resamples at `u_k = k / (samples - 1)`.
pub fn resample(points: &[Point], samples: usize) -> Option<Vec<Point>> {
    if samples < 2 {
        return None;
    }
    let xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
    let sx = NaturalSpline::new(&xs)?;
    let sy = NaturalSpline::new(&ys)?;
    let last = (samples - 1) as f64;
    Some(
        (0..samples)
            .map(|k| {
                let u = k as f64 / last;
                [sx.eval(u), sy.eval(u)]
            })
            .collect(),
    )
}
