//! Brute-force symmetry search for curves without a recognised primitive.
//!
//! Both searches score a candidate transform by the mean distance from each
//! sample to its nearest transformed sample (each point picks its own closest
//! partner; no fixed correspondence). Nearest neighbours are found
//! exhaustively, so one candidate costs O(n²) and the searches dominate the
//! analyzer's runtime on long curves. Candidates are scored independently
//! (in parallel with the `parallel` feature) and reduced in enumeration
//! order, so the first of several equal scores wins.

use crate::types::Point;
use std::f64::consts::{PI, TAU};

/// Best mirror axis found by [`best_reflection`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectionCandidate {
    /// Rotation applied before mirroring x; the axis direction in the input
    /// frame is `(sin θ, cos θ)`.
    pub angle: f64,
    pub score: f64,
}

impl ReflectionCandidate {
    pub fn axis_direction(&self) -> [f64; 2] {
        let (sin, cos) = self.angle.sin_cos();
        [sin, cos]
    }
}

/// Best rotation order found by [`best_rotation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationCandidate {
    pub order: u32,
    pub score: f64,
}

/// Scores `candidates` angles `θ_k = kπ / candidates` over centred samples.
pub fn best_reflection(centered: &[Point], candidates: usize) -> Option<ReflectionCandidate> {
    if centered.is_empty() || candidates == 0 {
        return None;
    }
    let angles: Vec<f64> = (0..candidates)
        .map(|k| PI * k as f64 / candidates as f64)
        .collect();
    let scores = score_all(&angles, |&angle| reflection_score(centered, angle));
    argmin(&scores).map(|idx| ReflectionCandidate {
        angle: angles[idx],
        score: scores[idx],
    })
}

/// Scores rotation orders `2..=max_order` over centred samples.
pub fn best_rotation(centered: &[Point], max_order: u32) -> Option<RotationCandidate> {
    if centered.is_empty() || max_order < 2 {
        return None;
    }
    let orders: Vec<u32> = (2..=max_order).collect();
    let scores = score_all(&orders, |&order| {
        let rotated = rotate_all(centered, TAU / order as f64);
        mean_nearest_distance(centered, &rotated)
    });
    argmin(&scores).map(|idx| RotationCandidate {
        order: orders[idx],
        score: scores[idx],
    })
}

fn reflection_score(centered: &[Point], angle: f64) -> f64 {
    let rotated = rotate_all(centered, angle);
    let mirrored: Vec<Point> = rotated.iter().map(|p| [-p[0], p[1]]).collect();
    mean_nearest_distance(&rotated, &mirrored)
}

fn rotate_all(points: &[Point], angle: f64) -> Vec<Point> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|p| [cos * p[0] - sin * p[1], sin * p[0] + cos * p[1]])
        .collect()
}

/// Mean over `from` of the distance to the closest point of `to`.
pub fn mean_nearest_distance(from: &[Point], to: &[Point]) -> f64 {
    if from.is_empty() || to.is_empty() {
        return f64::INFINITY;
    }
    let total: f64 = from
        .iter()
        .map(|p| {
            to.iter()
                .map(|q| (p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2))
                .fold(f64::INFINITY, f64::min)
                .sqrt()
        })
        .sum();
    total / from.len() as f64
}

/// Index of the first strictly smallest score; NaN never wins.
fn argmin(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(feature = "parallel")]
fn score_all<T, F>(candidates: &[T], score: F) -> Vec<f64>
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    use rayon::prelude::*;
    candidates.par_iter().map(score).collect()
}

#[cfg(not(feature = "parallel"))]
fn score_all<T, F>(candidates: &[T], score: F) -> Vec<f64>
where
    F: Fn(&T) -> f64,
{
    candidates.iter().map(score).collect()
}
