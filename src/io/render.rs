//! Raster rendering of batch results.
//!
//! World coordinates are y-up; the viewport fits the bounding box of
//! everything drawn into the canvas (minus a margin) with uniform scale.
//! Colours: fitted primitives green, completions red over their original
//! samples in blue. The symmetry view colours curves with a mirror axis red,
//! rotation-only curves green and the rest blue, and draws mirror axes grey.

use super::json::ensure_parent_dir;
use crate::types::{Curve, Path as CurvePath, Point, Shape, SymmetryResult};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::path::Path;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const PRIMITIVE_COLOR: Rgb<u8> = Rgb([0, 150, 0]);
pub const COMPLETED_COLOR: Rgb<u8> = Rgb([220, 30, 30]);
pub const ORIGINAL_COLOR: Rgb<u8> = Rgb([30, 60, 220]);
pub const AXIS_COLOR: Rgb<u8> = Rgb([160, 160, 160]);

const OUTLINE_SAMPLES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 20,
        }
    }
}

/// World → pixel mapping.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    mid: Point,
    scale: f64,
    canvas_mid: [f64; 2],
    diagonal: f64,
}

impl Viewport {
    fn fit<'a>(points: impl IntoIterator<Item = &'a Point>, opts: &RenderOptions) -> Self {
        let (mut lo, mut hi) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for p in points {
            if p[0].is_finite() && p[1].is_finite() {
                for i in 0..2 {
                    lo[i] = lo[i].min(p[i]);
                    hi[i] = hi[i].max(p[i]);
                }
            }
        }
        if lo[0] > hi[0] {
            lo = [0.0, 0.0];
            hi = [1.0, 1.0];
        }
        let span = [hi[0] - lo[0], hi[1] - lo[1]];
        let avail = [
            opts.width.saturating_sub(2 * opts.margin).max(1) as f64,
            opts.height.saturating_sub(2 * opts.margin).max(1) as f64,
        ];
        let scale = match (span[0] > 1e-9, span[1] > 1e-9) {
            (true, true) => (avail[0] / span[0]).min(avail[1] / span[1]),
            (true, false) => avail[0] / span[0],
            (false, true) => avail[1] / span[1],
            (false, false) => 1.0,
        };
        Self {
            mid: [0.5 * (lo[0] + hi[0]), 0.5 * (lo[1] + hi[1])],
            scale,
            canvas_mid: [0.5 * opts.width as f64, 0.5 * opts.height as f64],
            diagonal: span[0].hypot(span[1]).max(1.0),
        }
    }

    fn map(&self, p: &Point) -> (f32, f32) {
        (
            (self.canvas_mid[0] + (p[0] - self.mid[0]) * self.scale) as f32,
            (self.canvas_mid[1] - (p[1] - self.mid[1]) * self.scale) as f32,
        )
    }
}

/// Polyline approximating what `curve` represents: the fitted primitive for
/// primitives, the reconstruction for completed curves, the raw samples for
/// unknown curves.
pub fn outline(curve: &Curve) -> Vec<Point> {
    let ring = |at: &dyn Fn(f64) -> Point| -> Vec<Point> {
        (0..=OUTLINE_SAMPLES)
            .map(|k| at(TAU * k as f64 / OUTLINE_SAMPLES as f64))
            .collect()
    };
    match curve.shape() {
        Shape::Line(line) => {
            let (lo, hi) = curve
                .points()
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p[0]), hi.max(p[0]))
                });
            if lo > hi {
                return Vec::new();
            }
            vec![[lo, line.y_at(lo)], [hi, line.y_at(hi)]]
        }
        Shape::Circle(circle) => ring(&|t| circle.point_at(t)),
        Shape::Ellipse(ellipse) => ring(&|t| ellipse.point_at(t)),
        Shape::Rectangle(rect) => {
            let corners = rect.corners();
            corners.iter().chain(corners.first()).copied().collect()
        }
        Shape::Unknown => curve.points().to_vec(),
        Shape::Completed {
            completed_points, ..
        } => completed_points.clone(),
    }
}

/// Primitives in green, completions in red over their originals in blue.
pub fn render_results(paths: &[CurvePath], opts: &RenderOptions) -> RgbImage {
    let mut strokes: Vec<(Vec<Point>, Rgb<u8>)> = Vec::new();
    for curve in paths.iter().flatten() {
        match curve.original() {
            Some(original) => {
                strokes.push((original.points().to_vec(), ORIGINAL_COLOR));
                strokes.push((outline(curve), COMPLETED_COLOR));
            }
            None => strokes.push((outline(curve), PRIMITIVE_COLOR)),
        }
    }
    let viewport = Viewport::fit(strokes.iter().flat_map(|(pts, _)| pts), opts);
    let mut img = RgbImage::from_pixel(opts.width, opts.height, BACKGROUND);
    for (pts, color) in &strokes {
        draw_polyline(&mut img, &viewport, pts, *color);
    }
    img
}

/// Curves coloured by symmetry class, mirror axes in grey.
///
/// `symmetry` follows the `[path][curve]` layout of `paths`; missing entries
/// are drawn as having no symmetry.
pub fn render_symmetry(
    paths: &[CurvePath],
    symmetry: &[Vec<Option<SymmetryResult>>],
    opts: &RenderOptions,
) -> RgbImage {
    let mut strokes: Vec<(Vec<Point>, Rgb<u8>, Option<SymmetryResult>)> = Vec::new();
    for (pid, path) in paths.iter().enumerate() {
        for (cid, curve) in path.iter().enumerate() {
            let result = symmetry
                .get(pid)
                .and_then(|row| row.get(cid))
                .copied()
                .flatten();
            let color = match result {
                Some(s) if s.has_reflection => COMPLETED_COLOR,
                Some(s) if s.rotation.is_symmetric() => PRIMITIVE_COLOR,
                _ => ORIGINAL_COLOR,
            };
            strokes.push((outline(curve), color, result));
        }
    }
    let viewport = Viewport::fit(strokes.iter().flat_map(|(pts, _, _)| pts), opts);
    let mut img = RgbImage::from_pixel(opts.width, opts.height, BACKGROUND);
    for (_, _, result) in &strokes {
        if let Some(axis) = result.and_then(|s| s.axis) {
            let half = viewport.diagonal;
            let a = [
                axis.point[0] - half * axis.direction[0],
                axis.point[1] - half * axis.direction[1],
            ];
            let b = [
                axis.point[0] + half * axis.direction[0],
                axis.point[1] + half * axis.direction[1],
            ];
            draw_polyline(&mut img, &viewport, &[a, b], AXIS_COLOR);
        }
    }
    for (pts, color, _) in &strokes {
        draw_polyline(&mut img, &viewport, pts, *color);
    }
    img
}

pub fn save_png(img: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn draw_polyline(img: &mut RgbImage, viewport: &Viewport, pts: &[Point], color: Rgb<u8>) {
    let finite: Vec<(f32, f32)> = pts
        .iter()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .map(|p| viewport.map(p))
        .collect();
    if let [single] = finite.as_slice() {
        draw_filled_circle_mut(img, (single.0 as i32, single.1 as i32), 2, color);
        return;
    }
    for w in finite.windows(2) {
        draw_line_segment_mut(img, w[0], w[1], color);
    }
}
