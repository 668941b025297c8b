//! Polyline extraction from raster images.
//!
//! The core only consumes `[path][curve][point]` batches; [`PolylineSource`]
//! is the seam for anything that produces them from an image.
//! [`ContourSource`] is a small border-following extractor: threshold,
//! trace borders, and emit one path per outer border holding the border
//! itself followed by its holes.

use super::table::PointTable;
use crate::types::Point;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Produces ordered paths of ordered curves from a grayscale image.
pub trait PolylineSource {
    fn extract(&self, image: &GrayImage) -> PointTable;
}

/// Border-following extractor. Output coordinates are pixel centres with y
/// pointing up (row 0 is the top of the image).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSource {
    /// Fixed binarisation level; `None` picks the Otsu level.
    pub threshold: Option<u8>,
    /// Treat bright pixels as foreground instead of dark ones.
    pub bright_foreground: bool,
    /// Borders with fewer pixels are dropped.
    pub min_points: usize,
}

impl Default for ContourSource {
    fn default() -> Self {
        Self {
            threshold: None,
            bright_foreground: false,
            min_points: 8,
        }
    }
}

impl PolylineSource for ContourSource {
    fn extract(&self, image: &GrayImage) -> PointTable {
        let level = self.threshold.unwrap_or_else(|| otsu_level(image));
        let kind = if self.bright_foreground {
            ThresholdType::Binary
        } else {
            ThresholdType::BinaryInverted
        };
        let binary = threshold(image, level, kind);
        let contours = find_contours::<i32>(&binary);
        let top = image.height().saturating_sub(1) as f64;
        let to_points = |pts: &[imageproc::point::Point<i32>]| -> Vec<Point> {
            pts.iter().map(|p| [p.x as f64, top - p.y as f64]).collect()
        };

        let mut paths = Vec::new();
        for (idx, outer) in contours.iter().enumerate() {
            if outer.border_type != BorderType::Outer || outer.points.len() < self.min_points {
                continue;
            }
            let mut path = vec![to_points(&outer.points)];
            path.extend(
                contours
                    .iter()
                    .filter(|c| {
                        c.border_type == BorderType::Hole
                            && c.parent == Some(idx)
                            && c.points.len() >= self.min_points
                    })
                    .map(|c| to_points(&c.points)),
            );
            paths.push(path);
        }
        debug!(
            "ContourSource: level={} borders={} paths={}",
            level,
            contours.len(),
            paths.len()
        );
        paths
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImage, String> {
    Ok(image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8())
}
