//! `(path_id, curve_id, x, y)` point tables.
//!
//! One comma-separated row per sample. Rows sharing `path_id` form a path and
//! rows additionally sharing `curve_id` form a curve, samples kept in row
//! order. Paths and curves come out in ascending id order. Blank lines are
//! skipped; anything else that is not four numeric fields is an error.

use super::json::ensure_parent_dir;
use crate::types::{Curve, Path as CurvePath, Point, Shape};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw batch layout `[path][curve][point]`.
pub type PointTable = Vec<Vec<Vec<Point>>>;

#[derive(Debug)]
pub enum TableError {
    Io { path: PathBuf, source: std::io::Error },
    Empty,
    ColumnCount { line: usize, found: usize },
    InvalidNumber { line: usize, column: usize, value: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io { path, source } => {
                write!(f, "failed to access table {}: {source}", path.display())
            }
            TableError::Empty => f.write_str("table has no rows"),
            TableError::ColumnCount { line, found } => {
                write!(f, "line {line}: expected 4 columns, found {found}")
            }
            TableError::InvalidNumber {
                line,
                column,
                value,
            } => write!(f, "line {line}, column {column}: invalid number {value:?}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

struct Row {
    path_id: f64,
    curve_id: f64,
    point: Point,
}

/// Parse table text into `[path][curve][point]`.
pub fn parse_table(text: &str) -> Result<PointTable, TableError> {
    let mut rows = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(TableError::ColumnCount {
                line,
                found: fields.len(),
            });
        }
        let mut values = [0.0; 4];
        for (column, (slot, field)) in values.iter_mut().zip(&fields).enumerate() {
            *slot = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| TableError::InvalidNumber {
                    line,
                    column: column + 1,
                    value: field.to_string(),
                })?;
        }
        rows.push(Row {
            path_id: values[0],
            curve_id: values[1],
            point: [values[2], values[3]],
        });
    }
    if rows.is_empty() {
        return Err(TableError::Empty);
    }

    // Stable: samples of one curve keep their row order.
    rows.sort_by(|a, b| {
        a.path_id
            .total_cmp(&b.path_id)
            .then(a.curve_id.total_cmp(&b.curve_id))
    });

    let mut table: PointTable = Vec::new();
    let mut current: Option<(f64, f64)> = None;
    for row in rows {
        match current {
            Some((pid, cid)) if pid == row.path_id && cid == row.curve_id => {}
            Some((pid, _)) if pid == row.path_id => {
                if let Some(path) = table.last_mut() {
                    path.push(Vec::new());
                }
            }
            _ => table.push(vec![Vec::new()]),
        }
        current = Some((row.path_id, row.curve_id));
        if let Some(curve) = table.last_mut().and_then(|path| path.last_mut()) {
            curve.push(row.point);
        }
    }
    Ok(table)
}

/// Format `[path][curve][point]` as table text, numbering paths and curves
/// from zero.
pub fn format_table(table: &[Vec<Vec<Point>>]) -> String {
    let mut out = String::new();
    for (pid, path) in table.iter().enumerate() {
        for (cid, curve) in path.iter().enumerate() {
            for p in curve {
                // Writing into a String cannot fail.
                let _ = writeln!(out, "{pid},{cid},{},{}", p[0], p[1]);
            }
        }
    }
    out
}

pub fn read_table(path: &Path) -> Result<PointTable, TableError> {
    let text = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&text)
}

pub fn write_table(path: &Path, table: &[Vec<Vec<Point>>]) -> Result<(), TableError> {
    let io_err = |source| TableError::Io {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).map_err(|msg| io_err(std::io::Error::other(msg)))?;
    fs::write(path, format_table(table)).map_err(io_err)
}

/// Samples to export per curve: the reconstruction for completed curves,
/// the raw samples otherwise.
pub fn export_samples(paths: &[CurvePath]) -> PointTable {
    paths
        .iter()
        .map(|path| path.iter().map(curve_samples).collect())
        .collect()
}

fn curve_samples(curve: &Curve) -> Vec<Point> {
    match curve.shape() {
        Shape::Completed {
            completed_points, ..
        } => completed_points.clone(),
        _ => curve.points().to_vec(),
    }
}
