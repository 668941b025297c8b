//! Collaborators around the numerical core: point tables, JSON reports,
//! raster rendering and polyline extraction.

pub mod extract;
pub mod json;
pub mod render;
pub mod table;

pub use extract::{load_grayscale_image, ContourSource, PolylineSource};
pub use json::write_json_file;
pub use render::{render_results, render_symmetry, save_png, RenderOptions};
pub use table::{format_table, parse_table, read_table, write_table, TableError};
