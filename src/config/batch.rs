use crate::io::{ContourSource, RenderOptions};
use crate::RegularizerParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `regularize_demo` tool.
#[derive(Debug, Deserialize)]
pub struct BatchToolConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub params: RegularizerParams,
    #[serde(default)]
    pub render: RenderOptions,
    pub output: BatchOutputConfig,
}

/// Where the batch comes from.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputConfig {
    /// `(path_id, curve_id, x, y)` CSV table.
    Table { path: PathBuf },
    /// Raster image traced with [`ContourSource`].
    Image {
        path: PathBuf,
        #[serde(default)]
        contours: ContourSource,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BatchOutputConfig {
    pub format: OutputFormat,
    /// JSON report path; with a JSON format and no path the report goes to
    /// stdout.
    pub report_json: Option<PathBuf>,
    /// Table of exported samples (reconstructions for completed curves).
    pub completed_csv: Option<PathBuf>,
    pub results_png: Option<PathBuf>,
    pub symmetry_png: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<BatchToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<BatchToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::RectangleResidual;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{"input": {"kind": "table", "path": "in.csv"}, "output": {}}"#)
            .expect("config");
        assert!(matches!(cfg.input, InputConfig::Table { .. }));
        assert_eq!(cfg.params, RegularizerParams::default());
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn nested_params_override_defaults() {
        let cfg = parse_config(
            r#"{
                "input": {"kind": "image", "path": "in.png", "contours": {"min_points": 20}},
                "params": {
                    "fit": {"threshold": 0.5, "rectangle_residual": "boundary"},
                    "enable_completion": false
                },
                "output": {"format": "both", "report_json": "out/report.json"}
            }"#,
        )
        .expect("config");
        let InputConfig::Image { contours, .. } = cfg.input else {
            panic!("expected image input");
        };
        assert_eq!(contours.min_points, 20);
        assert_eq!(cfg.params.fit.threshold, 0.5);
        assert_eq!(cfg.params.fit.circle_max_iters, 100);
        assert_eq!(cfg.params.fit.rectangle_residual, RectangleResidual::Boundary);
        assert!(!cfg.params.enable_completion);
        assert!(cfg.output.format.includes_json() && cfg.output.format.includes_text());
    }
}
