use curve_regularizer::config::batch::{load_config, BatchToolConfig, InputConfig};
use curve_regularizer::io::table::{export_samples, PointTable};
use curve_regularizer::io::{
    load_grayscale_image, read_table, render_results, render_symmetry, save_png, write_json_file,
    write_table, PolylineSource,
};
use curve_regularizer::{BatchReport, Regularizer};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let batch = load_batch(&config)?;
    let regularizer = Regularizer::new(config.params.clone());
    let report = regularizer.process(&batch).map_err(|e| e.to_string())?;

    let format = config.output.format;
    if format.includes_text() {
        print_text_summary(&report);
    }
    if format.includes_json() {
        match &config.output.report_json {
            Some(path) => {
                write_json_file(path, &report)?;
                println!("JSON report written to {}", path.display());
            }
            None => {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
                println!("{json}");
            }
        }
    }
    write_artifacts(&config, &report)?;
    Ok(())
}

fn usage() -> String {
    "Usage: regularize_demo <config.json>".to_string()
}

fn load_batch(config: &BatchToolConfig) -> Result<PointTable, String> {
    match &config.input {
        InputConfig::Table { path } => read_table(path).map_err(|e| e.to_string()),
        InputConfig::Image { path, contours } => {
            let gray = load_grayscale_image(path)?;
            Ok(contours.extract(&gray))
        }
    }
}

fn write_artifacts(config: &BatchToolConfig, report: &BatchReport) -> Result<(), String> {
    let output = &config.output;
    if let Some(path) = &output.completed_csv {
        let paths = report.completed.as_ref().unwrap_or(&report.paths);
        write_table(path, &export_samples(paths)).map_err(|e| e.to_string())?;
        println!("Samples written to {}", path.display());
    }
    if let Some(path) = &output.results_png {
        let paths = report.completed.as_ref().unwrap_or(&report.paths);
        save_png(&render_results(paths, &config.render), path)?;
        println!("Results render written to {}", path.display());
    }
    if let Some(path) = &output.symmetry_png {
        match &report.symmetry {
            Some(symmetry) => {
                save_png(&render_symmetry(&report.paths, symmetry, &config.render), path)?;
                println!("Symmetry render written to {}", path.display());
            }
            None => eprintln!("No symmetry results; skipping {}", path.display()),
        }
    }
    Ok(())
}

fn print_text_summary(report: &BatchReport) {
    println!("Regularization summary");
    println!("  paths: {}", report.paths.len());
    println!("  curves: {}", report.curve_count());
    println!("  kinds: {}", report.counts);
    if let Some(counts) = &report.completion_counts {
        println!("  after completion: {counts}");
    }
    if let Some(n) = report.symmetric_count() {
        println!("  symmetric: {n}");
    }
    for err in &report.stage_errors {
        println!("  {err}");
    }
    println!("  total_ms: {:.3}", report.timings.total_ms);
    for stage in &report.timings.stages {
        println!("    {:<12} {:>9.3} ms", stage.label, stage.elapsed_ms);
    }
}
