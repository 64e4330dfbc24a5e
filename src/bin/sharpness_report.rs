use serde::Deserialize;
use sharpness_evaluator::image::io::{
    load_grayscale_image, load_mask_image, save_grayscale_f32, write_json_file,
};
use sharpness_evaluator::image::ImageF32;
use sharpness_evaluator::laplacian::laplacian_response;
use sharpness_evaluator::{evaluate, EvaluationOptions};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ReportToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Optional 0/255 grayscale mask, same dimensions as the input.
    #[serde(default)]
    pub mask: Option<PathBuf>,
    #[serde(default)]
    pub metrics: EvaluationOptions,
    pub output: ReportOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ReportOutputConfig {
    #[serde(rename = "reportJson")]
    pub report_json: PathBuf,
    /// Optional grayscale dump of the absolute Laplacian response.
    #[serde(default, rename = "responseImage")]
    pub response_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ReportToolConfig, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let mask = config.mask.as_deref().map(load_mask_image).transpose()?;

    let mask_view = mask.as_ref().map(|m| m.as_view());
    let summary = evaluate(gray.as_view(), mask_view, &config.metrics)
        .map_err(|e| format!("Evaluation failed: {e}"))?;

    if let Some(path) = &config.output.response_image {
        let l = ImageF32::from_u8(gray.as_view());
        let mut resp = laplacian_response(&l);
        for v in &mut resp.data {
            *v = v.abs();
        }
        save_grayscale_f32(&resp, path)?;
        println!("Saved Laplacian response image to {}", path.display());
    }

    write_json_file(&config.output.report_json, &summary)?;
    println!(
        "{} ({}x{}, {} masked px): tenengrad={:.6} laplacianVariance={:.6} in {:.3} ms",
        config.input.display(),
        summary.width,
        summary.height,
        summary.masked_pixels,
        summary.tenengrad,
        summary.laplacian_variance,
        summary.elapsed_ms
    );
    println!("Saved report to {}", config.output.report_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: sharpness_report <config.json>".to_string()
}
