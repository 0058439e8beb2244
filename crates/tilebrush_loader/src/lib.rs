//! Material definitions loader for tilebrush
//!
//! This crate reads JSON material files (items, auto borders, ground, wall,
//! table and carpet brushes) and resolves them into the [`Materials`] value the bordering
//! engine runs on. Broken definitions are dropped with a [`LoadWarning`]
//! instead of failing the whole load.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilebrush_loader::load_materials;
//!
//! let report = load_materials("data/materials.json".as_ref())?;
//! for warning in &report.warnings {
//!     eprintln!("{warning}");
//! }
//! let materials = report.materials;
//! ```

pub mod resolve;
pub mod types;

pub use resolve::{resolve_materials, LoadReport, LoadWarning};
pub use types::*;

use std::path::Path;
use thiserror::Error;
use tilebrush_autoborder::Materials;

/// Errors that stop a load entirely
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load materials from a JSON file
pub fn load_materials(path: &Path) -> Result<LoadReport, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_materials(&content)
}

/// Parse materials from a JSON string
pub fn parse_materials(json: &str) -> Result<LoadReport, LoadError> {
    let file: MaterialsFile = serde_json::from_str(json)?;
    let report = resolve_materials(&file);
    log_summary(&report.materials, report.warnings.len());
    Ok(report)
}

/// Parse materials from bytes
pub fn load_materials_from_bytes(bytes: &[u8]) -> Result<LoadReport, LoadError> {
    let file: MaterialsFile = serde_json::from_slice(bytes)?;
    let report = resolve_materials(&file);
    log_summary(&report.materials, report.warnings.len());
    Ok(report)
}

fn log_summary(materials: &Materials, warnings: usize) {
    tracing::info!(
        items = materials.items.len(),
        borders = materials.borders.len(),
        brushes = materials.brushes.len(),
        warnings,
        "loaded materials"
    );
}
