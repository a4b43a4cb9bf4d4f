//! Thermal image comparison: a baseline and a candidate infrared image go in,
//! a [`ThermalFinding`] describing warm regions and the likely fault comes out.
//!
//! Callers depend only on [`ThermalAnalyzer`]. The shipped implementation,
//! [`PythonThermalAnalyzer`], shells out to an external `analyze.py` script;
//! its path resolution, timeout and stdout parsing stay behind the trait.

pub mod align;
pub mod locate;
pub mod parse;
pub mod python;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

pub use python::{AnalyzerConfig, PythonThermalAnalyzer};

/// Fault label used when the analysis does not name one.
pub const UNKNOWN_FAULT_TYPE: &str = "unknown";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Rectangular image region flagged as anomalous, in candidate-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    /// The `[x, y, w, h]` tuple form used on the wire.
    pub fn as_array(&self) -> [i32; 4] {
        [self.x, self.y, self.w, self.h]
    }
}

/// Structured outcome of a successful baseline/candidate comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalFinding {
    /// Overall fault probability.
    pub prob: f64,
    /// Hue/saturation histogram distance between the two images.
    pub hist_distance: f64,
    /// 95th-percentile brightness increase.
    pub dv95: f64,
    /// Fraction of candidate pixels classified as warm.
    pub warm_fraction: f64,
    pub image_width: i32,
    pub image_height: i32,
    /// High-level fault label, [`UNKNOWN_FAULT_TYPE`] when absent.
    pub fault_type: String,
    /// Base64 annotated image, if the analysis produced one.
    pub annotated: Option<String>,
    pub boxes: Vec<BoundingBox>,
    /// Per-box detail objects, passed through untouched.
    pub box_info: Vec<Map<String, Value>>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which of the two input images an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Baseline,
    Candidate,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str("Baseline"),
            Self::Candidate => f.write_str("Candidate"),
        }
    }
}

/// Every way a comparison can fail. The `Display` text is what API callers
/// see as `errorMessage`.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{role} image path is required for thermal analysis")]
    MissingInput { role: ImageRole },

    #[error("{role} image file not found: {}", .path.display())]
    InputNotFound { role: ImageRole, path: PathBuf },

    #[error("Analyze script not found. Checked: {}", join_paths(.checked))]
    ScriptNotFound { checked: Vec<PathBuf> },

    #[error("Failed to prepare baseline image: {0}")]
    Prepare(String),

    #[error("Error executing thermal analysis: {0}")]
    Launch(#[source] std::io::Error),

    #[error("Python script execution timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Python script failed with exit code {exit_code}: {stderr}")]
    Failed { exit_code: i32, stderr: String },

    #[error("Python script error: {0}")]
    Reported(String),

    #[error("Failed to parse thermal analysis response: {reason}. Raw output: {raw}")]
    Parse { reason: String, raw: String },
}

impl AnalysisError {
    /// True when the request itself was unusable (nothing was launched).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingInput { .. } | Self::InputNotFound { .. })
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Analyzer seam
// ---------------------------------------------------------------------------

/// Compares a baseline image against a candidate image.
///
/// Stateless per call: no retry, no queueing. Implementations must not
/// return a partially populated finding; anything short of a full result is
/// an [`AnalysisError`].
#[async_trait::async_trait]
pub trait ThermalAnalyzer: Send + Sync {
    /// Identifier reported to clients as `scriptUsed`.
    fn label(&self) -> &str;

    async fn compare(
        &self,
        baseline: &Path,
        candidate: &Path,
    ) -> Result<ThermalFinding, AnalysisError>;
}

/// Check both inputs are named and exist on disk.
pub fn validate_inputs(baseline: &Path, candidate: &Path) -> Result<(), AnalysisError> {
    for (role, path) in [(ImageRole::Baseline, baseline), (ImageRole::Candidate, candidate)] {
        if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
            return Err(AnalysisError::MissingInput { role });
        }
    }
    for (role, path) in [(ImageRole::Baseline, baseline), (ImageRole::Candidate, candidate)] {
        if !path.exists() {
            return Err(AnalysisError::InputNotFound {
                role,
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
