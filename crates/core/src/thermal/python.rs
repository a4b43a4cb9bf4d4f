//! [`ThermalAnalyzer`] backed by an external Python script.
//!
//! Invocation is `<python_bin> <absolute script path> <baseline> <candidate>`
//! run from `base_dir`. The script prints a single JSON object to stdout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

use super::{align, locate, parse, validate_inputs, AnalysisError, ThermalAnalyzer, ThermalFinding};
use crate::scripting::subprocess::run_command;
use crate::scripting::{ScriptError, ScriptInput};

/// Script file name looked up in each candidate directory.
pub const DEFAULT_SCRIPT_NAME: &str = "analyze.py";

/// Directories searched, in order, relative to the base directory.
pub const DEFAULT_SCRIPT_DIRS: &[&str] = &["ml_models", "Backend/ml_models", "ML Model"];

/// Wall-clock limit for one analysis run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings resolved once at start-up.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Interpreter executable, resolved through `PATH` when not absolute.
    pub python_bin: String,
    pub script_name: String,
    pub script_dirs: Vec<String>,
    /// Directory the script dirs are resolved against; also the child's cwd.
    pub base_dir: PathBuf,
    /// Where resized baselines are written for the duration of a call.
    pub scratch_dir: PathBuf,
    pub timeout: Duration,
}

impl AnalyzerConfig {
    /// Defaults rooted at `base_dir`, with scratch files under the system temp dir.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            python_bin: "python".to_string(),
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            script_dirs: DEFAULT_SCRIPT_DIRS.iter().map(|d| d.to_string()).collect(),
            base_dir: base_dir.into(),
            scratch_dir: std::env::temp_dir(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl From<ScriptError> for AnalysisError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::Timeout { elapsed_ms } => AnalysisError::Timeout { elapsed_ms },
            ScriptError::IoError(e) => AnalysisError::Launch(e),
        }
    }
}

pub struct PythonThermalAnalyzer {
    config: AnalyzerConfig,
}

impl PythonThermalAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    async fn run_script(
        &self,
        script: &Path,
        baseline: &Path,
        candidate: &Path,
    ) -> Result<ThermalFinding, AnalysisError> {
        let mut cmd = Command::new(&self.config.python_bin);
        cmd.arg(script);

        let input = ScriptInput {
            args: vec![
                baseline.to_string_lossy().into_owned(),
                candidate.to_string_lossy().into_owned(),
            ],
            working_directory: Some(self.config.base_dir.clone()),
            timeout: self.config.timeout,
        };

        let output = run_command(&mut cmd, input).await?;

        tracing::debug!(
            exit_code = output.exit_code,
            duration_ms = output.duration_ms,
            "Analysis script finished"
        );

        if !output.succeeded() {
            return Err(AnalysisError::Failed {
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        parse::parse_finding(&output.stdout)
    }
}

#[async_trait::async_trait]
impl ThermalAnalyzer for PythonThermalAnalyzer {
    fn label(&self) -> &str {
        &self.config.script_name
    }

    async fn compare(
        &self,
        baseline: &Path,
        candidate: &Path,
    ) -> Result<ThermalFinding, AnalysisError> {
        validate_inputs(baseline, candidate)?;

        let script = locate::locate_script(
            &self.config.base_dir,
            &self.config.script_dirs,
            &self.config.script_name,
        )?;

        let aligned =
            align::align_baseline(baseline, candidate, &self.config.scratch_dir).await?;
        let effective_baseline = aligned.as_deref().unwrap_or(baseline);

        tracing::info!(
            script = %script.display(),
            baseline = %effective_baseline.display(),
            candidate = %candidate.display(),
            "Running thermal analysis"
        );

        // `aligned` removes its scratch file on drop, cancellation included.
        self.run_script(&script, effective_baseline, candidate).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
