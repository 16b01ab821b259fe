use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    models::CombinedOutput,
};

pub const DEFAULT_OUTPUT_VALUES: [&str; 2] = ["abi", "bin"];

/// How to invoke the compiler and what to ask it for.
#[derive(Debug, Clone)]
pub struct SolcConfig {
    pub solc: PathBuf,
    pub output_values: Vec<String>,
    pub optimize: bool,
    pub optimize_runs: Option<u32>,
    pub evm_version: Option<String>,
    pub base_path: Option<PathBuf>,
    pub allow_paths: Vec<PathBuf>,
    pub remappings: Vec<String>,
    /// Succeed with an empty result when nothing was compiled.
    pub allow_empty: bool,
}

impl Default for SolcConfig {
    fn default() -> Self {
        Self {
            solc: PathBuf::from("solc"),
            output_values: DEFAULT_OUTPUT_VALUES.iter().map(|v| v.to_string()).collect(),
            optimize: false,
            optimize_runs: None,
            evm_version: None,
            base_path: None,
            allow_paths: Vec::new(),
            remappings: Vec::new(),
            allow_empty: false,
        }
    }
}

impl SolcConfig {
    pub fn with_solc(mut self, solc: impl Into<PathBuf>) -> Self {
        self.solc = solc.into();
        self
    }

    pub fn with_output_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_optimizer(mut self, runs: Option<u32>) -> Self {
        self.optimize = true;
        self.optimize_runs = runs;
        self
    }

    pub fn with_evm_version(mut self, version: impl Into<String>) -> Self {
        self.evm_version = Some(version.into());
        self
    }

    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    pub fn with_allow_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.allow_paths.push(path.into());
        self
    }

    pub fn with_remapping(mut self, remapping: impl Into<String>) -> Self {
        self.remappings.push(remapping.into());
        self
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Command-line arguments for a `--combined-json` run over `sources`.
    pub fn args(&self, sources: &[&Path]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--combined-json".into(),
            self.output_values.join(",").into(),
        ];
        if self.optimize {
            args.push("--optimize".into());
        }
        if let Some(runs) = self.optimize_runs {
            args.push("--optimize-runs".into());
            args.push(runs.to_string().into());
        }
        if let Some(evm) = &self.evm_version {
            args.push("--evm-version".into());
            args.push(evm.into());
        }
        if let Some(base) = &self.base_path {
            args.push("--base-path".into());
            args.push(base.into());
        }
        if !self.allow_paths.is_empty() {
            let joined = self
                .allow_paths
                .iter()
                .map(|p| p.to_string_lossy())
                .collect::<Vec<_>>()
                .join(",");
            args.push("--allow-paths".into());
            args.push(joined.into());
        }
        args.extend(self.remappings.iter().map(OsString::from));
        args.extend(sources.iter().map(|s| s.as_os_str().to_owned()));
        args
    }
}

fn run(config: &SolcConfig, args: &[OsString]) -> Result<Output> {
    debug!(solc=%config.solc.display(), ?args, "invoking compiler");
    let output = Command::new(&config.solc)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| Error::Spawn {
            program: config.solc.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        let mut combined_output = String::new();
        if !stdout.is_empty() {
            combined_output.push_str(&stdout);
        }
        if !stderr.is_empty() {
            if !combined_output.is_empty() && !combined_output.ends_with('\n') {
                combined_output.push('\n');
            }
            combined_output.push_str(&stderr);
        }
        return Err(Error::Compiler {
            code: output.status.code(),
            diagnostics: combined_output,
        });
    }
    if !stderr.trim().is_empty() {
        warn!(solc=%config.solc.display(), "{}", stderr.trim_end());
    }
    Ok(output)
}

/// Runs the compiler over `sources` and parses its combined-json report.
pub fn run_solc(config: &SolcConfig, sources: &[&Path]) -> Result<CombinedOutput> {
    let output = run(config, &config.args(sources))?;
    let combined = CombinedOutput::parse(&output.stdout)?;
    debug!(units = combined.len(), version = ?combined.version, "compiler finished");
    Ok(combined)
}

/// The `Version: ...` line of `solc --version`.
pub fn solc_version(config: &SolcConfig) -> Result<String> {
    let output = run(config, &[OsString::from("--version")])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix("Version:"))
        .map(str::trim)
        .unwrap_or_else(|| stdout.trim());
    Ok(line.to_string())
}
