//! Command-line interface for `solc-artifact`.

use std::path::PathBuf;

use clap::Parser;
use solc_artifact::SolcConfig;

#[derive(Parser, Debug)]
#[command(name = "solc-artifact")]
#[command(about = "Compile a Solidity file and write its ABI and bytecode", long_about = None)]
pub struct Cli {
    /// Solidity source file
    #[arg(required_unless_present = "print_version")]
    pub source: Option<PathBuf>,

    /// Artifact path (defaults to the source path with a `.json` extension)
    pub output: Option<PathBuf>,

    /// Compiler binary
    #[arg(long, env = "SOLC_BINARY", default_value = "solc")]
    pub solc: PathBuf,

    /// Output kinds to request from the compiler
    #[arg(long, value_delimiter = ',', default_values = ["abi", "bin"])]
    pub output_values: Vec<String>,

    #[arg(long)]
    pub optimize: bool,

    /// Implies --optimize
    #[arg(long)]
    pub optimize_runs: Option<u32>,

    #[arg(long)]
    pub evm_version: Option<String>,

    #[arg(long)]
    pub base_path: Option<PathBuf>,

    #[arg(long, value_delimiter = ',')]
    pub allow_paths: Vec<PathBuf>,

    /// Import remapping, `prefix=path`; repeatable
    #[arg(long = "remap", value_name = "PREFIX=PATH")]
    pub remappings: Vec<String>,

    /// Write an empty artifact instead of failing when nothing compiles
    #[arg(long)]
    pub allow_empty: bool,

    /// Print the compiler version and exit
    #[arg(long)]
    pub print_version: bool,
}

impl Cli {
    pub fn config(&self) -> SolcConfig {
        let mut config = SolcConfig::default()
            .with_solc(&self.solc)
            .with_output_values(self.output_values.iter().cloned())
            .allow_empty(self.allow_empty);
        if self.optimize || self.optimize_runs.is_some() {
            config = config.with_optimizer(self.optimize_runs);
        }
        if let Some(evm) = &self.evm_version {
            config = config.with_evm_version(evm);
        }
        if let Some(base) = &self.base_path {
            config = config.with_base_path(base);
        }
        for path in &self.allow_paths {
            config = config.with_allow_path(path);
        }
        for remapping in &self.remappings {
            config = config.with_remapping(remapping);
        }
        config
    }

    /// Where the artifact goes, if there is a source to compile. The default
    /// `<source>.json` is refused when it would be the source itself.
    pub fn destination(&self) -> Option<PathBuf> {
        match (&self.output, &self.source) {
            (Some(output), _) => Some(output.clone()),
            (None, Some(source)) => {
                let derived = source.with_extension("json");
                (derived != *source).then_some(derived)
            }
            (None, None) => None,
        }
    }
}
