use std::{fs, path::Path};

use sha2::{Digest, Sha256};
use tracing::info;

use crate::{
    error::{Error, Result},
    models::CompiledContract,
    solc::{run_solc, SolcConfig},
};

/// Compiles `file_path` and returns the first unit the compiler reports.
///
/// For a single-contract file that is the contract itself. Files defining
/// several contracts still yield exactly one unit; the rest are dropped.
pub fn compile_sol(file_path: impl AsRef<Path>, config: &SolcConfig) -> Result<CompiledContract> {
    let file_path = file_path.as_ref();
    let source = fs::read(file_path).map_err(|source| Error::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    let hash = hex::encode(Sha256::digest(&source));

    let output = run_solc(config, &[file_path])?;
    let units = output.len();
    match output.into_first()? {
        Some((id, contract)) => {
            info!(hash=%hash, contract=%id, units, "compiled successfully");
            Ok(contract)
        }
        None if config.allow_empty => {
            info!(hash=%hash, path=%file_path.display(), "compiled without contracts");
            Ok(CompiledContract::default())
        }
        None => Err(Error::NoContracts {
            path: file_path.to_path_buf(),
        }),
    }
}

/// Compiles `file_path` and writes the rendered result to `output_file_path`,
/// replacing whatever was there. Nothing is written if compilation fails.
pub fn compile_sol_to_file(
    file_path: impl AsRef<Path>,
    output_file_path: impl AsRef<Path>,
    config: &SolcConfig,
) -> Result<()> {
    let output_file_path = output_file_path.as_ref();
    let contract = compile_sol(file_path, config)?;
    let text = contract.render()?;
    fs::write(output_file_path, text).map_err(|source| Error::Write {
        path: output_file_path.to_path_buf(),
        source,
    })?;
    info!(output=%output_file_path.display(), "artifact written");
    Ok(())
}
