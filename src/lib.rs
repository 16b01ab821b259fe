//! Compile a Solidity source file with `solc` and write the first contract's
//! ABI and bytecode to disk.

pub mod compile;
pub mod error;
pub mod models;
pub mod solc;

pub use compile::{compile_sol, compile_sol_to_file};
pub use error::{Error, Result};
pub use models::{CombinedOutput, CompiledContract};
pub use solc::{run_solc, solc_version, SolcConfig};
