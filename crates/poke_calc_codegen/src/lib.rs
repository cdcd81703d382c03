//! Code generation helpers for poke_calc.
//!
//! This crate parses the Gen 1 JSON data files under `data/gen1`
//! and generates the static type tables used by the damage formula.

mod models;
mod types;

use std::path::Path;
use std::println;

/// Generate all code from the data directory into the output directory.
///
/// This is the main entry point called from poke_calc's build.rs.
pub fn generate_all(out_dir: &Path, data_dir: &Path) {
    for file in &["gen1/typechart.json"] {
        println!("cargo:rerun-if-changed={}", data_dir.join(file).display());
    }

    types::generate(out_dir, data_dir);
}
