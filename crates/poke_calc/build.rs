//! Build script for poke_calc.
//!
//! Calls out to poke_calc_codegen to generate the type tables from JSON data.

use std::env;
use std::path::Path;

fn main() {
    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let data_dir = Path::new(&manifest_dir).join("../../data");

    println!("cargo:rerun-if-changed=build.rs");

    poke_calc_codegen::generate_all(Path::new(&out_dir), &data_dir);
}
