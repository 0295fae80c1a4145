//! Build Script for Execution Stack
//!
//! Emits `cfg(coverage)` when built under `cargo-llvm-cov` so coverage-only
//! exclusions can use `#[cfg(not(coverage))]`.

use std::env;

fn main() {
    #[cfg(coverage)]
    {
        println!("cargo:rustc-env=LLVM_PROFILE_FILE=coverage-%p-%m.profraw");
    }

    println!("cargo:rerun-if-changed=build.rs");

    if env::var("CARGO_LLVM_COV").is_ok()
        || env::var("LLVM_PROFILE_FILE").is_ok()
        || env::var("RUSTFLAGS").is_ok_and(|f| f.contains("instrument-coverage"))
    {
        println!("cargo:rustc-cfg=coverage");
    }
}
