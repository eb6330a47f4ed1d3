//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `storymap_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("storymap_core ping={}", storymap_core::ping());
    println!("storymap_core version={}", storymap_core::core_version());

    match storymap_core::Catalogue::builtin() {
        Ok(catalogue) => {
            println!("storymap_core functions={}", catalogue.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("storymap_core catalogue load failed: {err}");
            ExitCode::FAILURE
        }
    }
}
