//! # Spaced CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/spacedapp/`: UI-agnostic review engine (scheduling, mastery, storage)
//! - `crates/spaced/`: this CLI, one client of the `spacedapp` API
//!
//! Everything from `spacedapp::api` inward takes plain Rust values and
//! returns `Result`s. The CLI owns argument parsing, context wiring,
//! rendering, logging setup and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
