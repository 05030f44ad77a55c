//! goci - Go CI pipelines as container plans
//!
//! Resolves the containers that build, test and lint a Go project and prints
//! them for an external container engine to run.
//!
//! ## Quick Start
//!
//! ```bash
//! # Plan `go test` with the race detector on Go 1.21
//! goci test --race --go-version 1.21
//!
//! # Plan golangci-lint as JSON
//! goci lint --linter-version v1.55.2 --format json
//!
//! # Generate shell completions
//! goci completions bash > /etc/bash_completion.d/goci
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    // Debug logging before the configuration is read
    if std::env::var("GOCI_DEBUG").is_ok() {
        goci::infrastructure::init_logging("debug");
    }

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("GOCI_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
