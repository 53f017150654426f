//! # CLI Module
//!
//! Command-line front end for the resolver and the security linter, shipped as
//! the `brrtsec` binary.
//!
//! ## Commands
//!
//! ### `resolve`
//!
//! Resolve the security of one operation:
//!
//! ```bash
//! brrtsec resolve --spec openapi.yaml --path /pets --method get
//! ```
//!
//! Prints the resolved security as JSON, or `null` when the operation is not
//! declared.
//!
//! ### `inspect`
//!
//! Resolve every operation in document order:
//!
//! ```bash
//! brrtsec inspect --spec openapi.yaml --compact
//! ```
//!
//! ### `lint`
//!
//! Report scheme references the resolver would silently drop:
//!
//! ```bash
//! brrtsec lint --spec openapi.yaml --fail-on-error
//! ```
//!
//! ## Global Options
//!
//! - `--scope-policy <first|union>` - scope catalog used for OAuth2 schemes;
//!   overrides `BRRTSEC_SCOPE_POLICY` (unknown values there fall back to `first`)
//! - `-v, --verbose` - debug-level logs with source locations
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use brrtsec::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! ```
//!
//! JSON goes to stdout, logs to stderr, and any failure makes the binary exit
//! with status 1.

mod commands;


pub use commands::{run_cli, Cli, Commands};
