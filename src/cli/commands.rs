use crate::config::{ResolverConfig, ScopePolicy};
use crate::error::SecurityError;
use crate::linter::{has_errors, lint_spec, print_lint_issues, LintSeverity};
use crate::logging::LogConfig;
use crate::security::{resolve_document_security, resolve_operation_security_with};
use crate::spec::{load_document, HttpMethod};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for brrtsec
///
/// Resolves and checks the security requirements declared in an OpenAPI
/// document.
#[derive(Parser)]
#[command(name = "brrtsec")]
#[command(about = "OpenAPI operation security resolver", long_about = None)]
#[command(version)]
pub struct Cli {
    /// How requested OAuth2 scopes are checked against declared flows (overrides BRRTSEC_SCOPE_POLICY)
    #[arg(long, global = true, value_enum)]
    pub scope_policy: Option<ScopePolicy>,

    /// Debug-level pretty logs with source locations
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolver settings from the environment, overridden by `--scope-policy`
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        let config = ResolverConfig::from_env();
        match self.scope_policy {
            Some(policy) => config.with_scope_policy(policy),
            None => config,
        }
    }

    /// Logging settings: `--verbose` replaces the `BRRTSEC_LOG_*` variables
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        if self.verbose {
            LogConfig::default_dev()
        } else {
            LogConfig::from_env()
        }
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the security of a single operation
    ///
    /// Prints the resolved security as JSON, or `null` when the path or
    /// method is not declared.
    Resolve {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Path template exactly as declared (e.g. /pets/{id})
        #[arg(short, long)]
        path: String,

        /// HTTP method (case-insensitive)
        #[arg(short, long)]
        method: String,

        /// Print single-line JSON
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Resolve the security of every operation in a specification
    Inspect {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Print single-line JSON
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Lint the security declarations of an OpenAPI specification
    ///
    /// Reports references the resolver would silently drop:
    /// - undeclared schemes and missing securitySchemes
    /// - invalid or unsupported scheme declarations
    /// - OAuth2 scopes no usable flow declares
    /// - malformed flow URLs and unused schemes
    /// - apiKey schemes carried outside query, header and cookie
    Lint {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

/// Run a parsed command line
///
/// # Errors
///
/// Fails when the document cannot be loaded, the method is not an HTTP verb,
/// the document is structurally unusable, or `lint --fail-on-error` found
/// errors.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolver_config();

    match &cli.command {
        Commands::Resolve {
            spec,
            path,
            method,
            compact,
        } => {
            let method = parse_method(method)?;
            let document = load_document(spec)?;
            let resolved =
                match resolve_operation_security_with(&document, path, method, &config) {
                    Ok(security) => Some(security),
                    Err(err) if err.is_not_found() => {
                        info!(path = %path, method = %method, "{err}");
                        None
                    }
                    Err(err) => {
                        return Err(err).with_context(|| format!("resolving {method} {path}"))
                    }
                };
            println!("{}", render_json(&resolved, *compact)?);
            Ok(())
        }
        Commands::Inspect { spec, compact } => {
            let document = load_document(spec)?;
            let entries = resolve_document_security(&document, &config)
                .with_context(|| format!("inspecting {}", spec.display()))?;
            println!("{}", render_json(&entries, *compact)?);
            Ok(())
        }
        Commands::Lint {
            spec,
            fail_on_error,
            errors_only,
        } => {
            let mut issues = lint_spec(spec, config.scope_policy)?;
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);

            if *fail_on_error && has_errors(&issues) {
                anyhow::bail!("security lint found errors in {}", spec.display());
            }
            Ok(())
        }
    }
}

/// Parse a `--method` token through `http::Method`, then map it onto an
/// OpenAPI path item verb
pub(crate) fn parse_method(token: &str) -> Result<HttpMethod, SecurityError> {
    match http::Method::from_bytes(token.as_bytes()) {
        Ok(method) => HttpMethod::try_from(&method),
        Err(_) => token.parse(),
    }
}

/// Serialize `value` as pretty or single-line JSON
pub(crate) fn render_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
