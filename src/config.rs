//! # Resolver Configuration Module
//!
//! Environment variable-based configuration for the resolver.
//!
//! ## Environment Variables
//!
//! ### `BRRTSEC_SCOPE_POLICY`
//!
//! Chooses the scope catalog that requested OAuth2 scopes are validated against:
//! - `first` (default): scopes of the first usable flow, in the order
//!   implicit → password → clientCredentials → authorizationCode
//! - `union`: scopes of every usable flow
//!
//! Unknown values fall back to `first`.
//!
//! ## Usage
//!
//! ```rust
//! use brrtsec::config::{ResolverConfig, ScopePolicy};
//!
//! let config = ResolverConfig::from_env();
//! println!("Scope policy: {}", config.scope_policy);
//! ```

use std::env;

/// How requested OAuth2 scopes are validated against declared flows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ScopePolicy {
    /// Only the first usable flow's scopes count
    #[default]
    #[value(name = "first")]
    FirstPresent,
    /// Scopes of all usable flows count
    Union,
}

impl ScopePolicy {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "union" => ScopePolicy::Union,
            _ => ScopePolicy::FirstPresent,
        }
    }
}

impl std::fmt::Display for ScopePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopePolicy::FirstPresent => write!(f, "first"),
            ScopePolicy::Union => write!(f, "union"),
        }
    }
}

/// Resolver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub scope_policy: ScopePolicy,
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let scope_policy = match env::var("BRRTSEC_SCOPE_POLICY") {
            Ok(val) => ScopePolicy::parse(&val),
            Err(_) => ScopePolicy::default(),
        };
        ResolverConfig { scope_policy }
    }

    #[must_use]
    pub fn with_scope_policy(mut self, scope_policy: ScopePolicy) -> Self {
        self.scope_policy = scope_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_policy_parse() {
        assert_eq!(ScopePolicy::parse("union"), ScopePolicy::Union);
        assert_eq!(ScopePolicy::parse(" UNION "), ScopePolicy::Union);
        assert_eq!(ScopePolicy::parse("first"), ScopePolicy::FirstPresent);
        assert_eq!(ScopePolicy::parse("bogus"), ScopePolicy::FirstPresent);
    }

    #[test]
    fn test_default_is_first_present() {
        assert_eq!(
            ResolverConfig::default().scope_policy,
            ScopePolicy::FirstPresent
        );
        assert_eq!(ScopePolicy::FirstPresent.to_string(), "first");
    }

    #[test]
    fn test_with_scope_policy() {
        let config = ResolverConfig::default().with_scope_policy(ScopePolicy::Union);
        assert_eq!(config.scope_policy, ScopePolicy::Union);
    }
}
