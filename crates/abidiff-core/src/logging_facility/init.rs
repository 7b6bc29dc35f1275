//! Global subscriber setup

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// How log events are rendered on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug level
    Development,
    /// One JSON object per event for the driving build tool, info level
    Production,
}

impl Profile {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "abidiff=debug",
            Profile::Production => "abidiff=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. Later calls, or a subscriber installed
/// elsewhere first, leave the existing one in place.
///
/// Logs always go to stderr so stdout stays a clean change-set document.
///
/// ```
/// use abidiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        let installed = match profile {
            Profile::Development => builder.try_init(),
            Profile::Production => builder.json().with_current_span(true).try_init(),
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Production);
        init(Profile::Development);
    }

    #[test]
    fn test_directives_cover_all_abidiff_crates() {
        for profile in [Profile::Development, Profile::Production] {
            assert!(profile.default_directive().starts_with("abidiff="));
        }
    }
}
