//! Rate limiting for the authentication endpoints.
//!
//! Login and registration are throttled per client IP with the Governor
//! algorithm. The key is taken from `X-Forwarded-For`/`X-Real-IP` when a
//! proxy sets them and from the peer address otherwise.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RATE_LIMIT_ENABLED` | true | Turn throttling on or off |
//! | `RATE_LIMIT_AUTH_PER_SECOND` | 10 | Seconds to replenish one request |
//! | `RATE_LIMIT_AUTH_BURST_SIZE` | 5 | Requests allowed in a burst |

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::env::{flag_or, parsed_or};

/// Rate limit configuration for the API
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Replenish interval for auth endpoints, in seconds per request
    pub auth_per_second: u64,
    /// Burst size for auth endpoints
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: flag_or("RATE_LIMIT_ENABLED", defaults.enabled),
            auth_per_second: parsed_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: parsed_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Throttling disabled, used by tests that drive the router directly.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builds the Governor config for the auth endpoints.
    ///
    /// Returns `None` when throttling is disabled or the configured values are
    /// rejected by the builder (zero period or burst).
    pub fn auth_governor_config(
        &self,
    ) -> Option<GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_enabled() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.auth_burst_size, 5);
        assert!(config.auth_governor_config().is_some());
    }

    #[test]
    fn test_disabled_has_no_governor() {
        assert!(RateLimitConfig::disabled().auth_governor_config().is_none());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            enabled: true,
            auth_per_second: 1,
            auth_burst_size: 0,
        };
        assert!(config.auth_governor_config().is_none());
    }
}
