//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Bearer session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Lifetime of issued bearer tokens, in hours
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub session_ttl_hours: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}
