//! # Time Window
//!
//! The single notion of "now" for a presentation. It is captured once, before
//! any other step runs, and threaded through every component so that `iat`,
//! `nbf`, `exp`, `issuanceDate` and `expirationDate` all describe the same
//! instants.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};

/// How long a presentation remains valid after issuance, in seconds.
pub const VALIDITY_SECS: i64 = 30;

/// Issuance and expiry instants of a presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TimeWindow {
    /// Capture the window from the current wall clock.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Create a window starting at `instant`.
    ///
    /// Sub-second precision is dropped so the epoch-second and ISO-8601 forms
    /// stay interchangeable.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        let issued_at = instant.trunc_subsecs(0);
        Self {
            issued_at,
            expires_at: issued_at + TimeDelta::seconds(VALIDITY_SECS),
        }
    }

    /// Issuance instant.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Issuance as Unix epoch seconds, for JWT claims.
    #[must_use]
    pub fn iat(&self) -> i64 {
        self.issued_at.timestamp()
    }

    /// Expiry as Unix epoch seconds, for JWT claims.
    #[must_use]
    pub fn exp(&self) -> i64 {
        self.expires_at.timestamp()
    }
}

/// Render epoch seconds as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub(crate) fn iso8601(epoch: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
