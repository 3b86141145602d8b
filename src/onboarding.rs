//! Onboarding status.
//!
//! A single enumerated status replaces the two legacy boolean flags
//! (`careerwise_needs_onboarding` and `careerwise_onboarding_completed`).
//! The legacy cookies are still read so older browsers reconcile to one
//! state, and are removed whenever the status is written.

use std::fmt;
use std::str::FromStr;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

/// Cookie holding the current status.
pub const STATUS_COOKIE: &str = "careerwise_onboarding";
/// Legacy flag: onboarding was finished.
pub const LEGACY_COMPLETED_COOKIE: &str = "careerwise_onboarding_completed";
/// Legacy flag: onboarding is required.
pub const LEGACY_NEEDS_COOKIE: &str = "careerwise_needs_onboarding";

/// Where a user is in the onboarding flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    /// Nothing asked of the user.
    #[default]
    NotRequired,
    /// The user must finish onboarding before using the dashboard.
    Pending,
    /// Onboarding is done.
    Completed,
}

impl OnboardingStatus {
    /// Reconcile the two legacy flags. Completion wins over everything.
    #[must_use]
    pub fn from_legacy_flags(needs_onboarding: bool, completed: bool) -> Self {
        if completed {
            Self::Completed
        } else if needs_onboarding {
            Self::Pending
        } else {
            Self::NotRequired
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotRequired => "not_required",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Read the status from request cookies, falling back to the legacy flags.
    #[must_use]
    pub fn from_jar(jar: &CookieJar) -> Self {
        if let Some(status) = jar
            .get(STATUS_COOKIE)
            .and_then(|c| c.value().parse::<Self>().ok())
        {
            return status;
        }

        let flag = |name: &str| jar.get(name).is_some_and(|c| c.value() == "true");
        Self::from_legacy_flags(flag(LEGACY_NEEDS_COOKIE), flag(LEGACY_COMPLETED_COOKIE))
    }

    /// Store the status and drop the legacy flags.
    #[must_use]
    pub fn write_to(self, jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((STATUS_COOKIE, self.as_str()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        jar.add(cookie)
            .remove(Cookie::build(LEGACY_NEEDS_COOKIE).path("/"))
            .remove(Cookie::build(LEGACY_COMPLETED_COOKIE).path("/"))
    }
}

impl fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "not_required" => Ok(Self::NotRequired),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown onboarding status: {other}")),
        }
    }
}
