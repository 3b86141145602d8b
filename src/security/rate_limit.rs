use std::num::NonZeroU32;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;

use crate::AppState;
use crate::error::AppError;

/// Global GCRA limiter.
///
/// Not keyed by client; one bucket guards the whole API.
#[derive(Debug)]
pub struct ApiRateLimiter {
    inner: DefaultDirectRateLimiter,
}

impl ApiRateLimiter {
    /// Replenish `rate_per_sec` cells per second, holding at most
    /// `burst_size`. Fractional rates are allowed.
    pub fn new(rate_per_sec: f32, burst_size: f32) -> Self {
        let burst = NonZeroU32::new(burst_size.max(1.0) as u32).unwrap_or(nonzero!(1u32));
        Self {
            inner: RateLimiter::direct(quota(rate_per_sec).allow_burst(burst)),
        }
    }

    /// Take one cell. Returns `false` when the limit is reached.
    pub fn check(&self) -> bool {
        self.inner.check().is_ok()
    }
}

fn quota(rate_per_sec: f32) -> Quota {
    if !(rate_per_sec.is_finite() && rate_per_sec > 0.0) {
        return Quota::per_second(nonzero!(1u32));
    }
    Duration::try_from_secs_f32(1.0 / rate_per_sec)
        .ok()
        .and_then(Quota::with_period)
        .unwrap_or_else(|| Quota::per_second(nonzero!(1u32)))
}

/// Reject requests with 429 once the bucket runs dry.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config.resilience.rate_limit_enabled && !state.rate_limiter.check() {
        tracing::warn!(
            name: "ratelimit.rejected",
            path = %req.uri().path(),
            "Rate limit exceeded"
        );
        return Err(AppError::RateLimited);
    }
    Ok(next.run(req).await)
}
