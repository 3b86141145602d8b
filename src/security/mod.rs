//! Request identity and rate limiting.

pub mod claims;
pub mod middleware;
pub mod rate_limit;

pub use claims::{DEMO_USER_ID, UserClaims, UserContext};
pub use middleware::{auth_middleware, optional_auth_middleware};
pub use rate_limit::{ApiRateLimiter, rate_limit_middleware};
