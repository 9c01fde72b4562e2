//! Ledger clock and the time constants derived from it.

use soroban_sdk::Env;

/// How long a proposal accepts votes after creation (three days).
pub const EXPIRATION_PERIOD: u64 = 3 * 86_400;

/// Length of one dividend period.
pub const SECONDS_PER_WEEK: u64 = 7 * 86_400;

/// Current ledger timestamp in seconds.
pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// Deadline for a proposal created in the current ledger.
pub fn expiry_from_now(env: &Env) -> u64 {
    now(env).saturating_add(EXPIRATION_PERIOD)
}

/// Whole weeks elapsed since `since`; zero if `since` lies in the future.
pub fn weeks_since(env: &Env, since: u64) -> u64 {
    now(env).saturating_sub(since) / SECONDS_PER_WEEK
}
