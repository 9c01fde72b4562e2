//! Front-end diagnostics: a numbered log of status codes for the current
//! proposal cycle. Creating a proposal truncates it.

use soroban_sdk::{Env, Vec};

use crate::events;
use crate::storage;
use crate::types::{StatusCode, StatusMessage};

/// Append `code` to the log and return the key it was stored under.
pub fn emit(env: &Env, code: StatusCode) -> u64 {
    let mut log = storage::load_status_log(env);
    let key = u64::from(log.len()) + 1;
    log.push_back(StatusMessage {
        key,
        code: code as u32,
    });
    storage::save_status_log(env, &log);
    events::emit_status(env, code as u32, key);
    key
}

pub fn clear_all(env: &Env) {
    storage::remove_status_log(env);
}

pub fn messages(env: &Env) -> Vec<StatusMessage> {
    storage::load_status_log(env)
}
