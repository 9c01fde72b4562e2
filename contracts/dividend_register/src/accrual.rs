//! # Accrual / Eligibility
//!
//! Turns a grant's policy fields into an [`EligibilityCode`] and settles it
//! through the configured dividend token.
//!
//! A grant earns `usd_investment * weekly_percentage_bps / 10_000` per whole
//! week since `accrues_from` (the mint date, or the unlock time for a grant
//! minted locked, so locked weeks earn nothing). Weeks already settled are
//! tracked in `periods_paid`. The ROI cap then limits what is payable:
//!
//! | Cap          | Limit                                          |
//! |--------------|------------------------------------------------|
//! | `Iteration`  | at most `rates_left` more weekly payments      |
//! | `Horizontal` | at most `threshold - accrued` more in total    |
//! | `Vertical`   | each weekly payment capped at `threshold`      |
//!
//! [`compute_eligibility`] only reads storage, so calling it twice in the same
//! ledger yields the same code.

use soroban_sdk::{token, Address, Env};

use crate::clock;
use crate::events;
use crate::register;
use crate::storage;
use crate::types::{Eligibility, EligibilityCode, RegisterEntry, RoiCap};
use crate::Error;

pub const BPS_DENOMINATOR: i128 = 10_000;

/// Dividend owed for one full week, before caps.
pub fn weekly_amount(grant: &RegisterEntry) -> i128 {
    i128::from(grant.usd_investment) * i128::from(grant.weekly_percentage_bps) / BPS_DENOMINATOR
}

fn code(grant: &RegisterEntry, status: Eligibility, periods_due: u32, amount: i128) -> EligibilityCode {
    EligibilityCode {
        grant_id: grant.grant_id,
        status,
        periods_due,
        amount,
    }
}

/// Evaluate a grant as of the current ledger timestamp.
pub fn evaluate(env: &Env, grant: &RegisterEntry) -> EligibilityCode {
    if grant.locked {
        return code(grant, Eligibility::Locked, 0, 0);
    }

    let elapsed = u32::try_from(clock::weeks_since(env, grant.accrues_from)).unwrap_or(u32::MAX);
    let unpaid = elapsed.saturating_sub(grant.periods_paid);
    let weekly = weekly_amount(grant);

    let (periods, amount) = match grant.roi_target_cap {
        RoiCap::Iteration => {
            if grant.rates_left == 0 {
                return code(grant, Eligibility::Exhausted, 0, 0);
            }
            let periods = unpaid.min(grant.rates_left);
            (periods, i128::from(periods) * weekly)
        }
        RoiCap::Horizontal => {
            let remaining = grant.threshold - grant.accrued;
            if remaining <= 0 {
                return code(grant, Eligibility::Exhausted, 0, 0);
            }
            (unpaid, (i128::from(unpaid) * weekly).min(remaining))
        }
        RoiCap::Vertical => (unpaid, i128::from(unpaid) * weekly.min(grant.threshold)),
    };

    if periods == 0 || amount <= 0 {
        return code(grant, Eligibility::NotDue, 0, 0);
    }
    code(grant, Eligibility::Payable, periods, amount)
}

pub fn compute_eligibility(env: &Env, grant_id: u64) -> Result<EligibilityCode, Error> {
    let grant = register::get(env, grant_id)?;
    Ok(evaluate(env, &grant))
}

/// Pay the grant owner what is currently due and book it on the grant.
///
/// The transfer happens before any bookkeeping; a failed transfer returns
/// `TransferFailed` and the whole invocation is rolled back.
pub fn deliver(env: &Env, grant_id: u64) -> Result<i128, Error> {
    let token_address = storage::get_dividend_token(env).ok_or(Error::TokenNotSet)?;
    let mut grant = register::get(env, grant_id)?;

    let due = evaluate(env, &grant);
    if due.status != Eligibility::Payable {
        return Err(Error::NotEligible);
    }

    let token_client = token::Client::new(env, &token_address);
    match token_client.try_transfer(&env.current_contract_address(), &grant.account, &due.amount) {
        Ok(Ok(())) => {}
        _ => return Err(Error::TransferFailed),
    }

    grant.accrued += due.amount;
    grant.rates_left = grant.rates_left.saturating_sub(due.periods_due);
    grant.periods_paid += due.periods_due;
    storage::save_grant(env, &grant);

    events::emit_paid(env, &grant, due.amount, due.periods_due);
    Ok(due.amount)
}

/// Sum of everything currently payable across the grants of `owner`.
pub fn owed_total(env: &Env, owner: &Address) -> i128 {
    register::find_by_owner(env, owner)
        .map(|grant| evaluate(env, &grant))
        .filter(|due| due.status == Eligibility::Payable)
        .map(|due| due.amount)
        .sum()
}
