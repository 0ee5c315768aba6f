#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub cologne_token: Address,
    pub cologne_per_block: i128,
    pub sequence: u32,
}

/// Fired when a new collateral pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub collateral_token: Address,
    pub alloc_point: u32,
    pub sequence: u32,
}

/// Fired when a pool's emission weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocPointSetEvent {
    pub pool_id: u32,
    pub alloc_point: u32,
    pub sequence: u32,
}

/// Fired when a phase is moved to a new start block.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleEvent {
    pub phase_id: u32,
    pub new_start_block: u32,
    pub sequence: u32,
}

/// Fired when a participant deposits collateral.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub pool_id: u32,
    pub who: Address,
    pub amount: i128,
    pub sequence: u32,
}

/// Fired when a participant withdraws collateral.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub pool_id: u32,
    pub who: Address,
    pub amount: i128,
    pub sequence: u32,
}

/// Fired when a participant abandons pending rewards to recover collateral.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub pool_id: u32,
    pub who: Address,
    pub amount: i128,
    pub sequence: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    cologne_token: Address,
    cologne_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            cologne_token,
            cologne_per_block,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(env: &Env, pool_id: u32, collateral_token: Address, alloc_point: u32) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            collateral_token,
            alloc_point,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_alloc_point_set(env: &Env, pool_id: u32, alloc_point: u32) {
    env.events().publish(
        (symbol_short!("ALLOC_SET"), pool_id),
        AllocPointSetEvent {
            pool_id,
            alloc_point,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_schedule(env: &Env, phase_id: u32, new_start_block: u32) {
    env.events().publish(
        (symbol_short!("SCHEDULE"), phase_id),
        ScheduleEvent {
            phase_id,
            new_start_block,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(env: &Env, pool_id: u32, who: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), who.clone()),
        DepositEvent {
            pool_id,
            who,
            amount,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, pool_id: u32, who: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), who.clone()),
        WithdrawEvent {
            pool_id,
            who,
            amount,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, pool_id: u32, who: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), who.clone()),
        EmergencyWithdrawEvent {
            pool_id,
            who,
            amount,
            sequence: env.ledger().sequence(),
        },
    );
}
