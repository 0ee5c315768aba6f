#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when new tokens are minted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintEvent {
    pub to: Address,
    pub amount: i128,
    pub new_total_supply: i128,
    pub sequence: u32,
}

/// Fired on every transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub sequence: u32,
}

/// Fired when the owner role moves to a new address.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub sequence: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_mint(env: &Env, to: Address, amount: i128, new_total_supply: i128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintEvent {
            to,
            amount,
            new_total_supply,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone(), to.clone()),
        TransferEvent {
            from,
            to,
            amount,
            sequence: env.ledger().sequence(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_XFER"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            sequence: env.ledger().sequence(),
        },
    );
}
