#![no_std]

pub mod events;

use common::ownable;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const CAP: Symbol = symbol_short!("CAP");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

// Per-holder persistent storage uses tuple keys: (prefix, holder_address)
const BALANCE: Symbol = symbol_short!("BAL");

const BALANCE_TTL_THRESHOLD: u32 = 5184000;
const BALANCE_TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TokenError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    CapExceeded = 6,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Hard-capped, owner-mintable fungible token.
///
/// The owner is the only address allowed to mint; after deployment the
/// owner role is handed to the perfumer contract, which from then on is the
/// sole emission path. Total supply can never exceed the cap fixed at
/// initialization.
#[contract]
pub struct CologneToken;

#[contractimpl]
impl CologneToken {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the token.
    ///
    /// * `owner` – the address allowed to mint (later transferred to the
    ///   perfumer contract).
    /// * `cap`   – hard cap on total supply, immutable afterwards.
    pub fn initialize(env: Env, owner: Address, cap: i128) -> Result<(), TokenError> {
        if ownable::has_owner(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        if cap <= 0 {
            return Err(TokenError::InvalidInput);
        }

        ownable::set_owner(&env, &owner);
        env.storage().instance().set(&CAP, &cap);
        env.storage().instance().set(&SUPPLY, &0i128);

        Ok(())
    }

    // ── Minting ─────────────────────────────────────────────────────────────

    /// Mint `amount` new tokens to `to`.
    ///
    /// Only the owner may mint, and the resulting supply must stay within
    /// the cap. Fails with `CapExceeded` otherwise, leaving supply and
    /// balances untouched.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let owner = ownable::owner(&env).ok_or(TokenError::NotInitialized)?;
        owner.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidInput);
        }

        let cap: i128 = env
            .storage()
            .instance()
            .get(&CAP)
            .ok_or(TokenError::NotInitialized)?;
        let supply: i128 = env.storage().instance().get(&SUPPLY).unwrap_or(0);

        let new_supply = supply.checked_add(amount).ok_or(TokenError::CapExceeded)?;
        if new_supply > cap {
            return Err(TokenError::CapExceeded);
        }

        env.storage().instance().set(&SUPPLY, &new_supply);
        Self::credit(&env, &to, amount);

        events::publish_mint(&env, to, amount, new_supply);

        Ok(())
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    /// Move `amount` tokens from `from` to `to`.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        from.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidInput);
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        Self::set_balance(&env, &from, from_balance - amount);
        Self::credit(&env, &to, amount);

        events::publish_transfer(&env, from, to, amount);

        Ok(())
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    /// Hand the owner role (and with it the mint capability) to `new_owner`.
    ///
    /// Single-step so that ownership can be given to a contract address,
    /// which is exactly what happens when the perfumer takes over emission.
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), TokenError> {
        let current = ownable::owner(&env).ok_or(TokenError::NotInitialized)?;
        current.require_auth();

        ownable::set_owner(&env, &new_owner);

        events::publish_ownership_transferred(&env, current, new_owner);

        Ok(())
    }

    /// Return the current owner.
    pub fn owner(env: Env) -> Result<Address, TokenError> {
        ownable::owner(&env).ok_or(TokenError::NotInitialized)
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        let key = (BALANCE, id);
        match env.storage().persistent().get(&key) {
            Some(balance) => {
                env.storage().persistent().extend_ttl(
                    &key,
                    BALANCE_TTL_THRESHOLD,
                    BALANCE_TTL_EXTEND_TO,
                );
                balance
            }
            None => 0,
        }
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&SUPPLY).unwrap_or(0)
    }

    pub fn cap(env: Env) -> Result<i128, TokenError> {
        env.storage()
            .instance()
            .get(&CAP)
            .ok_or(TokenError::NotInitialized)
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, "CologneToken")
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, "CLGN")
    }

    pub fn decimals(_env: Env) -> u32 {
        7
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn credit(env: &Env, to: &Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        // Supply is capped well below i128::MAX, so this cannot overflow.
        Self::set_balance(env, to, balance + amount);
    }

    fn set_balance(env: &Env, id: &Address, amount: i128) {
        let key = (BALANCE, id.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
