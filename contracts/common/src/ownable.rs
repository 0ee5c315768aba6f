use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");

// ── Core Functions ───────────────────────────────────────────────────────────

/// Records `owner` as the contract owner.
/// Only callable internally — callers must verify authorization beforehand.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Retrieves the current owner, if one has been set.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns true if an owner has been recorded.
pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&OWNER)
}

/// Returns true if `caller` is the recorded owner.
///
/// Callers are expected to have already invoked `caller.require_auth()`;
/// this helper only performs the identity comparison.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match owner(env) {
        Some(current) => current == *caller,
        None => false,
    }
}

/// Replaces the owner with `new_owner` if `current` matches the stored
/// owner. Returns false (and leaves storage untouched) otherwise.
///
/// Single-step by design: ownership is routinely handed to another
/// *contract* (the perfumer takes over the cologne token), and a contract
/// address cannot perform an accept-step.
pub fn transfer_owner(env: &Env, current: &Address, new_owner: &Address) -> bool {
    if !is_owner(env, current) {
        return false;
    }
    env.storage().instance().set(&OWNER, new_owner);
    true
}
