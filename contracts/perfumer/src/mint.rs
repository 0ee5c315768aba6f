use soroban_sdk::{contractclient, Address, Env};

/// The only capability the engine needs from the reward token.
///
/// The cologne token implements this surface with the perfumer as its
/// owner; any other token exposing a compatible `mint` works as well. A
/// failed mint (cap exceeded, caller not the owner) traps the invocation,
/// so the enclosing deposit/withdraw aborts atomically with no partial
/// payout or ledger update retained.
#[contractclient(name = "MintGatewayClient")]
pub trait MintGateway {
    /// Mint `amount` reward tokens to `to`.
    fn mint(env: Env, to: Address, amount: i128);
}
