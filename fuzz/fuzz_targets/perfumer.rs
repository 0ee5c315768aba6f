#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use cologne_token::{CologneToken, CologneTokenClient};
use perfumer::{MasterPerfumer, MasterPerfumerClient};

const CLGN_PER_BLOCK: i128 = 500;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, pool: u8, amount: u16 },
    Withdraw { user: u8, pool: u8, amount: u16 },
    EmergencyWithdraw { user: u8, pool: u8 },
    Harvest { user: u8, pool: u8 },
    UpdatePool { pool: u8 },
    Reschedule { phase: u8, new_start: u16 },
    SetAllocPoint { pool: u8, alloc: u16 },
    AdvanceBlocks { delta: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let deployer = Address::generate(&env);
    let cologne_id = env.register(CologneToken, ());
    let cologne = CologneTokenClient::new(&env, &cologne_id);
    cologne.initialize(&deployer, &i128::MAX);

    let perfumer_id = env.register(MasterPerfumer, ());
    let client = MasterPerfumerClient::new(&env, &perfumer_id);

    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &cologne_id,
        &CLGN_PER_BLOCK,
        &46,
        &46,
        &56,
        &10,
        &100,
        &200,
        &300,
    );
    cologne.transfer_ownership(&perfumer_id);

    // Two pools, three funded users.
    let mut users = Vec::new();
    for _ in 0..3 {
        users.push(Address::generate(&env));
    }
    let mut lps = Vec::new();
    for _ in 0..2 {
        let sac = env.register_stellar_asset_contract_v2(Address::generate(&env));
        let lp_id = sac.address();
        let admin_client = StellarAssetClient::new(&env, &lp_id);
        for user in &users {
            admin_client.mint(user, &1_000_000i128);
        }
        lps.push(lp_id);
    }
    client.add_pool(&owner, &100, &lps[0], &true);
    client.add_pool(&owner, &100, &lps[1], &true);

    let mut sequence: u32 = 0;

    // Drive arbitrary operation sequences looking for panics and broken
    // accounting. Rejections (insufficient stake, bad schedule moves,
    // unknown pools) are expected and absorbed by try_ calls.
    for action in actions {
        match action {
            FuzzAction::Deposit { user, pool, amount } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_deposit(who, &(pool as u32), &(amount as i128));
            }
            FuzzAction::Withdraw { user, pool, amount } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_withdraw(who, &(pool as u32), &(amount as i128));
            }
            FuzzAction::EmergencyWithdraw { user, pool } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_emergency_withdraw(who, &(pool as u32));
            }
            FuzzAction::Harvest { user, pool } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_deposit(who, &(pool as u32), &0i128);
            }
            FuzzAction::UpdatePool { pool } => {
                let _ = client.try_update_pool(&(pool as u32));
            }
            FuzzAction::Reschedule { phase, new_start } => {
                let _ = client.try_set_start_block(&owner, &(phase as u32), &(new_start as u32));
            }
            FuzzAction::SetAllocPoint { pool, alloc } => {
                let _ = client.try_set_alloc_point(&owner, &(pool as u32), &(alloc as u32), &true);
            }
            FuzzAction::AdvanceBlocks { delta } => {
                sequence = sequence.saturating_add(delta as u32);
                env.ledger().set_sequence_number(sequence);
            }
        }

        // Custody invariant: every pool's recorded stakes sum to the
        // collateral the engine actually holds.
        for (pool_id, lp) in lps.iter().enumerate() {
            let held = TokenClient::new(&env, lp).balance(&perfumer_id);
            let recorded: i128 = users
                .iter()
                .map(|u| client.get_user_stake(&(pool_id as u32), u).amount)
                .sum();
            assert_eq!(held, recorded);

            // Pending rewards are non-negative for everyone.
            for user in &users {
                assert!(client.pending_cologne(&(pool_id as u32), user) >= 0);
            }
        }

        // Emission invariant: everything minted so far fits under what the
        // calendar has emitted up to the current block.
        let emitted_blocks = client.reward_eligible_blocks(&0, &sequence) as i128;
        assert!(cologne.total_supply() <= emitted_blocks * CLGN_PER_BLOCK);
    }
});
