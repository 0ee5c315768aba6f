extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env,
};

use cologne_token::CologneToken;

use crate::{ContractError, MasterPerfumer, MasterPerfumerClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Deploys a perfumer with the standard calendar: phases of 46/46/56
/// blocks at 100/200/300, 10 blocks notice.
fn setup() -> (Env, MasterPerfumerClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let cologne_id = env.register(CologneToken, ());
    let perfumer_id = env.register(MasterPerfumer, ());
    let client = MasterPerfumerClient::new(&env, &perfumer_id);

    let owner = Address::generate(&env);
    client.initialize(
        &owner, &cologne_id, &500, &46, &46, &56, &10, &100, &200, &300,
    );

    (env, client, owner)
}

fn set_block(env: &Env, sequence: u32) {
    env.ledger().set_sequence_number(sequence);
}

// ── Initial schedule ──────────────────────────────────────────────────────────

#[test]
fn test_initial_schedule_state() {
    let (_env, client, _owner) = setup();

    let p1 = client.get_phase(&1);
    assert_eq!(p1.start_block, 100);
    assert_eq!(p1.duration_blocks, 46);

    let p2 = client.get_phase(&2);
    assert_eq!(p2.start_block, 200);
    assert_eq!(p2.duration_blocks, 46);

    let p3 = client.get_phase(&3);
    assert_eq!(p3.start_block, 300);
    assert_eq!(p3.duration_blocks, 56);
}

#[test]
fn test_initialize_rejects_overlapping_phases() {
    let env = Env::default();
    env.mock_all_auths();

    let cologne_id = env.register(CologneToken, ());
    let perfumer_id = env.register(MasterPerfumer, ());
    let client = MasterPerfumerClient::new(&env, &perfumer_id);

    let owner = Address::generate(&env);
    // Phase 1 would run [100, 146) but phase 2 starts at 120.
    let result = client.try_initialize(
        &owner, &cologne_id, &500, &46, &46, &56, &10, &100, &120, &300,
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert!(!client.is_initialized());
}

// ── Rescheduling ──────────────────────────────────────────────────────────────

#[test]
fn test_allows_phase_schedule_updates() {
    let (_env, client, owner) = setup();

    client.set_start_block(&owner, &1, &150);
    assert_eq!(client.get_phase(&1).start_block, 150);

    client.set_start_block(&owner, &3, &350);
    assert_eq!(client.get_phase(&3).start_block, 350);

    client.set_start_block(&owner, &2, &303);
    assert_eq!(client.get_phase(&2).start_block, 303);

    // Durations never change on a reschedule.
    assert_eq!(client.get_phase(&1).duration_blocks, 46);
    assert_eq!(client.get_phase(&2).duration_blocks, 46);
    assert_eq!(client.get_phase(&3).duration_blocks, 56);
}

#[test]
fn test_rejects_overlapping_phases() {
    let (_env, client, owner) = setup();

    // Phase 1 → 160 would end at 206, inside phase 2.
    let result = client.try_set_start_block(&owner, &1, &160);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ScheduleConflict),
        _ => unreachable!("Expected ScheduleConflict error"),
    }

    // Phase 3 → 240 would start inside phase 2.
    let result = client.try_set_start_block(&owner, &3, &240);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ScheduleConflict),
        _ => unreachable!("Expected ScheduleConflict error"),
    }

    // Phase 2 → 255 would end at 301, past phase 3's start.
    let result = client.try_set_start_block(&owner, &2, &255);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ScheduleConflict),
        _ => unreachable!("Expected ScheduleConflict error"),
    }

    // The original calendar is still in effect.
    assert_eq!(client.get_phase(&1).start_block, 100);
    assert_eq!(client.get_phase(&2).start_block, 200);
    assert_eq!(client.get_phase(&3).start_block, 300);
}

#[test]
fn test_rejects_out_of_order_phases() {
    let (_env, client, owner) = setup();

    // Phase 1 pushed after phase 2 entirely.
    let result = client.try_set_start_block(&owner, &1, &250);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ScheduleConflict),
        _ => unreachable!("Expected ScheduleConflict error"),
    }
    assert_eq!(client.get_phase(&1).start_block, 100);
}

#[test]
fn test_rejects_phases_in_the_past_or_too_soon() {
    let (env, client, owner) = setup();

    client.set_start_block(&owner, &1, &150);

    // At block 142 with 10 blocks notice, phase 1 (now at 150) is frozen.
    set_block(&env, 142);
    let result = client.try_set_start_block(&owner, &1, &140);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientNotice),
        _ => unreachable!("Expected InsufficientNotice error"),
    }
    let result = client.try_set_start_block(&owner, &1, &151);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientNotice),
        _ => unreachable!("Expected InsufficientNotice error"),
    }
    assert_eq!(client.get_phase(&1).start_block, 150);
}

#[test]
fn test_rejects_target_start_too_soon() {
    let (_env, client, owner) = setup();

    // Valid placement, but only 5 blocks away with 10 blocks notice.
    let result = client.try_set_start_block(&owner, &1, &5);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientNotice),
        _ => unreachable!("Expected InsufficientNotice error"),
    }
    assert_eq!(client.get_phase(&1).start_block, 100);
}

#[test]
fn test_invalid_phase_id() {
    let (_env, client, owner) = setup();

    for bad in [0u32, 4, 17] {
        let result = client.try_set_start_block(&owner, &bad, &500);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidPhase),
            _ => unreachable!("Expected InvalidPhase error"),
        }
    }
}

#[test]
fn test_reschedule_requires_owner() {
    let (env, client, _owner) = setup();

    let intruder = Address::generate(&env);
    let result = client.try_set_start_block(&intruder, &1, &150);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_phase(&1).start_block, 100);
}

// ── Eligible-block views ──────────────────────────────────────────────────────

#[test]
fn test_reward_eligible_blocks_view() {
    let (_env, client, _owner) = setup();

    assert_eq!(client.reward_eligible_blocks(&0, &100), 0);
    assert_eq!(client.reward_eligible_blocks(&100, &146), 46);
    assert_eq!(client.reward_eligible_blocks(&146, &200), 0);
    assert_eq!(client.reward_eligible_blocks(&0, &1_000), 46 + 46 + 56);
    // Inverted range degenerates to zero.
    assert_eq!(client.reward_eligible_blocks(&146, &100), 0);
}

#[test]
fn test_reschedule_shifts_accrual_window() {
    let (env, client, owner) = setup();

    // Move phase 1 from 100 to 150 before anyone stakes.
    client.set_start_block(&owner, &1, &150);

    assert_eq!(client.reward_eligible_blocks(&0, &146), 0);
    assert_eq!(client.reward_eligible_blocks(&150, &196), 46);

    set_block(&env, 196);
    assert_eq!(client.get_phase(&1).start_block, 150);
}
