#![no_std]

pub mod accrual;
pub mod events;
pub mod mint;
pub mod schedule;

use common::ownable;
use mint::MintGatewayClient;
use schedule::{Phase, RescheduleError, PHASE_COUNT};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CLGN_TOKEN: Symbol = symbol_short!("CLGN_TOK");
const RATE: Symbol = symbol_short!("RATE");
const MIN_NOTICE: Symbol = symbol_short!("NOTICE");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALOC");

// Phase windows are global configuration: (prefix, phase_id 1..=3)
const PHASE: Symbol = symbol_short!("PHASE");

// Per-pool and per-user persistent storage uses tuple keys:
//   (POOL, pool_id)           → Pool
//   (USER, pool_id, address)  → UserStake
//   (REG_TOK, token_address)  → bool, duplicate-collateral guard
const POOL: Symbol = symbol_short!("POOL");
const USER: Symbol = symbol_short!("USER");
const REGISTERED: Symbol = symbol_short!("REG_TOK");

const RECORD_TTL_THRESHOLD: u32 = 5184000;
const RECORD_TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    DuplicateToken = 5,
    PoolNotFound = 6,
    InvalidPhase = 7,
    InsufficientStake = 8,
    ScheduleConflict = 9,
    InsufficientNotice = 10,
    Overflow = 11,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// One weighted staking bucket for a single collateral token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Identity of the staked collateral. Immutable once added, unique
    /// across all pools.
    pub collateral_token: Address,
    /// Share of global emission, proportional to
    /// `alloc_point / total_alloc_point`.
    pub alloc_point: u32,
    /// High-water mark of accrual: the last ledger sequence up to which
    /// this pool's accumulator has been advanced.
    pub last_reward_block: u32,
    /// Cumulative reward owed per unit of staked collateral, scaled by
    /// `accrual::PRECISION`. Monotonically non-decreasing.
    pub acc_cologne_per_share: i128,
}

/// One participant's position in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub amount: i128,
    /// Accumulator value already settled at the last checkpoint.
    pub reward_debt: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Distributes a fixed-supply reward token across weighted collateral
/// pools according to a three-phase, block-scheduled emission calendar.
///
/// Accrual is lazy: each pool's per-share accumulator only advances when
/// someone interacts with the pool, and every mutating entry point runs
/// that update first. The result is independent of who calls and in what
/// order, because accrued reward depends only on elapsed eligible blocks
/// and pool weight.
#[contract]
pub struct MasterPerfumer;

#[contractimpl]
impl MasterPerfumer {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the engine.
    ///
    /// * `owner`             – capability for pool registration, weight
    ///   changes, and rescheduling.
    /// * `cologne_token`     – reward token; this contract must be (or
    ///   become) its owner so payouts can mint.
    /// * `cologne_per_block` – global emission rate, fixed for life.
    /// * phase durations/starts – the three emission windows, strictly
    ///   ordered and non-overlapping.
    /// * `min_notice_blocks` – lead time required before any reschedule.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        cologne_token: Address,
        cologne_per_block: i128,
        phase1_duration: u32,
        phase2_duration: u32,
        phase3_duration: u32,
        min_notice_blocks: u32,
        phase1_start: u32,
        phase2_start: u32,
        phase3_start: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if cologne_per_block < 0 {
            return Err(ContractError::InvalidInput);
        }

        let phases = [
            Phase { start_block: phase1_start, duration_blocks: phase1_duration },
            Phase { start_block: phase2_start, duration_blocks: phase2_duration },
            Phase { start_block: phase3_start, duration_blocks: phase3_duration },
        ];
        if !schedule::strictly_ordered(&phases) {
            return Err(ContractError::InvalidInput);
        }

        ownable::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&CLGN_TOKEN, &cologne_token);
        env.storage().instance().set(&RATE, &cologne_per_block);
        env.storage().instance().set(&MIN_NOTICE, &min_notice_blocks);
        for (i, phase) in phases.iter().enumerate() {
            env.storage().instance().set(&(PHASE, i as u32 + 1), phase);
        }
        // POOL_COUNT and TOTAL_ALLOC start at zero; unwrap_or(0) handles
        // absent keys, so no explicit init needed.

        events::publish_initialized(&env, owner, cologne_token, cologne_per_block);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a new collateral pool with weight `alloc_point`.
    ///
    /// Each collateral token may back at most one pool. With `with_update`
    /// every existing pool is accrued first, so the weight redistribution
    /// caused by the new pool cannot touch already-settled history.
    pub fn add_pool(
        env: Env,
        caller: Address,
        alloc_point: u32,
        collateral_token: Address,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let registered_key = (REGISTERED, collateral_token.clone());
        if env.storage().persistent().has(&registered_key) {
            return Err(ContractError::DuplicateToken);
        }

        if with_update {
            Self::accrue_all_pools(&env)?;
        }

        let pool_id: u32 = env.storage().instance().get(&POOL_COUNT).unwrap_or(0);
        let pool = Pool {
            collateral_token: collateral_token.clone(),
            alloc_point,
            last_reward_block: env.ledger().sequence(),
            acc_cologne_per_share: 0,
        };
        Self::write_pool(&env, pool_id, &pool);
        env.storage().persistent().set(&registered_key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&registered_key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND_TO);

        let total_alloc: u32 = env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0);
        let new_total = total_alloc
            .checked_add(alloc_point)
            .ok_or(ContractError::Overflow)?;
        env.storage().instance().set(&TOTAL_ALLOC, &new_total);
        env.storage().instance().set(&POOL_COUNT, &(pool_id + 1));

        events::publish_pool_added(&env, pool_id, collateral_token, alloc_point);

        Ok(pool_id)
    }

    /// Change a pool's emission weight. Affects only future accrual —
    /// with `with_update`, all pools are brought current at the old
    /// weights first.
    pub fn set_alloc_point(
        env: Env,
        caller: Address,
        pool_id: u32,
        alloc_point: u32,
        with_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut pool = Self::read_pool(&env, pool_id)?;

        if with_update {
            Self::accrue_all_pools(&env)?;
            pool = Self::read_pool(&env, pool_id)?;
        }

        let total_alloc: u32 = env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0);
        let new_total = total_alloc
            .checked_sub(pool.alloc_point)
            .and_then(|t| t.checked_add(alloc_point))
            .ok_or(ContractError::Overflow)?;
        env.storage().instance().set(&TOTAL_ALLOC, &new_total);

        pool.alloc_point = alloc_point;
        Self::write_pool(&env, pool_id, &pool);

        events::publish_alloc_point_set(&env, pool_id, alloc_point);

        Ok(())
    }

    // ── Phase scheduling ────────────────────────────────────────────────────

    /// Move phase `phase_id` (1-based) to `new_start`.
    ///
    /// Rejected with `ScheduleConflict` if the move would overlap or
    /// reorder the windows, and with `InsufficientNotice` if the phase's
    /// current start is less than the notice period away or the new start
    /// is too soon. Any rejection leaves the schedule unmodified.
    pub fn set_start_block(
        env: Env,
        caller: Address,
        phase_id: u32,
        new_start: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if phase_id < 1 || phase_id > PHASE_COUNT {
            return Err(ContractError::InvalidPhase);
        }

        let phases = Self::read_phases(&env)?;
        let notice: u32 = env.storage().instance().get(&MIN_NOTICE).unwrap_or(0);

        schedule::validate_reschedule(&phases, phase_id, new_start, env.ledger().sequence(), notice)
            .map_err(|e| match e {
                RescheduleError::Conflict => ContractError::ScheduleConflict,
                RescheduleError::ShortNotice => ContractError::InsufficientNotice,
            })?;

        let mut phase = phases[(phase_id - 1) as usize].clone();
        phase.start_block = new_start;
        env.storage().instance().set(&(PHASE, phase_id), &phase);

        events::publish_schedule(&env, phase_id, new_start);

        Ok(())
    }

    // ── Reward accrual ──────────────────────────────────────────────────────

    /// Bring one pool's accumulator up to the current ledger sequence.
    ///
    /// Public and idempotent: calling it twice at the same sequence is a
    /// no-op the second time, and anyone may pay the gas.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::accrue_pool(&env, pool_id)?;
        Ok(())
    }

    /// Accrue every registered pool. Potentially unbounded in pool count;
    /// intended for weight changes where settled history must be pinned.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::accrue_all_pools(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` collateral into `pool_id`.
    ///
    /// Any reward pending from an earlier stake is minted out first, so
    /// the new deposit cannot dilute it. `deposit(0)` is the harvest
    /// idiom: it pays pending reward without moving collateral.
    pub fn deposit(
        env: Env,
        who: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        who.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        // 1. Accrue, then settle the position at the fresh accumulator.
        let pool = Self::accrue_pool(&env, pool_id)?;
        let mut stake = Self::read_user(&env, pool_id, &who);

        let pending = accrual::pending(stake.amount, pool.acc_cologne_per_share, stake.reward_debt)
            .ok_or(ContractError::Overflow)?;

        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        stake.reward_debt = accrual::checkpoint(stake.amount, pool.acc_cologne_per_share)
            .ok_or(ContractError::Overflow)?;
        Self::write_user(&env, pool_id, &who, &stake);

        // 2. All ledger state is final; only now touch other contracts.
        if pending > 0 {
            Self::mint_reward(&env, &who, pending)?;
        }
        if amount > 0 {
            token::Client::new(&env, &pool.collateral_token).transfer(
                &who,
                &env.current_contract_address(),
                &amount,
            );
        }

        events::publish_deposit(&env, pool_id, who, amount);

        Ok(())
    }

    /// Withdraw `amount` collateral from `pool_id`, paying out pending
    /// reward along the way. Fails with `InsufficientStake` if `amount`
    /// exceeds the recorded stake, before anything moves.
    pub fn withdraw(
        env: Env,
        who: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        who.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let pool = Self::accrue_pool(&env, pool_id)?;
        let mut stake = Self::read_user(&env, pool_id, &who);

        if amount > stake.amount {
            return Err(ContractError::InsufficientStake);
        }

        let pending = accrual::pending(stake.amount, pool.acc_cologne_per_share, stake.reward_debt)
            .ok_or(ContractError::Overflow)?;

        stake.amount -= amount;
        stake.reward_debt = accrual::checkpoint(stake.amount, pool.acc_cologne_per_share)
            .ok_or(ContractError::Overflow)?;
        Self::write_user(&env, pool_id, &who, &stake);

        if pending > 0 {
            Self::mint_reward(&env, &who, pending)?;
        }
        if amount > 0 {
            token::Client::new(&env, &pool.collateral_token).transfer(
                &env.current_contract_address(),
                &who,
                &amount,
            );
        }

        events::publish_withdraw(&env, pool_id, who, amount);

        Ok(())
    }

    /// Return the full staked amount and forfeit all pending reward.
    ///
    /// Deliberately skips accrual and never touches the mint path — this
    /// is the escape hatch for recovering collateral when the reward
    /// side is broken.
    pub fn emergency_withdraw(env: Env, who: Address, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        who.require_auth();

        let pool = Self::read_pool(&env, pool_id)?;
        let stake = Self::read_user(&env, pool_id, &who);

        let amount = stake.amount;
        Self::write_user(&env, pool_id, &who, &UserStake { amount: 0, reward_debt: 0 });

        if amount > 0 {
            token::Client::new(&env, &pool.collateral_token).transfer(
                &env.current_contract_address(),
                &who,
                &amount,
            );
        }

        events::publish_emergency_withdraw(&env, pool_id, who, amount);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Reward owed to `who` in `pool_id` right now, without mutating
    /// anything. Simulates the accumulator update a mutating call would
    /// perform, so the value matches what deposit/withdraw would pay.
    pub fn pending_cologne(env: Env, pool_id: u32, who: Address) -> Result<i128, ContractError> {
        let pool = Self::read_pool(&env, pool_id)?;
        let stake = Self::read_user(&env, pool_id, &who);

        let mut acc = pool.acc_cologne_per_share;
        let current = env.ledger().sequence();
        let staked = Self::pool_collateral_balance(&env, &pool);
        let total_alloc: u32 = env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0);

        if current > pool.last_reward_block && staked > 0 && total_alloc > 0 {
            let phases = Self::read_phases(&env)?;
            let blocks =
                schedule::reward_eligible_blocks(&phases, pool.last_reward_block, current);
            let rate: i128 = env.storage().instance().get(&RATE).unwrap_or(0);
            let reward = accrual::pool_reward(blocks, rate, pool.alloc_point, total_alloc)
                .ok_or(ContractError::Overflow)?;
            let delta =
                accrual::acc_per_share_delta(reward, staked).ok_or(ContractError::Overflow)?;
            acc = acc.checked_add(delta).ok_or(ContractError::Overflow)?;
        }

        accrual::pending(stake.amount, acc, stake.reward_debt).ok_or(ContractError::Overflow)
    }

    /// Count of reward-eligible blocks in `[from, to)` under the current
    /// schedule. Returns 0 when `to <= from`.
    pub fn reward_eligible_blocks(env: Env, from: u32, to: u32) -> Result<u64, ContractError> {
        let phases = Self::read_phases(&env)?;
        Ok(schedule::reward_eligible_blocks(&phases, from, to))
    }

    pub fn pool_length(env: Env) -> u32 {
        env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
    }

    pub fn total_alloc_point(env: Env) -> u32 {
        env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0)
    }

    pub fn cologne_per_block(env: Env) -> i128 {
        env.storage().instance().get(&RATE).unwrap_or(0)
    }

    pub fn min_notice_blocks(env: Env) -> u32 {
        env.storage().instance().get(&MIN_NOTICE).unwrap_or(0)
    }

    pub fn cologne_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&CLGN_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_phase(env: Env, phase_id: u32) -> Result<Phase, ContractError> {
        if phase_id < 1 || phase_id > PHASE_COUNT {
            return Err(ContractError::InvalidPhase);
        }
        env.storage()
            .instance()
            .get(&(PHASE, phase_id))
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        Self::read_pool(&env, pool_id)
    }

    /// A participant's recorded position. Zero for addresses that never
    /// deposited (positions are zeroed, never deleted).
    pub fn get_user_stake(env: Env, pool_id: u32, who: Address) -> UserStake {
        Self::read_user(&env, pool_id, &who)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        ownable::owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownable::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// The `updatePool` effect: advance one pool's accumulator to the
    /// current ledger sequence and return the fresh pool record.
    ///
    /// With nothing staked (or no weight anywhere) only the high-water
    /// mark moves — no accumulator change, so no phantom rewards accrue
    /// to no one and no division by zero.
    fn accrue_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
        let mut pool = Self::read_pool(env, pool_id)?;
        let current = env.ledger().sequence();

        if current <= pool.last_reward_block {
            return Ok(pool);
        }

        let staked = Self::pool_collateral_balance(env, &pool);
        let total_alloc: u32 = env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0);

        if staked > 0 && total_alloc > 0 {
            let phases = Self::read_phases(env)?;
            let blocks =
                schedule::reward_eligible_blocks(&phases, pool.last_reward_block, current);
            if blocks > 0 {
                let rate: i128 = env.storage().instance().get(&RATE).unwrap_or(0);
                let reward = accrual::pool_reward(blocks, rate, pool.alloc_point, total_alloc)
                    .ok_or(ContractError::Overflow)?;
                let delta =
                    accrual::acc_per_share_delta(reward, staked).ok_or(ContractError::Overflow)?;
                pool.acc_cologne_per_share = pool
                    .acc_cologne_per_share
                    .checked_add(delta)
                    .ok_or(ContractError::Overflow)?;
            }
        }

        pool.last_reward_block = current;
        Self::write_pool(env, pool_id, &pool);

        Ok(pool)
    }

    fn accrue_all_pools(env: &Env) -> Result<(), ContractError> {
        let count: u32 = env.storage().instance().get(&POOL_COUNT).unwrap_or(0);
        for pool_id in 0..count {
            Self::accrue_pool(env, pool_id)?;
        }
        Ok(())
    }

    /// Collateral the engine currently holds for this pool. Token
    /// identities are unique per pool, so the contract's own balance *is*
    /// the pool's total stake.
    fn pool_collateral_balance(env: &Env, pool: &Pool) -> i128 {
        token::Client::new(env, &pool.collateral_token).balance(&env.current_contract_address())
    }

    fn mint_reward(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let cologne: Address = env
            .storage()
            .instance()
            .get(&CLGN_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        // A failed mint traps the whole invocation — no partial payout.
        MintGatewayClient::new(env, &cologne).mint(to, &amount);
        Ok(())
    }

    fn read_phases(env: &Env) -> Result<[Phase; 3], ContractError> {
        Ok([
            Self::read_phase(env, 1)?,
            Self::read_phase(env, 2)?,
            Self::read_phase(env, 3)?,
        ])
    }

    fn read_phase(env: &Env, phase_id: u32) -> Result<Phase, ContractError> {
        env.storage()
            .instance()
            .get(&(PHASE, phase_id))
            .ok_or(ContractError::NotInitialized)
    }

    fn read_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
        let key = (POOL, pool_id);
        let pool = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::PoolNotFound)?;
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND_TO);
        Ok(pool)
    }

    fn write_pool(env: &Env, pool_id: u32, pool: &Pool) {
        let key = (POOL, pool_id);
        env.storage().persistent().set(&key, pool);
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND_TO);
    }

    fn read_user(env: &Env, pool_id: u32, who: &Address) -> UserStake {
        let key = (USER, pool_id, who.clone());
        match env.storage().persistent().get(&key) {
            Some(stake) => {
                env.storage().persistent().extend_ttl(
                    &key,
                    RECORD_TTL_THRESHOLD,
                    RECORD_TTL_EXTEND_TO,
                );
                stake
            }
            None => UserStake { amount: 0, reward_debt: 0 },
        }
    }

    fn write_user(env: &Env, pool_id: u32, who: &Address, stake: &UserStake) {
        let key = (USER, pool_id, who.clone());
        env.storage().persistent().set(&key, stake);
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_schedule;
