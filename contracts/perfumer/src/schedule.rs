use soroban_sdk::contracttype;

/// Number of emission phases in the calendar. Fixed for the life of the
/// contract; phases are rescheduled, never added or removed.
pub const PHASE_COUNT: u32 = 3;

// ── Types ───────────────────────────────────────────────────────────────────

/// One contiguous window of reward-eligible ledger sequences.
///
/// The window is half-open: `[start_block, start_block + duration_blocks)`.
/// A zero duration is legal and contributes nothing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Phase {
    pub start_block: u32,
    pub duration_blocks: u32,
}

impl Phase {
    /// Exclusive end of the window, widened so `start + duration` cannot wrap.
    pub fn end_block(&self) -> u64 {
        self.start_block as u64 + self.duration_blocks as u64
    }

    /// Length of the overlap between this window and `[from, to)`.
    pub fn overlap(&self, from: u32, to: u32) -> u64 {
        let lo = (self.start_block as u64).max(from as u64);
        let hi = self.end_block().min(to as u64);
        hi.saturating_sub(lo)
    }
}

/// Why a reschedule attempt was rejected. Mapped to contract errors by the
/// caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RescheduleError {
    /// The new placement would overlap or reorder the phases.
    Conflict,
    /// Too close to the phase's current start, or the new start is too soon.
    ShortNotice,
}

// ── Window math ─────────────────────────────────────────────────────────────

/// Count the reward-eligible ledger sequences in `[from, to)`.
///
/// ```text
/// eligible = Σ over phases of |[from, to) ∩ [start, start + duration)|
/// ```
///
/// Phases never overlap (enforced at initialization and on every
/// reschedule), so the per-phase overlaps sum without double counting.
/// Ranges entirely outside the calendar, and the gaps between phases,
/// contribute zero. Returns 0 when `to <= from`.
pub fn reward_eligible_blocks(phases: &[Phase; 3], from: u32, to: u32) -> u64 {
    let mut eligible = 0u64;
    for phase in phases.iter() {
        eligible += phase.overlap(from, to);
    }
    eligible
}

/// True if the three windows are strictly ordered and non-overlapping:
/// phase 1 ends at or before phase 2 starts, phase 2 ends at or before
/// phase 3 starts.
pub fn strictly_ordered(phases: &[Phase; 3]) -> bool {
    phases[0].end_block() <= phases[1].start_block as u64
        && phases[1].end_block() <= phases[2].start_block as u64
}

/// Validate moving phase `phase_id` (1-based) to `new_start`.
///
/// Checks, in order:
/// 1. the new placement keeps all three windows strictly ordered against
///    the other two phases' *current* windows;
/// 2. the call lands at least `notice` blocks before the phase's currently
///    scheduled start (an imminent or already-started phase is frozen);
/// 3. the new start itself is at least `notice` blocks in the future.
///
/// The caller's schedule is untouched by validation; on success it commits
/// the new start separately.
pub fn validate_reschedule(
    phases: &[Phase; 3],
    phase_id: u32,
    new_start: u32,
    current_block: u32,
    notice: u32,
) -> Result<(), RescheduleError> {
    debug_assert!(phase_id >= 1 && phase_id <= PHASE_COUNT);
    let idx = (phase_id - 1) as usize;

    let mut candidate = phases.clone();
    candidate[idx].start_block = new_start;
    if !strictly_ordered(&candidate) {
        return Err(RescheduleError::Conflict);
    }

    let earliest = current_block as u64 + notice as u64;
    if earliest > phases[idx].start_block as u64 {
        return Err(RescheduleError::ShortNotice);
    }
    if earliest > new_start as u64 {
        return Err(RescheduleError::ShortNotice);
    }

    Ok(())
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure window math, no Soroban environment dependency.
