use anchor_lang::prelude::*;

/// Where one (member, turn) pair stands, derived lazily from the clock.
/// There is no scheduler on-chain; any instruction that reads the member
/// re-derives this from the turn's deadlines.
#[derive(Debug, PartialEq, Eq)]
pub enum TurnStanding {
    /// Contribution recorded or slash applied; nothing left to enforce.
    Resolved,
    /// Deadline not yet reached.
    OnTime,
    /// Past the deadline, inside the cure window.
    GracePending,
    /// Cure window elapsed without a contribution.
    SlashDue,
}

#[account]
#[derive(InitSpace)]
pub struct Member {
    /// Group this membership belongs to.
    pub group: Pubkey,
    /// Member wallet.
    pub authority: Pubkey,
    /// Whether this wallet created the group.
    pub is_creator: bool,
    /// Collateral held in the group's stake vault. 0 for Basic groups;
    /// reduced by slashes, zeroed on withdrawal.
    pub stake_amount: u64,
    /// Bit per turn: contribution recorded.
    pub contributed_bitmap: u32,
    /// Bit per turn: slash applied. missed_count mirrors its popcount.
    pub slashed_bitmap: u32,
    /// Bit per turn: GracePeriodStarted already emitted.
    pub grace_bitmap: u32,
    /// Number of slashed turns.
    pub missed_count: u8,
    /// Cumulative signed trust adjustment attributable to this member.
    pub trust_delta: i16,
    pub joined_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Member {
    pub const SEED: &'static [u8] = b"member";

    pub fn has_contributed(&self, turn: u8) -> bool {
        self.contributed_bitmap & (1u32 << turn) != 0
    }

    pub fn mark_contributed(&mut self, turn: u8) {
        self.contributed_bitmap |= 1u32 << turn;
    }

    pub fn is_slashed(&self, turn: u8) -> bool {
        self.slashed_bitmap & (1u32 << turn) != 0
    }

    pub fn grace_started(&self, turn: u8) -> bool {
        self.grace_bitmap & (1u32 << turn) != 0
    }

    pub fn mark_grace_started(&mut self, turn: u8) {
        self.grace_bitmap |= 1u32 << turn;
    }

    /// A resolved turn accepts no further contribution and no further slash.
    pub fn turn_resolved(&self, turn: u8) -> bool {
        self.has_contributed(turn) || self.is_slashed(turn)
    }

    /// Record a slash for `turn`: at most one per turn, counted against
    /// the member's reputation.
    pub fn record_slash(&mut self, turn: u8, trust_penalty: u8) {
        self.slashed_bitmap |= 1u32 << turn;
        self.missed_count = self.missed_count.saturating_add(1);
        self.trust_delta = self.trust_delta.saturating_sub(trust_penalty as i16);
    }

    pub fn turn_standing(&self, turn: u8, now: i64, deadline: i64, grace_deadline: i64) -> TurnStanding {
        if self.turn_resolved(turn) {
            TurnStanding::Resolved
        } else if now <= deadline {
            TurnStanding::OnTime
        } else if now <= grace_deadline {
            TurnStanding::GracePending
        } else {
            TurnStanding::SlashDue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            group: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            is_creator: false,
            stake_amount: 200_000000,
            contributed_bitmap: 0,
            slashed_bitmap: 0,
            grace_bitmap: 0,
            missed_count: 0,
            trust_delta: 0,
            joined_at: 0,
            bump: 255,
        }
    }

    const DEADLINE: i64 = 1_700_604_800;
    const GRACE_DEADLINE: i64 = DEADLINE + 3 * 86_400;

    #[test]
    fn standing_progresses_with_the_clock() {
        let m = member();
        assert_eq!(
            m.turn_standing(0, DEADLINE - 1, DEADLINE, GRACE_DEADLINE),
            TurnStanding::OnTime
        );
        assert_eq!(
            m.turn_standing(0, DEADLINE, DEADLINE, GRACE_DEADLINE),
            TurnStanding::OnTime
        );
        assert_eq!(
            m.turn_standing(0, DEADLINE + 1, DEADLINE, GRACE_DEADLINE),
            TurnStanding::GracePending
        );
        assert_eq!(
            m.turn_standing(0, GRACE_DEADLINE, DEADLINE, GRACE_DEADLINE),
            TurnStanding::GracePending
        );
        assert_eq!(
            m.turn_standing(0, GRACE_DEADLINE + 1, DEADLINE, GRACE_DEADLINE),
            TurnStanding::SlashDue
        );
    }

    #[test]
    fn contribution_resolves_the_turn_at_any_time() {
        let mut m = member();
        m.mark_contributed(0);
        assert_eq!(
            m.turn_standing(0, GRACE_DEADLINE + 1, DEADLINE, GRACE_DEADLINE),
            TurnStanding::Resolved
        );
        // Other turns are unaffected.
        assert_eq!(
            m.turn_standing(1, DEADLINE - 1, DEADLINE, GRACE_DEADLINE),
            TurnStanding::OnTime
        );
    }

    #[test]
    fn slash_resolves_the_turn_and_counts_the_miss() {
        let mut m = member();
        m.record_slash(2, 5);
        assert!(m.is_slashed(2));
        assert_eq!(m.missed_count, 1);
        assert_eq!(m.trust_delta, -5);
        assert_eq!(
            m.turn_standing(2, GRACE_DEADLINE + 99, DEADLINE, GRACE_DEADLINE),
            TurnStanding::Resolved
        );
        assert_eq!(m.missed_count as u32, m.slashed_bitmap.count_ones());
    }

    #[test]
    fn grace_flag_is_per_turn() {
        let mut m = member();
        assert!(!m.grace_started(3));
        m.mark_grace_started(3);
        assert!(m.grace_started(3));
        assert!(!m.grace_started(4));
    }

    #[test]
    fn bitmaps_track_independent_turns() {
        let mut m = member();
        m.mark_contributed(0);
        m.record_slash(1, 5);
        m.mark_contributed(2);
        assert!(m.has_contributed(0) && !m.is_slashed(0));
        assert!(!m.has_contributed(1) && m.is_slashed(1));
        assert_eq!(m.missed_count, 1);
        assert_eq!(m.missed_count as u32, m.slashed_bitmap.count_ones());
    }
}
