use anchor_lang::prelude::*;

use crate::errors::AjoError;
use crate::state::PlatformParams;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const BPS_DENOMINATOR: u64 = 10_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace)]
pub enum GroupStatus {
    /// Rotation in progress; contributions and payouts accepted.
    Active,
    /// Frozen by the platform authority.
    Paused,
    /// All turns paid out and finalized. Terminal.
    Completed,
    /// Cancelled by the platform authority. Terminal.
    Cancelled,
}

impl GroupStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GroupStatus::Completed | GroupStatus::Cancelled)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum GroupModel {
    /// Free tier: short cycles, small caps, no stake, gated by platform limits.
    Basic,
    /// Subscription tier with staked members and a 75% creator fee share.
    Trust,
    /// Subscription tier with staked members and a 90% creator fee share.
    SuperTrust,
}

/// Per-model policy resolved by a pure function at creation time.
pub struct ModelTerms {
    pub default_cycle_days: u16,
    pub default_member_cap: u8,
    pub min_cycle_days: u16,
    pub max_cycle_days: u16,
    pub min_member_cap: u8,
    pub max_member_cap: u8,
    /// Required stake as a multiple of the per-cycle contribution.
    pub stake_multiplier: u64,
    /// Creator's share of the payout fee, in basis points.
    pub creator_fee_share_bps: u64,
}

impl GroupModel {
    pub fn terms(&self) -> ModelTerms {
        match self {
            GroupModel::Basic => ModelTerms {
                default_cycle_days: 7,
                default_member_cap: 5,
                min_cycle_days: 1,
                max_cycle_days: 30,
                min_member_cap: 2,
                max_member_cap: 10,
                stake_multiplier: 0,
                creator_fee_share_bps: 0,
            },
            GroupModel::Trust => ModelTerms {
                default_cycle_days: 7,
                default_member_cap: 10,
                min_cycle_days: 1,
                max_cycle_days: 90,
                min_member_cap: 2,
                max_member_cap: Group::MAX_MEMBERS,
                stake_multiplier: 2,
                creator_fee_share_bps: 7_500,
            },
            GroupModel::SuperTrust => ModelTerms {
                default_cycle_days: 7,
                default_member_cap: 10,
                min_cycle_days: 1,
                max_cycle_days: 90,
                min_member_cap: 2,
                max_member_cap: Group::MAX_MEMBERS,
                stake_multiplier: 3,
                creator_fee_share_bps: 9_000,
            },
        }
    }

    /// Resolve creator-supplied overrides against the model's defaults and
    /// bounds. `None` means "use the default".
    pub fn resolve_config(
        &self,
        cycle_days: Option<u16>,
        member_cap: Option<u8>,
    ) -> Result<(u16, u8)> {
        let terms = self.terms();
        let cycle_days = cycle_days.unwrap_or(terms.default_cycle_days);
        let member_cap = member_cap.unwrap_or(terms.default_member_cap);
        require!(
            (terms.min_cycle_days..=terms.max_cycle_days).contains(&cycle_days),
            AjoError::InvalidCycleDays
        );
        require!(
            (terms.min_member_cap..=terms.max_member_cap).contains(&member_cap),
            AjoError::InvalidMemberCap
        );
        Ok((cycle_days, member_cap))
    }

    pub fn subscription_price(&self, params: &PlatformParams) -> u64 {
        match self {
            GroupModel::Basic => 0,
            GroupModel::Trust => params.trust_price,
            GroupModel::SuperTrust => params.super_trust_price,
        }
    }

    pub fn stake_required(&self, contribution_amount: u64) -> Result<u64> {
        contribution_amount
            .checked_mul(self.terms().stake_multiplier)
            .ok_or_else(|| AjoError::MathOverflow.into())
    }
}

/// How one turn's gross payout is carved up. All divisions floor;
/// `net + creator_share + treasury_share` always reconstructs the gross
/// amount exactly.
#[derive(Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: u64,
    pub net: u64,
    pub creator_share: u64,
    pub treasury_share: u64,
}

pub fn split_fee(due: u64, fee_bps: u16, creator_fee_share_bps: u64) -> Result<FeeSplit> {
    let fee = due
        .checked_mul(fee_bps as u64)
        .ok_or(AjoError::MathOverflow)?
        / BPS_DENOMINATOR;
    let net = due.checked_sub(fee).ok_or(AjoError::MathOverflow)?;
    let creator_share = fee
        .checked_mul(creator_fee_share_bps)
        .ok_or(AjoError::MathOverflow)?
        / BPS_DENOMINATOR;
    let treasury_share = fee
        .checked_sub(creator_share)
        .ok_or(AjoError::MathOverflow)?;
    Ok(FeeSplit {
        fee,
        net,
        creator_share,
        treasury_share,
    })
}

#[account]
#[derive(InitSpace)]
pub struct Group {
    /// Sequential group identifier.
    pub group_id: u64,
    /// Model variant; fixes stake, fee share and config bounds.
    pub model: GroupModel,
    /// Wallet that created the group.
    pub creator: Pubkey,
    /// Maximum rotation size.
    pub member_cap: u8,
    /// Days per contribution turn.
    pub cycle_days: u16,
    /// Fixed contribution per member per turn, in micro-units.
    pub contribution_amount: u64,
    /// Rotation order; one payout per entry. Appended at join time.
    #[max_len(20)]
    pub payout_order: Vec<Pubkey>,
    /// Mirrors payout_order.len().
    pub member_count: u8,
    /// Next turn to pay out. Equals member_count only between the last
    /// payout and finalization.
    pub current_turn_index: u8,
    /// Unix timestamp when the current turn opened.
    pub current_turn_start: i64,
    /// Micro-units covering the current turn (contributions + slash debits).
    pub turn_covered: u64,
    /// Escrow bookkeeping: contributions and slash debits in, payouts out.
    pub total_pool: u64,
    /// Group health score in [0, 100]; starts at 100, drops on slashes.
    pub trust_score: u8,
    /// Subscription the creator paid at creation (0 for Basic).
    pub subscription_paid: u64,
    /// Lifecycle status. Records are never deleted; terminal statuses mark
    /// the end of life.
    pub status: GroupStatus,
    /// Token account holding pooled contributions, owned by this PDA.
    pub escrow_token_account: Pubkey,
    /// Token account holding member stakes, owned by this PDA.
    /// Stays empty for Basic groups.
    pub stake_vault: Pubkey,
    pub created_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Group {
    pub const SEED: &'static [u8] = b"group";
    pub const STAKE_VAULT_SEED: &'static [u8] = b"stake-vault";
    pub const MAX_MEMBERS: u8 = 20;

    /// Trust score floor for the completion rebate.
    pub const REBATE_MIN_TRUST: u8 = 95;
    /// Rebate as basis points of the subscription paid.
    pub const REBATE_BPS: u64 = 500;

    /// Gross amount owed to the current turn's recipient.
    pub fn due_amount(&self) -> Result<u64> {
        self.contribution_amount
            .checked_mul(self.member_count as u64)
            .ok_or_else(|| AjoError::MathOverflow.into())
    }

    /// When the current turn's contributions fall due.
    pub fn turn_deadline(&self) -> i64 {
        self.current_turn_start
            .saturating_add(self.cycle_days as i64 * SECONDS_PER_DAY)
    }

    /// End of the cure window for the current turn.
    pub fn grace_deadline(&self, grace_period_days: u16) -> i64 {
        self.turn_deadline()
            .saturating_add(grace_period_days as i64 * SECONDS_PER_DAY)
    }

    pub fn split_fee(&self, due: u64, fee_bps: u16) -> Result<FeeSplit> {
        split_fee(due, fee_bps, self.model.terms().creator_fee_share_bps)
    }

    /// Subscription rebate owed to the creator at finalization.
    pub fn completion_rebate(&self) -> Result<u64> {
        if self.trust_score >= Self::REBATE_MIN_TRUST {
            Ok(self
                .subscription_paid
                .checked_mul(Self::REBATE_BPS)
                .ok_or(AjoError::MathOverflow)?
                / BPS_DENOMINATOR)
        } else {
            Ok(0)
        }
    }

    pub fn apply_trust_penalty(&mut self, penalty: u8) {
        self.trust_score = self.trust_score.saturating_sub(penalty);
    }
}

/// Stake bonus for a member who never missed a turn.
pub fn stake_bonus(stake_amount: u64, stake_bonus_bps: u16) -> Result<u64> {
    Ok(stake_amount
        .checked_mul(stake_bonus_bps as u64)
        .ok_or(AjoError::MathOverflow)?
        / BPS_DENOMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_defaults_are_seven_days_cap_five() {
        let (cycle, cap) = GroupModel::Basic.resolve_config(None, None).unwrap();
        assert_eq!(cycle, 7);
        assert_eq!(cap, 5);
    }

    #[test]
    fn config_bounds_are_enforced_per_model() {
        assert_eq!(
            GroupModel::Basic.resolve_config(Some(31), None),
            Err(AjoError::InvalidCycleDays.into())
        );
        assert_eq!(
            GroupModel::Basic.resolve_config(None, Some(11)),
            Err(AjoError::InvalidMemberCap.into())
        );
        assert_eq!(
            GroupModel::Trust.resolve_config(Some(0), None),
            Err(AjoError::InvalidCycleDays.into())
        );
        assert_eq!(
            GroupModel::SuperTrust.resolve_config(None, Some(1)),
            Err(AjoError::InvalidMemberCap.into())
        );
        // Trust tiers allow longer cycles and larger rotations.
        assert!(GroupModel::Trust.resolve_config(Some(90), Some(20)).is_ok());
        assert!(GroupModel::SuperTrust
            .resolve_config(Some(45), Some(12))
            .is_ok());
    }

    #[test]
    fn stake_scales_with_model() {
        assert_eq!(GroupModel::Basic.stake_required(100_000000).unwrap(), 0);
        assert_eq!(
            GroupModel::Trust.stake_required(100_000000).unwrap(),
            200_000000
        );
        assert_eq!(
            GroupModel::SuperTrust.stake_required(100_000000).unwrap(),
            300_000000
        );
    }

    #[test]
    fn fee_split_matches_reference_values() {
        // 250 bps on a 500 USDC pot.
        let split = split_fee(500_000000, 250, 7_500).unwrap();
        assert_eq!(split.fee, 12_500000);
        assert_eq!(split.net, 487_500000);
        assert_eq!(split.creator_share, 9_375000);
        assert_eq!(split.treasury_share, 3_125000);

        let split = split_fee(500_000000, 250, 9_000).unwrap();
        assert_eq!(split.creator_share, 11_250000);
        assert_eq!(split.treasury_share, 1_250000);

        // Basic: the whole fee goes to the treasury.
        let split = split_fee(500_000000, 250, 0).unwrap();
        assert_eq!(split.creator_share, 0);
        assert_eq!(split.treasury_share, 12_500000);
    }

    #[test]
    fn fee_split_reconstructs_gross_exactly() {
        // Edge dues: rounding must never create or destroy micro-units.
        for due in [1u64, 999_999, 1_000_001, 500_000000, u64::MAX / 10_001] {
            for share in [0u64, 7_500, 9_000] {
                let split = split_fee(due, 250, share).unwrap();
                assert_eq!(split.fee + split.net, due, "due={due}");
                assert_eq!(
                    split.creator_share + split.treasury_share,
                    split.fee,
                    "due={due}"
                );
            }
        }
    }

    fn group(model: GroupModel, trust_score: u8, subscription_paid: u64) -> Group {
        Group {
            group_id: 1,
            model,
            creator: Pubkey::new_unique(),
            member_cap: 5,
            cycle_days: 7,
            contribution_amount: 100_000000,
            payout_order: vec![],
            member_count: 5,
            current_turn_index: 0,
            current_turn_start: 1_700_000_000,
            turn_covered: 0,
            total_pool: 0,
            trust_score,
            subscription_paid,
            status: GroupStatus::Active,
            escrow_token_account: Pubkey::new_unique(),
            stake_vault: Pubkey::new_unique(),
            created_at: 1_700_000_000,
            bump: 255,
        }
    }

    #[test]
    fn due_amount_is_contribution_times_members() {
        assert_eq!(group(GroupModel::Basic, 100, 0).due_amount().unwrap(), 500_000000);
    }

    #[test]
    fn deadlines_derive_from_turn_start() {
        let g = group(GroupModel::Trust, 100, 0);
        assert_eq!(g.turn_deadline(), 1_700_000_000 + 7 * SECONDS_PER_DAY);
        assert_eq!(
            g.grace_deadline(3),
            1_700_000_000 + 10 * SECONDS_PER_DAY
        );
    }

    #[test]
    fn rebate_requires_trust_score_of_95() {
        assert_eq!(
            group(GroupModel::Trust, 95, 10_000_000).completion_rebate().unwrap(),
            500_000
        );
        assert_eq!(
            group(GroupModel::Trust, 100, 10_000_000).completion_rebate().unwrap(),
            500_000
        );
        assert_eq!(
            group(GroupModel::Trust, 94, 10_000_000).completion_rebate().unwrap(),
            0
        );
        // Basic groups pay no subscription, so the rebate is structurally 0.
        assert_eq!(group(GroupModel::Basic, 100, 0).completion_rebate().unwrap(), 0);
    }

    #[test]
    fn trust_penalty_floors_at_zero() {
        let mut g = group(GroupModel::Trust, 3, 0);
        g.apply_trust_penalty(5);
        assert_eq!(g.trust_score, 0);
        g.apply_trust_penalty(5);
        assert_eq!(g.trust_score, 0);
    }

    #[test]
    fn stake_bonus_floors() {
        assert_eq!(stake_bonus(200_000000, 500).unwrap(), 10_000000);
        assert_eq!(stake_bonus(999, 500).unwrap(), 49);
        assert_eq!(stake_bonus(0, 500).unwrap(), 0);
    }
}
