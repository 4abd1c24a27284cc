use anchor_lang::prelude::*;

use crate::errors::AjoError;

/// Mutable platform tunables, passed to init and admin updates as one unit
/// so an update replaces the whole set atomically.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace)]
pub struct PlatformParams {
    /// Payout fee in basis points (100 = 1%).
    pub fee_bps: u16,
    /// Trust tier subscription price in micro-units.
    pub trust_price: u64,
    /// SuperTrust tier subscription price in micro-units.
    pub super_trust_price: u64,
    /// Platform-wide cap on simultaneously active Basic groups.
    pub basic_group_limit: u16,
    /// Per-creator cap on simultaneously active Basic groups.
    pub basic_per_creator_limit: u8,
    /// Days after a turn deadline during which a late contribution still cures.
    pub grace_period_days: u16,
    /// Trust score deduction per slashed turn.
    pub trust_penalty: u8,
    /// Member trust credit for completing a group with no misses.
    pub trust_bonus: u8,
    /// Stake bonus for clean members, in basis points of their stake.
    pub stake_bonus_bps: u16,
    /// Largest per-cycle contribution allowed for Basic (unverified) groups.
    pub kyc_threshold: u64,
}

impl PlatformParams {
    pub const MAX_FEE_BPS: u16 = 2500;

    pub fn validate(&self) -> Result<()> {
        require!(self.fee_bps <= Self::MAX_FEE_BPS, AjoError::InvalidFeeBps);
        require!(self.stake_bonus_bps <= 10_000, AjoError::InvalidBonusBps);
        require!(
            (1..=100).contains(&self.trust_penalty) && (1..=100).contains(&self.trust_bonus),
            AjoError::InvalidTrustDelta
        );
        require!(
            self.basic_group_limit > 0 && self.basic_per_creator_limit > 0,
            AjoError::InvalidLimit
        );
        require!(self.grace_period_days >= 1, AjoError::InvalidGracePeriod);
        Ok(())
    }

    /// Bitmask of fields that differ between `self` and `next`.
    /// Bit order matches the field order above.
    pub fn diff_mask(&self, next: &PlatformParams) -> u16 {
        let mut mask = 0u16;
        if self.fee_bps != next.fee_bps {
            mask |= 1 << 0;
        }
        if self.trust_price != next.trust_price {
            mask |= 1 << 1;
        }
        if self.super_trust_price != next.super_trust_price {
            mask |= 1 << 2;
        }
        if self.basic_group_limit != next.basic_group_limit {
            mask |= 1 << 3;
        }
        if self.basic_per_creator_limit != next.basic_per_creator_limit {
            mask |= 1 << 4;
        }
        if self.grace_period_days != next.grace_period_days {
            mask |= 1 << 5;
        }
        if self.trust_penalty != next.trust_penalty {
            mask |= 1 << 6;
        }
        if self.trust_bonus != next.trust_bonus {
            mask |= 1 << 7;
        }
        if self.stake_bonus_bps != next.stake_bonus_bps {
            mask |= 1 << 8;
        }
        if self.kyc_threshold != next.kyc_threshold {
            mask |= 1 << 9;
        }
        mask
    }
}

#[account]
#[derive(InitSpace)]
pub struct Platform {
    /// Admin who can update params and pause/resume/cancel groups.
    pub authority: Pubkey,
    /// Wallet that receives the platform's share of fees.
    pub treasury: Pubkey,
    /// Settlement mint (USDC, 6 decimals). Immutable after init.
    pub usdc_mint: Pubkey,
    /// Current tunables.
    pub params: PlatformParams,
    /// Live count of active Basic groups, platform-wide.
    pub active_basic_groups: u16,
    /// Tracked balance of the bonus-pool vault (subscription revenue).
    pub bonus_pool: u64,
    /// Monotonic group id source.
    pub total_groups: u64,
    /// Count of admin param updates; next audit entry index.
    pub param_updates: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Platform {
    pub const SEED: &'static [u8] = b"platform";
    pub const BONUS_POOL_SEED: &'static [u8] = b"bonus-pool";

    /// Both Basic-group caps, checked against live counters. The counters
    /// live in persisted accounts and are mutated in the same transaction
    /// that creates or resolves a group, so this check is always against
    /// current state.
    pub fn check_basic_capacity(&self, creator_active: u8) -> Result<()> {
        require!(
            self.active_basic_groups < self.params.basic_group_limit,
            AjoError::BasicGroupLimitExceeded
        );
        require!(
            creator_active < self.params.basic_per_creator_limit,
            AjoError::CreatorBasicGroupLimitExceeded
        );
        Ok(())
    }
}

/// Append-only audit record for one admin parameter update.
/// Seeded by the registry's update counter; never mutated after creation.
#[account]
#[derive(InitSpace)]
pub struct ParamAudit {
    pub index: u64,
    pub authority: Pubkey,
    pub timestamp: i64,
    /// Bitmask of changed fields, per `PlatformParams::diff_mask`.
    pub changed_fields: u16,
    /// Full parameter snapshot after the update.
    pub params: PlatformParams,
}

impl ParamAudit {
    pub const SEED: &'static [u8] = b"audit";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PlatformParams {
        PlatformParams {
            fee_bps: 250,
            trust_price: 10_000_000,
            super_trust_price: 25_000_000,
            basic_group_limit: 100,
            basic_per_creator_limit: 1,
            grace_period_days: 3,
            trust_penalty: 5,
            trust_bonus: 2,
            stake_bonus_bps: 500,
            kyc_threshold: 1_000_000_000,
        }
    }

    #[test]
    fn validate_accepts_sane_params() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_bounds() {
        let mut p = params();
        p.fee_bps = 2501;
        assert_eq!(p.validate(), Err(AjoError::InvalidFeeBps.into()));

        let mut p = params();
        p.stake_bonus_bps = 10_001;
        assert_eq!(p.validate(), Err(AjoError::InvalidBonusBps.into()));

        let mut p = params();
        p.trust_penalty = 0;
        assert_eq!(p.validate(), Err(AjoError::InvalidTrustDelta.into()));

        let mut p = params();
        p.trust_bonus = 101;
        assert_eq!(p.validate(), Err(AjoError::InvalidTrustDelta.into()));

        let mut p = params();
        p.basic_group_limit = 0;
        assert_eq!(p.validate(), Err(AjoError::InvalidLimit.into()));

        let mut p = params();
        p.grace_period_days = 0;
        assert_eq!(p.validate(), Err(AjoError::InvalidGracePeriod.into()));
    }

    #[test]
    fn diff_mask_flags_exactly_the_changed_fields() {
        let old = params();
        let mut new = old;
        assert_eq!(old.diff_mask(&new), 0);

        new.fee_bps = 300;
        new.grace_period_days = 5;
        assert_eq!(old.diff_mask(&new), (1 << 0) | (1 << 5));

        let mut new = old;
        new.kyc_threshold = 0;
        assert_eq!(old.diff_mask(&new), 1 << 9);
    }

    fn platform_with(active: u16, limit: u16, per_creator: u8) -> Platform {
        let mut p = params();
        p.basic_group_limit = limit;
        p.basic_per_creator_limit = per_creator;
        Platform {
            authority: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            usdc_mint: Pubkey::new_unique(),
            params: p,
            active_basic_groups: active,
            bonus_pool: 0,
            total_groups: 0,
            param_updates: 0,
            bump: 255,
        }
    }

    #[test]
    fn basic_capacity_enforces_global_limit() {
        let platform = platform_with(3, 3, 2);
        assert_eq!(
            platform.check_basic_capacity(0),
            Err(AjoError::BasicGroupLimitExceeded.into())
        );
        let platform = platform_with(2, 3, 2);
        assert!(platform.check_basic_capacity(0).is_ok());
    }

    #[test]
    fn basic_capacity_enforces_per_creator_limit() {
        let platform = platform_with(0, 100, 1);
        assert_eq!(
            platform.check_basic_capacity(1),
            Err(AjoError::CreatorBasicGroupLimitExceeded.into())
        );
        assert!(platform.check_basic_capacity(0).is_ok());
    }
}
