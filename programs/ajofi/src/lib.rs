use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{GroupModel, PlatformParams};

declare_id!("A6SZw4yiACEBr3bhbUfZS4YzDpyemUtwmjoy78EWSbMX");

#[program]
pub mod ajofi {
    use super::*;

    /// One-time platform initialization.
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        params: PlatformParams,
    ) -> Result<()> {
        instructions::initialize_platform::handler(ctx, params)
    }

    /// Authority replaces the platform tunables and appends an audit entry.
    pub fn update_platform_params(
        ctx: Context<UpdatePlatformParams>,
        params: PlatformParams,
    ) -> Result<()> {
        instructions::update_platform_params::handler(ctx, params)
    }

    /// Create a new savings circle. Cycle length and member cap default per
    /// model when not supplied.
    pub fn create_group(
        ctx: Context<CreateGroup>,
        model: GroupModel,
        cycle_days: Option<u16>,
        member_cap: Option<u8>,
        contribution_amount: u64,
    ) -> Result<()> {
        instructions::create_group::handler(ctx, model, cycle_days, member_cap, contribution_amount)
    }

    /// Join an open group, staking collateral for Trust tiers.
    pub fn join_group(ctx: Context<JoinGroup>) -> Result<()> {
        instructions::join_group::handler(ctx)
    }

    /// Contribute the group's fixed amount toward the current turn.
    pub fn contribute(ctx: Context<Contribute>, amount: u64) -> Result<()> {
        instructions::contribute::handler(ctx, amount)
    }

    /// Permissionless tick: start a grace period or slash a member whose
    /// turn deadline has lapsed. Safe to re-invoke.
    pub fn enforce_turn_deadline(ctx: Context<EnforceTurnDeadline>) -> Result<()> {
        instructions::enforce_turn_deadline::handler(ctx)
    }

    /// Pay the current turn's recipient once contributions and slashes
    /// cover the pot, then advance the rotation.
    pub fn release_payout(ctx: Context<ReleasePayout>, turn_index: u8) -> Result<()> {
        instructions::release_payout::handler(ctx, turn_index)
    }

    /// Complete a group whose every turn has been paid; pays the creator's
    /// trust rebate.
    pub fn finalize_group(ctx: Context<FinalizeGroup>) -> Result<()> {
        instructions::finalize_group::handler(ctx)
    }

    /// Return a member's remaining stake (plus bonus for a clean rotation)
    /// once the group is completed or cancelled.
    pub fn withdraw_stake(ctx: Context<WithdrawStake>) -> Result<()> {
        instructions::withdraw_stake::handler(ctx)
    }

    /// Authority pauses (`true`) or resumes (`false`) a group.
    pub fn set_group_paused(ctx: Context<SetGroupPaused>, paused: bool) -> Result<()> {
        instructions::set_group_paused::handler(ctx, paused)
    }

    /// Authority cancels a group; stakes become withdrawable.
    pub fn cancel_group(ctx: Context<CancelGroup>) -> Result<()> {
        instructions::cancel_group::handler(ctx)
    }
}
