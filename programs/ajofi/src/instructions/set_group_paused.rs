use anchor_lang::prelude::*;

use crate::errors::AjoError;
use crate::events::{GroupPaused, GroupResumed};
use crate::state::{Group, GroupStatus, Platform};

#[derive(Accounts)]
pub struct SetGroupPaused<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ AjoError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Group::SEED, group.group_id.to_le_bytes().as_ref()],
        bump = group.bump,
    )]
    pub group: Account<'info, Group>,

    /// Platform authority.
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetGroupPaused>, paused: bool) -> Result<()> {
    let group = &mut ctx.accounts.group;

    require!(!group.status.is_terminal(), AjoError::GroupAlreadyResolved);

    if paused {
        require!(group.status == GroupStatus::Active, AjoError::GroupNotActive);
        group.status = GroupStatus::Paused;
        emit!(GroupPaused {
            group_id: group.group_id,
        });
    } else {
        require!(group.status == GroupStatus::Paused, AjoError::GroupNotPaused);
        group.status = GroupStatus::Active;
        // The clock kept running while frozen; reopen the turn so members
        // are not slashed for the pause.
        let clock = Clock::get()?;
        group.current_turn_start = clock.unix_timestamp;
        emit!(GroupResumed {
            group_id: group.group_id,
        });
    }

    Ok(())
}
