use anchor_lang::prelude::*;

use crate::errors::AjoError;
use crate::events::GroupCancelled;
use crate::state::{CreatorStats, Group, GroupModel, GroupStatus, Platform};

#[derive(Accounts)]
pub struct CancelGroup<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ AjoError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [CreatorStats::SEED, group.creator.as_ref()],
        bump = creator_stats.bump,
    )]
    pub creator_stats: Account<'info, CreatorStats>,

    #[account(
        mut,
        seeds = [Group::SEED, group.group_id.to_le_bytes().as_ref()],
        bump = group.bump,
    )]
    pub group: Account<'info, Group>,

    /// Platform authority.
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<CancelGroup>) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    let stats = &mut ctx.accounts.creator_stats;
    let group = &mut ctx.accounts.group;

    require!(!group.status.is_terminal(), AjoError::GroupAlreadyResolved);

    if group.model == GroupModel::Basic {
        platform.active_basic_groups = platform.active_basic_groups.saturating_sub(1);
        stats.active_basic_groups = stats.active_basic_groups.saturating_sub(1);
    }

    // Terminal marker; stakes become withdrawable, without bonus.
    group.status = GroupStatus::Cancelled;

    emit!(GroupCancelled {
        group_id: group.group_id,
    });

    Ok(())
}
