use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::GroupFinalized;
use crate::state::{CreatorStats, Group, GroupModel, GroupStatus, Platform};

#[derive(Accounts)]
pub struct FinalizeGroup<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
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
        constraint = group.status == GroupStatus::Active @ AjoError::GroupNotActive,
    )]
    pub group: Account<'info, Group>,

    /// Subscription revenue vault; funds the completion rebate.
    #[account(
        mut,
        seeds = [Platform::BONUS_POOL_SEED],
        bump,
    )]
    pub bonus_pool_vault: Account<'info, TokenAccount>,

    /// Creator's USDC token account for the rebate.
    #[account(
        mut,
        constraint = creator_token_account.owner == group.creator,
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    /// Anyone can finalize once every turn has been paid.
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<FinalizeGroup>) -> Result<()> {
    let group = &ctx.accounts.group;

    require!(
        group.member_count > 0
            && group.current_turn_index as usize == group.payout_order.len(),
        AjoError::GroupNotFinished
    );

    // Clean completion with a healthy score earns the creator back 5%
    // of the subscription, bounded by what the pool still holds.
    let rebate = group
        .completion_rebate()?
        .min(ctx.accounts.platform.bonus_pool);

    if rebate > 0 {
        let platform_bump = [ctx.accounts.platform.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[Platform::SEED, &platform_bump]];

        let transfer_rebate = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.bonus_pool_vault.to_account_info(),
                to: ctx.accounts.creator_token_account.to_account_info(),
                authority: ctx.accounts.platform.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_rebate, rebate)?;
    }

    let platform = &mut ctx.accounts.platform;
    let stats = &mut ctx.accounts.creator_stats;
    let group = &mut ctx.accounts.group;

    platform.bonus_pool = platform
        .bonus_pool
        .checked_sub(rebate)
        .ok_or(AjoError::MathOverflow)?;

    if group.model == GroupModel::Basic {
        platform.active_basic_groups = platform.active_basic_groups.saturating_sub(1);
        stats.active_basic_groups = stats.active_basic_groups.saturating_sub(1);
    }
    stats.groups_completed = stats
        .groups_completed
        .checked_add(1)
        .ok_or(AjoError::MathOverflow)?;

    group.status = GroupStatus::Completed;

    emit!(GroupFinalized {
        group_id: group.group_id,
        final_trust_score: group.trust_score,
        rebate,
    });

    Ok(())
}
