use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::MemberJoined;
use crate::state::{Group, GroupStatus, Member};

#[derive(Accounts)]
pub struct JoinGroup<'info> {
    #[account(
        mut,
        seeds = [Group::SEED, group.group_id.to_le_bytes().as_ref()],
        bump = group.bump,
        constraint = group.status == GroupStatus::Active @ AjoError::GroupNotActive,
    )]
    pub group: Account<'info, Group>,

    #[account(
        init,
        payer = joiner,
        space = 8 + Member::INIT_SPACE,
        seeds = [Member::SEED, group.key().as_ref(), joiner.key().as_ref()],
        bump,
    )]
    pub member: Account<'info, Member>,

    /// Joiner's USDC token account; funds the stake for Trust tiers.
    #[account(
        mut,
        constraint = joiner_token_account.owner == joiner.key(),
        constraint = joiner_token_account.mint == stake_vault.mint,
    )]
    pub joiner_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = stake_vault.key() == group.stake_vault,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub joiner: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<JoinGroup>) -> Result<()> {
    let group = &ctx.accounts.group;

    // Joining after the first payout would dilute earlier recipients' pots.
    require!(group.current_turn_index == 0, AjoError::RotationStarted);
    require!(group.member_count < group.member_cap, AjoError::GroupFull);

    let stake_amount = group.model.stake_required(group.contribution_amount)?;
    if stake_amount > 0 {
        let transfer_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.joiner_token_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.joiner.to_account_info(),
            },
        );
        token::transfer(transfer_ctx, stake_amount)?;
    }

    let clock = Clock::get()?;
    let joiner_key = ctx.accounts.joiner.key();

    let group = &mut ctx.accounts.group;
    let position = group.member_count;
    group.payout_order.push(joiner_key);
    group.member_count = position.checked_add(1).ok_or(AjoError::MathOverflow)?;

    let member = &mut ctx.accounts.member;
    member.group = group.key();
    member.authority = joiner_key;
    member.is_creator = joiner_key == group.creator;
    member.stake_amount = stake_amount;
    member.contributed_bitmap = 0;
    member.slashed_bitmap = 0;
    member.grace_bitmap = 0;
    member.missed_count = 0;
    member.trust_delta = 0;
    member.joined_at = clock.unix_timestamp;
    member.bump = ctx.bumps.member;

    emit!(MemberJoined {
        group_id: group.group_id,
        member: joiner_key,
        stake_amount,
        position,
    });

    Ok(())
}
