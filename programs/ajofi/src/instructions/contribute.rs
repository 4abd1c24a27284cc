use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::{ContributionMade, GracePeriodStarted};
use crate::state::{Group, GroupStatus, Member, Platform};

#[derive(Accounts)]
pub struct Contribute<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Group::SEED, group.group_id.to_le_bytes().as_ref()],
        bump = group.bump,
        constraint = group.status == GroupStatus::Active @ AjoError::GroupNotActive,
    )]
    pub group: Account<'info, Group>,

    #[account(
        mut,
        seeds = [Member::SEED, group.key().as_ref(), contributor.key().as_ref()],
        bump = member.bump,
        constraint = member.authority == contributor.key() @ AjoError::NotAMember,
    )]
    pub member: Account<'info, Member>,

    /// Contributor's USDC token account.
    #[account(
        mut,
        constraint = contributor_token_account.owner == contributor.key(),
        constraint = contributor_token_account.mint == escrow_token_account.mint,
    )]
    pub contributor_token_account: Account<'info, TokenAccount>,

    /// Escrow token account owned by the group PDA.
    #[account(
        mut,
        constraint = escrow_token_account.key() == group.escrow_token_account,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    pub contributor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Contribute>, amount: u64) -> Result<()> {
    let group = &ctx.accounts.group;
    let member = &ctx.accounts.member;

    let turn = group.current_turn_index;
    require!(
        (turn as usize) < group.payout_order.len(),
        AjoError::RotationComplete
    );
    require!(!member.turn_resolved(turn), AjoError::AlreadyContributed);
    require!(
        amount == group.contribution_amount,
        AjoError::WrongContributionAmount
    );

    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let deadline = group.turn_deadline();
    let grace_until = group.grace_deadline(ctx.accounts.platform.params.grace_period_days);

    // Past the grace window the turn is slashable, not payable.
    require!(now <= grace_until, AjoError::ContributionWindowClosed);

    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.contributor_token_account.to_account_info(),
            to: ctx.accounts.escrow_token_account.to_account_info(),
            authority: ctx.accounts.contributor.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    let group = &mut ctx.accounts.group;
    let member = &mut ctx.accounts.member;

    // Late contribution: surface the grace transition if nothing else has.
    if now > deadline && !member.grace_started(turn) {
        member.mark_grace_started(turn);
        emit!(GracePeriodStarted {
            group_id: group.group_id,
            member: member.authority,
            turn_index: turn,
            grace_until,
        });
    }

    member.mark_contributed(turn);
    group.turn_covered = group
        .turn_covered
        .checked_add(amount)
        .ok_or(AjoError::MathOverflow)?;
    group.total_pool = group
        .total_pool
        .checked_add(amount)
        .ok_or(AjoError::MathOverflow)?;

    emit!(ContributionMade {
        group_id: group.group_id,
        contributor: ctx.accounts.contributor.key(),
        turn_index: turn,
        amount,
    });

    Ok(())
}
