use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::{GracePeriodStarted, MemberSlashed};
use crate::state::{Group, GroupStatus, Member, Platform, TurnStanding};

/// Permissionless tick. There is no scheduler on-chain, so grace and slash
/// transitions happen whenever anyone calls this against a member who is
/// past the current turn's deadline. Re-invoking on a resolved turn is a
/// no-op.
#[derive(Accounts)]
pub struct EnforceTurnDeadline<'info> {
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

    /// The member being checked (not necessarily the caller).
    #[account(
        mut,
        seeds = [Member::SEED, group.key().as_ref(), member.authority.as_ref()],
        bump = member.bump,
    )]
    pub member: Account<'info, Member>,

    #[account(
        mut,
        constraint = stake_vault.key() == group.stake_vault,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Escrow token account owned by the group PDA.
    #[account(
        mut,
        constraint = escrow_token_account.key() == group.escrow_token_account,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    /// Anyone can trigger enforcement.
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EnforceTurnDeadline>) -> Result<()> {
    let group = &ctx.accounts.group;
    let member = &ctx.accounts.member;

    let turn = group.current_turn_index;
    require!(
        (turn as usize) < group.payout_order.len(),
        AjoError::RotationComplete
    );

    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let deadline = group.turn_deadline();
    let grace_until = group.grace_deadline(ctx.accounts.platform.params.grace_period_days);
    let trust_penalty = ctx.accounts.platform.params.trust_penalty;

    match member.turn_standing(turn, now, deadline, grace_until) {
        TurnStanding::Resolved | TurnStanding::OnTime => {
            msg!("Nothing to enforce for turn {}", turn);
            Ok(())
        }
        TurnStanding::GracePending => {
            let group_id = group.group_id;
            let member = &mut ctx.accounts.member;
            if !member.grace_started(turn) {
                member.mark_grace_started(turn);
                emit!(GracePeriodStarted {
                    group_id,
                    member: member.authority,
                    turn_index: turn,
                    grace_until,
                });
            }
            Ok(())
        }
        TurnStanding::SlashDue => {
            // Debit what the stake can cover. Basic members post no stake,
            // so the miss is recorded but the turn stays uncovered.
            let slash_amount = member.stake_amount.min(group.contribution_amount);
            if slash_amount > 0 {
                let group_id_bytes = group.group_id.to_le_bytes();
                let bump_bytes = [group.bump];
                let signer_seeds: &[&[&[u8]]] =
                    &[&[Group::SEED, &group_id_bytes, &bump_bytes]];

                let transfer_ctx = CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.stake_vault.to_account_info(),
                        to: ctx.accounts.escrow_token_account.to_account_info(),
                        authority: ctx.accounts.group.to_account_info(),
                    },
                    signer_seeds,
                );
                token::transfer(transfer_ctx, slash_amount)?;
            }

            let group = &mut ctx.accounts.group;
            let member = &mut ctx.accounts.member;

            member.stake_amount = member
                .stake_amount
                .checked_sub(slash_amount)
                .ok_or(AjoError::MathOverflow)?;
            member.record_slash(turn, trust_penalty);
            group.apply_trust_penalty(trust_penalty);
            group.turn_covered = group
                .turn_covered
                .checked_add(slash_amount)
                .ok_or(AjoError::MathOverflow)?;
            group.total_pool = group
                .total_pool
                .checked_add(slash_amount)
                .ok_or(AjoError::MathOverflow)?;

            emit!(MemberSlashed {
                group_id: group.group_id,
                member: member.authority,
                turn_index: turn,
                slash_amount,
                trust_score: group.trust_score,
            });

            Ok(())
        }
    }
}
