use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::StakeWithdrawn;
use crate::state::{stake_bonus, Group, GroupStatus, Member, Platform};

#[derive(Accounts)]
pub struct WithdrawStake<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        seeds = [Group::SEED, group.group_id.to_le_bytes().as_ref()],
        bump = group.bump,
    )]
    pub group: Account<'info, Group>,

    #[account(
        mut,
        seeds = [Member::SEED, group.key().as_ref(), authority.key().as_ref()],
        bump = member.bump,
    )]
    pub member: Account<'info, Member>,

    #[account(
        mut,
        constraint = stake_vault.key() == group.stake_vault,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Bonus pool; funds the clean-completion stake bonus.
    #[account(
        mut,
        seeds = [Platform::BONUS_POOL_SEED],
        bump,
    )]
    pub bonus_pool_vault: Account<'info, TokenAccount>,

    /// Member's USDC token account.
    #[account(
        mut,
        constraint = member_token_account.owner == authority.key(),
    )]
    pub member_token_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<WithdrawStake>) -> Result<()> {
    let group = &ctx.accounts.group;
    let member = &ctx.accounts.member;

    // Stake stays at risk until the group reaches a terminal status.
    require!(group.status.is_terminal(), AjoError::StakeLocked);
    require!(member.stake_amount > 0, AjoError::NothingToWithdraw);

    let stake_returned = member.stake_amount;

    // A clean rotation earns the bonus; cancellation returns principal only.
    let earned_bonus = group.status == GroupStatus::Completed && member.missed_count == 0;
    let bonus = if earned_bonus {
        stake_bonus(stake_returned, ctx.accounts.platform.params.stake_bonus_bps)?
            .min(ctx.accounts.platform.bonus_pool)
    } else {
        0
    };

    let group_id_bytes = group.group_id.to_le_bytes();
    let group_bump = [group.bump];
    let group_seeds: &[&[&[u8]]] = &[&[Group::SEED, &group_id_bytes, &group_bump]];

    let transfer_stake = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.stake_vault.to_account_info(),
            to: ctx.accounts.member_token_account.to_account_info(),
            authority: ctx.accounts.group.to_account_info(),
        },
        group_seeds,
    );
    token::transfer(transfer_stake, stake_returned)?;

    if bonus > 0 {
        let platform_bump = [ctx.accounts.platform.bump];
        let platform_seeds: &[&[&[u8]]] = &[&[Platform::SEED, &platform_bump]];

        let transfer_bonus = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.bonus_pool_vault.to_account_info(),
                to: ctx.accounts.member_token_account.to_account_info(),
                authority: ctx.accounts.platform.to_account_info(),
            },
            platform_seeds,
        );
        token::transfer(transfer_bonus, bonus)?;
    }

    let platform = &mut ctx.accounts.platform;
    let member = &mut ctx.accounts.member;

    platform.bonus_pool = platform
        .bonus_pool
        .checked_sub(bonus)
        .ok_or(AjoError::MathOverflow)?;
    if earned_bonus {
        member.trust_delta = member
            .trust_delta
            .saturating_add(platform.params.trust_bonus as i16);
    }
    member.stake_amount = 0;

    emit!(StakeWithdrawn {
        group_id: ctx.accounts.group.group_id,
        member: member.authority,
        stake_returned,
        bonus,
    });

    Ok(())
}
