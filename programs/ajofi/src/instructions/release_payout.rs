use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::PayoutReleased;
use crate::state::{Group, GroupStatus, Platform};

#[derive(Accounts)]
pub struct ReleasePayout<'info> {
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

    /// Escrow token account owned by the group PDA.
    #[account(
        mut,
        constraint = escrow_token_account.key() == group.escrow_token_account,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    /// The turn recipient's USDC token account; ownership is checked
    /// against the rotation in the handler.
    #[account(mut)]
    pub recipient_token_account: Account<'info, TokenAccount>,

    /// Creator's USDC token account for the Trust-tier fee share.
    #[account(
        mut,
        constraint = creator_token_account.owner == group.creator,
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    /// Treasury USDC token account for the platform's share.
    #[account(
        mut,
        constraint = treasury_token_account.owner == platform.treasury,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    /// Anyone can release a fully covered turn.
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ReleasePayout>, turn_index: u8) -> Result<()> {
    let group = &ctx.accounts.group;

    // Stale submissions name an old turn; only the current one is payable.
    require!(
        turn_index == group.current_turn_index,
        AjoError::WrongTurnIndex
    );
    require!(
        (turn_index as usize) < group.payout_order.len(),
        AjoError::RotationComplete
    );

    let due = group.due_amount()?;
    require!(
        group.turn_covered >= due,
        AjoError::InsufficientContributions
    );

    let recipient = group.payout_order[turn_index as usize];
    require!(
        ctx.accounts.recipient_token_account.owner == recipient,
        AjoError::WrongRecipient
    );

    let split = group.split_fee(due, ctx.accounts.platform.params.fee_bps)?;

    let group_id_bytes = group.group_id.to_le_bytes();
    let bump_bytes = [group.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[Group::SEED, &group_id_bytes, &bump_bytes]];

    // Net payout to the turn's recipient.
    let transfer_net = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.escrow_token_account.to_account_info(),
            to: ctx.accounts.recipient_token_account.to_account_info(),
            authority: ctx.accounts.group.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_net, split.net)?;

    // Trust tiers route most of the fee back to the creator.
    if split.creator_share > 0 {
        let transfer_creator = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow_token_account.to_account_info(),
                to: ctx.accounts.creator_token_account.to_account_info(),
                authority: ctx.accounts.group.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_creator, split.creator_share)?;
    }

    if split.treasury_share > 0 {
        let transfer_treasury = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow_token_account.to_account_info(),
                to: ctx.accounts.treasury_token_account.to_account_info(),
                authority: ctx.accounts.group.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_treasury, split.treasury_share)?;
    }

    let clock = Clock::get()?;
    let group = &mut ctx.accounts.group;

    // Excess cover (a slash beyond the due amount) carries into the next turn.
    group.turn_covered = group
        .turn_covered
        .checked_sub(due)
        .ok_or(AjoError::MathOverflow)?;
    group.total_pool = group
        .total_pool
        .checked_sub(due)
        .ok_or(AjoError::MathOverflow)?;
    group.current_turn_index = group
        .current_turn_index
        .checked_add(1)
        .ok_or(AjoError::MathOverflow)?;
    group.current_turn_start = clock.unix_timestamp;

    emit!(PayoutReleased {
        group_id: group.group_id,
        recipient,
        turn_index,
        net_amount: split.net,
        fee: split.fee,
    });

    Ok(())
}
