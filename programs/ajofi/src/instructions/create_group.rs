use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::errors::AjoError;
use crate::events::GroupCreated;
use crate::state::{CreatorStats, Group, GroupModel, GroupStatus, Platform};

#[derive(Accounts)]
pub struct CreateGroup<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init_if_needed,
        payer = creator,
        space = 8 + CreatorStats::INIT_SPACE,
        seeds = [CreatorStats::SEED, creator.key().as_ref()],
        bump,
    )]
    pub creator_stats: Account<'info, CreatorStats>,

    #[account(
        init,
        payer = creator,
        space = 8 + Group::INIT_SPACE,
        seeds = [Group::SEED, (platform.total_groups + 1).to_le_bytes().as_ref()],
        bump,
    )]
    pub group: Account<'info, Group>,

    /// The escrow token account owned by the group PDA.
    #[account(
        init,
        payer = creator,
        associated_token::mint = usdc_mint,
        associated_token::authority = group,
    )]
    pub escrow_token_account: Account<'info, TokenAccount>,

    /// Collateral vault owned by the group PDA. Unused for Basic groups.
    #[account(
        init,
        payer = creator,
        seeds = [Group::STAKE_VAULT_SEED, group.key().as_ref()],
        bump,
        token::mint = usdc_mint,
        token::authority = group,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Subscription revenue vault.
    #[account(
        mut,
        seeds = [Platform::BONUS_POOL_SEED],
        bump,
    )]
    pub bonus_pool_vault: Account<'info, TokenAccount>,

    #[account(address = platform.usdc_mint)]
    pub usdc_mint: Account<'info, Mint>,

    #[account(mut)]
    pub creator: Signer<'info>,

    /// Creator's USDC token account; pays the subscription for Trust tiers.
    #[account(
        mut,
        constraint = creator_token_account.owner == creator.key(),
        constraint = creator_token_account.mint == platform.usdc_mint,
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<CreateGroup>,
    model: GroupModel,
    cycle_days: Option<u16>,
    member_cap: Option<u8>,
    contribution_amount: u64,
) -> Result<()> {
    require!(contribution_amount > 0, AjoError::InvalidContributionAmount);
    let (cycle_days, member_cap) = model.resolve_config(cycle_days, member_cap)?;

    let clock = Clock::get()?;
    let platform = &mut ctx.accounts.platform;
    let stats = &mut ctx.accounts.creator_stats;

    // First group from this wallet: fill in the fresh stats row.
    if stats.authority == Pubkey::default() {
        stats.authority = ctx.accounts.creator.key();
        stats.created_at = clock.unix_timestamp;
        stats.bump = ctx.bumps.creator_stats;
    }

    if model == GroupModel::Basic {
        // Unverified tier: amount-capped and gated by both live counters.
        require!(
            contribution_amount <= platform.params.kyc_threshold,
            AjoError::KycThresholdExceeded
        );
        platform.check_basic_capacity(stats.active_basic_groups)?;
        platform.active_basic_groups = platform
            .active_basic_groups
            .checked_add(1)
            .ok_or(AjoError::MathOverflow)?;
        stats.active_basic_groups = stats
            .active_basic_groups
            .checked_add(1)
            .ok_or(AjoError::MathOverflow)?;
    }

    // Trust tiers pay their subscription into the bonus pool.
    let subscription = model.subscription_price(&platform.params);
    if subscription > 0 {
        let transfer_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.creator_token_account.to_account_info(),
                to: ctx.accounts.bonus_pool_vault.to_account_info(),
                authority: ctx.accounts.creator.to_account_info(),
            },
        );
        token::transfer(transfer_ctx, subscription)?;
        platform.bonus_pool = platform
            .bonus_pool
            .checked_add(subscription)
            .ok_or(AjoError::MathOverflow)?;
    }

    let group_id = platform
        .total_groups
        .checked_add(1)
        .ok_or(AjoError::MathOverflow)?;
    platform.total_groups = group_id;
    stats.groups_created = stats
        .groups_created
        .checked_add(1)
        .ok_or(AjoError::MathOverflow)?;

    let group = &mut ctx.accounts.group;
    group.group_id = group_id;
    group.model = model;
    group.creator = ctx.accounts.creator.key();
    group.member_cap = member_cap;
    group.cycle_days = cycle_days;
    group.contribution_amount = contribution_amount;
    group.payout_order = Vec::new();
    group.member_count = 0;
    group.current_turn_index = 0;
    group.current_turn_start = clock.unix_timestamp;
    group.turn_covered = 0;
    group.total_pool = 0;
    group.trust_score = 100;
    group.subscription_paid = subscription;
    group.status = GroupStatus::Active;
    group.escrow_token_account = ctx.accounts.escrow_token_account.key();
    group.stake_vault = ctx.accounts.stake_vault.key();
    group.created_at = clock.unix_timestamp;
    group.bump = ctx.bumps.group;

    emit!(GroupCreated {
        group_id,
        creator: group.creator,
        model,
        contribution_amount,
        cycle_days,
        member_cap,
    });

    Ok(())
}
