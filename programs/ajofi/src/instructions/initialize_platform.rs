use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::events::PlatformInitialized;
use crate::state::{Platform, PlatformParams};

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Platform::INIT_SPACE,
        seeds = [Platform::SEED],
        bump,
    )]
    pub platform: Account<'info, Platform>,

    /// Vault holding subscription revenue, paying stake bonuses and rebates.
    #[account(
        init,
        payer = authority,
        seeds = [Platform::BONUS_POOL_SEED],
        bump,
        token::mint = usdc_mint,
        token::authority = platform,
    )]
    pub bonus_pool_vault: Account<'info, TokenAccount>,

    /// Settlement mint (USDC, 6 decimals).
    pub usdc_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Treasury wallet that receives platform fees.
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<InitializePlatform>, params: PlatformParams) -> Result<()> {
    params.validate()?;

    let platform = &mut ctx.accounts.platform;
    platform.authority = ctx.accounts.authority.key();
    platform.treasury = ctx.accounts.treasury.key();
    platform.usdc_mint = ctx.accounts.usdc_mint.key();
    platform.params = params;
    platform.active_basic_groups = 0;
    platform.bonus_pool = 0;
    platform.total_groups = 0;
    platform.param_updates = 0;
    platform.bump = ctx.bumps.platform;

    emit!(PlatformInitialized {
        authority: platform.authority,
        treasury: platform.treasury,
        fee_bps: params.fee_bps,
    });

    Ok(())
}
