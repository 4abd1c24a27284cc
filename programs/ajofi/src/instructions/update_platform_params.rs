use anchor_lang::prelude::*;

use crate::errors::AjoError;
use crate::events::PlatformParamsUpdated;
use crate::state::{ParamAudit, Platform, PlatformParams};

#[derive(Accounts)]
pub struct UpdatePlatformParams<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ AjoError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    /// Append-only audit entry, seeded by the running update count.
    #[account(
        init,
        payer = authority,
        space = 8 + ParamAudit::INIT_SPACE,
        seeds = [ParamAudit::SEED, platform.param_updates.to_le_bytes().as_ref()],
        bump,
    )]
    pub audit: Account<'info, ParamAudit>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<UpdatePlatformParams>, params: PlatformParams) -> Result<()> {
    params.validate()?;

    let clock = Clock::get()?;
    let platform = &mut ctx.accounts.platform;

    let changed_fields = platform.params.diff_mask(&params);
    let index = platform.param_updates;
    platform.params = params;
    platform.param_updates = index.checked_add(1).ok_or(AjoError::MathOverflow)?;

    let audit = &mut ctx.accounts.audit;
    audit.index = index;
    audit.authority = ctx.accounts.authority.key();
    audit.timestamp = clock.unix_timestamp;
    audit.changed_fields = changed_fields;
    audit.params = params;

    emit!(PlatformParamsUpdated {
        authority: ctx.accounts.authority.key(),
        changed_fields,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
