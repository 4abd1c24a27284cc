use anchor_lang::prelude::*;

/// Per-creator registry row backing the per-creator Basic group limit.
#[account]
#[derive(InitSpace)]
pub struct CreatorStats {
    /// Wallet these stats belong to.
    pub authority: Pubkey,
    /// Live count of this creator's active Basic groups.
    pub active_basic_groups: u8,
    /// Lifetime groups created, any model.
    pub groups_created: u32,
    /// Lifetime groups that reached Completed.
    pub groups_completed: u32,
    pub created_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl CreatorStats {
    pub const SEED: &'static [u8] = b"creator";
}
