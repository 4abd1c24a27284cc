use anchor_lang::prelude::*;

use crate::state::GroupModel;

#[event]
pub struct PlatformInitialized {
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub fee_bps: u16,
}

#[event]
pub struct PlatformParamsUpdated {
    pub authority: Pubkey,
    /// Bitmask of the fields that changed (see ParamAudit field order).
    pub changed_fields: u16,
    pub timestamp: i64,
}

#[event]
pub struct GroupCreated {
    pub group_id: u64,
    pub creator: Pubkey,
    pub model: GroupModel,
    pub contribution_amount: u64,
    pub cycle_days: u16,
    pub member_cap: u8,
}

#[event]
pub struct MemberJoined {
    pub group_id: u64,
    pub member: Pubkey,
    pub stake_amount: u64,
    /// Position in the payout rotation.
    pub position: u8,
}

#[event]
pub struct ContributionMade {
    pub group_id: u64,
    pub contributor: Pubkey,
    pub turn_index: u8,
    pub amount: u64,
}

#[event]
pub struct GracePeriodStarted {
    pub group_id: u64,
    pub member: Pubkey,
    pub turn_index: u8,
    pub grace_until: i64,
}

#[event]
pub struct MemberSlashed {
    pub group_id: u64,
    pub member: Pubkey,
    pub turn_index: u8,
    pub slash_amount: u64,
    /// Group trust score after the penalty.
    pub trust_score: u8,
}

#[event]
pub struct PayoutReleased {
    pub group_id: u64,
    pub recipient: Pubkey,
    pub turn_index: u8,
    pub net_amount: u64,
    pub fee: u64,
}

#[event]
pub struct GroupFinalized {
    pub group_id: u64,
    pub final_trust_score: u8,
    /// Subscription rebate paid to the creator (0 unless trust_score >= 95).
    pub rebate: u64,
}

#[event]
pub struct StakeWithdrawn {
    pub group_id: u64,
    pub member: Pubkey,
    pub stake_returned: u64,
    pub bonus: u64,
}

#[event]
pub struct GroupPaused {
    pub group_id: u64,
}

#[event]
pub struct GroupResumed {
    pub group_id: u64,
}

#[event]
pub struct GroupCancelled {
    pub group_id: u64,
}
