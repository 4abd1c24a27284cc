use anchor_lang::prelude::*;

#[error_code]
pub enum AjoError {
    // ── Validation ──────────────────────────────────────────────
    #[msg("Fee basis points must be between 0 and 2500 (25%).")]
    InvalidFeeBps,
    #[msg("Stake bonus basis points must not exceed 10000.")]
    InvalidBonusBps,
    #[msg("Trust penalty and bonus must be between 1 and 100.")]
    InvalidTrustDelta,
    #[msg("Platform limits must be greater than zero.")]
    InvalidLimit,
    #[msg("Grace period must be at least one day.")]
    InvalidGracePeriod,
    #[msg("Cycle length is outside the bounds for this group model.")]
    InvalidCycleDays,
    #[msg("Member cap is outside the bounds for this group model.")]
    InvalidMemberCap,
    #[msg("Contribution amount must be greater than zero.")]
    InvalidContributionAmount,
    #[msg("Contribution must equal the group's fixed amount exactly.")]
    WrongContributionAmount,
    #[msg("Turn index does not match the group's current turn.")]
    WrongTurnIndex,
    #[msg("Contribution amount exceeds the KYC threshold for Basic groups.")]
    KycThresholdExceeded,
    #[msg("Token account does not belong to this turn's recipient.")]
    WrongRecipient,

    // ── Authorization ───────────────────────────────────────────
    #[msg("Only the platform authority can perform this action.")]
    Unauthorized,
    #[msg("Signer is not a member of this group.")]
    NotAMember,

    // ── State ───────────────────────────────────────────────────
    #[msg("Group is not in Active status.")]
    GroupNotActive,
    #[msg("Group is not in Paused status.")]
    GroupNotPaused,
    #[msg("Group has already been completed or cancelled.")]
    GroupAlreadyResolved,
    #[msg("All payout turns must be released before finalization.")]
    GroupNotFinished,
    #[msg("Every payout turn has already been released.")]
    RotationComplete,
    #[msg("Members can no longer join once the first payout has been released.")]
    RotationStarted,
    #[msg("This turn has already been contributed to or resolved by a slash.")]
    AlreadyContributed,
    #[msg("The grace window for this turn has closed.")]
    ContributionWindowClosed,
    #[msg("Stake is locked until the group is completed or cancelled.")]
    StakeLocked,
    #[msg("No stake remains to withdraw.")]
    NothingToWithdraw,

    // ── Funds ───────────────────────────────────────────────────
    #[msg("Contributions and slashes do not yet cover this turn's payout.")]
    InsufficientContributions,

    // ── Limits ──────────────────────────────────────────────────
    #[msg("The platform-wide cap on active Basic groups has been reached.")]
    BasicGroupLimitExceeded,
    #[msg("This creator already has the maximum number of active Basic groups.")]
    CreatorBasicGroupLimitExceeded,
    #[msg("Group has reached its member cap.")]
    GroupFull,

    // ── Arithmetic ──────────────────────────────────────────────
    #[msg("Arithmetic overflow.")]
    MathOverflow,
}
