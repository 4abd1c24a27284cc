pub mod cancel_group;
pub mod contribute;
pub mod create_group;
pub mod enforce_turn_deadline;
pub mod finalize_group;
pub mod initialize_platform;
pub mod join_group;
pub mod release_payout;
pub mod set_group_paused;
pub mod update_platform_params;
pub mod withdraw_stake;

pub use cancel_group::*;
pub use contribute::*;
pub use create_group::*;
pub use enforce_turn_deadline::*;
pub use finalize_group::*;
pub use initialize_platform::*;
pub use join_group::*;
pub use release_payout::*;
pub use set_group_paused::*;
pub use update_platform_params::*;
pub use withdraw_stake::*;
