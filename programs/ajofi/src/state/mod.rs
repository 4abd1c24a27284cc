pub mod creator_stats;
pub mod group;
pub mod member;
pub mod platform;

pub use creator_stats::*;
pub use group::*;
pub use member::*;
pub use platform::*;
