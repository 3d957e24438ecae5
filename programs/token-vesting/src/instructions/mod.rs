pub mod claim;
pub mod create_vesting;
pub mod estimate_claimable;
pub mod get_schedule;
pub mod revoke;

pub use claim::*;
pub use create_vesting::*;
pub use estimate_claimable::*;
pub use get_schedule::*;
pub use revoke::*;
