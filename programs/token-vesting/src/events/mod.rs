pub mod vesting_claimed;
pub mod vesting_created;
pub mod vesting_revoked;

pub use vesting_claimed::*;
pub use vesting_created::*;
pub use vesting_revoked::*;
