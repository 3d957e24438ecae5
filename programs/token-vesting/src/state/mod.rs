pub mod vesting_schedule;

pub use vesting_schedule::*;
