pub mod address;
pub mod schedule;

pub use address::*;
pub use schedule::*;
