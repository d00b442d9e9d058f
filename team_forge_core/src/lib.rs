pub mod distribute;
pub mod export;
pub mod import;
pub mod roster;

pub use distribute::TeamDistributor;
pub use roster::{Roster, StudentRecord};
