//! Domain entities

mod mission;
mod region;

pub use mission::Mission;
pub use region::Region;
