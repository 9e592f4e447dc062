pub mod cp_amm;
pub mod treasury;
pub mod locked_weight;

pub use cp_amm::*;
pub use treasury::*;
pub use locked_weight::*;
