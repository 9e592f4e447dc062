pub mod math;
pub mod planner;
pub mod engine;

pub use planner::*;
pub use engine::*;
