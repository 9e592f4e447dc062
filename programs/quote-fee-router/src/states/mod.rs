pub mod policy;
pub mod progress;
pub mod honorary_position;

pub use policy::*;
pub use progress::*;
pub use honorary_position::*;
