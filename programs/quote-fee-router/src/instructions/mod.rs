pub mod init_policy;
pub use init_policy::*;

pub mod update_policy;
pub use update_policy::*;

pub mod init_honorary_position;
pub use init_honorary_position::*;

pub mod crank_distribute;
pub use crank_distribute::*;
