pub mod dist_partner;
pub mod fee_config;

pub use dist_partner::*;
pub use fee_config::*;
