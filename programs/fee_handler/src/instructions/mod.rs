pub mod initialize;
pub mod set_partner_share;
pub mod update_config;

#[allow(ambiguous_glob_reexports)]
pub use initialize::*;
#[allow(ambiguous_glob_reexports)]
pub use set_partner_share::*;
pub use update_config::*;
