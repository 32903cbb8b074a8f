pub mod admin;
pub mod bid_on_auction;
pub mod borrow;
pub mod create_auction;
pub mod escrow_admin;
pub mod exercise;
pub mod initialize_router;
pub mod mint_option;
pub mod preview_bid;
pub mod price_feed;
pub mod quoter;
pub mod redeem;
pub mod registry;
pub mod repay;
pub mod take_quote;
pub mod take_swap_quote;
pub mod withdraw;

// Glob re-exports bring every Accounts struct into scope for #[program].
// Handlers share names across modules and are called through their module path.
#[allow(ambiguous_glob_reexports)]
pub use admin::*;
#[allow(ambiguous_glob_reexports)]
pub use bid_on_auction::*;
#[allow(ambiguous_glob_reexports)]
pub use borrow::*;
#[allow(ambiguous_glob_reexports)]
pub use create_auction::*;
#[allow(ambiguous_glob_reexports)]
pub use escrow_admin::*;
#[allow(ambiguous_glob_reexports)]
pub use exercise::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_router::*;
#[allow(ambiguous_glob_reexports)]
pub use mint_option::*;
#[allow(ambiguous_glob_reexports)]
pub use preview_bid::*;
#[allow(ambiguous_glob_reexports)]
pub use price_feed::*;
#[allow(ambiguous_glob_reexports)]
pub use quoter::*;
#[allow(ambiguous_glob_reexports)]
pub use redeem::*;
#[allow(ambiguous_glob_reexports)]
pub use registry::*;
#[allow(ambiguous_glob_reexports)]
pub use repay::*;
#[allow(ambiguous_glob_reexports)]
pub use take_quote::*;
#[allow(ambiguous_glob_reexports)]
pub use take_swap_quote::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw::*;
