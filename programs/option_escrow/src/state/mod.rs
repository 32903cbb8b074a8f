pub mod borrow;
pub mod escrow;
pub mod option;
pub mod preview;
pub mod price_feed;
pub mod quote;
pub mod router;

pub use borrow::*;
pub use escrow::*;
pub use option::*;
pub use preview::*;
pub use price_feed::*;
pub use quote::*;
pub use router::*;
