/// Fixed-point base for every relative value (1.0)
pub const BASE: u64 = 1_000_000_000;

/// Protocol-wide ceiling on the match fee, whatever the fee handler reports (20%)
pub const MAX_MATCH_FEE: u64 = BASE / 5;

/// Protocol-wide ceiling on the exercise and borrow fee (0.5%)
pub const MAX_EXERCISE_FEE: u64 = BASE / 200;

/// Minimum gap between earliest exercise and expiry
pub const MIN_EXERCISE_WINDOW: i64 = 86_400;

/// Largest page `escrows_in_range` can return within the 1 KiB return-data limit
pub const MAX_REGISTRY_PAGE: u64 = 30;

pub const ROUTER_SEED: &[u8] = b"router";
pub const ESCROW_SEED: &[u8] = b"escrow";
pub const CLAIM_MINT_SEED: &[u8] = b"claim_mint";
pub const COLLATERAL_VAULT_SEED: &[u8] = b"collateral_vault";
pub const SETTLEMENT_VAULT_SEED: &[u8] = b"settlement_vault";
pub const BORROW_SEED: &[u8] = b"borrow";
pub const CONSUMED_QUOTE_SEED: &[u8] = b"consumed_quote";
pub const QUOTER_SEED: &[u8] = b"quoter";
pub const PRICE_FEED_SEED: &[u8] = b"price_feed";

/// Domain tags mixed into quote payload hashes
pub const RFQ_DOMAIN: &[u8] = b"option_escrow:rfq";
pub const SWAP_DOMAIN: &[u8] = b"option_escrow:swap";
