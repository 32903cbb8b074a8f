use anchor_lang::prelude::*;
use fee_handler::{DistPartner, FeeConfig};

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::state::{BidPreview, Escrow, EscrowStatus, PriceFeed, Router};
use crate::utils::fees::FeeSchedule;

#[derive(Accounts)]
pub struct PreviewBid<'info> {
    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    pub price_feed: Box<Account<'info, PriceFeed>>,

    pub fee_config: Option<Account<'info, FeeConfig>>,

    pub dist_partner: Option<Account<'info, DistPartner>>,
}

/// Oracle spot for an open auction; zero when there is no auction to price
pub fn auction_oracle_spot(
    escrow: &Escrow,
    price_feed: &Account<PriceFeed>,
    now: i64,
) -> Result<u64> {
    let auction = match (escrow.status, escrow.auction.as_ref()) {
        (EscrowStatus::AuctionOpen, Some(auction)) => auction,
        _ => return Ok(0),
    };
    require_keys_eq!(price_feed.key(), auction.oracle, ErrorCode::InvalidOracle);
    let info = &escrow.option_info;
    require!(
        price_feed.prices(&info.collateral_mint, &info.settlement_mint),
        ErrorCode::InvalidOracle
    );
    price_feed.price_at(now)
}

/// Evaluates a bid without committing it. Rejections are reported in the
/// returned status rather than as errors.
pub fn handler(ctx: Context<PreviewBid>, rel_bid: u64, ref_spot: u64) -> Result<BidPreview> {
    let now = Clock::get()?.unix_timestamp;
    let fees = FeeSchedule::resolve(
        &ctx.accounts.router,
        ctx.accounts.fee_config.as_ref(),
        ctx.accounts.dist_partner.as_ref(),
    )?;

    let escrow = &ctx.accounts.escrow;
    let oracle_spot = auction_oracle_spot(escrow, &ctx.accounts.price_feed, now)?;
    escrow.preview_bid(rel_bid, ref_spot, oracle_spot, now, &fees)
}
