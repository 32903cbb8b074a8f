use anchor_lang::prelude::*;

use instructions::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

// Instruction argument types, re-exported at crate root for Anchor's macro expansion
pub use state::{
    AdvancedSettings, AuctionInit, AuctionParams, BidPreview, BidStatus, OptionInfo, RfqQuote,
    SwapQuote,
};

declare_id!("EB1MP8XuqLpYVS58XSQRSu565KbgWijviz7tdHwNHhsr");

#[program]
pub mod option_escrow {
    use super::*;

    /// Creates the singleton router (escrow registry, chain id, fee handler slot)
    pub fn initialize_router(ctx: Context<InitializeRouter>, chain_id: u64) -> Result<()> {
        instructions::initialize_router::handler(ctx, chain_id)
    }

    /// Points the router at a fee_handler FeeConfig, or clears it when none is passed
    pub fn set_fee_handler(ctx: Context<SetFeeHandler>) -> Result<()> {
        instructions::admin::set_fee_handler(ctx)
    }

    pub fn propose_admin(ctx: Context<RouterAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::propose_admin(ctx, new_admin)
    }

    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::admin::accept_admin(ctx)
    }

    /// CreateAuction: new escrow + vaults + claim mint, notional pulled, Dutch auction opened
    pub fn create_auction(ctx: Context<CreateAuction>, init: AuctionInit) -> Result<()> {
        instructions::create_auction::handler(ctx, init)
    }

    /// PreviewBid: what a bid would match at right now, without committing it
    pub fn preview_bid(ctx: Context<PreviewBid>, rel_bid: u64, ref_spot: u64) -> Result<BidPreview> {
        instructions::preview_bid::handler(ctx, rel_bid, ref_spot)
    }

    /// BidOnAuction: match the auction, pay premium + fees, mint claims to the receiver
    pub fn bid_on_auction(ctx: Context<BidOnAuction>, rel_bid: u64, ref_spot: u64) -> Result<()> {
        instructions::bid_on_auction::handler(ctx, rel_bid, ref_spot)
    }

    /// TakeQuote: fill a signed RFQ, writing a new escrow from the quoter's collateral
    pub fn take_quote(
        ctx: Context<TakeQuote>,
        info: OptionInfo,
        quote: RfqQuote,
        payload_hash: [u8; 32],
    ) -> Result<()> {
        instructions::take_quote::handler(ctx, info, quote, payload_hash)
    }

    /// MintOption: write an option with fixed terms straight to a receiver
    pub fn mint_option(ctx: Context<MintOption>, info: OptionInfo) -> Result<()> {
        instructions::mint_option::handler(ctx, info)
    }

    /// Exercise: burn claims, pay strike (or net it out of collateral) → receive collateral
    pub fn exercise(ctx: Context<Exercise>, amount: u64, pay_in_settlement: bool) -> Result<()> {
        instructions::exercise::handler(ctx, amount, pay_in_settlement)
    }

    /// Borrow: burn claims, post strike in settlement tokens → receive collateral
    pub fn borrow(ctx: Context<BorrowCollateral>, amount: u64) -> Result<()> {
        instructions::borrow::handler(ctx, amount)
    }

    /// Repay: return collateral → get posted settlement tokens and claims back
    pub fn repay(ctx: Context<RepayBorrow>, amount: u64) -> Result<()> {
        instructions::repay::handler(ctx, amount)
    }

    /// Withdraw: owner cancels an open auction or sweeps an expired escrow
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Redeem: owner burns held claims for a pro-rata share of collateral
    pub fn redeem(ctx: Context<Redeem>) -> Result<()> {
        instructions::redeem::handler(ctx)
    }

    pub fn take_swap_quote(
        ctx: Context<TakeSwapQuote>,
        quote: SwapQuote,
        payload_hash: [u8; 32],
    ) -> Result<()> {
        instructions::take_swap_quote::handler(ctx, quote, payload_hash)
    }

    pub fn set_quote_delegate(ctx: Context<QuoterSettings>, delegate: Option<Pubkey>) -> Result<()> {
        instructions::quoter::set_delegate(ctx, delegate)
    }

    pub fn set_quotes_paused(ctx: Context<QuoterSettings>, paused: bool) -> Result<()> {
        instructions::quoter::set_paused(ctx, paused)
    }

    pub fn transfer_escrow_ownership(ctx: Context<EscrowOwner>, new_owner: Pubkey) -> Result<()> {
        instructions::escrow_admin::transfer_ownership(ctx, new_owner)
    }

    pub fn delegate_votes(ctx: Context<EscrowOwner>, delegate: Pubkey) -> Result<()> {
        instructions::escrow_admin::delegate_votes(ctx, delegate)
    }

    /// Paginated registry read, at most 30 addresses per call
    pub fn escrows_in_range(ctx: Context<RegistryView>, from: u64, count: u64) -> Result<Vec<Pubkey>> {
        instructions::registry::escrows_in_range(ctx, from, count)
    }

    pub fn initialize_price_feed(ctx: Context<InitializePriceFeed>, max_age: i64) -> Result<()> {
        instructions::price_feed::initialize(ctx, max_age)
    }

    pub fn update_price_feed(ctx: Context<UpdatePriceFeed>, price: u64) -> Result<()> {
        instructions::price_feed::update(ctx, price)
    }
}
