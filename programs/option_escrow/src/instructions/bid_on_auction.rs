use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use fee_handler::{DistPartner, FeeConfig};

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::{BidAccepted, OptionMinted};
use crate::instructions::preview_bid::auction_oracle_spot;
use crate::state::{Escrow, PriceFeed, Router};
use crate::utils::fees::{checked_fee_recipient, FeeSchedule};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::{mint_claims, transfer_tokens};

#[derive(Accounts)]
pub struct BidOnAuction<'info> {
    #[account(mut)]
    pub bidder: Signer<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
        has_one = claim_mint,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    /// CHECK: any wallet may receive the claims; only used as the ATA authority
    pub option_receiver: UncheckedAccount<'info>,

    #[account(mut)]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = bidder,
        associated_token::mint = claim_mint,
        associated_token::authority = option_receiver,
        associated_token::token_program = token_program,
    )]
    pub receiver_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = escrow.option_info.premium_mint() @ ErrorCode::InvalidTokenPair)]
    pub premium_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = premium_mint,
        token::authority = bidder,
    )]
    pub bidder_premium: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = premium_mint,
        constraint = owner_premium.owner == escrow.owner @ ErrorCode::Unauthorized,
    )]
    pub owner_premium: Box<InterfaceAccount<'info, TokenAccount>>,

    pub price_feed: Box<Account<'info, PriceFeed>>,

    pub fee_config: Option<Account<'info, FeeConfig>>,

    pub dist_partner: Option<Account<'info, DistPartner>>,

    #[account(mut)]
    pub fee_sink_premium: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub partner_premium: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Matches the open auction at the bidder's relative premium and mints the
/// claims to `option_receiver` in the same instruction
pub fn handler(ctx: Context<BidOnAuction>, rel_bid: u64, ref_spot: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let fees = FeeSchedule::resolve(
        &ctx.accounts.router,
        ctx.accounts.fee_config.as_ref(),
        ctx.accounts.dist_partner.as_ref(),
    )?;

    // 1. Re-run the preview and commit it
    let oracle_spot = auction_oracle_spot(&ctx.accounts.escrow, &ctx.accounts.price_feed, now)?;
    let escrow = &mut ctx.accounts.escrow;
    escrow.enter()?;
    let preview = escrow.preview_bid(rel_bid, ref_spot, oracle_spot, now, &fees)?;
    escrow.apply_bid(&preview)?;
    let claims = escrow.mint_option()?;
    let net_premium = preview.net_premium()?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    // 2. Premium: net to the escrow owner, fees to sink and partner
    let token_program = ctx.accounts.token_program.to_account_info();
    let bidder = ctx.accounts.bidder.to_account_info();
    let premium_mint = &ctx.accounts.premium_mint;

    transfer_tokens(
        token_program.clone(),
        ctx.accounts.bidder_premium.to_account_info(),
        ctx.accounts.owner_premium.to_account_info(),
        premium_mint,
        bidder.clone(),
        &[],
        net_premium,
    )?;

    if preview.protocol_fee > 0 {
        let sink = checked_fee_recipient(
            ctx.accounts.fee_sink_premium.as_ref(),
            fees.fee_sink,
            &premium_mint.key(),
        )?;
        transfer_tokens(
            token_program.clone(),
            ctx.accounts.bidder_premium.to_account_info(),
            sink.to_account_info(),
            premium_mint,
            bidder.clone(),
            &[],
            preview.protocol_fee,
        )?;
    }

    if preview.partner_fee > 0 {
        let partner = checked_fee_recipient(
            ctx.accounts.partner_premium.as_ref(),
            fees.partner,
            &premium_mint.key(),
        )?;
        transfer_tokens(
            token_program.clone(),
            ctx.accounts.bidder_premium.to_account_info(),
            partner.to_account_info(),
            premium_mint,
            bidder,
            &[],
            preview.partner_fee,
        )?;
    }

    // 3. Claims 1:1 with notional to the option receiver
    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    mint_claims(
        token_program,
        ctx.accounts.claim_mint.to_account_info(),
        ctx.accounts.receiver_claims.to_account_info(),
        ctx.accounts.escrow.to_account_info(),
        &[&signer[..]],
        claims,
    )?;

    let escrow_key = ctx.accounts.escrow.key();
    emit!(BidAccepted {
        escrow: escrow_key,
        bidder: ctx.accounts.bidder.key(),
        option_receiver: ctx.accounts.option_receiver.key(),
        rel_bid,
        ref_spot,
        strike: preview.strike,
        premium: preview.premium,
        protocol_fee: preview.protocol_fee,
        partner_fee: preview.partner_fee,
        dist_partner: fees.partner,
    });
    emit!(OptionMinted {
        escrow: escrow_key,
        receiver: ctx.accounts.option_receiver.key(),
        amount: claims,
    });
    msg!(
        "Bid accepted on {}: strike {}, premium {} (fees {} + {}), {} claims minted",
        escrow_key,
        preview.strike,
        preview.premium,
        preview.protocol_fee,
        preview.partner_fee,
        claims
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
