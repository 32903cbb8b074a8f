use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as instructions_sysvar;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{CONSUMED_QUOTE_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::SwapTaken;
use crate::state::{
    require_quote_live, swap_payload_hash, ConsumedQuote, QuoterProfile, Router, SwapQuote,
};
use crate::utils::pda::router_signer_seeds;
use crate::utils::signature::verify_ed25519_signature;
use crate::utils::transfer::transfer_tokens;

#[derive(Accounts)]
#[instruction(quote: SwapQuote, payload_hash: [u8; 32])]
pub struct TakeSwapQuote<'info> {
    #[account(mut)]
    pub taker: Signer<'info>,

    /// CHECK: bound to the signed quote
    #[account(address = quote.maker @ ErrorCode::Unauthorized)]
    pub maker: UncheckedAccount<'info>,

    /// CHECK: PDA ["quoter", maker]; may be empty, read by QuoterProfile::load
    pub quoter_profile: UncheckedAccount<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        init_if_needed,
        payer = taker,
        space = 8 + ConsumedQuote::INIT_SPACE,
        seeds = [CONSUMED_QUOTE_SEED, payload_hash.as_ref()],
        bump
    )]
    pub consumed_quote: Box<Account<'info, ConsumedQuote>>,

    #[account(address = quote.give_mint @ ErrorCode::InvalidTokenPair)]
    pub give_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = quote.take_mint @ ErrorCode::InvalidTokenPair)]
    pub take_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Maker's source; the router must be an approved delegate for `give_amount`
    #[account(
        mut,
        token::mint = give_mint,
        token::authority = maker,
    )]
    pub maker_give: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = maker_take.owner == maker.key() @ ErrorCode::Unauthorized,
        token::mint = take_mint,
    )]
    pub maker_take: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = give_mint)]
    pub taker_give: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = take_mint,
        token::authority = taker,
    )]
    pub taker_take: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: address pinned to the instructions sysvar
    #[account(address = instructions_sysvar::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Fills a maker's signed swap: the maker's `give_amount` goes to the taker,
/// the taker's `take_amount` goes to the maker. No fee is charged.
pub fn handler(ctx: Context<TakeSwapQuote>, quote: SwapQuote, payload_hash: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let maker = quote.maker;
    let taker = ctx.accounts.taker.key();

    quote.validate()?;
    require!(
        payload_hash == swap_payload_hash(ctx.accounts.router.chain_id, &quote),
        ErrorCode::InvalidPayloadHash
    );
    require_quote_live(quote.valid_until, now)?;
    let profile = QuoterProfile::load(&ctx.accounts.quoter_profile, &maker)?;
    QuoterProfile::authorize(profile.as_ref(), &maker, &quote.signer)?;
    verify_ed25519_signature(&ctx.accounts.instructions, &quote.signer, &payload_hash)?;
    ctx.accounts
        .consumed_quote
        .consume(payload_hash, taker, now, ctx.bumps.consumed_quote)?;

    let token_program = ctx.accounts.token_program.to_account_info();
    let router_bump = [ctx.accounts.router.bump];
    let router_seeds = router_signer_seeds(&router_bump);
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.maker_give.to_account_info(),
        ctx.accounts.taker_give.to_account_info(),
        &ctx.accounts.give_mint,
        ctx.accounts.router.to_account_info(),
        &[&router_seeds[..]],
        quote.give_amount,
    )?;
    transfer_tokens(
        token_program,
        ctx.accounts.taker_take.to_account_info(),
        ctx.accounts.maker_take.to_account_info(),
        &ctx.accounts.take_mint,
        ctx.accounts.taker.to_account_info(),
        &[],
        quote.take_amount,
    )?;

    emit!(SwapTaken {
        maker,
        taker,
        maker_gives: quote.give_amount,
        taker_gives: quote.take_amount,
        payload_hash,
    });
    msg!(
        "Swap filled: {} gave {} and {} gave {}",
        maker,
        quote.give_amount,
        taker,
        quote.take_amount
    );

    Ok(())
}
