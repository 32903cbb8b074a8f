use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as instructions_sysvar;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use fee_handler::{DistPartner, FeeConfig};

use crate::constants::{
    CLAIM_MINT_SEED, COLLATERAL_VAULT_SEED, CONSUMED_QUOTE_SEED, ESCROW_SEED, ROUTER_SEED,
    SETTLEMENT_VAULT_SEED,
};
use crate::errors::ErrorCode;
use crate::events::{EscrowCreated, OptionMinted, QuoteTaken};
use crate::state::{
    require_quote_live, rfq_payload_hash, ConsumedQuote, Escrow, EscrowKeys, OptionInfo,
    QuoterProfile, RfqQuote, Router,
};
use crate::utils::fees::{checked_fee_recipient, FeeSchedule};
use crate::utils::pda::{router_signer_seeds, EscrowSeeds};
use crate::utils::signature::verify_ed25519_signature;
use crate::utils::transfer::{mint_claims, transfer_tokens};

/// Fills a quoter's signed RFQ: the quoter writes the option, the taker buys it
#[derive(Accounts)]
#[instruction(info: OptionInfo, quote: RfqQuote, payload_hash: [u8; 32])]
pub struct TakeQuote<'info> {
    #[account(mut)]
    pub taker: Signer<'info>,

    /// CHECK: bound to the signed payload hash; becomes the escrow owner
    pub quoter: UncheckedAccount<'info>,

    /// CHECK: PDA ["quoter", quoter]; may be empty, read by QuoterProfile::load
    pub quoter_profile: UncheckedAccount<'info>,

    #[account(mut, seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        init_if_needed,
        payer = taker,
        space = 8 + ConsumedQuote::INIT_SPACE,
        seeds = [CONSUMED_QUOTE_SEED, payload_hash.as_ref()],
        bump
    )]
    pub consumed_quote: Box<Account<'info, ConsumedQuote>>,

    #[account(
        init,
        payer = taker,
        space = 8 + Escrow::INIT_SPACE,
        seeds = [
            ESCROW_SEED,
            router.key().as_ref(),
            router.num_escrows.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(
        address = info.collateral_mint @ ErrorCode::InvalidTokenPair,
        mint::token_program = token_program,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        address = info.settlement_mint @ ErrorCode::InvalidTokenPair,
        mint::token_program = token_program,
    )]
    pub settlement_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = taker,
        seeds = [CLAIM_MINT_SEED, escrow.key().as_ref()],
        bump,
        mint::decimals = collateral_mint.decimals,
        mint::authority = escrow,
        mint::token_program = token_program,
    )]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = taker,
        seeds = [COLLATERAL_VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = taker,
        seeds = [SETTLEMENT_VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = settlement_mint,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub settlement_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Quoter's collateral; the router must be an approved delegate for the notional
    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = quoter,
    )]
    pub quoter_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = quoter_premium.owner == quoter.key() @ ErrorCode::Unauthorized,
        constraint = quoter_premium.mint == info.premium_mint() @ ErrorCode::InvalidTokenPair,
    )]
    pub quoter_premium: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = taker_premium.owner == taker.key() @ ErrorCode::Unauthorized,
        constraint = taker_premium.mint == info.premium_mint() @ ErrorCode::InvalidTokenPair,
    )]
    pub taker_premium: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = claim_mint,
        associated_token::authority = taker,
        associated_token::token_program = token_program,
    )]
    pub taker_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    pub fee_config: Option<Account<'info, FeeConfig>>,

    pub dist_partner: Option<Account<'info, DistPartner>>,

    #[account(mut)]
    pub fee_sink_premium: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub partner_premium: Option<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: address pinned to the instructions sysvar
    #[account(address = instructions_sysvar::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<TakeQuote>,
    info: OptionInfo,
    quote: RfqQuote,
    payload_hash: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let quoter = ctx.accounts.quoter.key();
    let taker = ctx.accounts.taker.key();

    // 1. Quote admission: hash, expiry, signer authority, signature, replay
    require!(
        payload_hash == rfq_payload_hash(ctx.accounts.router.chain_id, &quoter, &info, &quote),
        ErrorCode::InvalidPayloadHash
    );
    require_quote_live(quote.valid_until, now)?;
    let profile = QuoterProfile::load(&ctx.accounts.quoter_profile, &quoter)?;
    QuoterProfile::authorize(profile.as_ref(), &quoter, &quote.signer)?;
    verify_ed25519_signature(&ctx.accounts.instructions, &quote.signer, &payload_hash)?;
    ctx.accounts
        .consumed_quote
        .consume(payload_hash, taker, now, ctx.bumps.consumed_quote)?;

    let fees = FeeSchedule::resolve(
        &ctx.accounts.router,
        ctx.accounts.fee_config.as_ref(),
        ctx.accounts.dist_partner.as_ref(),
    )?;
    let split = fees.match_fees(quote.premium)?;
    let net_premium = quote
        .premium
        .checked_sub(split.total())
        .ok_or(ErrorCode::FeesExceedPremium)?;

    // 2. Register the escrow and mint straight through Matched
    let router_key = ctx.accounts.router.key();
    let escrow_key = ctx.accounts.escrow.key();
    let index = ctx.accounts.router.next_index()?;

    let escrow = &mut ctx.accounts.escrow;
    escrow.register(EscrowKeys {
        router: router_key,
        owner: quoter,
        index,
        bump: ctx.bumps.escrow,
        claim_mint: ctx.accounts.claim_mint.key(),
        collateral_vault: ctx.accounts.collateral_vault.key(),
        settlement_vault: ctx.accounts.settlement_vault.key(),
        collateral_decimals: ctx.accounts.collateral_mint.decimals,
        settlement_decimals: ctx.accounts.settlement_mint.decimals,
    })?;
    escrow.enter()?;
    escrow.initialize_match(info, now)?;
    escrow.premium_paid = quote.premium;
    let claims = escrow.mint_option()?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    // 3. Collateral from the quoter through the router's delegation
    let token_program = ctx.accounts.token_program.to_account_info();
    let router_bump = [ctx.accounts.router.bump];
    let router_seeds = router_signer_seeds(&router_bump);
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.quoter_collateral.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        &ctx.accounts.collateral_mint,
        ctx.accounts.router.to_account_info(),
        &[&router_seeds[..]],
        info.notional,
    )?;

    // 4. Premium from the taker
    let premium_mint = if info.advanced.premium_in_collateral {
        &ctx.accounts.collateral_mint
    } else {
        &ctx.accounts.settlement_mint
    };
    let taker_info = ctx.accounts.taker.to_account_info();
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.taker_premium.to_account_info(),
        ctx.accounts.quoter_premium.to_account_info(),
        premium_mint,
        taker_info.clone(),
        &[],
        net_premium,
    )?;
    if split.protocol > 0 {
        let sink = checked_fee_recipient(
            ctx.accounts.fee_sink_premium.as_ref(),
            fees.fee_sink,
            &premium_mint.key(),
        )?;
        transfer_tokens(
            token_program.clone(),
            ctx.accounts.taker_premium.to_account_info(),
            sink.to_account_info(),
            premium_mint,
            taker_info.clone(),
            &[],
            split.protocol,
        )?;
    }
    if split.partner > 0 {
        let partner = checked_fee_recipient(
            ctx.accounts.partner_premium.as_ref(),
            fees.partner,
            &premium_mint.key(),
        )?;
        transfer_tokens(
            token_program.clone(),
            ctx.accounts.taker_premium.to_account_info(),
            partner.to_account_info(),
            premium_mint,
            taker_info,
            &[],
            split.partner,
        )?;
    }

    // 5. Claims to the taker
    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    mint_claims(
        token_program,
        ctx.accounts.claim_mint.to_account_info(),
        ctx.accounts.taker_claims.to_account_info(),
        ctx.accounts.escrow.to_account_info(),
        &[&signer[..]],
        claims,
    )?;

    emit!(EscrowCreated {
        escrow: escrow_key,
        owner: quoter,
        index,
        notional: info.notional,
        path: 1,
    });
    emit!(QuoteTaken {
        escrow: escrow_key,
        quoter,
        taker,
        premium: quote.premium,
        protocol_fee: split.protocol,
        partner_fee: split.partner,
        payload_hash,
    });
    emit!(OptionMinted {
        escrow: escrow_key,
        receiver: taker,
        amount: claims,
    });
    msg!(
        "Quote taken: escrow #{} written by {} for {}, premium {} (fees {})",
        index,
        quoter,
        taker,
        quote.premium,
        split.total()
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
