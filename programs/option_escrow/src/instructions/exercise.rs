use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use fee_handler::FeeConfig;

use crate::constants::{ESCROW_SEED, ROUTER_SEED};
use crate::errors::ErrorCode;
use crate::events::Exercised;
use crate::state::{Escrow, PriceFeed, Router};
use crate::utils::fees::{checked_fee_recipient, FeeSchedule};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::{burn_claims, transfer_tokens};

#[derive(Accounts)]
pub struct Exercise<'info> {
    #[account(mut)]
    pub exerciser: Signer<'info>,

    #[account(seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, router.key().as_ref(), escrow.index.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = router @ ErrorCode::UnknownEscrow,
        has_one = claim_mint,
        has_one = collateral_vault,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    #[account(mut)]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = claim_mint,
        token::authority = exerciser,
    )]
    pub exerciser_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = escrow.option_info.collateral_mint @ ErrorCode::InvalidTokenPair)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = escrow.option_info.settlement_mint @ ErrorCode::InvalidTokenPair)]
    pub settlement_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the exercised collateral; any holder of the collateral mint
    #[account(mut, token::mint = collateral_mint)]
    pub receiver_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pays the strike when settling in the settlement asset
    #[account(mut)]
    pub exerciser_settlement: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Escrow owner's settlement account, credited with the strike
    #[account(mut)]
    pub owner_settlement: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Escrow owner's collateral account, credited when settling net in collateral
    #[account(mut)]
    pub owner_collateral: Option<InterfaceAccount<'info, TokenAccount>>,

    pub price_feed: Option<Account<'info, PriceFeed>>,

    pub fee_config: Option<Account<'info, FeeConfig>>,

    #[account(mut)]
    pub fee_sink_settlement: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub fee_sink_collateral: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

fn checked_token_account<'a, 'info>(
    account: Option<&'a InterfaceAccount<'info, TokenAccount>>,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<&'a InterfaceAccount<'info, TokenAccount>> {
    let account = account.ok_or(ErrorCode::MissingTokenAccount)?;
    require_keys_eq!(account.owner, *owner, ErrorCode::Unauthorized);
    require_keys_eq!(account.mint, *mint, ErrorCode::InvalidTokenPair);
    Ok(account)
}

/// Exercises `amount` claims.
///
/// With `pay_in_settlement` the exerciser pays strike × amount (plus the
/// exercise fee) in the settlement asset and the receiver gets `amount`
/// collateral. Otherwise the strike is netted out of the collateral at the
/// oracle price and only the in-the-money remainder goes to the receiver.
pub fn handler(ctx: Context<Exercise>, amount: u64, pay_in_settlement: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let fees = FeeSchedule::resolve(&ctx.accounts.router, ctx.accounts.fee_config.as_ref(), None)?;

    // 1. Effects
    let escrow = &mut ctx.accounts.escrow;
    escrow.enter()?;
    let settlement_amount = escrow.exercise(amount, now)?;
    let fee = fees.exercise_fee_on(settlement_amount)?;
    let owner = escrow.owner;
    let info = escrow.option_info;

    let net = if pay_in_settlement {
        None
    } else {
        let oracle = info.advanced.oracle.ok_or(ErrorCode::InvalidOracle)?;
        let feed = ctx.accounts.price_feed.as_ref().ok_or(ErrorCode::InvalidOracle)?;
        require_keys_eq!(feed.key(), oracle, ErrorCode::InvalidOracle);
        require!(
            feed.prices(&info.collateral_mint, &info.settlement_mint),
            ErrorCode::InvalidOracle
        );
        let price = feed.price_at(now)?;
        Some(escrow.net_settle(amount, settlement_amount, fee, price)?)
    };
    ctx.accounts.escrow.exit(&crate::ID)?;

    // 2. Claims out of circulation
    let token_program = ctx.accounts.token_program.to_account_info();
    burn_claims(
        token_program.clone(),
        ctx.accounts.claim_mint.to_account_info(),
        ctx.accounts.exerciser_claims.to_account_info(),
        ctx.accounts.exerciser.to_account_info(),
        amount,
    )?;

    let seeds = EscrowSeeds::new(&ctx.accounts.escrow);
    let signer = seeds.signer();
    let escrow_info = ctx.accounts.escrow.to_account_info();

    // 3. Settlement
    let to_receiver = match net {
        None => {
            let settlement_mint = &ctx.accounts.settlement_mint;
            let exerciser_settlement = checked_token_account(
                ctx.accounts.exerciser_settlement.as_ref(),
                &ctx.accounts.exerciser.key(),
                &settlement_mint.key(),
            )?;
            let owner_settlement = checked_token_account(
                ctx.accounts.owner_settlement.as_ref(),
                &owner,
                &settlement_mint.key(),
            )?;
            transfer_tokens(
                token_program.clone(),
                exerciser_settlement.to_account_info(),
                owner_settlement.to_account_info(),
                settlement_mint,
                ctx.accounts.exerciser.to_account_info(),
                &[],
                settlement_amount,
            )?;
            if fee > 0 {
                let sink = checked_fee_recipient(
                    ctx.accounts.fee_sink_settlement.as_ref(),
                    fees.fee_sink,
                    &settlement_mint.key(),
                )?;
                transfer_tokens(
                    token_program.clone(),
                    exerciser_settlement.to_account_info(),
                    sink.to_account_info(),
                    settlement_mint,
                    ctx.accounts.exerciser.to_account_info(),
                    &[],
                    fee,
                )?;
            }
            amount
        }
        Some(split) => {
            let collateral_mint = &ctx.accounts.collateral_mint;
            let owner_collateral = checked_token_account(
                ctx.accounts.owner_collateral.as_ref(),
                &owner,
                &collateral_mint.key(),
            )?;
            transfer_tokens(
                token_program.clone(),
                ctx.accounts.collateral_vault.to_account_info(),
                owner_collateral.to_account_info(),
                collateral_mint,
                escrow_info.clone(),
                &[&signer[..]],
                split.to_owner,
            )?;
            if split.to_fee_sink > 0 {
                let sink = checked_fee_recipient(
                    ctx.accounts.fee_sink_collateral.as_ref(),
                    fees.fee_sink,
                    &collateral_mint.key(),
                )?;
                transfer_tokens(
                    token_program.clone(),
                    ctx.accounts.collateral_vault.to_account_info(),
                    sink.to_account_info(),
                    collateral_mint,
                    escrow_info.clone(),
                    &[&signer[..]],
                    split.to_fee_sink,
                )?;
            }
            split.to_receiver
        }
    };

    // 4. Collateral to the receiver
    transfer_tokens(
        token_program,
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.receiver_collateral.to_account_info(),
        &ctx.accounts.collateral_mint,
        escrow_info,
        &[&signer[..]],
        to_receiver,
    )?;

    emit!(Exercised {
        escrow: ctx.accounts.escrow.key(),
        exerciser: ctx.accounts.exerciser.key(),
        receiver: ctx.accounts.receiver_collateral.owner,
        amount,
        settlement_amount,
        pay_in_settlement,
        fee,
    });
    msg!(
        "Exercised {} claims. Strike payment: {}. Fee: {}. Remaining claims: {}",
        amount,
        settlement_amount,
        fee,
        ctx.accounts.escrow.claim_supply
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
