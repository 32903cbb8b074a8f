use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{
    CLAIM_MINT_SEED, COLLATERAL_VAULT_SEED, ESCROW_SEED, ROUTER_SEED, SETTLEMENT_VAULT_SEED,
};
use crate::errors::ErrorCode;
use crate::events::{EscrowCreated, OptionMinted};
use crate::state::{Escrow, EscrowKeys, OptionInfo, Router};
use crate::utils::pda::EscrowSeeds;
use crate::utils::transfer::{mint_claims, transfer_tokens};

/// Writes an option with fixed terms directly, no auction or quote involved
#[derive(Accounts)]
#[instruction(info: OptionInfo)]
pub struct MintOption<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [ROUTER_SEED], bump = router.bump)]
    pub router: Box<Account<'info, Router>>,

    #[account(
        init,
        payer = owner,
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
        payer = owner,
        seeds = [CLAIM_MINT_SEED, escrow.key().as_ref()],
        bump,
        mint::decimals = collateral_mint.decimals,
        mint::authority = escrow,
        mint::token_program = token_program,
    )]
    pub claim_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        seeds = [COLLATERAL_VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [SETTLEMENT_VAULT_SEED, escrow.key().as_ref()],
        bump,
        token::mint = settlement_mint,
        token::authority = escrow,
        token::token_program = token_program,
    )]
    pub settlement_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = owner,
    )]
    pub owner_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: any wallet may receive the claims; only used as the ATA authority
    pub receiver: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = claim_mint,
        associated_token::authority = receiver,
        associated_token::token_program = token_program,
    )]
    pub receiver_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<MintOption>, info: OptionInfo) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let router_key = ctx.accounts.router.key();
    let escrow_key = ctx.accounts.escrow.key();
    let owner = ctx.accounts.owner.key();
    let index = ctx.accounts.router.next_index()?;

    let escrow = &mut ctx.accounts.escrow;
    escrow.register(EscrowKeys {
        router: router_key,
        owner,
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
    let claims = escrow.mint_option()?;
    ctx.accounts.escrow.exit(&crate::ID)?;

    let token_program = ctx.accounts.token_program.to_account_info();
    transfer_tokens(
        token_program.clone(),
        ctx.accounts.owner_collateral.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        &ctx.accounts.collateral_mint,
        ctx.accounts.owner.to_account_info(),
        &[],
        info.notional,
    )?;

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

    emit!(EscrowCreated {
        escrow: escrow_key,
        owner,
        index,
        notional: info.notional,
        path: 2,
    });
    emit!(OptionMinted {
        escrow: escrow_key,
        receiver: ctx.accounts.receiver.key(),
        amount: claims,
    });
    msg!(
        "Minted {} claims on escrow #{} @ strike {}, expiring {}",
        claims,
        index,
        info.strike,
        info.expiry
    );

    ctx.accounts.escrow.leave();
    Ok(())
}
