use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::PRICE_FEED_SEED;
use crate::errors::ErrorCode;
use crate::state::PriceFeed;

#[derive(Accounts)]
pub struct InitializePriceFeed<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Collateral side of the pair
    pub base_mint: InterfaceAccount<'info, Mint>,

    /// Settlement side of the pair
    pub quote_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = 8 + PriceFeed::INIT_SPACE,
        seeds = [
            PRICE_FEED_SEED,
            base_mint.key().as_ref(),
            quote_mint.key().as_ref(),
            authority.key().as_ref()
        ],
        bump
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdatePriceFeed<'info> {
    pub authority: Signer<'info>,

    #[account(mut, has_one = authority @ ErrorCode::Unauthorized)]
    pub price_feed: Account<'info, PriceFeed>,
}

pub fn initialize(ctx: Context<InitializePriceFeed>, max_age: i64) -> Result<()> {
    require!(max_age > 0, ErrorCode::InvalidOracle);
    require!(
        ctx.accounts.base_mint.key() != ctx.accounts.quote_mint.key(),
        ErrorCode::InvalidTokenPair
    );

    let feed = &mut ctx.accounts.price_feed;
    feed.authority = ctx.accounts.authority.key();
    feed.base_mint = ctx.accounts.base_mint.key();
    feed.quote_mint = ctx.accounts.quote_mint.key();
    feed.price = 0;
    feed.publish_time = 0;
    feed.max_age = max_age;
    feed.bump = ctx.bumps.price_feed;

    msg!(
        "Price feed {}/{} created, max age {}s",
        feed.base_mint,
        feed.quote_mint,
        max_age
    );
    Ok(())
}

pub fn update(ctx: Context<UpdatePriceFeed>, price: u64) -> Result<()> {
    require!(price > 0, ErrorCode::PriceUnavailable);
    let feed = &mut ctx.accounts.price_feed;
    feed.price = price;
    feed.publish_time = Clock::get()?.unix_timestamp;
    msg!("Price feed {} updated to {}", feed.key(), price);
    Ok(())
}
