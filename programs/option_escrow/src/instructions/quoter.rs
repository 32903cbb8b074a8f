use anchor_lang::prelude::*;

use crate::constants::QUOTER_SEED;
use crate::events::{QuoteDelegateChanged, QuotesPaused};
use crate::state::QuoterProfile;

#[derive(Accounts)]
pub struct QuoterSettings<'info> {
    #[account(mut)]
    pub quoter: Signer<'info>,

    #[account(
        init_if_needed,
        payer = quoter,
        space = 8 + QuoterProfile::INIT_SPACE,
        seeds = [QUOTER_SEED, quoter.key().as_ref()],
        bump
    )]
    pub quoter_profile: Account<'info, QuoterProfile>,

    pub system_program: Program<'info, System>,
}

impl<'info> QuoterSettings<'info> {
    fn bind(&mut self, bump: u8) {
        self.quoter_profile.quoter = self.quoter.key();
        self.quoter_profile.bump = bump;
    }
}

/// Lets `delegate` sign RFQ and swap quotes on the quoter's behalf (or revokes it)
pub fn set_delegate(ctx: Context<QuoterSettings>, delegate: Option<Pubkey>) -> Result<()> {
    ctx.accounts.bind(ctx.bumps.quoter_profile);
    let previous = ctx.accounts.quoter_profile.set_delegate(delegate);

    emit!(QuoteDelegateChanged {
        quoter: ctx.accounts.quoter.key(),
        previous,
        delegate,
    });
    msg!("Quote delegate for {} set to {:?}", ctx.accounts.quoter.key(), delegate);
    Ok(())
}

/// Blocks (or unblocks) every outstanding quote signed for this quoter
pub fn set_paused(ctx: Context<QuoterSettings>, paused: bool) -> Result<()> {
    ctx.accounts.bind(ctx.bumps.quoter_profile);
    ctx.accounts.quoter_profile.quotes_paused = paused;

    emit!(QuotesPaused {
        quoter: ctx.accounts.quoter.key(),
        paused,
    });
    msg!("Quotes for {} paused: {}", ctx.accounts.quoter.key(), paused);
    Ok(())
}
