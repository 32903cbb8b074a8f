use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::FeesUpdated;
use crate::state::{FeeConfig, FEE_CONFIG_SEED};

#[derive(Accounts)]
pub struct InitializeFeeConfig<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + FeeConfig::INIT_SPACE,
        seeds = [FEE_CONFIG_SEED],
        bump
    )]
    pub fee_config: Account<'info, FeeConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeFeeConfig>,
    fee_sink: Pubkey,
    match_fee: u64,
    exercise_fee: u64,
) -> Result<()> {
    require!(fee_sink != Pubkey::default(), ErrorCode::InvalidFeeSink);
    require!(FeeConfig::is_valid_rate(match_fee), ErrorCode::InvalidFee);
    require!(FeeConfig::is_valid_rate(exercise_fee), ErrorCode::InvalidFee);

    ctx.accounts.fee_config.set_inner(FeeConfig {
        authority: ctx.accounts.authority.key(),
        fee_sink,
        match_fee,
        exercise_fee,
        bump: ctx.bumps.fee_config,
    });

    emit!(FeesUpdated { match_fee, exercise_fee });
    msg!(
        "Fee config initialized: match fee {}, exercise fee {}, sink {}",
        match_fee,
        exercise_fee,
        fee_sink
    );

    Ok(())
}
