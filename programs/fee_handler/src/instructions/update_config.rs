use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::{AuthorityTransferred, FeeSinkUpdated, FeesUpdated};
use crate::state::{FeeConfig, FEE_CONFIG_SEED};

#[derive(Accounts)]
pub struct UpdateFeeConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FEE_CONFIG_SEED],
        bump = fee_config.bump,
        has_one = authority @ ErrorCode::UnauthorizedAccess
    )]
    pub fee_config: Account<'info, FeeConfig>,
}

pub fn set_fees(ctx: Context<UpdateFeeConfig>, match_fee: u64, exercise_fee: u64) -> Result<()> {
    require!(FeeConfig::is_valid_rate(match_fee), ErrorCode::InvalidFee);
    require!(FeeConfig::is_valid_rate(exercise_fee), ErrorCode::InvalidFee);

    let fee_config = &mut ctx.accounts.fee_config;
    fee_config.match_fee = match_fee;
    fee_config.exercise_fee = exercise_fee;

    emit!(FeesUpdated { match_fee, exercise_fee });
    msg!("Fees updated: match {}, exercise {}", match_fee, exercise_fee);

    Ok(())
}

pub fn set_fee_sink(ctx: Context<UpdateFeeConfig>, fee_sink: Pubkey) -> Result<()> {
    require!(fee_sink != Pubkey::default(), ErrorCode::InvalidFeeSink);

    ctx.accounts.fee_config.fee_sink = fee_sink;

    emit!(FeeSinkUpdated { fee_sink });
    msg!("Fee sink set to {}", fee_sink);

    Ok(())
}

pub fn transfer_authority(ctx: Context<UpdateFeeConfig>, new_authority: Pubkey) -> Result<()> {
    require!(new_authority != Pubkey::default(), ErrorCode::UnauthorizedAccess);

    let fee_config = &mut ctx.accounts.fee_config;
    let previous = fee_config.authority;
    fee_config.authority = new_authority;

    emit!(AuthorityTransferred { previous, new_authority });
    msg!("Fee authority transferred {} -> {}", previous, new_authority);

    Ok(())
}
