use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::PartnerShareUpdated;
use crate::state::{DistPartner, FeeConfig, DIST_PARTNER_SEED, FEE_CONFIG_SEED};

#[derive(Accounts)]
#[instruction(partner: Pubkey)]
pub struct SetPartnerShare<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [FEE_CONFIG_SEED],
        bump = fee_config.bump,
        has_one = authority @ ErrorCode::UnauthorizedAccess
    )]
    pub fee_config: Account<'info, FeeConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + DistPartner::INIT_SPACE,
        seeds = [DIST_PARTNER_SEED, partner.as_ref()],
        bump
    )]
    pub dist_partner: Account<'info, DistPartner>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SetPartnerShare>, partner: Pubkey, fee_share: u64) -> Result<()> {
    require!(partner != Pubkey::default(), ErrorCode::InvalidPartner);

    let dist_partner = &mut ctx.accounts.dist_partner;
    dist_partner.partner = partner;
    dist_partner.fee_share = fee_share;
    dist_partner.bump = ctx.bumps.dist_partner;

    emit!(PartnerShareUpdated { partner, fee_share });
    msg!(
        "Partner {} fee share set to {} (effective {})",
        partner,
        fee_share,
        dist_partner.capped_share()
    );

    Ok(())
}
