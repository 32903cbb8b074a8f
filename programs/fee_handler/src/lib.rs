use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

pub use state::{DistPartner, FeeConfig, FEE_BASE};

declare_id!("DrTdQtpMvAaAmHynepEsqctfMYi9amnfwHBb5dAhc8jo");

#[program]
pub mod fee_handler {
    use super::*;

    /// Creates the singleton fee schedule and names the protocol fee sink
    pub fn initialize(
        ctx: Context<InitializeFeeConfig>,
        fee_sink: Pubkey,
        match_fee: u64,
        exercise_fee: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, fee_sink, match_fee, exercise_fee)
    }

    pub fn set_fees(ctx: Context<UpdateFeeConfig>, match_fee: u64, exercise_fee: u64) -> Result<()> {
        instructions::update_config::set_fees(ctx, match_fee, exercise_fee)
    }

    pub fn set_fee_sink(ctx: Context<UpdateFeeConfig>, fee_sink: Pubkey) -> Result<()> {
        instructions::update_config::set_fee_sink(ctx, fee_sink)
    }

    pub fn transfer_authority(ctx: Context<UpdateFeeConfig>, new_authority: Pubkey) -> Result<()> {
        instructions::update_config::transfer_authority(ctx, new_authority)
    }

    /// Assigns (or re-assigns) the fee share a distribution partner earns on matches
    pub fn set_partner_share(
        ctx: Context<SetPartnerShare>,
        partner: Pubkey,
        fee_share: u64,
    ) -> Result<()> {
        instructions::set_partner_share::handler(ctx, partner, fee_share)
    }
}
