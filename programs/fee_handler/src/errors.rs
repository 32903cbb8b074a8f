use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Fee rate must not exceed 100%")]
    InvalidFee,

    #[msg("Fee sink cannot be the default pubkey")]
    InvalidFeeSink,

    #[msg("Partner cannot be the default pubkey")]
    InvalidPartner,

    #[msg("Unauthorized access")]
    UnauthorizedAccess,

    #[msg("Math overflow")]
    MathOverflow,
}
