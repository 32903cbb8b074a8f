use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Configuration
    #[msg("Collateral and settlement assets must differ")]
    InvalidTokenPair,

    #[msg("Notional must be greater than zero")]
    InvalidNotional,

    #[msg("Strike price must be greater than zero")]
    InvalidStrikePrice,

    #[msg("Expiration must be in the future")]
    ExpirationInPast,

    #[msg("Earliest exercise must be at least one day before expiry")]
    InvalidEarliestExercise,

    #[msg("Tenor must be positive and leave a one day exercise window")]
    InvalidTenor,

    #[msg("Relative strike must be greater than zero")]
    InvalidRelativeStrike,

    #[msg("Premium start must exceed premium floor, which must be positive")]
    InvalidPremiumRange,

    #[msg("Decay duration must be greater than zero")]
    InvalidDecayDuration,

    #[msg("Spot band must satisfy 0 < min spot < max spot")]
    InvalidSpotBand,

    #[msg("Oracle reference is missing or does not price this pair")]
    InvalidOracle,

    #[msg("Borrow cap must not exceed 100%")]
    InvalidBorrowCap,

    #[msg("Fee handler account does not match the router configuration")]
    FeeHandlerMismatch,

    #[msg("Fee recipient account is missing or has the wrong owner or mint")]
    InvalidFeeAccount,

    #[msg("A token account required by this settlement mode was not provided")]
    MissingTokenAccount,

    // Admission
    #[msg("Bid is below the current auction ask")]
    PremiumTooLow,

    #[msg("Oracle spot price is above the reference spot price")]
    SpotPriceTooLow,

    #[msg("Reference spot price is outside the accepted band")]
    OutOfRangeSpotPrice,

    #[msg("Quote has expired")]
    QuoteExpired,

    #[msg("Quote has already been used")]
    QuoteAlreadyUsed,

    #[msg("Quotes from this signer are paused")]
    QuotesPaused,

    #[msg("Payload hash does not match the quote terms")]
    InvalidPayloadHash,

    #[msg("Signature is missing, malformed or signed by an unauthorized key")]
    InvalidSignature,

    #[msg("Caller is not the expected actor for this action")]
    Unauthorized,

    #[msg("Fees would exceed the premium")]
    FeesExceedPremium,

    #[msg("Oracle price is stale")]
    StalePrice,

    #[msg("Oracle has no price available")]
    PriceUnavailable,

    // Timing
    #[msg("Option cannot be exercised before its earliest exercise time")]
    ExerciseNotStarted,

    #[msg("Option has expired")]
    OptionExpired,

    #[msg("Option has not expired yet")]
    OptionNotExpired,

    // Amounts
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Amount exceeds remaining claim supply")]
    ExceedsClaimSupply,

    #[msg("Borrow would exceed the borrow cap")]
    ExceedsBorrowCap,

    #[msg("Repay amount exceeds outstanding borrow")]
    ExceedsOutstandingBorrow,

    #[msg("Option is not in the money at the oracle price")]
    OptionNotInTheMoney,

    #[msg("Math operation overflow")]
    MathOverflow,

    #[msg("Registry range is empty or out of bounds")]
    InvalidRange,

    // State
    #[msg("Escrow is already initialized")]
    AlreadyInitialized,

    #[msg("Option has already been minted")]
    OptionAlreadyMinted,

    #[msg("Auction has been cancelled")]
    AuctionCancelled,

    #[msg("Escrow has no open auction")]
    NoOpenAuction,

    #[msg("No option has been minted on this escrow")]
    NoOptionMinted,

    #[msg("Escrow has no matched terms to mint")]
    NotMatched,

    #[msg("Nothing to repay")]
    NothingToRepay,

    #[msg("Nothing to redeem")]
    NothingToRedeem,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    #[msg("Escrow has been settled by its owner")]
    EscrowSettled,

    #[msg("Escrow is not tracked by this router")]
    UnknownEscrow,

    #[msg("Escrow is already executing an operation")]
    Reentrancy,

    #[msg("Voting delegation is not enabled for this escrow")]
    VotingDelegationNotAllowed,

    #[msg("No admin transfer is pending for this signer")]
    NoPendingAdmin,

    #[msg("Delegate registry account does not match the escrow's configured registry")]
    InvalidDelegateRegistry,
}
