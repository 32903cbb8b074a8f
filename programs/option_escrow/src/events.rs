use anchor_lang::prelude::*;

#[event]
pub struct RouterInitialized {
    pub admin: Pubkey,
    pub chain_id: u64,
}

#[event]
pub struct EscrowCreated {
    pub escrow: Pubkey,
    pub owner: Pubkey,
    pub index: u64,
    pub notional: u64,
    /// 0 = auction, 1 = rfq, 2 = direct mint
    pub path: u8,
}

#[event]
pub struct BidAccepted {
    pub escrow: Pubkey,
    pub bidder: Pubkey,
    pub option_receiver: Pubkey,
    pub rel_bid: u64,
    pub ref_spot: u64,
    pub strike: u64,
    pub premium: u64,
    pub protocol_fee: u64,
    pub partner_fee: u64,
    pub dist_partner: Option<Pubkey>,
}

#[event]
pub struct QuoteTaken {
    pub escrow: Pubkey,
    pub quoter: Pubkey,
    pub taker: Pubkey,
    pub premium: u64,
    pub protocol_fee: u64,
    pub partner_fee: u64,
    pub payload_hash: [u8; 32],
}

#[event]
pub struct OptionMinted {
    pub escrow: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Exercised {
    pub escrow: Pubkey,
    pub exerciser: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub settlement_amount: u64,
    pub pay_in_settlement: bool,
    pub fee: u64,
}

#[event]
pub struct Borrowed {
    pub escrow: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
    pub collateral_posted: u64,
    pub fee: u64,
}

#[event]
pub struct Repaid {
    pub escrow: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
    pub collateral_returned: u64,
}

#[event]
pub struct Withdrawn {
    pub escrow: Pubkey,
    pub owner: Pubkey,
    pub collateral_amount: u64,
    pub settlement_amount: u64,
    pub auction_cancelled: bool,
}

#[event]
pub struct Redeemed {
    pub escrow: Pubkey,
    pub owner: Pubkey,
    pub claims_burned: u64,
    pub collateral_amount: u64,
}

#[event]
pub struct SwapTaken {
    pub maker: Pubkey,
    pub taker: Pubkey,
    pub maker_gives: u64,
    pub taker_gives: u64,
    pub payload_hash: [u8; 32],
}

#[event]
pub struct FeeHandlerChanged {
    pub previous: Option<Pubkey>,
    pub fee_handler: Option<Pubkey>,
}

#[event]
pub struct OwnershipTransferred {
    /// Router address for admin transfers, escrow address for escrow transfers
    pub subject: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct QuotesPaused {
    pub quoter: Pubkey,
    pub paused: bool,
}

#[event]
pub struct QuoteDelegateChanged {
    pub quoter: Pubkey,
    pub previous: Option<Pubkey>,
    pub delegate: Option<Pubkey>,
}

#[event]
pub struct VotesDelegated {
    pub escrow: Pubkey,
    pub delegate: Pubkey,
    pub registry: Pubkey,
}
