use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Outcome of evaluating a bid without committing it
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BidStatus {
    Success,
    OptionAlreadyMinted,
    AuctionCancelled,
    NoOpenAuction,
    PremiumTooLow,
    SpotPriceTooLow,
    OutOfRangeSpotPrice,
}

impl BidStatus {
    /// Converts a preview status into the error a committing call fails with
    pub fn into_result(self) -> Result<()> {
        let code = match self {
            BidStatus::Success => return Ok(()),
            BidStatus::OptionAlreadyMinted => ErrorCode::OptionAlreadyMinted,
            BidStatus::AuctionCancelled => ErrorCode::AuctionCancelled,
            BidStatus::NoOpenAuction => ErrorCode::NoOpenAuction,
            BidStatus::PremiumTooLow => ErrorCode::PremiumTooLow,
            BidStatus::SpotPriceTooLow => ErrorCode::SpotPriceTooLow,
            BidStatus::OutOfRangeSpotPrice => ErrorCode::OutOfRangeSpotPrice,
        };
        Err(code.into())
    }
}

/// Terms a bid would match at, returned by `preview_bid`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidPreview {
    pub status: BidStatus,
    pub current_ask: u64,
    pub oracle_spot: u64,
    pub strike: u64,
    pub expiry: i64,
    pub earliest_exercise: i64,
    /// Gross premium paid by the bidder, fees included
    pub premium: u64,
    pub protocol_fee: u64,
    pub partner_fee: u64,
}

impl BidPreview {
    pub fn rejected(status: BidStatus, current_ask: u64, oracle_spot: u64) -> Self {
        Self {
            status,
            current_ask,
            oracle_spot,
            strike: 0,
            expiry: 0,
            earliest_exercise: 0,
            premium: 0,
            protocol_fee: 0,
            partner_fee: 0,
        }
    }

    /// Premium left for the escrow owner once fees are taken out
    pub fn net_premium(&self) -> Result<u64> {
        self.premium
            .checked_sub(self.protocol_fee)
            .and_then(|rest| rest.checked_sub(self.partner_fee))
            .ok_or_else(|| error!(ErrorCode::FeesExceedPremium))
    }
}
