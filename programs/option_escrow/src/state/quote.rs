use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::constants::{QUOTER_SEED, RFQ_DOMAIN, SWAP_DOMAIN};
use crate::errors::ErrorCode;
use crate::state::OptionInfo;

/// Signed offer to write an option for a premium
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RfqQuote {
    /// Gross premium the taker pays, in the option's premium asset
    pub premium: u64,
    pub valid_until: i64,
    /// Key that produced the ed25519 signature: the quoter or its delegate
    pub signer: Pubkey,
    /// Lets a quoter sign identical terms more than once
    pub salt: u64,
}

/// Signed offer to exchange `give_amount` of one token for `take_amount` of another
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub maker: Pubkey,
    pub give_mint: Pubkey,
    pub give_amount: u64,
    pub take_mint: Pubkey,
    pub take_amount: u64,
    pub valid_until: i64,
    pub signer: Pubkey,
    pub salt: u64,
}

impl SwapQuote {
    pub fn validate(&self) -> Result<()> {
        require!(self.give_mint != self.take_mint, ErrorCode::InvalidTokenPair);
        require!(
            self.give_amount > 0 && self.take_amount > 0,
            ErrorCode::InvalidAmount
        );
        Ok(())
    }
}

pub fn require_quote_live(valid_until: i64, now: i64) -> Result<()> {
    require!(now <= valid_until, ErrorCode::QuoteExpired);
    Ok(())
}

/// Canonical hash of an RFQ: chain, program, quoter and every economic term
pub fn rfq_payload_hash(
    chain_id: u64,
    quoter: &Pubkey,
    info: &OptionInfo,
    quote: &RfqQuote,
) -> [u8; 32] {
    let mut terms = Vec::with_capacity(256);
    info.write_terms(&mut terms);
    hashv(&[
        RFQ_DOMAIN,
        &chain_id.to_le_bytes(),
        crate::ID.as_ref(),
        quoter.as_ref(),
        terms.as_slice(),
        &quote.premium.to_le_bytes(),
        &quote.valid_until.to_le_bytes(),
        &quote.salt.to_le_bytes(),
    ])
    .to_bytes()
}

pub fn swap_payload_hash(chain_id: u64, quote: &SwapQuote) -> [u8; 32] {
    hashv(&[
        SWAP_DOMAIN,
        &chain_id.to_le_bytes(),
        crate::ID.as_ref(),
        quote.maker.as_ref(),
        quote.give_mint.as_ref(),
        &quote.give_amount.to_le_bytes(),
        quote.take_mint.as_ref(),
        &quote.take_amount.to_le_bytes(),
        &quote.valid_until.to_le_bytes(),
        &quote.salt.to_le_bytes(),
    ])
    .to_bytes()
}

/// Marker that a payload hash has been filled
///
/// PDA Seeds: "consumed_quote", payload_hash
#[account]
#[derive(InitSpace)]
pub struct ConsumedQuote {
    pub payload_hash: [u8; 32],
    pub consumed_by: Pubkey,
    pub consumed_at: i64,
    pub used: bool,
    pub bump: u8,
}

impl ConsumedQuote {
    /// Records the first fill of `payload_hash`; any later fill fails
    pub fn consume(&mut self, payload_hash: [u8; 32], taker: Pubkey, now: i64, bump: u8) -> Result<()> {
        require!(!self.used, ErrorCode::QuoteAlreadyUsed);
        self.payload_hash = payload_hash;
        self.consumed_by = taker;
        self.consumed_at = now;
        self.used = true;
        self.bump = bump;
        Ok(())
    }
}

/// Per-quoter settings: delegated signer and a kill switch for live quotes
///
/// PDA Seeds: "quoter", quoter
#[account]
#[derive(InitSpace)]
pub struct QuoterProfile {
    pub quoter: Pubkey,
    pub delegate: Option<Pubkey>,
    pub quotes_paused: bool,
    pub bump: u8,
}

impl QuoterProfile {
    /// Replaces the delegated signer, returning the one it replaces
    pub fn set_delegate(&mut self, delegate: Option<Pubkey>) -> Option<Pubkey> {
        std::mem::replace(&mut self.delegate, delegate)
    }

    /// Reads the profile at its PDA, if the quoter ever created one
    pub fn load(info: &AccountInfo, quoter: &Pubkey) -> Result<Option<QuoterProfile>> {
        let (expected, _) =
            Pubkey::find_program_address(&[QUOTER_SEED, quoter.as_ref()], &crate::ID);
        require_keys_eq!(*info.key, expected, ErrorCode::Unauthorized);
        if info.data_is_empty() {
            return Ok(None);
        }
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::Unauthorized);
        let data = info.try_borrow_data()?;
        let profile = QuoterProfile::try_deserialize(&mut &data[..])?;
        Ok(Some(profile))
    }

    /// Checks that `signer` may sign quotes for `quoter` right now
    pub fn authorize(profile: Option<&QuoterProfile>, quoter: &Pubkey, signer: &Pubkey) -> Result<()> {
        if let Some(profile) = profile {
            require!(!profile.quotes_paused, ErrorCode::QuotesPaused);
            if profile.delegate.as_ref() == Some(signer) {
                return Ok(());
            }
        }
        require_keys_eq!(*signer, *quoter, ErrorCode::InvalidSignature);
        Ok(())
    }
}
