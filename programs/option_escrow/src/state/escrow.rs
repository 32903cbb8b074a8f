use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::{AdvancedSettings, AuctionParams, BidPreview, BidStatus, OptionInfo};
use crate::utils::fees::FeeSchedule;
use crate::utils::math::{
    calculate_premium, calculate_pro_rata_share, calculate_strike, calculate_strike_payment,
    settlement_to_collateral,
};
use crate::utils::validation::{
    validate_advanced, validate_amount, validate_auction_params, validate_exercise_window,
    validate_option_info,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum EscrowStatus {
    #[default]
    Uninitialized,
    AuctionOpen,
    Matched,
    OptionMinted,
    AuctionCancelled,
}

/// Lifecycle phase derived from the stored status and the current time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscrowPhase {
    Uninitialized,
    AuctionOpen,
    AuctionCancelled,
    Matched,
    Live,
    Expired,
}

/// Auction terms supplied by the escrow owner at creation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionInit {
    pub notional: u64,
    pub params: AuctionParams,
    pub advanced: AdvancedSettings,
}

/// Addresses and decimals fixed when the escrow account is created
#[derive(Clone, Copy, Debug)]
pub struct EscrowKeys {
    pub router: Pubkey,
    pub owner: Pubkey,
    pub index: u64,
    pub bump: u8,
    pub claim_mint: Pubkey,
    pub collateral_vault: Pubkey,
    pub settlement_vault: Pubkey,
    pub collateral_decimals: u8,
    pub settlement_decimals: u8,
}

/// What an owner withdrawal does, depending on the escrow phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawKind {
    /// Open auction closed before any bid: all collateral goes back
    CancelAuction,
    /// Option expired: remaining collateral and unclaimed borrow collateral go back
    Sweep,
}

/// Collateral split of a net-settled exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetSettlement {
    pub to_owner: u64,
    pub to_fee_sink: u64,
    pub to_receiver: u64,
}

/// One covered-option escrow
///
/// PDA Seeds: "escrow", router, index (u64 LE)
///
/// Holds collateral in `collateral_vault` and posted borrow collateral in
/// `settlement_vault`, both owned by this PDA. `claim_supply` tracks the
/// outstanding claim tokens, and the collateral vault never holds less.
#[account]
#[derive(InitSpace)]
pub struct Escrow {
    pub router: Pubkey,
    pub owner: Pubkey,
    pub index: u64,
    pub bump: u8,

    pub claim_mint: Pubkey,
    pub collateral_vault: Pubkey,
    pub settlement_vault: Pubkey,
    pub collateral_decimals: u8,
    pub settlement_decimals: u8,

    pub status: EscrowStatus,
    pub option_info: OptionInfo,
    pub auction: Option<AuctionParams>,

    pub claim_supply: u64,
    /// Collateral currently lent out across every borrower
    pub total_borrowed: u64,
    /// Settlement tokens posted by borrowers and not yet returned
    pub borrow_collateral: u64,
    pub premium_paid: u64,
    /// Set by the post-expiry sweep; nothing moves afterwards
    pub settled: bool,
    pub vote_delegate: Option<Pubkey>,
    pub in_progress: bool,
}

impl Escrow {
    pub fn register(&mut self, keys: EscrowKeys) -> Result<()> {
        require!(
            self.status == EscrowStatus::Uninitialized && self.router == Pubkey::default(),
            ErrorCode::AlreadyInitialized
        );
        self.router = keys.router;
        self.owner = keys.owner;
        self.index = keys.index;
        self.bump = keys.bump;
        self.claim_mint = keys.claim_mint;
        self.collateral_vault = keys.collateral_vault;
        self.settlement_vault = keys.settlement_vault;
        self.collateral_decimals = keys.collateral_decimals;
        self.settlement_decimals = keys.settlement_decimals;
        Ok(())
    }

    /// Marks the escrow busy for the rest of the instruction
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.in_progress, ErrorCode::Reentrancy);
        self.in_progress = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.in_progress = false;
    }

    pub fn phase(&self, now: i64) -> EscrowPhase {
        match self.status {
            EscrowStatus::Uninitialized => EscrowPhase::Uninitialized,
            EscrowStatus::AuctionOpen => EscrowPhase::AuctionOpen,
            EscrowStatus::AuctionCancelled => EscrowPhase::AuctionCancelled,
            EscrowStatus::Matched => EscrowPhase::Matched,
            EscrowStatus::OptionMinted if now > self.option_info.expiry => EscrowPhase::Expired,
            EscrowStatus::OptionMinted => EscrowPhase::Live,
        }
    }

    pub fn is_option_minted(&self) -> bool {
        self.status == EscrowStatus::OptionMinted
    }

    fn require_uninitialized(&self) -> Result<()> {
        match self.status {
            EscrowStatus::Uninitialized => Ok(()),
            EscrowStatus::OptionMinted => err!(ErrorCode::OptionAlreadyMinted),
            _ => err!(ErrorCode::AlreadyInitialized),
        }
    }

    fn require_minted(&self) -> Result<()> {
        require!(self.is_option_minted(), ErrorCode::NoOptionMinted);
        Ok(())
    }

    /// Opens a Dutch auction. Strike and expiry are fixed at the winning bid.
    pub fn initialize_auction(
        &mut self,
        collateral_mint: Pubkey,
        settlement_mint: Pubkey,
        init: &AuctionInit,
    ) -> Result<()> {
        self.require_uninitialized()?;
        require!(collateral_mint != settlement_mint, ErrorCode::InvalidTokenPair);
        require!(init.notional > 0, ErrorCode::InvalidNotional);
        validate_auction_params(&init.params)?;
        validate_advanced(&init.advanced)?;

        let mut advanced = init.advanced;
        if advanced.oracle.is_none() {
            advanced.oracle = Some(init.params.oracle);
        }

        self.option_info = OptionInfo {
            collateral_mint,
            settlement_mint,
            notional: init.notional,
            strike: 0,
            expiry: 0,
            earliest_exercise: 0,
            advanced,
        };
        self.auction = Some(init.params);
        self.status = EscrowStatus::AuctionOpen;
        Ok(())
    }

    /// Fixes absolute terms for the RFQ and direct-mint paths
    pub fn initialize_match(&mut self, info: OptionInfo, now: i64) -> Result<()> {
        self.require_uninitialized()?;
        validate_option_info(&info, now)?;
        self.option_info = info;
        self.status = EscrowStatus::Matched;
        Ok(())
    }

    /// Evaluates a bid against the open auction without changing anything.
    ///
    /// Rejections come back as a status; only arithmetic failures are errors.
    pub fn preview_bid(
        &self,
        rel_bid: u64,
        ref_spot: u64,
        oracle_spot: u64,
        now: i64,
        fees: &FeeSchedule,
    ) -> Result<BidPreview> {
        let status = match self.status {
            EscrowStatus::OptionMinted | EscrowStatus::Matched => Some(BidStatus::OptionAlreadyMinted),
            EscrowStatus::AuctionCancelled => Some(BidStatus::AuctionCancelled),
            EscrowStatus::Uninitialized => Some(BidStatus::NoOpenAuction),
            EscrowStatus::AuctionOpen => None,
        };
        let auction = match (status, self.auction.as_ref()) {
            (Some(status), _) => return Ok(BidPreview::rejected(status, 0, oracle_spot)),
            (None, None) => return Ok(BidPreview::rejected(BidStatus::NoOpenAuction, 0, oracle_spot)),
            (None, Some(auction)) => auction,
        };

        let current_ask = auction.current_ask(now);
        if rel_bid < current_ask {
            return Ok(BidPreview::rejected(BidStatus::PremiumTooLow, current_ask, oracle_spot));
        }
        if oracle_spot > ref_spot {
            return Ok(BidPreview::rejected(BidStatus::SpotPriceTooLow, current_ask, oracle_spot));
        }
        if !auction.spot_in_range(ref_spot) {
            return Ok(BidPreview::rejected(
                BidStatus::OutOfRangeSpotPrice,
                current_ask,
                oracle_spot,
            ));
        }

        let strike = calculate_strike(auction.rel_strike, ref_spot)?;
        require!(strike > 0, ErrorCode::InvalidStrikePrice);

        let info = &self.option_info;
        let premium = calculate_premium(
            rel_bid,
            info.notional,
            ref_spot,
            self.collateral_decimals,
            info.advanced.premium_in_collateral,
        )?;
        let split = fees.match_fees(premium)?;

        Ok(BidPreview {
            status: BidStatus::Success,
            current_ask,
            oracle_spot,
            strike,
            expiry: auction.expiry_at(now)?,
            earliest_exercise: auction.earliest_exercise_at(now)?,
            premium,
            protocol_fee: split.protocol,
            partner_fee: split.partner,
        })
    }

    /// Commits a successful preview, leaving the escrow matched and ready to mint
    pub fn apply_bid(&mut self, preview: &BidPreview) -> Result<()> {
        preview.status.into_result()?;
        require!(self.status == EscrowStatus::AuctionOpen, ErrorCode::NoOpenAuction);

        self.option_info.strike = preview.strike;
        self.option_info.expiry = preview.expiry;
        self.option_info.earliest_exercise = preview.earliest_exercise;
        self.premium_paid = preview.premium;
        self.status = EscrowStatus::Matched;
        Ok(())
    }

    /// Matched → OptionMinted. Returns the claim amount to mint (1:1 with notional).
    pub fn mint_option(&mut self) -> Result<u64> {
        match self.status {
            EscrowStatus::Matched => {}
            EscrowStatus::OptionMinted => return err!(ErrorCode::OptionAlreadyMinted),
            EscrowStatus::AuctionCancelled => return err!(ErrorCode::AuctionCancelled),
            _ => return err!(ErrorCode::NotMatched),
        }
        self.claim_supply = self.option_info.notional;
        self.status = EscrowStatus::OptionMinted;
        Ok(self.claim_supply)
    }

    /// Settlement tokens owed for `amount` collateral at the strike
    pub fn settlement_amount(&self, amount: u64) -> Result<u64> {
        calculate_strike_payment(amount, self.option_info.strike, self.collateral_decimals)
    }

    /// Burns `amount` claims from the books. Returns the settlement amount owed.
    pub fn exercise(&mut self, amount: u64, now: i64) -> Result<u64> {
        self.require_minted()?;
        validate_amount(amount)?;
        validate_exercise_window(&self.option_info, now)?;
        require!(amount <= self.claim_supply, ErrorCode::ExceedsClaimSupply);

        let settlement_amount = self.settlement_amount(amount)?;
        self.claim_supply -= amount;
        Ok(settlement_amount)
    }

    /// Lends `amount` collateral against claims. Returns the settlement collateral to post.
    pub fn borrow(&mut self, amount: u64, now: i64) -> Result<u64> {
        self.require_minted()?;
        validate_amount(amount)?;
        validate_exercise_window(&self.option_info, now)?;
        require!(amount <= self.claim_supply, ErrorCode::ExceedsClaimSupply);

        let total_borrowed = self
            .total_borrowed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(
            total_borrowed <= self.option_info.borrow_capacity()?,
            ErrorCode::ExceedsBorrowCap
        );

        let posted = self.settlement_amount(amount)?;
        self.borrow_collateral = self
            .borrow_collateral
            .checked_add(posted)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_borrowed = total_borrowed;
        self.claim_supply -= amount;
        Ok(posted)
    }

    /// Books a repayment of `amount` collateral that releases `returned` posted collateral
    pub fn repay(&mut self, amount: u64, returned: u64) -> Result<()> {
        self.require_minted()?;
        require!(!self.settled, ErrorCode::EscrowSettled);
        validate_amount(amount)?;

        self.total_borrowed = self
            .total_borrowed
            .checked_sub(amount)
            .ok_or(ErrorCode::ExceedsOutstandingBorrow)?;
        self.borrow_collateral = self
            .borrow_collateral
            .checked_sub(returned)
            .ok_or(ErrorCode::MathOverflow)?;
        self.claim_supply = self
            .claim_supply
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Owner withdrawal: cancels an open auction, or sweeps an expired option
    pub fn withdraw(&mut self, now: i64) -> Result<WithdrawKind> {
        match self.phase(now) {
            EscrowPhase::AuctionOpen => {
                self.status = EscrowStatus::AuctionCancelled;
                Ok(WithdrawKind::CancelAuction)
            }
            EscrowPhase::Expired => {
                require!(!self.settled, ErrorCode::NothingToWithdraw);
                self.settled = true;
                self.claim_supply = 0;
                self.borrow_collateral = 0;
                Ok(WithdrawKind::Sweep)
            }
            EscrowPhase::Live => err!(ErrorCode::OptionNotExpired),
            EscrowPhase::AuctionCancelled => err!(ErrorCode::NothingToWithdraw),
            EscrowPhase::Uninitialized | EscrowPhase::Matched => err!(ErrorCode::NoOptionMinted),
        }
    }

    /// Burns `amount` claims held by the owner for a pro-rata share of the vault
    pub fn redeem(&mut self, amount: u64, vault_balance: u64) -> Result<u64> {
        self.require_minted()?;
        require!(!self.settled, ErrorCode::EscrowSettled);
        require!(amount > 0, ErrorCode::NothingToRedeem);
        require!(amount <= self.claim_supply, ErrorCode::ExceedsClaimSupply);

        let payout = calculate_pro_rata_share(vault_balance, amount, self.claim_supply)?;
        self.claim_supply -= amount;
        Ok(payout)
    }

    /// Splits exercised collateral when the strike is paid out of the collateral itself.
    ///
    /// `price` is settlement base units per whole collateral token.
    pub fn net_settle(&self, amount: u64, settlement_amount: u64, fee: u64, price: u64) -> Result<NetSettlement> {
        let to_owner = settlement_to_collateral(settlement_amount, price, self.collateral_decimals)?;
        let to_fee_sink = settlement_to_collateral(fee, price, self.collateral_decimals)?;
        let owed = to_owner
            .checked_add(to_fee_sink)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(owed < amount, ErrorCode::OptionNotInTheMoney);
        Ok(NetSettlement {
            to_owner,
            to_fee_sink,
            to_receiver: amount - owed,
        })
    }

    /// Records `delegate` and returns the registry the delegation must be published to.
    ///
    /// Needs both the vote-delegation flag and a configured registry.
    pub fn delegate_votes(&mut self, delegate: Pubkey) -> Result<Pubkey> {
        let advanced = &self.option_info.advanced;
        require!(advanced.allow_vote_delegation, ErrorCode::VotingDelegationNotAllowed);
        let registry = advanced
            .delegate_registry
            .ok_or(ErrorCode::VotingDelegationNotAllowed)?;
        self.vote_delegate = Some(delegate);
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASE;
    use crate::utils::assert_anchor_error;

    const DAY: i64 = 86_400;
    const NOW: i64 = 1_700_000_000;
    const NOTIONAL: u64 = 100_000_000; // 100 tokens, 6 decimals
    const SPOT: u64 = 1_000_000; // 1.0 settlement token per collateral token

    fn registered() -> Escrow {
        let mut escrow = Escrow {
            router: Pubkey::default(),
            owner: Pubkey::default(),
            index: 0,
            bump: 0,
            claim_mint: Pubkey::default(),
            collateral_vault: Pubkey::default(),
            settlement_vault: Pubkey::default(),
            collateral_decimals: 0,
            settlement_decimals: 0,
            status: EscrowStatus::Uninitialized,
            option_info: OptionInfo::default(),
            auction: None,
            claim_supply: 0,
            total_borrowed: 0,
            borrow_collateral: 0,
            premium_paid: 0,
            settled: false,
            vote_delegate: None,
            in_progress: false,
        };
        escrow
            .register(EscrowKeys {
                router: Pubkey::new_unique(),
                owner: Pubkey::new_unique(),
                index: 7,
                bump: 254,
                claim_mint: Pubkey::new_unique(),
                collateral_vault: Pubkey::new_unique(),
                settlement_vault: Pubkey::new_unique(),
                collateral_decimals: 6,
                settlement_decimals: 6,
            })
            .unwrap();
        escrow
    }

    fn auction_init() -> AuctionInit {
        AuctionInit {
            notional: NOTIONAL,
            params: AuctionParams {
                rel_strike: BASE,
                tenor: 30 * DAY,
                earliest_exercise_tenor: 0,
                rel_premium_start: BASE / 100,
                rel_premium_floor: BASE / 200,
                decay_start: NOW,
                decay_duration: 7 * DAY,
                min_spot: SPOT / 2,
                max_spot: SPOT * 2,
                oracle: Pubkey::new_unique(),
            },
            advanced: AdvancedSettings {
                borrow_cap: BASE / 2,
                ..Default::default()
            },
        }
    }

    fn open_auction() -> Escrow {
        let mut escrow = registered();
        escrow
            .initialize_auction(Pubkey::new_unique(), Pubkey::new_unique(), &auction_init())
            .unwrap();
        escrow
    }

    fn minted() -> Escrow {
        let mut escrow = registered();
        let info = OptionInfo {
            collateral_mint: Pubkey::new_unique(),
            settlement_mint: Pubkey::new_unique(),
            notional: NOTIONAL,
            strike: SPOT,
            expiry: NOW + 30 * DAY,
            earliest_exercise: 0,
            advanced: AdvancedSettings {
                borrow_cap: BASE / 2,
                ..Default::default()
            },
        };
        escrow.initialize_match(info, NOW).unwrap();
        escrow.mint_option().unwrap();
        escrow
    }

    #[test]
    fn test_register_twice_fails() {
        let mut escrow = registered();
        let keys = EscrowKeys {
            router: escrow.router,
            owner: escrow.owner,
            index: 8,
            bump: 1,
            claim_mint: escrow.claim_mint,
            collateral_vault: escrow.collateral_vault,
            settlement_vault: escrow.settlement_vault,
            collateral_decimals: 6,
            settlement_decimals: 6,
        };
        assert_anchor_error(escrow.register(keys), ErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_auction_defaults_oracle_into_advanced_settings() {
        let escrow = open_auction();
        let auction = escrow.auction.unwrap();
        assert_eq!(escrow.status, EscrowStatus::AuctionOpen);
        assert_eq!(escrow.option_info.advanced.oracle, Some(auction.oracle));
        assert_eq!(escrow.phase(NOW), EscrowPhase::AuctionOpen);
    }

    #[test]
    fn test_auction_rejects_same_asset_pair() {
        let mut escrow = registered();
        let mint = Pubkey::new_unique();
        assert_anchor_error(
            escrow.initialize_auction(mint, mint, &auction_init()),
            ErrorCode::InvalidTokenPair,
        );
    }

    #[test]
    fn test_preview_bid_success_halfway_through_decay() {
        let escrow = open_auction();
        let now = NOW + 3 * DAY + DAY / 2;
        let fees = FeeSchedule::clamped(BASE / 10, 0, BASE / 4, None, None);

        let preview = escrow.preview_bid(7_500_000, SPOT, SPOT, now, &fees).unwrap();
        assert_eq!(preview.status, BidStatus::Success);
        assert_eq!(preview.current_ask, 7_500_000);
        assert_eq!(preview.strike, SPOT);
        assert_eq!(preview.expiry, now + 30 * DAY);
        assert_eq!(preview.earliest_exercise, 0);
        // 0.0075 × 100 tokens × 1.0 = 0.75 settlement tokens
        assert_eq!(preview.premium, 750_000);
        assert_eq!(preview.protocol_fee + preview.partner_fee, 75_000);
        assert_eq!(preview.partner_fee, 18_750);
        assert_eq!(preview.net_premium().unwrap(), 675_000);
    }

    #[test]
    fn test_preview_bid_rejection_order() {
        let mut escrow = open_auction();
        let fees = FeeSchedule::default();

        // Bid too low and spot out of band: premium check wins
        let preview = escrow.preview_bid(1, SPOT * 10, SPOT, NOW, &fees).unwrap();
        assert_eq!(preview.status, BidStatus::PremiumTooLow);

        // Oracle above reference and out of band: spot check wins
        let preview = escrow.preview_bid(BASE, SPOT * 3, SPOT * 4, NOW, &fees).unwrap();
        assert_eq!(preview.status, BidStatus::SpotPriceTooLow);

        let preview = escrow.preview_bid(BASE, SPOT * 3, SPOT, NOW, &fees).unwrap();
        assert_eq!(preview.status, BidStatus::OutOfRangeSpotPrice);

        escrow.withdraw(NOW).unwrap();
        let preview = escrow.preview_bid(BASE, SPOT, SPOT, NOW, &fees).unwrap();
        assert_eq!(preview.status, BidStatus::AuctionCancelled);
        assert_anchor_error(preview.status.into_result(), ErrorCode::AuctionCancelled);
    }

    #[test]
    fn test_preview_does_not_mutate_and_commit_revalidates() {
        let mut escrow = open_auction();
        let fees = FeeSchedule::default();
        let before = escrow.status;
        let rejected = escrow.preview_bid(1, SPOT, SPOT, NOW, &fees).unwrap();
        assert_eq!(escrow.status, before);
        assert_anchor_error(escrow.apply_bid(&rejected), ErrorCode::PremiumTooLow);

        let accepted = escrow.preview_bid(BASE / 100, SPOT, SPOT, NOW, &fees).unwrap();
        escrow.apply_bid(&accepted).unwrap();
        assert_eq!(escrow.mint_option().unwrap(), NOTIONAL);
        assert_eq!(escrow.option_info.strike, SPOT);

        let after_mint = escrow.preview_bid(BASE, SPOT, SPOT, NOW, &fees).unwrap();
        assert_eq!(after_mint.status, BidStatus::OptionAlreadyMinted);
    }

    #[test]
    fn test_single_mint_invariant() {
        let mut escrow = minted();
        assert_anchor_error(escrow.mint_option(), ErrorCode::OptionAlreadyMinted);
        let info = escrow.option_info;
        assert_anchor_error(escrow.initialize_match(info, NOW), ErrorCode::OptionAlreadyMinted);
        assert_anchor_error(
            escrow.initialize_auction(Pubkey::new_unique(), Pubkey::new_unique(), &auction_init()),
            ErrorCode::OptionAlreadyMinted,
        );

        let mut fresh = registered();
        assert_anchor_error(fresh.mint_option(), ErrorCode::NotMatched);
    }

    #[test]
    fn test_exercise_bounds() {
        let mut escrow = minted();
        assert_anchor_error(escrow.exercise(0, NOW), ErrorCode::InvalidAmount);
        assert_anchor_error(escrow.exercise(NOTIONAL + 1, NOW), ErrorCode::ExceedsClaimSupply);

        assert_eq!(escrow.exercise(40_000_000, NOW).unwrap(), 40_000_000);
        assert_eq!(escrow.claim_supply, 60_000_000);

        let expiry = escrow.option_info.expiry;
        assert_anchor_error(escrow.exercise(1, expiry + 1), ErrorCode::OptionExpired);
        assert_eq!(escrow.phase(expiry + 1), EscrowPhase::Expired);
    }

    #[test]
    fn test_exercise_before_earliest_exercise_fails() {
        let mut escrow = minted();
        escrow.option_info.earliest_exercise = NOW + DAY;
        assert_anchor_error(escrow.exercise(1, NOW), ErrorCode::ExerciseNotStarted);
        assert_anchor_error(escrow.borrow(1, NOW), ErrorCode::ExerciseNotStarted);
    }

    #[test]
    fn test_borrow_cap_scenario() {
        let mut escrow = minted();
        assert_anchor_error(escrow.borrow(60_000_000, NOW), ErrorCode::ExceedsBorrowCap);
        assert_eq!(escrow.borrow(50_000_000, NOW).unwrap(), 50_000_000);
        assert_eq!(escrow.total_borrowed, 50_000_000);
        assert_eq!(escrow.borrow_collateral, 50_000_000);
        assert_anchor_error(escrow.borrow(1, NOW), ErrorCode::ExceedsBorrowCap);
    }

    #[test]
    fn test_repay_restores_claims() {
        let mut escrow = minted();
        escrow.borrow(50_000_000, NOW).unwrap();
        escrow.repay(20_000_000, 20_000_000).unwrap();
        assert_eq!(escrow.total_borrowed, 30_000_000);
        assert_eq!(escrow.borrow_collateral, 30_000_000);
        assert_eq!(escrow.claim_supply, 70_000_000);
        assert_anchor_error(
            escrow.repay(30_000_001, 0),
            ErrorCode::ExceedsOutstandingBorrow,
        );

        escrow.withdraw(escrow.option_info.expiry + 1).unwrap();
        assert_anchor_error(escrow.repay(1, 1), ErrorCode::EscrowSettled);
    }

    #[test]
    fn test_withdraw_paths() {
        let mut auction = open_auction();
        assert_eq!(auction.withdraw(NOW).unwrap(), WithdrawKind::CancelAuction);
        assert_anchor_error(auction.withdraw(NOW), ErrorCode::NothingToWithdraw);

        let mut escrow = minted();
        let expiry = escrow.option_info.expiry;
        assert_anchor_error(escrow.withdraw(expiry), ErrorCode::OptionNotExpired);
        assert_eq!(escrow.withdraw(expiry + 1).unwrap(), WithdrawKind::Sweep);
        assert!(escrow.settled);
        assert_anchor_error(escrow.withdraw(expiry + 2), ErrorCode::NothingToWithdraw);

        let mut fresh = registered();
        assert_anchor_error(fresh.withdraw(NOW), ErrorCode::NoOptionMinted);
    }

    #[test]
    fn test_withdraw_follows_phase_at_expiry_boundary() {
        let mut escrow = minted();
        let expiry = escrow.option_info.expiry;
        assert_eq!(escrow.phase(expiry), EscrowPhase::Live);
        assert_anchor_error(escrow.withdraw(expiry), ErrorCode::OptionNotExpired);
        assert!(!escrow.settled);

        assert_eq!(escrow.phase(expiry + 1), EscrowPhase::Expired);
        assert_eq!(escrow.withdraw(expiry + 1).unwrap(), WithdrawKind::Sweep);
    }

    #[test]
    fn test_preview_at_spot_band_floor_succeeds() {
        let escrow = open_auction();
        let floor = SPOT / 2;
        let preview = escrow
            .preview_bid(BASE / 100, floor, floor, NOW, &FeeSchedule::default())
            .unwrap();
        assert_eq!(preview.status, BidStatus::Success);
        assert_eq!(preview.strike, floor);
    }

    #[test]
    fn test_auction_with_zero_strike_at_band_floor_is_rejected() {
        let mut escrow = registered();
        let mut init = auction_init();
        init.params.rel_strike = BASE / 2;
        init.params.min_spot = 1;
        init.params.max_spot = 10;
        assert_anchor_error(
            escrow.initialize_auction(Pubkey::new_unique(), Pubkey::new_unique(), &init),
            ErrorCode::InvalidRelativeStrike,
        );
        assert_eq!(escrow.status, EscrowStatus::Uninitialized);
    }

    #[test]
    fn test_redeem_pro_rata() {
        let mut escrow = minted();
        escrow.exercise(20_000_000, NOW).unwrap();
        // 80 claims outstanding over 80 tokens of collateral
        assert_eq!(escrow.redeem(40_000_000, 80_000_000).unwrap(), 40_000_000);
        assert_eq!(escrow.claim_supply, 40_000_000);
        assert_anchor_error(escrow.redeem(0, 40_000_000), ErrorCode::NothingToRedeem);
    }

    #[test]
    fn test_net_settlement_requires_in_the_money() {
        let escrow = minted();
        // Strike 1.0, spot 2.0: 10 tokens owe 10 settlement = 5 collateral
        let split = escrow.net_settle(10_000_000, 10_000_000, 0, 2_000_000).unwrap();
        assert_eq!(split.to_owner, 5_000_000);
        assert_eq!(split.to_receiver, 5_000_000);

        assert_anchor_error(
            escrow.net_settle(10_000_000, 10_000_000, 0, SPOT),
            ErrorCode::OptionNotInTheMoney,
        );
    }

    #[test]
    fn test_reentrancy_guard() {
        let mut escrow = minted();
        escrow.enter().unwrap();
        assert_anchor_error(escrow.enter(), ErrorCode::Reentrancy);
        escrow.leave();
        assert!(escrow.enter().is_ok());
    }

    #[test]
    fn test_creation_paths_run_under_guard() {
        let mut auction = registered();
        auction.enter().unwrap();
        auction
            .initialize_auction(Pubkey::new_unique(), Pubkey::new_unique(), &auction_init())
            .unwrap();
        assert_anchor_error(auction.enter(), ErrorCode::Reentrancy);
        auction.leave();
        assert!(!auction.in_progress);

        let mut direct = registered();
        let info = minted().option_info;
        direct.enter().unwrap();
        direct.initialize_match(info, NOW).unwrap();
        assert_eq!(direct.mint_option().unwrap(), NOTIONAL);
        assert_anchor_error(direct.enter(), ErrorCode::Reentrancy);
        direct.leave();
        assert!(!direct.in_progress);
    }

    #[test]
    fn test_vote_delegation_flag() {
        let mut escrow = minted();
        assert_anchor_error(
            escrow.delegate_votes(Pubkey::new_unique()),
            ErrorCode::VotingDelegationNotAllowed,
        );
        escrow.option_info.advanced.allow_vote_delegation = true;
        let delegate = Pubkey::new_unique();
        // Flag alone is not enough without a registry to publish to
        assert_anchor_error(
            escrow.delegate_votes(delegate),
            ErrorCode::VotingDelegationNotAllowed,
        );
        assert_eq!(escrow.vote_delegate, None);

        let registry = Pubkey::new_unique();
        escrow.option_info.advanced.delegate_registry = Some(registry);
        assert_eq!(escrow.delegate_votes(delegate).unwrap(), registry);
        assert_eq!(escrow.vote_delegate, Some(delegate));
    }

    #[test]
    fn test_registry_without_flag_is_rejected() {
        let mut escrow = minted();
        escrow.option_info.advanced.delegate_registry = Some(Pubkey::new_unique());
        assert_anchor_error(
            escrow.delegate_votes(Pubkey::new_unique()),
            ErrorCode::VotingDelegationNotAllowed,
        );
    }
}
