use anchor_lang::prelude::*;

#[event]
pub struct FeesUpdated {
    pub match_fee: u64,
    pub exercise_fee: u64,
}

#[event]
pub struct FeeSinkUpdated {
    pub fee_sink: Pubkey,
}

#[event]
pub struct AuthorityTransferred {
    pub previous: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct PartnerShareUpdated {
    pub partner: Pubkey,
    pub fee_share: u64,
}
