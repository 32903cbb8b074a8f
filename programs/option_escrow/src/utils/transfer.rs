use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self as token, Mint};

/// `transfer_checked` that skips zero amounts (fees and empty sweeps)
///
/// Pass `&[]` as `signer_seeds` when `authority` signs the transaction itself.
pub fn transfer_tokens<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            token::TransferChecked {
                from,
                mint: mint.to_account_info(),
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
        mint.decimals,
    )
}

/// Mints claim tokens; the escrow PDA is always the mint authority
pub fn mint_claims<'info>(
    token_program: AccountInfo<'info>,
    claim_mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    escrow: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    token::mint_to(
        CpiContext::new_with_signer(
            token_program,
            token::MintTo {
                mint: claim_mint,
                to,
                authority: escrow,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Burns claim tokens held by `owner`, who signs the transaction
pub fn burn_claims<'info>(
    token_program: AccountInfo<'info>,
    claim_mint: AccountInfo<'info>,
    from: AccountInfo<'info>,
    owner: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    token::burn(
        CpiContext::new(
            token_program,
            token::Burn {
                mint: claim_mint,
                from,
                authority: owner,
            },
        ),
        amount,
    )
}
