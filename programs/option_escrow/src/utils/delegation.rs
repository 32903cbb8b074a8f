use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use solana_sha256_hasher::hash;

/// Anchor sighash preimage of the registry's `set_delegate(space, delegate)`
const SET_DELEGATE_PREIMAGE: &[u8] = b"global:set_delegate";

/// Instruction data for `set_delegate(space, delegate)` on a delegation registry
pub fn set_delegate_data(space: &Pubkey, delegate: &Pubkey) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + 32 + 32);
    data.extend_from_slice(&hash(SET_DELEGATE_PREIMAGE).to_bytes()[..8]);
    data.extend_from_slice(space.as_ref());
    data.extend_from_slice(delegate.as_ref());
    data
}

/// Publishes `delegate` for `space` to the registry, signed by the escrow PDA
pub fn forward_delegation<'info>(
    registry_program: AccountInfo<'info>,
    delegator: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    space: &Pubkey,
    delegate: &Pubkey,
) -> Result<()> {
    let ix = Instruction {
        program_id: *registry_program.key,
        accounts: vec![AccountMeta::new_readonly(*delegator.key, true)],
        data: set_delegate_data(space, delegate),
    };
    invoke_signed(&ix, &[delegator, registry_program], signer_seeds)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_delegate_data_layout() {
        let space = Pubkey::new_unique();
        let delegate = Pubkey::new_unique();
        let data = set_delegate_data(&space, &delegate);

        assert_eq!(data.len(), 72);
        assert_eq!(&data[..8], &hash(b"global:set_delegate").to_bytes()[..8]);
        assert_eq!(&data[8..40], space.as_ref());
        assert_eq!(&data[40..], delegate.as_ref());
    }
}
