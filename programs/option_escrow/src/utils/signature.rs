use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use solana_sdk_ids::ed25519_program;

use crate::errors::ErrorCode;

/// Offsets header of a native ed25519 verify instruction
const ED25519_HEADER_LEN: usize = 16;
/// Instruction index meaning "data lives in this same instruction"
const SAME_INSTRUCTION: u16 = u16::MAX;

fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    let bytes = data
        .get(at..at + 2)
        .ok_or(ErrorCode::InvalidSignature)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Extracts the (signer, message) pair from ed25519 program instruction data.
///
/// Layout: num_signatures u8, padding u8, then per signature
/// signature_off, signature_ix, pubkey_off, pubkey_ix, message_off,
/// message_size, message_ix (u16 LE each). Only a single signature whose
/// pieces all live in the same instruction is accepted.
pub fn parse_ed25519_instruction(data: &[u8]) -> Result<(Pubkey, &[u8])> {
    require!(data.len() >= ED25519_HEADER_LEN, ErrorCode::InvalidSignature);
    require!(data[0] == 1, ErrorCode::InvalidSignature);

    let signature_ix = read_u16(data, 4)?;
    let pubkey_off = read_u16(data, 6)? as usize;
    let pubkey_ix = read_u16(data, 8)?;
    let message_off = read_u16(data, 10)? as usize;
    let message_size = read_u16(data, 12)? as usize;
    let message_ix = read_u16(data, 14)?;

    require!(
        signature_ix == SAME_INSTRUCTION
            && pubkey_ix == SAME_INSTRUCTION
            && message_ix == SAME_INSTRUCTION,
        ErrorCode::InvalidSignature
    );

    let pubkey = data
        .get(pubkey_off..pubkey_off + 32)
        .ok_or(ErrorCode::InvalidSignature)?;
    let message = data
        .get(message_off..message_off + message_size)
        .ok_or(ErrorCode::InvalidSignature)?;

    let signer = Pubkey::try_from(pubkey).map_err(|_| error!(ErrorCode::InvalidSignature))?;
    Ok((signer, message))
}

/// Checks that the instruction right before this one is an ed25519 verify of
/// `message` by `expected_signer`.
///
/// The runtime rejects the whole transaction if that signature is invalid, so
/// matching signer and message here is enough.
pub fn verify_ed25519_signature(
    instructions_sysvar: &AccountInfo,
    expected_signer: &Pubkey,
    message: &[u8],
) -> Result<()> {
    let current = load_current_index_checked(instructions_sysvar)?;
    require!(current > 0, ErrorCode::InvalidSignature);

    let verify_ix = load_instruction_at_checked((current - 1) as usize, instructions_sysvar)?;
    require_keys_eq!(
        verify_ix.program_id,
        ed25519_program::ID,
        ErrorCode::InvalidSignature
    );

    let (signer, signed_message) = parse_ed25519_instruction(&verify_ix.data)?;
    require_keys_eq!(signer, *expected_signer, ErrorCode::InvalidSignature);
    require!(signed_message == message, ErrorCode::InvalidSignature);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_anchor_error;

    /// Builds ed25519 instruction data the way the native program client does
    fn verify_data(signer: &Pubkey, message: &[u8]) -> Vec<u8> {
        let pubkey_off = ED25519_HEADER_LEN as u16;
        let signature_off = pubkey_off + 32;
        let message_off = signature_off + 64;

        let mut data = vec![1u8, 0];
        for value in [
            signature_off,
            SAME_INSTRUCTION,
            pubkey_off,
            SAME_INSTRUCTION,
            message_off,
            message.len() as u16,
            SAME_INSTRUCTION,
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(signer.as_ref());
        data.extend_from_slice(&[7u8; 64]);
        data.extend_from_slice(message);
        data
    }

    #[test]
    fn test_parse_single_signature() {
        let signer = Pubkey::new_unique();
        let message = [42u8; 32];
        let data = verify_data(&signer, &message);

        let (parsed_signer, parsed_message) = parse_ed25519_instruction(&data).unwrap();
        assert_eq!(parsed_signer, signer);
        assert_eq!(parsed_message, &message);
    }

    #[test]
    fn test_rejects_foreign_instruction_references() {
        let mut data = verify_data(&Pubkey::new_unique(), &[1u8; 32]);
        // message_instruction_index pointing at another instruction
        data[14..16].copy_from_slice(&0u16.to_le_bytes());
        assert_anchor_error(parse_ed25519_instruction(&data), ErrorCode::InvalidSignature);
    }

    #[test]
    fn test_rejects_truncated_and_multi_signature_data() {
        let data = verify_data(&Pubkey::new_unique(), &[1u8; 32]);
        assert_anchor_error(
            parse_ed25519_instruction(&data[..data.len() - 1]),
            ErrorCode::InvalidSignature,
        );
        assert_anchor_error(parse_ed25519_instruction(&data[..10]), ErrorCode::InvalidSignature);

        let mut two = data.clone();
        two[0] = 2;
        assert_anchor_error(parse_ed25519_instruction(&two), ErrorCode::InvalidSignature);
    }

    #[test]
    fn test_verifier_is_the_native_ed25519_program() {
        let expected: Pubkey = "Ed25519SigVerify111111111111111111111111111"
            .parse()
            .unwrap();
        assert_eq!(ed25519_program::ID, expected);
    }
}
