pub mod delegation;
pub mod fees;
pub mod math;
pub mod pda;
pub mod signature;
pub mod transfer;
pub mod validation;

pub use delegation::*;
pub use fees::*;
pub use math::*;
pub use pda::*;
pub use signature::*;
pub use transfer::*;
pub use validation::*;

/// Asserts that `result` failed with exactly `code`
#[cfg(test)]
pub fn assert_anchor_error<T: std::fmt::Debug>(
    result: anchor_lang::Result<T>,
    code: crate::errors::ErrorCode,
) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(error)) => {
            assert_eq!(error.error_code_number, u32::from(code), "{}", error.error_msg)
        }
        other => panic!("expected {:?}, got {:?}", code, other),
    }
}
