//! Translator Error Types
//!
//! Error types for the vector translator using `thiserror`.
//!
//! Emitters never fail for guest-data-dependent reasons: a malformed
//! encoding is impossible by construction because the decoder only
//! dispatches an emitter when the opcode bits matched. The recoverable
//! failures both mean "this instruction cannot be translated"; the caller
//! (the block compiler) decides whether to fall back to the interpreter or
//! abort the block. Internal inconsistencies between the opcode table and
//! an emitter's parameters are programming errors and panic instead of
//! returning.

use crate::recompiler::vector::Opcode;
use thiserror::Error;

/// Vector translation error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateError {
    /// The opcode is registered in the dispatch table but has no emitter.
    ///
    /// The opcode is carried so the failure names the exact instruction;
    /// silently emitting a no-op for an unimplemented opcode is not an
    /// option.
    #[error("unimplemented altivec opcode: {}", .0.mnemonic())]
    Unimplemented(Opcode),

    /// An implemented opcode was given an immediate sub-encoding the
    /// hardware leaves undefined (e.g. a vpkd3d128 format selector above
    /// the documented range). No IR is emitted.
    #[error("unhandled {mnemonic} sub-encoding: {value:#x}")]
    UnhandledEncoding { mnemonic: &'static str, value: u32 },
}
