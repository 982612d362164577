//! vmxrecomp-core
//!
//! Translator core for the AltiVec/VMX vector instruction set of a PowerPC
//! CPU emulator, including the console-specific VMX128 extension that widens
//! the vector register file to 128 registers. For each decoded guest vector
//! instruction the translator emits a sequence of portable IR operations that
//! reproduce the architectural behavior bit-for-bit: saturation arithmetic,
//! directed rounding, big-endian byte swapping, sub-register packing, byte
//! permutation, and the SAT/CR6 side effects.
//!
//! The crate is a library called by the surrounding JIT: the caller decodes
//! the opcode, then hands the raw instruction word and the mnemonic to
//! [`recompiler::vector::translate`] together with an
//! [`recompiler::ir::builder::IrBuilder`] for the current translation unit.

pub mod recompiler;
