//! Schema-driven binary layout and codec engine.
//!
//! Type records describe primitives, structs, unions, arrays, and pointers; a
//! [`codec::Factory`] computes their native layout for a target platform and
//! reads or writes typed values at those offsets in a byte buffer.

/// Type registry, layout calculation, typed values, and buffer codec.
pub mod codec;
