//! # aisle-cli — Server Binary Plumbing
//!
//! Argument types and the serve command, kept in the library so the
//! argument surface stays testable without spawning the binary.

pub mod serve;
