//! Pure state transitions.
//!
//! `basic` holds single-field primitives; `keybind` composes them into one
//! total policy function per input event.

pub(crate) mod basic;
pub(crate) mod keybind;
