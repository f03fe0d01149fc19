//! Shared utilities: the elapsed-time clock and frame timing.

pub mod clock;
