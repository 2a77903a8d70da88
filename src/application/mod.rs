//! Application layer: the cart engine and the register session that drives it.
//!
//! `CartEngine` owns the cart and performs checkout against a
//! `TransactionSink`. `RegisterSession` is the caller-side state around it:
//! input validation, the pending lookup result and its resets.

pub mod engine;
pub mod session;
