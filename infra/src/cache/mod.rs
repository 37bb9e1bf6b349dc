//! Cache module for one-time code storage
//!
//! Codes live in process memory only; a restart invalidates every
//! outstanding code.

pub mod memory_otp_store;


pub use memory_otp_store::InMemoryOtpStore;
