//! Request authentication helpers.

pub mod nonce;
