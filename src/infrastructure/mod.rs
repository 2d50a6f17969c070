//! Infrastructure layer - RPC access and account decoding

pub mod blockchain;
