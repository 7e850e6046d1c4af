//! Platform Crate - Technical Infrastructure
//!
//! Technical building blocks with no business vocabulary:
//! - Password hashing (Argon2id, tunable cost, NFKC normalization)

pub mod password;
