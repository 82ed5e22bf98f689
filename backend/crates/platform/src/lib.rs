//! Platform - Infrastructure primitives shared by the domain crates
//!
//! Holds the pieces that are about *mechanism*, not domain meaning:
//! - `password` - credential policy, strength scoring, Argon2id hashing
//! - `cookie` - session cookie construction and parsing
//! - `crypto` - small cryptographic helpers

pub mod cookie;
pub mod crypto;
pub mod password;
