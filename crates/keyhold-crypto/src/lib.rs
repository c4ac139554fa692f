//! # keyhold-crypto
//!
//! Cryptographic primitives for the keyhold identity record.
//!
//! This crate provides every digest and signature operation the core relies
//! on: principal derivation from Ed25519 public keys, permission-tag and
//! claim-id derivation, canonical claim message layouts, and Ed25519
//! signature verification.
//!
//! ## Security Properties
//!
//! - No unsafe code
//! - Fixed canonical layouts for everything that is signed or hashed
//! - Identifier derivations are stable across deployments

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod errors;
pub mod hashing;
pub mod signatures;
pub mod time;

pub use constants::*;
pub use errors::CryptoError;
pub use hashing::*;
pub use signatures::*;
pub use time::current_timestamp;

pub use ed25519_dalek::SigningKey;
