#![warn(missing_docs)]
//! A Rust implementation of the X11 chained hash function.
//!
//! X11 runs eleven 512-bit hash functions back to back, each one hashing the
//! 64-byte output of the previous one:
//!
//! BLAKE → BMW → Groestl → Skein → JH → Keccak → Luffa → CubeHash → SHAvite-3 → SIMD → ECHO
//!
//! The digest is the first 32 bytes of the ECHO-512 output. Dash and its forks
//! use it as their proof-of-work function.
//!
//! Every primitive is also available on its own as a RustCrypto `digest` hasher,
//! e.g. [`Groestl512`], so it can be driven incrementally through `Update` and
//! `FixedOutput`.
//!
//! # Example
//! ```
//! use x11hash::boundary::{self, Value};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!   let header = "0123456789".repeat(8);
//!   let output = x11hash::digest(header.as_bytes());
//!   println!("Result: {}", hex::encode(output));
//!
//!   // The argument-checked entry point used by scripting hosts.
//!   let checked = boundary::digest(&[Value::from(header.as_bytes())])?;
//!   assert_eq!(checked, output);
//!
//!   Ok(())
//! }
//! ```

mod aes_round;

/// `blake` is the BLAKE-512 hash function, first stage of the chain.
pub mod blake;
/// `bmw` is the Blue Midnight Wish 512 hash function.
pub mod bmw;
/// `boundary` validates dynamically-typed call arguments before hashing.
pub mod boundary;
/// `chain` composes the eleven primitives into the X11 digest.
pub mod chain;
/// `cubehash` is the CubeHash16/32-512 hash function.
pub mod cubehash;
/// `echo` is the ECHO-512 hash function, last stage of the chain.
pub mod echo;
/// `error` holds the crate error type.
pub mod error;
/// `groestl` is the Groestl-512 hash function.
pub mod groestl;
/// `jh` is the JH-512 hash function.
pub mod jh;
/// `keccak` is Keccak-512 with the original (pre-FIPS-202) padding.
pub mod keccak;
/// `luffa` is the Luffa-512 hash function.
pub mod luffa;
/// `shavite` is the SHAvite-3-512 hash function.
pub mod shavite;
/// `simd` is the SIMD-512 hash function.
pub mod simd;
/// `skein` is the Skein-512-512 hash function.
pub mod skein;

pub use blake::Blake512;
pub use bmw::Bmw512;
pub use chain::{digest, digest_with, FinalDigest, Stage, StageState, DIGEST_SIZE, STATE_SIZE};
pub use cubehash::CubeHash512;
pub use echo::Echo512;
pub use error::{Error, Result};
pub use groestl::Groestl512;
pub use jh::Jh512;
pub use keccak::Keccak512;
pub use luffa::Luffa512;
pub use shavite::Shavite512;
pub use simd::Simd512;
pub use skein::Skein512;
