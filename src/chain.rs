use std::{fmt, str::FromStr};

use digest::{typenum::U64, Digest, OutputSizeUser};
use log::{debug, trace};

use crate::{
    blake::Blake512, bmw::Bmw512, cubehash::CubeHash512, echo::Echo512, error::Error,
    groestl::Groestl512, jh::Jh512, keccak::Keccak512, luffa::Luffa512, shavite::Shavite512,
    simd::Simd512, skein::Skein512,
};

/// The size in bytes of every intermediate stage output.
pub const STATE_SIZE: usize = 64;

/// The size in bytes of the X11 digest.
pub const DIGEST_SIZE: usize = 32;

/// Output of one primitive, fed as the sole input of the next.
pub type StageState = [u8; STATE_SIZE];

/// The user-visible X11 result.
pub type FinalDigest = [u8; DIGEST_SIZE];

/// One of the eleven hash functions of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// BLAKE-512.
    Blake,
    /// Blue Midnight Wish 512.
    Bmw,
    /// Groestl-512.
    Groestl,
    /// Skein-512-512.
    Skein,
    /// JH-512.
    Jh,
    /// Keccak-512.
    Keccak,
    /// Luffa-512.
    Luffa,
    /// CubeHash16/32-512.
    CubeHash,
    /// SHAvite-3-512.
    Shavite,
    /// SIMD-512.
    Simd,
    /// ECHO-512.
    Echo,
}

impl Stage {
    /// All stages, in chain order.
    pub const ALL: [Stage; 11] = [
        Stage::Blake,
        Stage::Bmw,
        Stage::Groestl,
        Stage::Skein,
        Stage::Jh,
        Stage::Keccak,
        Stage::Luffa,
        Stage::CubeHash,
        Stage::Shavite,
        Stage::Simd,
        Stage::Echo,
    ];

    /// Lower-case name of the primitive, e.g. `groestl512`.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Blake => "blake512",
            Stage::Bmw => "bmw512",
            Stage::Groestl => "groestl512",
            Stage::Skein => "skein512",
            Stage::Jh => "jh512",
            Stage::Keccak => "keccak512",
            Stage::Luffa => "luffa512",
            Stage::CubeHash => "cubehash512",
            Stage::Shavite => "shavite512",
            Stage::Simd => "simd512",
            Stage::Echo => "echo512",
        }
    }

    /// Hashes `input` with this stage's primitive alone.
    pub fn compute(&self, input: &[u8]) -> StageState {
        match self {
            Stage::Blake => run::<Blake512>(input),
            Stage::Bmw => run::<Bmw512>(input),
            Stage::Groestl => run::<Groestl512>(input),
            Stage::Skein => run::<Skein512>(input),
            Stage::Jh => run::<Jh512>(input),
            Stage::Keccak => run::<Keccak512>(input),
            Stage::Luffa => run::<Luffa512>(input),
            Stage::CubeHash => run::<CubeHash512>(input),
            Stage::Shavite => run::<Shavite512>(input),
            Stage::Simd => run::<Simd512>(input),
            Stage::Echo => run::<Echo512>(input),
        }
    }
}

fn run<D: Digest + OutputSizeUser<OutputSize = U64>>(input: &[u8]) -> StageState {
    let mut state = [0; STATE_SIZE];
    state.copy_from_slice(&<D as Digest>::digest(input));
    state
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = Error;

    /// Accepts the stage name with or without the `512` suffix, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Stage::ALL
            .iter()
            .find(|stage| {
                let name = stage.name();
                wanted == name || Some(wanted.as_str()) == name.strip_suffix("512")
            })
            .copied()
            .ok_or_else(|| Error::UnknownStage(s.to_string()))
    }
}

/// Computes the X11 digest of `input`.
pub fn digest(input: &[u8]) -> FinalDigest {
    digest_with(input, |_, _| {})
}

/// Computes the X11 digest of `input`, handing every stage output to `observer`
/// in chain order.
pub fn digest_with<F>(input: &[u8], mut observer: F) -> FinalDigest
where
    F: FnMut(Stage, &StageState),
{
    debug!("x11 digest of {} bytes", input.len());

    let mut state = Stage::ALL[0].compute(input);
    trace!("{}: {:02x?}", Stage::ALL[0], state);
    observer(Stage::ALL[0], &state);

    for stage in &Stage::ALL[1..] {
        state = stage.compute(&state);
        trace!("{}: {:02x?}", stage, state);
        observer(*stage, &state);
    }

    finalize(&state)
}

/// Truncates the last stage output to the digest: its first 32 bytes, unchanged.
pub fn finalize(state: &StageState) -> FinalDigest {
    let mut out = [0; DIGEST_SIZE];
    out.copy_from_slice(&state[..DIGEST_SIZE]);
    out
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn stage_names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(stage.name().parse::<Stage>(), Ok(stage));
            assert_eq!(stage.to_string(), stage.name());
        }
        assert_eq!("CubeHash".parse::<Stage>(), Ok(Stage::CubeHash));
        assert_eq!(
            "sha256".parse::<Stage>(),
            Err(Error::UnknownStage("sha256".to_string()))
        );
    }

    #[test]
    fn finalize_keeps_leading_half() {
        let mut state = [0u8; STATE_SIZE];
        for (i, b) in state.iter_mut().enumerate() {
            *b = i as u8;
        }
        let out = finalize(&state);
        assert_eq!(out[..], state[..DIGEST_SIZE]);
    }

    #[test]
    fn stage_compute_matches_hasher() {
        let input = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(
            hex::encode(Stage::Keccak.compute(input)),
            "d135bb84d0439dbac432247ee573a23ea7d3c9deb2a968eb31d47c4fb45f1ef4422d6c531b5b9bd6f449ebcc449ea94d0a8f05f62130fda612da53c79659f609"
        );
        assert_eq!(
            Stage::Skein.compute(input)[..],
            Skein512::digest(input)[..]
        );
    }

    #[test]
    fn known_vector() {
        let input = "0123456789".repeat(8);
        assert_eq!(
            hex::encode(digest(input.as_bytes())),
            "0fe0c9bd25d85c203e95412ff6d23e1982411be1d95ea9679f90b2f0a28fb13b"
        );
    }
}
