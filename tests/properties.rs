use digest::{Digest, Reset};
use proptest::prelude::*;
use x11hash::{
    digest, digest_with, Blake512, Bmw512, CubeHash512, Echo512, Groestl512, Jh512, Keccak512,
    Luffa512, Shavite512, Simd512, Skein512, Stage, DIGEST_SIZE, STATE_SIZE,
};

fn split_matches_one_shot<D: Digest>(data: &[u8], at: usize) -> bool {
    let at = at.min(data.len());
    let mut h = D::new();
    h.update(&data[..at]);
    h.update(&data[at..]);
    h.finalize() == D::digest(data)
}

fn reset_matches_fresh<D: Digest + Reset>(junk: &[u8], data: &[u8]) -> bool {
    let mut h = D::new();
    h.update(junk);
    Digest::reset(&mut h);
    h.update(data);
    h.finalize() == D::digest(data)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn deterministic(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        prop_assert_eq!(digest(&data), digest(&data));
    }

    #[test]
    fn fixed_output_length(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        prop_assert_eq!(digest(&data).len(), DIGEST_SIZE);
        for stage in Stage::ALL {
            prop_assert_eq!(stage.compute(&data).len(), STATE_SIZE);
        }
    }

    #[test]
    fn observer_sees_the_chain(data in proptest::collection::vec(any::<u8>(), 0..160)) {
        let mut states = Vec::new();
        let out = digest_with(&data, |stage, state| states.push((stage, *state)));

        prop_assert_eq!(states.len(), Stage::ALL.len());
        let mut input = data.clone();
        for ((stage, state), expected_stage) in states.iter().zip(Stage::ALL) {
            prop_assert_eq!(*stage, expected_stage);
            prop_assert_eq!(&stage.compute(&input)[..], &state[..]);
            input = state.to_vec();
        }
        prop_assert_eq!(&out[..], &input[..DIGEST_SIZE]);
    }

    #[test]
    fn incremental_update(data in proptest::collection::vec(any::<u8>(), 0..400), at in 0usize..400) {
        prop_assert!(split_matches_one_shot::<Blake512>(&data, at));
        prop_assert!(split_matches_one_shot::<Bmw512>(&data, at));
        prop_assert!(split_matches_one_shot::<Groestl512>(&data, at));
        prop_assert!(split_matches_one_shot::<Skein512>(&data, at));
        prop_assert!(split_matches_one_shot::<Jh512>(&data, at));
        prop_assert!(split_matches_one_shot::<Keccak512>(&data, at));
        prop_assert!(split_matches_one_shot::<Luffa512>(&data, at));
        prop_assert!(split_matches_one_shot::<CubeHash512>(&data, at));
        prop_assert!(split_matches_one_shot::<Shavite512>(&data, at));
        prop_assert!(split_matches_one_shot::<Simd512>(&data, at));
        prop_assert!(split_matches_one_shot::<Echo512>(&data, at));
    }

    #[test]
    fn reset_restores_initial_state(
        junk in proptest::collection::vec(any::<u8>(), 1..200),
        data in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        prop_assert!(reset_matches_fresh::<Blake512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Bmw512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Groestl512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Skein512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Jh512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Keccak512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Luffa512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<CubeHash512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Shavite512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Simd512>(&junk, &data));
        prop_assert!(reset_matches_fresh::<Echo512>(&junk, &data));
    }
}
