use digest::core_api::CoreWrapper;

/// Rate, in bytes, of Keccak-512.
pub const DIGEST_BLOCK_SIZE: usize = 72;

/// Keccak512Core is the block-level core of Keccak-512, padded with `0x01` as in the
/// Keccak submission rather than the FIPS-202 `0x06`.
pub use sha3::Keccak512Core;

/// Keccak-512 hasher.
pub type Keccak512 = CoreWrapper<Keccak512Core>;

#[cfg(test)]
pub mod test {
    use super::*;
    use digest::{crypto_common::BlockSizeUser, typenum::Unsigned, FixedOutput, Update};

    struct TestElement {
        input: &'static str,
        output: &'static str,
    }

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e",
        },
        TestElement {
            input: "abc",
            output: "18587dc2ea106b9a1563e32b3312421ca164c7f1f07bc922a9c83d77cea3a1e5d0c69910739025372dc14ac9642629379540c17e2a65b19d77aa511a9d00bb96",
        },
        TestElement {
            input: "The quick brown fox jumps over the lazy dog",
            output: "d135bb84d0439dbac432247ee573a23ea7d3c9deb2a968eb31d47c4fb45f1ef4422d6c531b5b9bd6f449ebcc449ea94d0a8f05f62130fda612da53c79659f609",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let mut h = Keccak512::default();

            h.update(element.input.as_bytes());

            let sum = hex::encode(h.finalize_fixed());
            assert_eq!(
                element.output, sum,
                "test vector element mismatched on index {} failed! got {}, want {}",
                i, sum, element.output
            );
        })
    }

    #[test]
    fn padding_boundaries() {
        // 71 bytes leaves a single pad byte, 0x01 ^ 0x80.
        let cases = [
            (71, "fe0953f9afdffed7ff9764c2590ff0e6af1b0689e42ddca68d6ef003ddce2671b806e0d2e6d57117bb75ad6166e2e990ca662b6a7f8945584f5308459eabae15"),
            (72, "76fa23369085405345fe6a2831f334113bee6b111056e21072082af56e7c1ab4458858dbdb5f88e0d86d38ca654310c9a30712319c1f4f9783fe9f3ac0469527"),
            (73, "e417b9573c871d948d48f62f6b16ea6cd1f1557a462ff5c1ae276d14d2fb43cd7084631656bf60f4ceb881133113d304335bd93487e8ec3e845ebc3c1877ca12"),
            (144, "eeab6ad7c545ba3be7fb5e25d15fcf3cf573eee7062ed7edbe0322c65bbcac59d213d222beb3c8d3110f1431eb27fc268d9b91849cc8e6210f45ece4cc8d312a"),
        ];

        for (len, want) in cases {
            let input: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut h = Keccak512::default();
            h.update(&input);
            let sum = hex::encode(h.finalize_fixed());
            assert_eq!(sum, want, "len {}: got {}, want {}", len, sum, want);
        }
    }

    #[test]
    fn rate() {
        assert_eq!(<Keccak512Core as BlockSizeUser>::BlockSize::USIZE, DIGEST_BLOCK_SIZE);
    }

    #[test]
    fn not_sha3_512() {
        let keccak = hex::encode(<Keccak512 as digest::Digest>::digest(b""));
        let sha3 = hex::encode(<sha3::Sha3_512 as digest::Digest>::digest(b""));
        assert_ne!(keccak, sha3);
        assert_eq!(keccak, TEST_VECTOR[0].output);
    }
}
