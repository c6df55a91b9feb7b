use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{ByteOrder, LittleEndian};

use crate::aes_round::encrypt_round_words;

/// Block size, in bytes, of SHAvite-3-512.
pub const DIGEST_BLOCK_SIZE: usize = 128;

const ROUNDS: usize = 14;

const IV: [u32; 16] = [
    0x72FCCDD8, 0x79CA4727, 0x128A077B, 0x40D55AEC, 0xD1901A06, 0x430AE307, 0xB29F5CD1,
    0xDF07FBFC, 0x8E45D73D, 0x681AB538, 0xBDE86578, 0xDD577E47, 0xE275EADE, 0x502D9FCD,
    0xB9357178, 0x022A4B9A,
];

// (destination, source) lanes of the two Feistel halves, by round mod 4.
const LANES: [[(usize, usize); 2]; 4] = [
    [(0, 1), (2, 3)],
    [(3, 0), (1, 2)],
    [(2, 3), (0, 1)],
    [(1, 2), (3, 0)],
];

type Word4 = [u32; 4];

#[inline(always)]
fn xor4(a: Word4, b: &[u32]) -> Word4 {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

// Four keyed AES rounds: the round function of the Feistel network.
fn f(x: Word4, keys: &[u32]) -> Word4 {
    keys.chunks(4)
        .fold(x, |x, k| encrypt_round_words(xor4(x, k)))
}

/// C512 compression: `h` is replaced by the chaining value for `block` under the bit counter.
fn compress(h: &mut [u32; 16], block: &[u8], counter: u128) {
    let c = [
        counter as u32,
        (counter >> 32) as u32,
        (counter >> 64) as u32,
        (counter >> 96) as u32,
    ];

    let mut rk = [0u32; 32];
    LittleEndian::read_u32_into(block, &mut rk);

    let mut p = [[0u32; 4]; 4];
    for (i, lane) in p.iter_mut().enumerate() {
        lane.copy_from_slice(&h[4 * i..4 * i + 4]);
    }

    let apply = |p: &mut [Word4; 4], rk: &[u32; 32], r: usize| {
        let [(d0, s0), (d1, s1)] = LANES[r % 4];
        p[d0] = xor4(p[d0], &f(p[s0], &rk[..16]));
        p[d1] = xor4(p[d1], &f(p[s1], &rk[16..]));
    };

    apply(&mut p, &rk, 0);
    for r in 1..ROUNDS {
        if r % 2 == 1 {
            // Nonlinear key expansion, with the counter folded in four times per block.
            for g in 0..8 {
                let k = [rk[4 * g + 1], rk[4 * g + 2], rk[4 * g + 3], rk[4 * g]];
                let prev = (4 * g + 28) % 32;
                let next = xor4(encrypt_round_words(k), &rk[prev..prev + 4]);
                rk[4 * g..4 * g + 4].copy_from_slice(&next);

                let inject = match (r, g) {
                    (1, 0) => Some([c[0], c[1], c[2], !c[3]]),
                    (5, 1) => Some([c[3], c[2], c[1], !c[0]]),
                    (9, 7) => Some([c[2], c[3], c[0], !c[1]]),
                    (13, 6) => Some([c[1], c[0], c[3], !c[2]]),
                    _ => None,
                };
                if let Some(v) = inject {
                    let mixed = xor4(v, &rk[4 * g..4 * g + 4]);
                    rk[4 * g..4 * g + 4].copy_from_slice(&mixed);
                }
            }
        } else {
            for i in 0..32 {
                rk[i] ^= rk[(i + 25) % 32];
            }
        }
        apply(&mut p, &rk, r);
    }

    for (i, lane) in [p[2], p[3], p[0], p[1]].iter().enumerate() {
        for j in 0..4 {
            h[4 * i + j] ^= lane[j];
        }
    }
}

/// SHAvite-3-512 hasher.
pub type Shavite512 = CoreWrapper<Shavite512Core>;

/// Shavite512Core is the block-level core of the SHAvite-3-512 hash function.
#[derive(Clone)]
pub struct Shavite512Core {
    h: [u32; 16],
    count: u128, // message bits compressed so far
}

impl Default for Shavite512Core {
    fn default() -> Self {
        Self { h: IV, count: 0 }
    }
}

impl Reset for Shavite512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Shavite512Core {}

impl BlockSizeUser for Shavite512Core {
    type BlockSize = U128;
}

impl BufferKindUser for Shavite512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Shavite512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Shavite512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let bits = self.count + ((pos as u128) << 3);

        let mut block = [0; DIGEST_BLOCK_SIZE];
        block.copy_from_slice(buffer.pad_with_zeros());
        block[pos] = 0x80;

        // Bit count at 110..126 and the digest length at 126..128.
        let counter = if pos == 0 {
            0
        } else if pos < 110 {
            bits
        } else {
            compress(&mut self.h, &block, bits);
            block = [0; DIGEST_BLOCK_SIZE];
            0
        };
        LittleEndian::write_u128(&mut block[110..126], bits);
        LittleEndian::write_u16(&mut block[126..], 512);
        compress(&mut self.h, &block, counter);

        LittleEndian::write_u32_into(&self.h, out);
    }
}

impl UpdateCore for Shavite512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.count += (DIGEST_BLOCK_SIZE as u128) << 3;
            compress(&mut self.h, b, self.count);
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use digest::{FixedOutput, Update};

    struct TestElement {
        input: &'static str,
        output: &'static str,
    }

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "a485c1b2578459d1efc5dddd840bb0b4a650ac82fe68f58c4442ccda747da006b2d1dc6b4a4eb7d84ff91e1f466fef429d259acd995dddcad16fa545c7a6e5ba",
        },
        TestElement {
            input: "abc",
            output: "0fb0b216b377e6d95db1b6d9b6c8b59f08d4e29814071c8c0f827b32e68c15362f24bcc15ad6b1c925a03f00092997f7628cb47f27c9ad7a22e4c00fbb2c16e3",
        },
        TestElement {
            input: "The quick brown fox jumps over the lazy dog",
            output: "4dbd97835c4e5cfa14799884a7adc96688dd808ff53d5c4cfe7db89a55ee98d0260791ec0c9b5466482ab3f6f236da7e65e1cb6d1ee624f61a5b2b79f63c4120",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let mut h = Shavite512::default();

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
        // 120 bytes overflow the length field into an extra, counter-free block.
        let cases = [
            (120, "d1e7be8e066ccefbf620efa8f00458ba350fc4bb57bf16ec87daf8de56a45c57230186580d29522edde589d1dff4e36f9f4da38cac7684ad58b2038b37d92677"),
            (128, "c67b6b19a26556a6f5eb1545816d393e494c236d9fe36685e182238daa026429dfc549caeb34d9ea959da1daf189bc16839430750902b5b6db4bf9b9daba0b56"),
            (200, "c312d285cd9c597d7df9525133155f05aa94f206b31e2def255879b8bb27f25ccfaba516238c5de679545e7d0d88a5d0c0c975aae8a2e62369fcdeda4d02da42"),
        ];

        for (len, want) in cases {
            let input: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut h = Shavite512::default();
            h.update(&input);
            let sum = hex::encode(h.finalize_fixed());
            assert_eq!(sum, want, "len {}: got {}, want {}", len, sum, want);
        }
    }
}
