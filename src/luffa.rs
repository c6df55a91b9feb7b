use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U32, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{BigEndian, ByteOrder};

/// Block size, in bytes, of Luffa-512.
pub const DIGEST_BLOCK_SIZE: usize = 32;

const WIDTH: usize = 5;
const STEPS: usize = 8;

type Lane = [u32; 8];

const IV: [Lane; WIDTH] = [
    [0x6d251e69, 0x44b051e0, 0x4eaa6fb4, 0xdbf78465, 0x6e292011, 0x90152df4, 0xee058139, 0xdef610bb],
    [0xc3b44b95, 0xd9d2f256, 0x70eee9a0, 0xde099fa3, 0x5d9b0557, 0x8fc944b3, 0xcf1ccf0e, 0x746cd581],
    [0xf7efc89d, 0x5dba5781, 0x04016ce5, 0xad659c05, 0x0306194f, 0x666d1836, 0x24aa230a, 0x8b264ae7],
    [0x858075d5, 0x36d79cce, 0xe571f7d7, 0x204b1f67, 0x35870c6a, 0x57e9e923, 0x14bcb808, 0x7cde72ce],
    [0x6c68e9be, 0x5ec41e22, 0xc825b7c7, 0xaffb4363, 0xf5df3999, 0x0fc688f1, 0xb07224cc, 0x03e86cea],
];

// Step constants per sub-permutation: (words 0 and 4) pairs for each of the 8 steps.
const RC: [[Lane; 2]; WIDTH] = [
    [
        [0x303994a6, 0xc0e65299, 0x6cc33a12, 0xdc56983e, 0x1e00108f, 0x7800423d, 0x8f5b7882, 0x96e1db12],
        [0xe0337818, 0x441ba90d, 0x7f34d442, 0x9389217f, 0xe5a8bce6, 0x5274baf4, 0x26889ba7, 0x9a226e9d],
    ],
    [
        [0xb6de10ed, 0x70f47aae, 0x0707a3d4, 0x1c1e8f51, 0x707a3d45, 0xaeb28562, 0xbaca1589, 0x40a46f3e],
        [0x01685f3d, 0x05a17cf4, 0xbd09caca, 0xf4272b28, 0x144ae5cc, 0xfaa7ae2b, 0x2e48f1c1, 0xb923c704],
    ],
    [
        [0xfc20d9d2, 0x34552e25, 0x7ad8818f, 0x8438764a, 0xbb6de032, 0xedb780c8, 0xd9847356, 0xa2c78434],
        [0xe25e72c1, 0xe623bb72, 0x5c58a4a4, 0x1e38e2e7, 0x78e38b9d, 0x27586719, 0x36eda57f, 0x703aace7],
    ],
    [
        [0xb213afa5, 0xc84ebe95, 0x4e608a22, 0x56d858fe, 0x343b138f, 0xd0ec4e3d, 0x2ceb4882, 0xb3ad2208],
        [0xe028c9bf, 0x44756f91, 0x7e8fce32, 0x956548be, 0xfe191be2, 0x3cb226e5, 0x5944a28e, 0xa1c4c355],
    ],
    [
        [0xf0d2e9e3, 0xac11d7fa, 0x1bcb66f2, 0x6f2d9bc9, 0x78602649, 0x8edae952, 0x3b6ba548, 0xedae9520],
        [0x5090d577, 0x2d1925ab, 0xb46496ac, 0xd1925ab0, 0x29131ab6, 0x0fc053c3, 0x3f014f0c, 0xfc053c31],
    ],
];

// Multiplication by 2 in GF(2^32)^8.
#[inline(always)]
fn m2(s: &Lane) -> Lane {
    let t = s[7];
    [t, s[0] ^ t, s[1], s[2] ^ t, s[3] ^ t, s[4], s[5], s[6]]
}

#[inline(always)]
fn xor(a: &Lane, b: &Lane) -> Lane {
    let mut out = *a;
    out.iter_mut().zip(b.iter()).for_each(|(o, x)| *o ^= x);
    out
}

// Message injection for w = 5.
fn inject(v: &mut [Lane; WIDTH], m: &Lane) {
    let mut a = v[0];
    for lane in &v[1..] {
        a = xor(&a, lane);
    }
    let a = m2(&a);
    for lane in v.iter_mut() {
        *lane = xor(lane, &a);
    }

    let t = v[0];
    for j in 0..WIDTH - 1 {
        v[j] = xor(&m2(&v[j]), &v[j + 1]);
    }
    v[WIDTH - 1] = xor(&m2(&v[WIDTH - 1]), &t);

    let t = v[WIDTH - 1];
    for j in (1..WIDTH).rev() {
        v[j] = xor(&m2(&v[j]), &v[j - 1]);
    }
    v[0] = xor(&m2(&v[0]), &t);

    let mut m = *m;
    for lane in v.iter_mut() {
        *lane = xor(lane, &m);
        m = m2(&m);
    }
}

#[inline(always)]
fn sub_crumb(a0: &mut u32, a1: &mut u32, a2: &mut u32, a3: &mut u32) {
    let mut tmp = *a0;
    *a0 |= *a1;
    *a2 ^= *a3;
    *a1 = !*a1;
    *a0 ^= *a3;
    *a3 &= tmp;
    *a1 ^= *a3;
    *a3 ^= *a2;
    *a2 &= *a0;
    *a0 = !*a0;
    *a2 ^= *a1;
    *a1 |= *a3;
    tmp ^= *a1;
    *a3 ^= *a2;
    *a2 &= *a1;
    *a1 ^= *a0;
    *a0 = tmp;
}

#[inline(always)]
fn mix_word(u: &mut u32, w: &mut u32) {
    *w ^= *u;
    *u = u.rotate_left(2) ^ *w;
    *w = w.rotate_left(14) ^ *u;
    *u = u.rotate_left(10) ^ *w;
    *w = w.rotate_left(1);
}

// Sub-permutation Q_j.
fn permute(v: &mut Lane, j: usize) {
    for w in &mut v[4..] {
        *w = w.rotate_left(j as u32);
    }
    for r in 0..STEPS {
        let [v0, v1, v2, v3, v4, v5, v6, v7] = &mut *v;
        sub_crumb(v0, v1, v2, v3);
        sub_crumb(v5, v6, v7, v4);
        for k in 0..4 {
            let (lo, hi) = v.split_at_mut(4);
            mix_word(&mut lo[k], &mut hi[k]);
        }
        v[0] ^= RC[j][0][r];
        v[4] ^= RC[j][1][r];
    }
}

/// Luffa-512 hasher.
pub type Luffa512 = CoreWrapper<Luffa512Core>;

/// Luffa512Core is the block-level core of the Luffa-512 hash function.
#[derive(Clone)]
pub struct Luffa512Core {
    v: [Lane; WIDTH],
}

impl Luffa512Core {
    fn round(&mut self, block: &[u8]) {
        let mut m = [0u32; 8];
        BigEndian::read_u32_into(block, &mut m);
        inject(&mut self.v, &m);
        for (j, lane) in self.v.iter_mut().enumerate() {
            permute(lane, j);
        }
    }

    fn output(&self) -> Lane {
        let mut z = self.v[0];
        for lane in &self.v[1..] {
            z = xor(&z, lane);
        }
        z
    }
}

impl Default for Luffa512Core {
    fn default() -> Self {
        Self { v: IV }
    }
}

impl Reset for Luffa512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Luffa512Core {}

impl BlockSizeUser for Luffa512Core {
    type BlockSize = U32;
}

impl BufferKindUser for Luffa512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Luffa512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Luffa512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let mut block = [0; DIGEST_BLOCK_SIZE];
        block.copy_from_slice(buffer.pad_with_zeros());
        block[pos] = 0x80;
        self.round(&block);

        // Two blank rounds, each squeezing 256 bits.
        for half in out.chunks_mut(DIGEST_BLOCK_SIZE) {
            self.round(&[0; DIGEST_BLOCK_SIZE]);
            BigEndian::write_u32_into(&self.output(), half);
        }
    }
}

impl UpdateCore for Luffa512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.round(b);
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
            output: "6e7de4501189b3ca58f3ac114916654bbcd4922024b4cc1cd764acfe8ab4b7805df133eab345ffdb1c414564c924f48e0a301824e2ac4c34bd4efde2e43da90e",
        },
        TestElement {
            input: "abc",
            output: "f40245973e80d79d0f4b9b202ddd4505b81b8830501bea31612b5817aae387921dcefd808ca2c78020aff59345d6f91f0ee6b2eee113f0cbcf22b64381387e8a",
        },
        TestElement {
            input: "The quick brown fox jumps over the lazy dog",
            output: "459e2280a7cdb0c721d8d9dbeb9ed339659dc9e7b158e9dd2d328d946cb21474dc9177edfc93602f1aadb31944c795c9b5df859a3dc6132d4f0a4c476aaf797f",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let mut h = Luffa512::default();

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
    fn sub_crumb_is_the_luffa_sbox() {
        const SBOX: [u32; 16] = [13, 14, 0, 1, 5, 10, 7, 6, 11, 3, 9, 12, 15, 8, 2, 4];
        for x in 0..16u32 {
            let (mut a0, mut a1, mut a2, mut a3) = (x & 1, (x >> 1) & 1, (x >> 2) & 1, (x >> 3) & 1);
            sub_crumb(&mut a0, &mut a1, &mut a2, &mut a3);
            let y = (a0 & 1) | ((a1 & 1) << 1) | ((a2 & 1) << 2) | ((a3 & 1) << 3);
            assert_eq!(y, SBOX[x as usize], "sbox mismatch at {}", x);
        }
    }

    #[test]
    fn luffa512_multi_block() {
        let cases = [
            (120, "3da50d173bbd94ac0c9d9375ee386e463aefe484a3ef26d68d22f72d97fa5faf8f52baa89bd1b57e91bc0f7ad0446abd98e8430ac2ca1c6f07db2ca81d20a270"),
            (128, "1d5864256731c162898f9765899e5e8c28e483d895bdd03efbf7d9137a9aa6dc9892ea12fb2415cee302fcbf70beff984e229154c2ee6c129fdc74468568d476"),
            (200, "bef9b87ff7e6d2a671dc0d26fd3682c960e619c92867e20d0aacaee5dbe4a40445f36831e42640162d71edbc7b5970186773b3d83f30f4c037981406fcf18a7f"),
        ];

        for (len, want) in cases {
            let input: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut h = Luffa512::default();
            h.update(&input);
            let sum = hex::encode(h.finalize_fixed());
            assert_eq!(sum, want, "len {}: got {}, want {}", len, sum, want);
        }
    }
}
