use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};
use once_cell::sync::Lazy;

/// Block size, in bytes, of Groestl-512.
pub const DIGEST_BLOCK_SIZE: usize = 128;

const ROUNDS: u8 = 14;
const COLUMNS: usize = 16;

const SHIFT_P: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 11];
const SHIFT_Q: [usize; 8] = [1, 3, 5, 11, 0, 2, 4, 6];
const MIX: [u8; 8] = [2, 2, 3, 4, 5, 3, 5, 7];

/// The AES S-box, derived from the multiplicative inverse in GF(2^8) and the affine map.
pub(crate) static SBOX: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut sbox = [0u8; 256];
    let (mut p, mut q) = (1u8, 1u8);
    loop {
        // p walks the multiplicative group by 3, q by its inverse.
        p = p ^ (p << 1) ^ if p & 0x80 != 0 { 0x1b } else { 0 };
        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }
        sbox[p as usize] =
            q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4) ^ 0x63;
        if p == 1 {
            break;
        }
    }
    sbox[0] = 0x63;
    sbox
});

#[inline(always)]
fn xtime(a: u8) -> u8 {
    (a << 1) ^ if a & 0x80 != 0 { 0x1b } else { 0 }
}

fn gmul(a: u8, b: u8) -> u8 {
    let (mut a, mut b, mut p) = (a, b, 0);
    while b != 0 {
        if b & 1 != 0 {
            p ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    p
}

type State = [u8; DIGEST_BLOCK_SIZE];

// Byte i of the state sits at row i % 8, column i / 8.
fn permute(s: &mut State, q: bool) {
    let sbox = &*SBOX;
    let shift = if q { &SHIFT_Q } else { &SHIFT_P };

    for round in 0..ROUNDS {
        for c in 0..COLUMNS {
            let constant = ((c as u8) << 4) ^ round;
            if q {
                s[8 * c..8 * c + 8].iter_mut().for_each(|b| *b ^= 0xff);
                s[8 * c + 7] ^= constant;
            } else {
                s[8 * c] ^= constant;
            }
        }

        s.iter_mut().for_each(|b| *b = sbox[*b as usize]);

        let t = *s;
        for r in 0..8 {
            for c in 0..COLUMNS {
                s[8 * c + r] = t[8 * ((c + shift[r]) % COLUMNS) + r];
            }
        }

        for c in 0..COLUMNS {
            let mut col = [0u8; 8];
            col.copy_from_slice(&s[8 * c..8 * c + 8]);
            for i in 0..8 {
                s[8 * c + i] = (0..8).fold(0, |acc, j| acc ^ gmul(col[j], MIX[(j + 8 - i) % 8]));
            }
        }
    }
}

/// Groestl-512 hasher.
pub type Groestl512 = CoreWrapper<Groestl512Core>;

/// Groestl512Core is the block-level core of the Groestl-512 hash function.
#[derive(Clone)]
pub struct Groestl512Core {
    h: State,
    blocks: u64,
}

impl Groestl512Core {
    fn compress(&mut self, block: &[u8]) {
        let mut p = self.h;
        let mut q = [0; DIGEST_BLOCK_SIZE];
        for i in 0..DIGEST_BLOCK_SIZE {
            p[i] ^= block[i];
            q[i] = block[i];
        }
        permute(&mut p, false);
        permute(&mut q, true);
        for i in 0..DIGEST_BLOCK_SIZE {
            self.h[i] ^= p[i] ^ q[i];
        }
    }
}

impl Default for Groestl512Core {
    fn default() -> Self {
        let mut h = [0; DIGEST_BLOCK_SIZE];
        // Output length in bits, big-endian.
        h[DIGEST_BLOCK_SIZE - 2] = 0x02;
        Self { h, blocks: 0 }
    }
}

impl Reset for Groestl512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Groestl512Core {}

impl BlockSizeUser for Groestl512Core {
    type BlockSize = U128;
}

impl BufferKindUser for Groestl512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Groestl512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Groestl512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        // The length field counts blocks, padding included.
        let padding_blocks = if buffer.get_pos() < DIGEST_BLOCK_SIZE - 8 { 1 } else { 2 };
        let total = self.blocks + padding_blocks;
        buffer.len64_padding_be(total, |b| self.compress(b));

        let mut p = self.h;
        permute(&mut p, false);
        for (i, o) in out.iter_mut().enumerate() {
            *o = p[64 + i] ^ self.h[64 + i];
        }
    }
}

impl UpdateCore for Groestl512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.blocks += 1;
            self.compress(b);
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
            output: "6d3ad29d279110eef3adbd66de2a0345a77baede1557f5d099fce0c03d6dc2ba8e6d4a6633dfbd66053c20faa87d1a11f39a7fbe4a6c2f009801370308fc4ad8",
        },
        TestElement {
            input: "abc",
            output: "70e1c68c60df3b655339d67dc291cc3f1dde4ef343f11b23fdd44957693815a75a8339c682fc28322513fd1f283c18e53cff2b264e06bf83a2f0ac8c1f6fbff6",
        },
        TestElement {
            input: "The quick brown fox jumps over the lazy dog",
            output: "badc1f70ccd69e0cf3760c3f93884289da84ec13c70b3d12a53a7a8a4a513f99715d46288f55e1dbf926e6d084a0538e4eebfc91cf2b21452921ccde9131718d",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let mut h = Groestl512::default();

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
    fn sbox() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x01], 0x7c);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0xff], 0x16);
    }

    #[test]
    fn padding_boundaries() {
        let cases = [
            (120, "5cfc13a05459f11cab784846d953da0b7c3eda4855db918da20993665b7e7260cb3711782f402c04b49a03f70414246d56217e97e261cef8f0c225fd124cb971"),
            (128, "70b56b15a86cd65b19f4afe78f7b408b72287947cc0d28ba4189573fbe033cf9a3298127b460778feecca5794407539acc267b27732e4fbc21bc96fcf9f2f17a"),
            (200, "ff6dabc4aacd1f3955daba7ee2f36b2e24cca8aef87bdf286ea77b2d86dc40526ca5290c0558e95b4f620d78241a2665ab300216016b66ae87c6dc2e216348bb"),
        ];

        for (len, want) in cases {
            let input: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut h = Groestl512::default();
            h.update(&input);
            let sum = hex::encode(h.finalize_fixed());
            assert_eq!(sum, want, "len {}: got {}, want {}", len, sum, want);
        }
    }
}
