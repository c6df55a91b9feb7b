use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};
use once_cell::sync::Lazy;

use byteorder::{ByteOrder, LittleEndian};

/// Block size, in bytes, of SIMD-512.
pub const DIGEST_BLOCK_SIZE: usize = 128;

const P: u32 = 257;
const ALPHA: u32 = 41;
const EXPANDED: usize = 256;

const IV: [u32; 32] = [
    0x0BA16B95, 0x72F999AD, 0x9FECC2AE, 0xBA3264FC, 0x5E894929, 0x8E9F30E5, 0x2F1DAA37,
    0xF0F2C558, 0xAC506643, 0xA90635A5, 0xE25B878B, 0xAAB7878F, 0x88817F7A, 0x0A02892B,
    0x559A7550, 0x598F657E, 0x7EEF60A1, 0x6B70E3E8, 0x9C1714D1, 0xB958E2A8, 0xAB02675E,
    0xED1C014F, 0xCD8D65BB, 0xFDB7A257, 0x09254899, 0xD699C7BC, 0x9019B6DC, 0x2B9022E4,
    0x8FA14956, 0x21BF9BD3, 0xB94D0943, 0x6FFDDC22,
];

// Per round: the expanded-word group each step reads, and the two offsets of its halves.
const WORD_GROUPS: [([i32; 8], i32, i32); 4] = [
    ([4, 6, 0, 2, 7, 5, 3, 1], 0, 1),
    ([15, 11, 12, 8, 9, 13, 10, 14], 0, 1),
    ([17, 18, 23, 20, 22, 21, 16, 19], -256, -128),
    ([30, 24, 25, 31, 27, 29, 28, 26], -383, -255),
];

const MULTIPLIERS: [i32; 4] = [185, 185, 233, 233];

const ROTATIONS: [[u32; 4]; 4] = [[3, 23, 17, 27], [28, 19, 22, 7], [29, 9, 15, 5], [4, 13, 10, 25]];

const FEED_FORWARD_ROTATIONS: [(u32, u32); 4] = [(4, 13), (13, 10), (10, 25), (25, 4)];

const PERMUTATIONS: [usize; 7] = [1, 6, 2, 3, 5, 7, 4];

/// Powers of 41 modulo 257.
static POWERS: Lazy<[u32; EXPANDED]> = Lazy::new(|| {
    let mut powers = [0u32; EXPANDED];
    let mut a = 1;
    for p in powers.iter_mut() {
        *p = a;
        a = a * ALPHA % P;
    }
    powers
});

// Number-theoretic message expansion, centred on (-128, 128].
fn expand(block: &[u8], last: bool) -> [i32; EXPANDED] {
    let powers = &*POWERS;
    let mut q = [0i32; EXPANDED];
    for (i, out) in q.iter_mut().enumerate() {
        let mut s: u32 = block
            .iter()
            .enumerate()
            .map(|(j, x)| *x as u32 * powers[(i * j) % EXPANDED])
            .sum();
        s += powers[(255 * i) % EXPANDED];
        if last {
            s += powers[(253 * i) % EXPANDED];
        }
        let s = (s % P) as i32;
        *out = if s > 128 { s - P as i32 } else { s };
    }
    q
}

#[inline(always)]
fn if_fn(x: u32, y: u32, z: u32) -> u32 {
    ((y ^ z) & x) ^ z
}

#[inline(always)]
fn maj_fn(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | ((x | y) & z)
}

type Row = [u32; 8];

fn step(s: &mut [Row; 4], w: &Row, f: fn(u32, u32, u32) -> u32, r: u32, t: u32, perm: usize) {
    let [a, b, c, d] = *s;
    let mut ta = [0u32; 8];
    for n in 0..8 {
        ta[n] = a[n].rotate_left(r);
    }
    let p = PERMUTATIONS[perm];
    let mut na = [0u32; 8];
    for n in 0..8 {
        na[n] = d[n]
            .wrapping_add(w[n])
            .wrapping_add(f(a[n], b[n], c[n]))
            .rotate_left(t)
            .wrapping_add(ta[n ^ p]);
    }
    *s = [na, ta, b, c];
}

fn compress(state: &mut [u32; 32], block: &[u8], last: bool) {
    let q = expand(block, last);

    let mut m = [0u32; 32];
    LittleEndian::read_u32_into(block, &mut m);

    let mut s = [[0u32; 8]; 4];
    for (i, row) in s.iter_mut().enumerate() {
        for n in 0..8 {
            row[n] = state[8 * i + n] ^ m[8 * i + n];
        }
    }

    for (round, (groups, o1, o2)) in WORD_GROUPS.iter().enumerate() {
        let mm = MULTIPLIERS[round];
        let rot = ROTATIONS[round];
        for (k, group) in groups.iter().enumerate() {
            let mut w = [0u32; 8];
            for (i, wi) in w.iter_mut().enumerate() {
                let base = 16 * group + 2 * i as i32;
                let lo = (q[(base + o1) as usize] * mm) as u32 & 0xffff;
                let hi = ((q[(base + o2) as usize] * mm) as u32) << 16;
                *wi = lo.wrapping_add(hi);
            }
            let f: fn(u32, u32, u32) -> u32 = if k < 4 { if_fn } else { maj_fn };
            step(&mut s, &w, f, rot[k % 4], rot[(k + 1) % 4], (8 * round + k) % 7);
        }
    }

    for (k, (r, t)) in FEED_FORWARD_ROTATIONS.iter().enumerate() {
        let mut w = [0u32; 8];
        w.copy_from_slice(&state[8 * k..8 * k + 8]);
        step(&mut s, &w, if_fn, *r, *t, (32 + k) % 7);
    }

    for (i, row) in s.iter().enumerate() {
        state[8 * i..8 * i + 8].copy_from_slice(row);
    }
}

/// SIMD-512 hasher.
pub type Simd512 = CoreWrapper<Simd512Core>;

/// Simd512Core is the block-level core of the SIMD-512 hash function.
#[derive(Clone)]
pub struct Simd512Core {
    state: [u32; 32],
    blocks: u64,
}

impl Default for Simd512Core {
    fn default() -> Self {
        Self {
            state: IV,
            blocks: 0,
        }
    }
}

impl Reset for Simd512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Simd512Core {}

impl BlockSizeUser for Simd512Core {
    type BlockSize = U128;
}

impl BufferKindUser for Simd512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Simd512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Simd512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let bits = (self.blocks * DIGEST_BLOCK_SIZE as u64 + pos as u64) << 3;

        // A partial block is zero padded and compressed as an ordinary block.
        if pos > 0 {
            let mut block = [0; DIGEST_BLOCK_SIZE];
            block.copy_from_slice(buffer.pad_with_zeros());
            compress(&mut self.state, &block, false);
        }

        let mut last = [0; DIGEST_BLOCK_SIZE];
        LittleEndian::write_u64(&mut last[..8], bits);
        compress(&mut self.state, &last, true);

        LittleEndian::write_u32_into(&self.state[..16], out);
    }
}

impl UpdateCore for Simd512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.blocks += 1;
            compress(&mut self.state, b, false);
        }
    }
}
