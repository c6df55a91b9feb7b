use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{ByteOrder, LittleEndian};

/// Block size, in bytes, of BMW-512.
pub const DIGEST_BLOCK_SIZE: usize = 128;

// Terms of W_j as (index into M ^ H, subtracted).
const W: [[(usize, bool); 5]; 16] = [
    [(5, false), (7, true), (10, false), (13, false), (14, false)],
    [(6, false), (8, true), (11, false), (14, false), (15, true)],
    [(0, false), (7, false), (9, false), (12, true), (15, false)],
    [(0, false), (1, true), (8, false), (10, true), (13, false)],
    [(1, false), (2, false), (9, false), (11, true), (14, true)],
    [(3, false), (2, true), (10, false), (12, true), (15, false)],
    [(4, false), (0, true), (3, true), (11, true), (13, false)],
    [(1, false), (4, true), (5, true), (12, true), (14, true)],
    [(2, false), (5, true), (6, true), (13, false), (15, true)],
    [(0, false), (3, true), (6, false), (7, true), (14, false)],
    [(8, false), (1, true), (4, true), (7, true), (15, false)],
    [(8, false), (0, true), (2, true), (5, true), (9, false)],
    [(1, false), (3, false), (6, true), (9, true), (10, false)],
    [(2, false), (4, false), (7, false), (10, false), (11, false)],
    [(3, false), (5, true), (8, false), (11, true), (12, true)],
    [(12, false), (4, true), (6, true), (9, true), (13, false)],
];

const ROT: [u32; 7] = [5, 11, 27, 32, 37, 43, 53];

/// BMW-512 hasher.
pub type Bmw512 = CoreWrapper<Bmw512Core>;

/// Bmw512Core is the block-level core of the Blue Midnight Wish 512 hash function.
#[derive(Clone)]
pub struct Bmw512Core {
    h: [u64; 16],
    blocks: u64,
}

fn iv() -> [u64; 16] {
    let mut h = [0; 16];
    for (i, w) in h.iter_mut().enumerate() {
        let base = 0x80 + 8 * i as u8;
        *w = u64::from_be_bytes([
            base,
            base + 1,
            base + 2,
            base + 3,
            base + 4,
            base + 5,
            base + 6,
            base + 7,
        ]);
    }
    h
}

#[inline(always)]
fn s0(x: u64) -> u64 {
    (x >> 1) ^ (x << 3) ^ x.rotate_left(4) ^ x.rotate_left(37)
}

#[inline(always)]
fn s1(x: u64) -> u64 {
    (x >> 1) ^ (x << 2) ^ x.rotate_left(13) ^ x.rotate_left(43)
}

#[inline(always)]
fn s2(x: u64) -> u64 {
    (x >> 2) ^ (x << 1) ^ x.rotate_left(19) ^ x.rotate_left(53)
}

#[inline(always)]
fn s3(x: u64) -> u64 {
    (x >> 2) ^ (x << 2) ^ x.rotate_left(28) ^ x.rotate_left(59)
}

#[inline(always)]
fn s4(x: u64) -> u64 {
    (x >> 1) ^ x
}

#[inline(always)]
fn s5(x: u64) -> u64 {
    (x >> 2) ^ x
}

fn compress(h: &[u64; 16], m: &[u64; 16]) -> [u64; 16] {
    let mut x = [0; 16];
    for i in 0..16 {
        x[i] = m[i] ^ h[i];
    }

    let mut q = [0u64; 32];
    for j in 0..16 {
        let w = W[j].iter().fold(0u64, |w, &(i, sub)| {
            if sub {
                w.wrapping_sub(x[i])
            } else {
                w.wrapping_add(x[i])
            }
        });
        let s = match j % 5 {
            0 => s0(w),
            1 => s1(w),
            2 => s2(w),
            3 => s3(w),
            _ => s4(w),
        };
        q[j] = s.wrapping_add(h[(j + 1) % 16]);
    }

    let add_element = |j: usize| -> u64 {
        let (a, b, c) = ((j - 16) % 16, (j - 13) % 16, (j - 6) % 16);
        m[a].rotate_left(a as u32 + 1)
            .wrapping_add(m[b].rotate_left(b as u32 + 1))
            .wrapping_sub(m[c].rotate_left(c as u32 + 1))
            .wrapping_add((j as u64).wrapping_mul(0x0555555555555555))
            ^ h[(j - 16 + 7) % 16]
    };

    for j in 16..18 {
        let mut t = 0u64;
        for k in 0..16 {
            let y = q[j - 16 + k];
            t = t.wrapping_add(match k % 4 {
                0 => s1(y),
                1 => s2(y),
                2 => s3(y),
                _ => s0(y),
            });
        }
        q[j] = t.wrapping_add(add_element(j));
    }

    for j in 18..32 {
        let mut t = s4(q[j - 2]).wrapping_add(s5(q[j - 1]));
        for (k, r) in ROT.iter().enumerate() {
            t = t
                .wrapping_add(q[j - 16 + 2 * k])
                .wrapping_add(q[j - 15 + 2 * k].rotate_left(*r));
        }
        q[j] = t.wrapping_add(add_element(j));
    }

    let xl = q[16..24].iter().fold(0, |a, b| a ^ b);
    let xh = q[24..32].iter().fold(xl, |a, b| a ^ b);

    let mut out = [0u64; 16];
    out[0] = ((xh << 5) ^ (q[16] >> 5) ^ m[0]).wrapping_add(xl ^ q[24] ^ q[0]);
    out[1] = ((xh >> 7) ^ (q[17] << 8) ^ m[1]).wrapping_add(xl ^ q[25] ^ q[1]);
    out[2] = ((xh >> 5) ^ (q[18] << 5) ^ m[2]).wrapping_add(xl ^ q[26] ^ q[2]);
    out[3] = ((xh >> 1) ^ (q[19] << 5) ^ m[3]).wrapping_add(xl ^ q[27] ^ q[3]);
    out[4] = ((xh >> 3) ^ q[20] ^ m[4]).wrapping_add(xl ^ q[28] ^ q[4]);
    out[5] = ((xh << 6) ^ (q[21] >> 6) ^ m[5]).wrapping_add(xl ^ q[29] ^ q[5]);
    out[6] = ((xh >> 4) ^ (q[22] << 6) ^ m[6]).wrapping_add(xl ^ q[30] ^ q[6]);
    out[7] = ((xh >> 11) ^ (q[23] << 2) ^ m[7]).wrapping_add(xl ^ q[31] ^ q[7]);
    out[8] = out[4]
        .rotate_left(9)
        .wrapping_add(xh ^ q[24] ^ m[8])
        .wrapping_add((xl << 8) ^ q[23] ^ q[8]);
    out[9] = out[5]
        .rotate_left(10)
        .wrapping_add(xh ^ q[25] ^ m[9])
        .wrapping_add((xl >> 6) ^ q[16] ^ q[9]);
    out[10] = out[6]
        .rotate_left(11)
        .wrapping_add(xh ^ q[26] ^ m[10])
        .wrapping_add((xl << 6) ^ q[17] ^ q[10]);
    out[11] = out[7]
        .rotate_left(12)
        .wrapping_add(xh ^ q[27] ^ m[11])
        .wrapping_add((xl << 4) ^ q[18] ^ q[11]);
    out[12] = out[0]
        .rotate_left(13)
        .wrapping_add(xh ^ q[28] ^ m[12])
        .wrapping_add((xl >> 3) ^ q[19] ^ q[12]);
    out[13] = out[1]
        .rotate_left(14)
        .wrapping_add(xh ^ q[29] ^ m[13])
        .wrapping_add((xl >> 4) ^ q[20] ^ q[13]);
    out[14] = out[2]
        .rotate_left(15)
        .wrapping_add(xh ^ q[30] ^ m[14])
        .wrapping_add((xl >> 7) ^ q[21] ^ q[14]);
    out[15] = out[3]
        .rotate_left(16)
        .wrapping_add(xh ^ q[31] ^ m[15])
        .wrapping_add((xl >> 2) ^ q[22] ^ q[15]);
    out
}

impl Bmw512Core {
    fn compress_block(&mut self, block: &[u8]) {
        let mut m = [0; 16];
        LittleEndian::read_u64_into(block, &mut m);
        self.h = compress(&self.h, &m);
    }
}

impl Default for Bmw512Core {
    fn default() -> Self {
        Self { h: iv(), blocks: 0 }
    }
}

impl Reset for Bmw512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Bmw512Core {}

impl BlockSizeUser for Bmw512Core {
    type BlockSize = U128;
}

impl BufferKindUser for Bmw512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Bmw512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Bmw512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let bits = (self.blocks * DIGEST_BLOCK_SIZE as u64 + buffer.get_pos() as u64) << 3;
        buffer.len64_padding_le(bits, |b| self.compress_block(b));

        let mut fin = [0; 16];
        for (i, w) in fin.iter_mut().enumerate() {
            *w = 0xaaaaaaaaaaaaaaa0 + i as u64;
        }
        let h = compress(&fin, &self.h);

        LittleEndian::write_u64_into(&h[8..], out);
    }
}

impl UpdateCore for Bmw512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.blocks += 1;
            self.compress_block(b);
        }
    }
}
