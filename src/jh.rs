use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::U64,
    HashMarker, Output, OutputSizeUser, Reset,
};
use once_cell::sync::Lazy;

/// Block size, in bytes, of JH-512.
pub const DIGEST_BLOCK_SIZE: usize = 64;

const STATE_SIZE: usize = 128;
const ROUNDS: usize = 42;

// E8 works on 256 nibbles; round constants have 64.
const NIBBLES: usize = 256;
const CONSTANT_NIBBLES: usize = 64;

const SBOXES: [[u8; 16]; 2] = [
    [9, 0, 4, 11, 13, 12, 3, 15, 1, 10, 2, 6, 7, 5, 8, 14],
    [3, 12, 6, 13, 5, 7, 1, 9, 15, 2, 0, 4, 11, 10, 14, 8],
];

// Fractional part of sqrt(2), the first round constant.
const C0: [u8; 32] = [
    0x6a, 0x09, 0xe6, 0x67, 0xf3, 0xbc, 0xc9, 0x08, 0xb2, 0xfb, 0x13, 0x66, 0xea, 0x95, 0x7d, 0x3e,
    0x3a, 0xde, 0xc1, 0x75, 0x12, 0x77, 0x50, 0x99, 0xda, 0x2f, 0x59, 0x0b, 0x06, 0x67, 0x32, 0x2a,
];

type State = [u8; STATE_SIZE];

/// Round constants of E8: each one is the previous pushed through the 6-dimensional
/// round function under an all-zero constant.
static ROUND_CONSTANTS: Lazy<[[u8; CONSTANT_NIBBLES]; ROUNDS]> = Lazy::new(|| {
    let mut rcs = [[0u8; CONSTANT_NIBBLES]; ROUNDS];
    let mut rc = [0u8; CONSTANT_NIBBLES];
    for (i, b) in C0.iter().enumerate() {
        rc[2 * i] = b >> 4;
        rc[2 * i + 1] = b & 0x0f;
    }
    let zero = [0u8; CONSTANT_NIBBLES];
    for slot in rcs.iter_mut() {
        *slot = rc;
        round(&mut rc, &zero);
    }
    rcs
});

static IV: Lazy<State> = Lazy::new(|| {
    let mut h = [0u8; STATE_SIZE];
    // Output length in bits, big-endian.
    h[0] = 0x02;
    f8(&mut h, &[0; DIGEST_BLOCK_SIZE]);
    h
});

#[inline(always)]
fn mul2(a: u8) -> u8 {
    ((a << 1) ^ (a >> 3) ^ ((a >> 2) & 2)) & 0x0f
}

// One round of the generalised JH round function over `a.len()` nibbles: S-boxes
// selected by the constant bits, the linear layer L, then the permutation P.
fn round(a: &mut [u8], rc: &[u8]) {
    let n = a.len();
    let mut t = vec![0u8; n];
    for i in 0..n {
        let bit = (rc[i >> 2] >> (3 - (i & 3))) & 1;
        t[i] = SBOXES[bit as usize][a[i] as usize];
    }
    for i in (0..n).step_by(2) {
        t[i + 1] ^= mul2(t[i]);
        t[i] ^= mul2(t[i + 1]);
    }
    for i in (0..n).step_by(4) {
        t.swap(i + 2, i + 3);
    }
    for i in 0..n / 2 {
        a[i] = t[2 * i];
        a[i + n / 2] = t[2 * i + 1];
    }
    for i in (n / 2..n).step_by(2) {
        a.swap(i, i + 1);
    }
}

#[inline(always)]
fn bit(h: &State, i: usize) -> u8 {
    (h[i >> 3] >> (7 - (i & 7))) & 1
}

fn e8(h: &mut State) {
    // Group bits i, i+256, i+512, i+768 into a nibble.
    let mut grouped = [0u8; NIBBLES];
    for (i, g) in grouped.iter_mut().enumerate() {
        *g = (bit(h, i) << 3) | (bit(h, i + 256) << 2) | (bit(h, i + 512) << 1) | bit(h, i + 768);
    }
    let mut a = [0u8; NIBBLES];
    for i in 0..NIBBLES / 2 {
        a[2 * i] = grouped[i];
        a[2 * i + 1] = grouped[i + NIBBLES / 2];
    }

    for rc in ROUND_CONSTANTS.iter() {
        round(&mut a, rc);
    }

    for i in 0..NIBBLES / 2 {
        grouped[i] = a[2 * i];
        grouped[i + NIBBLES / 2] = a[2 * i + 1];
    }
    h.iter_mut().for_each(|b| *b = 0);
    for (i, g) in grouped.iter().enumerate() {
        let shift = 7 - (i & 7);
        h[i >> 3] |= ((g >> 3) & 1) << shift;
        h[(i + 256) >> 3] |= ((g >> 2) & 1) << shift;
        h[(i + 512) >> 3] |= ((g >> 1) & 1) << shift;
        h[(i + 768) >> 3] |= (g & 1) << shift;
    }
}

fn f8(h: &mut State, block: &[u8]) {
    for i in 0..DIGEST_BLOCK_SIZE {
        h[i] ^= block[i];
    }
    e8(h);
    for i in 0..DIGEST_BLOCK_SIZE {
        h[DIGEST_BLOCK_SIZE + i] ^= block[i];
    }
}

/// JH-512 hasher.
pub type Jh512 = CoreWrapper<Jh512Core>;

/// Jh512Core is the block-level core of the JH-512 hash function.
#[derive(Clone)]
pub struct Jh512Core {
    h: State,
    blocks: u64,
}

impl Default for Jh512Core {
    fn default() -> Self {
        Self { h: *IV, blocks: 0 }
    }
}

impl Reset for Jh512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Jh512Core {}

impl BlockSizeUser for Jh512Core {
    type BlockSize = U64;
}

impl BufferKindUser for Jh512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Jh512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Jh512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let bits = ((self.blocks * DIGEST_BLOCK_SIZE as u64 + pos as u64) as u128) << 3;

        // One padding block for aligned input, two otherwise.
        let mut tail = [0u8; 2 * DIGEST_BLOCK_SIZE];
        tail[..DIGEST_BLOCK_SIZE].copy_from_slice(buffer.pad_with_zeros());
        tail[pos] = 0x80;
        let tail_len = if pos == 0 { DIGEST_BLOCK_SIZE } else { 2 * DIGEST_BLOCK_SIZE };
        tail[tail_len - 16..tail_len].copy_from_slice(&bits.to_be_bytes());

        for block in tail[..tail_len].chunks(DIGEST_BLOCK_SIZE) {
            f8(&mut self.h, block);
        }
        out.copy_from_slice(&self.h[DIGEST_BLOCK_SIZE..]);
    }
}

impl UpdateCore for Jh512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.blocks += 1;
            f8(&mut self.h, b);
        }
    }
}
