use digest::{
    block_buffer::Lazy,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::U64,
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{ByteOrder, LittleEndian};

/// Block size, in bytes, of Skein-512.
pub const DIGEST_BLOCK_SIZE: usize = 64;

const ROTATIONS: [[u32; 4]; 8] = [
    [46, 36, 19, 37],
    [33, 27, 14, 42],
    [17, 49, 36, 39],
    [44, 9, 54, 56],
    [39, 30, 34, 24],
    [13, 50, 10, 17],
    [25, 29, 39, 43],
    [8, 35, 56, 22],
];

const PERMUTATION: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];

const KEY_SCHEDULE_PARITY: u64 = 0x1BD11BDAA9FC1A22;

const ROUNDS: usize = 72;

const TYPE_MESSAGE: u64 = 48;
const TYPE_OUTPUT: u64 = 63;

const FLAG_FIRST: u64 = 1 << 62;
const FLAG_FINAL: u64 = 1 << 63;

/// Chaining value after processing the Skein-512-512 configuration block.
const IV: [u64; 8] = [
    0x4903ADFF749C51CE,
    0x0D95DE399746DF03,
    0x8FD1934127C79BCE,
    0x9A255629FF352CB1,
    0x5DB62599DF6CA7B0,
    0xEABE394CA9D5C3F4,
    0x991112C71A75B523,
    0xAE18A40B660FCC33,
];

fn threefish(key: &[u64; 8], tweak: [u64; 2], plaintext: &[u64; 8]) -> [u64; 8] {
    let mut k = [0u64; 9];
    k[..8].copy_from_slice(key);
    k[8] = key.iter().fold(KEY_SCHEDULE_PARITY, |acc, w| acc ^ w);
    let t = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];

    let inject = |v: &mut [u64; 8], s: usize| {
        for (i, w) in v.iter_mut().enumerate() {
            *w = w.wrapping_add(k[(s + i) % 9]);
        }
        v[5] = v[5].wrapping_add(t[s % 3]);
        v[6] = v[6].wrapping_add(t[(s + 1) % 3]);
        v[7] = v[7].wrapping_add(s as u64);
    };

    let mut v = *plaintext;
    for d in 0..ROUNDS {
        if d % 4 == 0 {
            inject(&mut v, d / 4);
        }
        let mut f = [0u64; 8];
        for (j, r) in ROTATIONS[d % 8].iter().enumerate() {
            let a = v[2 * j].wrapping_add(v[2 * j + 1]);
            f[2 * j] = a;
            f[2 * j + 1] = v[2 * j + 1].rotate_left(*r) ^ a;
        }
        for (i, p) in PERMUTATION.iter().enumerate() {
            v[i] = f[*p];
        }
    }
    inject(&mut v, ROUNDS / 4);
    v
}

// One UBI step: g = E_g(tweak, m) ^ m.
fn ubi_block(g: &mut [u64; 8], block: &[u8], position: u64, tweak_hi: u64) {
    let mut m = [0u64; 8];
    LittleEndian::read_u64_into(block, &mut m);
    let e = threefish(g, [position, tweak_hi], &m);
    for i in 0..8 {
        g[i] = e[i] ^ m[i];
    }
}

/// Skein-512-512 hasher.
pub type Skein512 = CoreWrapper<Skein512Core>;

/// Skein512Core is the block-level core of Skein-512 with a 512-bit output.
///
/// The buffer is lazy so the last message block is still at hand when finalizing;
/// it has to be processed with the final flag set.
#[derive(Clone)]
pub struct Skein512Core {
    g: [u64; 8],
    position: u64, // message bytes processed so far
    first: bool,
}

impl Skein512Core {
    fn process(&mut self, block: &[u8], len: usize, last: bool) {
        self.position += len as u64;
        let mut tweak_hi = TYPE_MESSAGE << 56;
        if self.first {
            tweak_hi |= FLAG_FIRST;
        }
        if last {
            tweak_hi |= FLAG_FINAL;
        }
        ubi_block(&mut self.g, block, self.position, tweak_hi);
        self.first = false;
    }
}

impl Default for Skein512Core {
    fn default() -> Self {
        Self {
            g: IV,
            position: 0,
            first: true,
        }
    }
}

impl Reset for Skein512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Skein512Core {}

impl BlockSizeUser for Skein512Core {
    type BlockSize = U64;
}

impl BufferKindUser for Skein512Core {
    type BufferKind = Lazy;
}

impl OutputSizeUser for Skein512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Skein512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let len = buffer.get_pos();
        let mut block = [0; DIGEST_BLOCK_SIZE];
        block.copy_from_slice(buffer.pad_with_zeros());
        self.process(&block, len, true);

        let mut g = self.g;
        ubi_block(
            &mut g,
            &[0; DIGEST_BLOCK_SIZE],
            8,
            (TYPE_OUTPUT << 56) | FLAG_FIRST | FLAG_FINAL,
        );
        LittleEndian::write_u64_into(&g, out);
    }
}

impl UpdateCore for Skein512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.process(b, DIGEST_BLOCK_SIZE, false);
        }
    }
}
