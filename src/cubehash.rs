use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U32, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};
use once_cell::sync::Lazy;

use byteorder::{ByteOrder, LittleEndian};

/// Block size, in bytes, of CubeHash16/32-512.
pub const DIGEST_BLOCK_SIZE: usize = 32;

const ROUNDS_PER_BLOCK: usize = 16;
const ROUNDS_FINAL: usize = 160;

type State = [u32; 32];

/// Initial state: h/8, b and r in the first three words, then 10r rounds.
static IV: Lazy<State> = Lazy::new(|| {
    let mut x = [0u32; 32];
    x[0] = 64;
    x[1] = DIGEST_BLOCK_SIZE as u32;
    x[2] = ROUNDS_PER_BLOCK as u32;
    rounds(&mut x, ROUNDS_FINAL);
    x
});

fn rounds(x: &mut State, n: usize) {
    for _ in 0..n {
        for i in 0..16 {
            x[i + 16] = x[i + 16].wrapping_add(x[i]);
        }
        for i in 0..16 {
            x[i] = x[i].rotate_left(7);
        }
        for i in 0..8 {
            x.swap(i, i + 8);
        }
        for i in 0..16 {
            x[i] ^= x[i + 16];
        }
        for i in (16..32).filter(|i| i & 2 == 0) {
            x.swap(i, i ^ 2);
        }
        for i in 0..16 {
            x[i + 16] = x[i + 16].wrapping_add(x[i]);
        }
        for i in 0..16 {
            x[i] = x[i].rotate_left(11);
        }
        for i in (0..16).filter(|i| i & 4 == 0) {
            x.swap(i, i ^ 4);
        }
        for i in 0..16 {
            x[i] ^= x[i + 16];
        }
        for i in (16..32).filter(|i| i & 1 == 0) {
            x.swap(i, i ^ 1);
        }
    }
}

/// CubeHash16/32-512 hasher.
pub type CubeHash512 = CoreWrapper<CubeHash512Core>;

/// CubeHash512Core is the block-level core of CubeHash with 16 rounds per 32-byte block.
#[derive(Clone)]
pub struct CubeHash512Core {
    x: State,
}

impl CubeHash512Core {
    fn absorb(&mut self, block: &[u8]) {
        let mut m = [0u32; 8];
        LittleEndian::read_u32_into(block, &mut m);
        for (x, w) in self.x.iter_mut().zip(m.iter()) {
            *x ^= w;
        }
        rounds(&mut self.x, ROUNDS_PER_BLOCK);
    }
}

impl Default for CubeHash512Core {
    fn default() -> Self {
        Self { x: *IV }
    }
}

impl Reset for CubeHash512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for CubeHash512Core {}

impl BlockSizeUser for CubeHash512Core {
    type BlockSize = U32;
}

impl BufferKindUser for CubeHash512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for CubeHash512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for CubeHash512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let mut block = [0; DIGEST_BLOCK_SIZE];
        block.copy_from_slice(buffer.pad_with_zeros());
        block[pos] = 0x80;
        self.absorb(&block);

        self.x[31] ^= 1;
        rounds(&mut self.x, ROUNDS_FINAL);

        LittleEndian::write_u32_into(&self.x[..16], out);
    }
}

impl UpdateCore for CubeHash512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.absorb(b);
        }
    }
}
