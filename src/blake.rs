use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{BigEndian, ByteOrder};

/// Block size, in bytes, of BLAKE-512.
pub const DIGEST_BLOCK_SIZE: usize = 128;

const IV: [u64; 8] = [
    0x6A09E667F3BCC908,
    0xBB67AE8584CAA73B,
    0x3C6EF372FE94F82B,
    0xA54FF53A5F1D36F1,
    0x510E527FADE682D1,
    0x9B05688C2B3E6C1F,
    0x1F83D9ABFB41BD6B,
    0x5BE0CD19137E2179,
];

// First digits of pi.
const C: [u64; 16] = [
    0x243F6A8885A308D3,
    0x13198A2E03707344,
    0xA4093822299F31D0,
    0x082EFA98EC4E6C89,
    0x452821E638D01377,
    0xBE5466CF34E90C6C,
    0xC0AC29B7C97C50DD,
    0x3F84D5B5B5470917,
    0x9216D5D98979FB1B,
    0xD1310BA698DFB5AC,
    0x2FFD72DBD01ADFB7,
    0xB8E1AFED6A267E96,
    0xBA7C9045F12C7F99,
    0x24A19947B3916CF7,
    0x0801F2E2858EFC16,
    0x636920D871574E69,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

const ROUNDS: usize = 16;

/// BLAKE-512 hasher.
pub type Blake512 = CoreWrapper<Blake512Core>;

/// Blake512Core is the block-level core of the BLAKE-512 hash function.
#[derive(Clone)]
pub struct Blake512Core {
    h: [u64; 8],
    t: u128, // message bits compressed so far
}

impl Blake512Core {
    fn compress(&mut self, block: &[u8], counter: u128) {
        let mut m = [0; 16];
        BigEndian::read_u64_into(block, &mut m);

        let mut v = [0; 16];
        v[..8].copy_from_slice(&self.h);
        v[8..].copy_from_slice(&C[..8]);
        v[12] ^= counter as u64;
        v[13] ^= counter as u64;
        v[14] ^= (counter >> 64) as u64;
        v[15] ^= (counter >> 64) as u64;

        for r in 0..ROUNDS {
            let s = &SIGMA[r % 10];
            g(&mut v, &m, s, 0, 4, 8, 12, 0);
            g(&mut v, &m, s, 1, 5, 9, 13, 1);
            g(&mut v, &m, s, 2, 6, 10, 14, 2);
            g(&mut v, &m, s, 3, 7, 11, 15, 3);
            g(&mut v, &m, s, 0, 5, 10, 15, 4);
            g(&mut v, &m, s, 1, 6, 11, 12, 5);
            g(&mut v, &m, s, 2, 7, 8, 13, 6);
            g(&mut v, &m, s, 3, 4, 9, 14, 7);
        }

        for i in 0..8 {
            self.h[i] ^= v[i] ^ v[i + 8];
        }
    }
}

#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn g(v: &mut [u64; 16], m: &[u64; 16], s: &[usize; 16], a: usize, b: usize, c: usize, d: usize, i: usize) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[s[2 * i]] ^ C[s[2 * i + 1]]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(25);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[s[2 * i + 1]] ^ C[s[2 * i]]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(11);
}

impl Default for Blake512Core {
    fn default() -> Self {
        Self { h: IV, t: 0 }
    }
}

impl Reset for Blake512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Blake512Core {}

impl BlockSizeUser for Blake512Core {
    type BlockSize = U128;
}

impl BufferKindUser for Blake512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Blake512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Blake512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let bits = self.t + ((pos as u128) << 3);

        let mut block = [0; DIGEST_BLOCK_SIZE];
        block.copy_from_slice(buffer.pad_with_zeros());
        block[pos] = 0x80;

        // The length and the trailing one bit need 17 bytes; a final block
        // without message bits is compressed with a zero counter.
        if pos <= DIGEST_BLOCK_SIZE - 17 {
            block[DIGEST_BLOCK_SIZE - 17] |= 0x01;
            BigEndian::write_u128(&mut block[DIGEST_BLOCK_SIZE - 16..], bits);
            self.compress(&block, if pos == 0 { 0 } else { bits });
        } else {
            self.compress(&block, bits);
            let mut last = [0; DIGEST_BLOCK_SIZE];
            last[DIGEST_BLOCK_SIZE - 17] = 0x01;
            BigEndian::write_u128(&mut last[DIGEST_BLOCK_SIZE - 16..], bits);
            self.compress(&last, 0);
        }

        BigEndian::write_u64_into(&self.h, out);
    }
}

impl UpdateCore for Blake512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.t += (DIGEST_BLOCK_SIZE as u128) << 3;
            let t = self.t;
            self.compress(b, t);
        }
    }
}
