use digest::{
    block_buffer::Eager,
    core_api::{Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use byteorder::{ByteOrder, LittleEndian};

use crate::aes_round::encrypt_round;

/// Block size, in bytes, of ECHO-512.
pub const DIGEST_BLOCK_SIZE: usize = 128;

const ROUNDS: usize = 10;
const OUTPUT_BITS: u16 = 512;

type Word = [u8; 16];

#[inline(always)]
fn xtime(a: u8) -> u8 {
    (a << 1) ^ if a & 0x80 != 0 { 0x1b } else { 0 }
}

// AES MixColumns applied bytewise across four 128-bit words.
fn big_mix_column(w: &mut [Word]) {
    for b in 0..16 {
        let (a0, a1, a2, a3) = (w[0][b], w[1][b], w[2][b], w[3][b]);
        let all = a0 ^ a1 ^ a2 ^ a3;
        w[0][b] = a0 ^ all ^ xtime(a0 ^ a1);
        w[1][b] = a1 ^ all ^ xtime(a1 ^ a2);
        w[2][b] = a2 ^ all ^ xtime(a2 ^ a3);
        w[3][b] = a3 ^ all ^ xtime(a3 ^ a0);
    }
}

fn compress(v: &mut [Word; 8], block: &[u8], counter: u128) {
    let mut w = [[0u8; 16]; 16];
    w[..8].copy_from_slice(&v[..]);
    for (i, word) in w[8..].iter_mut().enumerate() {
        word.copy_from_slice(&block[16 * i..16 * i + 16]);
    }

    let mut k = counter;
    for _ in 0..ROUNDS {
        // BigSubWords
        for word in w.iter_mut() {
            encrypt_round(word, &k.to_le_bytes());
            encrypt_round(word, &[0; 16]);
            k = k.wrapping_add(1);
        }

        // BigShiftRows: word (row r, column c) sits at index 4c + r.
        let t = w;
        for c in 0..4 {
            for r in 0..4 {
                w[4 * c + r] = t[4 * ((c + r) % 4) + r];
            }
        }

        for column in w.chunks_mut(4) {
            big_mix_column(column);
        }
    }

    for i in 0..8 {
        for b in 0..16 {
            v[i][b] ^= block[16 * i + b] ^ w[i][b] ^ w[i + 8][b];
        }
    }
}

/// ECHO-512 hasher.
pub type Echo512 = CoreWrapper<Echo512Core>;

/// Echo512Core is the block-level core of the ECHO-512 hash function.
#[derive(Clone)]
pub struct Echo512Core {
    v: [Word; 8],
    count: u128, // message bits compressed so far
}

impl Default for Echo512Core {
    fn default() -> Self {
        let mut word = [0u8; 16];
        LittleEndian::write_u16(&mut word, OUTPUT_BITS);
        Self {
            v: [word; 8],
            count: 0,
        }
    }
}

impl Reset for Echo512Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Echo512Core {}

impl BlockSizeUser for Echo512Core {
    type BlockSize = U128;
}

impl BufferKindUser for Echo512Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Echo512Core {
    type OutputSize = U64;
}

impl FixedOutputCore for Echo512Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let bits = self.count + ((pos as u128) << 3);
        let mut counter = if pos > 0 { bits } else { 0 };

        let mut block = [0; DIGEST_BLOCK_SIZE];
        block.copy_from_slice(buffer.pad_with_zeros());
        block[pos] = 0x80;

        // Output length and bit count take the last 18 bytes.
        if pos >= DIGEST_BLOCK_SIZE - 18 {
            compress(&mut self.v, &block, counter);
            counter = 0;
            block = [0; DIGEST_BLOCK_SIZE];
        }
        LittleEndian::write_u16(&mut block[110..112], OUTPUT_BITS);
        LittleEndian::write_u128(&mut block[112..], bits);
        compress(&mut self.v, &block, counter);

        for (chunk, word) in out.chunks_mut(16).zip(self.v.iter()) {
            chunk.copy_from_slice(word);
        }
    }
}

impl UpdateCore for Echo512Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for b in blocks {
            self.count += (DIGEST_BLOCK_SIZE as u128) << 3;
            compress(&mut self.v, b, self.count);
        }
    }
}
