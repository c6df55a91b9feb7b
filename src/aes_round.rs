use aes::{hazmat::cipher_round, Block};
use byteorder::{ByteOrder, LittleEndian};

/// One AES encryption round (SubBytes, ShiftRows, MixColumns, AddRoundKey) over a
/// 16-byte state laid out in the standard AES column-major byte order.
pub(crate) fn encrypt_round(state: &mut [u8; 16], key: &[u8; 16]) {
    cipher_round(Block::from_mut_slice(state), Block::from_slice(key));
}

/// Unkeyed AES round over four little-endian 32-bit words, the layout SHAvite-3 works in.
pub(crate) fn encrypt_round_words(x: [u32; 4]) -> [u32; 4] {
    let mut state = [0; 16];
    LittleEndian::write_u32_into(&x, &mut state);
    encrypt_round(&mut state, &[0; 16]);

    let mut out = [0; 4];
    LittleEndian::read_u32_into(&state, &mut out);
    out
}
