//! AES block cipher implementations
//!
//! Implements the Advanced Encryption Standard (FIPS 197) for 128-, 192- and
//! 256-bit keys. The S-box is computed with branchless GF(2^8) arithmetic
//! instead of table lookups, so memory access patterns do not depend on
//! secret data. Round keys are zeroized on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Result};

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;
/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;
/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;
/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = BLOCK_SIZE;

/// Round constants for key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000, 0x40000000,
    0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply two bytes in GF(2^8) with the AES reduction poly x^8+x^4+x^3+x+1
#[inline(always)]
fn gf_mul(a: u8, b: u8) -> u8 {
    let mut p = 0u8;
    let mut a = a;
    let mut b = b;
    for _ in 0..8 {
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let hi = a & 0x80;
        a <<= 1;
        a ^= ((hi != 0) as u8) * 0x1B;
        b >>= 1;
    }
    p
}

/// Raise to the 254th power (the multiplicative inverse) in constant time
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);
    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    y = gf_mul(y, x2);

    // mask to zero if the original x was zero
    let mask = ((x != 0) as u8).wrapping_neg();
    y & mask
}

/// Forward S-box: inv(x) XOR ROTL(inv(x), 1..4) XOR 0x63
#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

/// Inverse S-box: undo the affine transform, then invert
#[inline(always)]
fn inv_sbox(x: u8) -> u8 {
    let y = x ^ 0x63;
    let u = y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6);
    gf_inv(u)
}

#[inline(always)]
fn load_word(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let b = word.to_be_bytes();
    u32::from_be_bytes([sbox(b[0]), sbox(b[1]), sbox(b[2]), sbox(b[3])])
}

/// Key expansion shared by all key sizes. `NK` is the key length in words,
/// `WORDS` the total schedule length; `RK` is `4 * WORDS` bytes.
fn expand_key<const NK: usize, const WORDS: usize, const RK: usize>(key: &[u8]) -> [u8; RK] {
    let mut w = [0u32; WORDS];
    for i in 0..NK {
        w[i] = load_word(&key[i * 4..(i + 1) * 4]);
    }
    for i in NK..WORDS {
        let mut t = w[i - 1];
        if i % NK == 0 {
            t = sub_word(t.rotate_left(8)) ^ RCON[i / NK];
        } else if NK == 8 && i % 8 == 4 {
            t = sub_word(t);
        }
        w[i] = w[i - NK] ^ t;
    }

    let mut bytes = [0u8; RK];
    for i in 0..WORDS {
        bytes[i * 4..(i + 1) * 4].copy_from_slice(&w[i].to_be_bytes());
    }
    w.zeroize();
    bytes
}

#[inline(always)]
fn mul2(byte: u8) -> u8 {
    let high = byte >> 7;
    (byte << 1) ^ (high * 0x1B)
}

#[inline(always)]
fn mul9(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ b
}
#[inline(always)]
fn mul11(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(b) ^ b
}
#[inline(always)]
fn mul13(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(mul2(b)) ^ b
}
#[inline(always)]
fn mul14(b: u8) -> u8 {
    mul2(mul2(mul2(b))) ^ mul2(mul2(b)) ^ mul2(b)
}

fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

fn inv_sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

fn shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    state[1] = t[5];
    state[5] = t[9];
    state[9] = t[13];
    state[13] = t[1];
    state[2] = t[10];
    state[6] = t[14];
    state[10] = t[2];
    state[14] = t[6];
    state[3] = t[15];
    state[7] = t[3];
    state[11] = t[7];
    state[15] = t[11];
}

fn inv_shift_rows(state: &mut [u8; 16]) {
    let t = *state;
    state[1] = t[13];
    state[5] = t[1];
    state[9] = t[5];
    state[13] = t[9];
    state[2] = t[10];
    state[6] = t[14];
    state[10] = t[2];
    state[14] = t[6];
    state[3] = t[7];
    state[7] = t[11];
    state[11] = t[15];
    state[15] = t[3];
}

fn mix_columns(state: &mut [u8; 16]) {
    for c in 0..4 {
        let i = c * 4;
        let (s0, s1, s2, s3) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = mul2(s0) ^ mul2(s1) ^ s1 ^ s2 ^ s3;
        state[i + 1] = s0 ^ mul2(s1) ^ mul2(s2) ^ s2 ^ s3;
        state[i + 2] = s0 ^ s1 ^ mul2(s2) ^ mul2(s3) ^ s3;
        state[i + 3] = mul2(s0) ^ s0 ^ s1 ^ s2 ^ mul2(s3);
    }
}

fn inv_mix_columns(state: &mut [u8; 16]) {
    for c in 0..4 {
        let i = c * 4;
        let (s0, s1, s2, s3) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = mul14(s0) ^ mul11(s1) ^ mul13(s2) ^ mul9(s3);
        state[i + 1] = mul9(s0) ^ mul14(s1) ^ mul11(s2) ^ mul13(s3);
        state[i + 2] = mul13(s0) ^ mul9(s1) ^ mul14(s2) ^ mul11(s3);
        state[i + 3] = mul11(s0) ^ mul13(s1) ^ mul9(s2) ^ mul14(s3);
    }
}

#[inline(always)]
fn add_round_key(state: &mut [u8; 16], round_key: &[u8]) {
    for i in 0..16 {
        state[i] ^= round_key[i];
    }
}

/// Encrypt one block with an expanded key schedule of `rounds` rounds
fn encrypt_state(block: &mut [u8], round_keys: &[u8], rounds: usize) -> Result<()> {
    validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;

    let mut state = [0u8; 16];
    state.copy_from_slice(block);

    add_round_key(&mut state, &round_keys[0..16]);
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &round_keys[round * 16..round * 16 + 16]);
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[rounds * 16..rounds * 16 + 16]);

    block.copy_from_slice(&state);
    state.zeroize();
    Ok(())
}

/// Decrypt one block with an expanded key schedule of `rounds` rounds
fn decrypt_state(block: &mut [u8], round_keys: &[u8], rounds: usize) -> Result<()> {
    validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;

    let mut state = [0u8; 16];
    state.copy_from_slice(block);

    add_round_key(&mut state, &round_keys[rounds * 16..rounds * 16 + 16]);
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, &round_keys[round * 16..round * 16 + 16]);
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, &round_keys[0..16]);

    block.copy_from_slice(&state);
    state.zeroize();
    Ok(())
}

/// AES-128 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes128 {
    round_keys: [u8; 176], // 11 round keys of 16 bytes
}

/// AES-192 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes192 {
    round_keys: [u8; 208], // 13 round keys of 16 bytes
}

/// AES-256 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256 {
    round_keys: [u8; 240], // 15 round keys of 16 bytes
}

impl BlockCipher for Aes128 {
    const KEY_SIZE: usize = AES128_KEY_SIZE;

    fn name() -> &'static str {
        "AES-128"
    }

    fn new(key: &[u8]) -> Result<Self> {
        validate::length("AES-128 key", key.len(), AES128_KEY_SIZE)?;
        Ok(Aes128 {
            round_keys: expand_key::<4, 44, 176>(key),
        })
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        encrypt_state(block, &self.round_keys, 10)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        decrypt_state(block, &self.round_keys, 10)
    }
}

impl BlockCipher for Aes192 {
    const KEY_SIZE: usize = AES192_KEY_SIZE;

    fn name() -> &'static str {
        "AES-192"
    }

    fn new(key: &[u8]) -> Result<Self> {
        validate::length("AES-192 key", key.len(), AES192_KEY_SIZE)?;
        Ok(Aes192 {
            round_keys: expand_key::<6, 52, 208>(key),
        })
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        encrypt_state(block, &self.round_keys, 12)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        decrypt_state(block, &self.round_keys, 12)
    }
}

impl BlockCipher for Aes256 {
    const KEY_SIZE: usize = AES256_KEY_SIZE;

    fn name() -> &'static str {
        "AES-256"
    }

    fn new(key: &[u8]) -> Result<Self> {
        validate::length("AES-256 key", key.len(), AES256_KEY_SIZE)?;
        Ok(Aes256 {
            round_keys: expand_key::<8, 60, 240>(key),
        })
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        encrypt_state(block, &self.round_keys, 14)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        decrypt_state(block, &self.round_keys, 14)
    }
}

#[cfg(test)]
mod tests;
