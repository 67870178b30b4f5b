//! ChaCha20 stream cipher (RFC 8439)
//!
//! Supports the standard 256-bit key and the original 128-bit variant from
//! the Bernstein paper, where the key halves are repeated and the "expand
//! 16-byte k" constants are used. The block counter starts at a caller-chosen
//! value so keystream blocks can be addressed directly (the AEAD layer uses
//! counter 0 for the one-time MAC key and counter 1 onward for data).

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, Error, Result};

/// ChaCha20 key size in bytes (256-bit variant)
pub const CHACHA20_KEY_SIZE: usize = 32;
/// ChaCha20 key size in bytes (original 128-bit variant)
pub const CHACHA20_SHORT_KEY_SIZE: usize = 16;
/// ChaCha20 nonce size in bytes
pub const CHACHA20_NONCE_SIZE: usize = 12;
/// ChaCha20 block size in bytes
pub const CHACHA20_BLOCK_SIZE: usize = 64;

/// "expand 32-byte k"
const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];
/// "expand 16-byte k"
const TAU: [u32; 4] = [0x6170_7865, 0x3120_646e, 0x7962_2d36, 0x6b20_6574];

/// ChaCha20 stream cipher instance
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20 {
    /// Initial state (constants, key, counter, nonce)
    state: [u32; 16],
    /// Current keystream block
    buffer: [u8; CHACHA20_BLOCK_SIZE],
    /// Position within the current keystream block
    position: usize,
    /// Block counter for the next keystream block
    counter: u32,
}

#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Run the 20-round permutation over `input` and add it back in
fn chacha20_block(input: &[u32; 16], output: &mut [u8; CHACHA20_BLOCK_SIZE]) {
    let mut working = *input;

    for _ in 0..10 {
        // column rounds
        quarter_round(&mut working, 0, 4, 8, 12);
        quarter_round(&mut working, 1, 5, 9, 13);
        quarter_round(&mut working, 2, 6, 10, 14);
        quarter_round(&mut working, 3, 7, 11, 15);
        // diagonal rounds
        quarter_round(&mut working, 0, 5, 10, 15);
        quarter_round(&mut working, 1, 6, 11, 12);
        quarter_round(&mut working, 2, 7, 8, 13);
        quarter_round(&mut working, 3, 4, 9, 14);
    }

    for (i, word) in working.iter_mut().enumerate() {
        *word = word.wrapping_add(input[i]);
        LittleEndian::write_u32(&mut output[i * 4..(i + 1) * 4], *word);
    }
    working.zeroize();
}

impl ChaCha20 {
    /// Creates a new cipher from a 16- or 32-byte key, a 12-byte nonce and an
    /// initial block counter
    pub fn new(key: &[u8], nonce: &[u8], initial_counter: u32) -> Result<Self> {
        validate::length("ChaCha20 nonce", nonce.len(), CHACHA20_NONCE_SIZE)?;

        let mut state = [0u32; 16];
        match key.len() {
            CHACHA20_KEY_SIZE => {
                state[0..4].copy_from_slice(&SIGMA);
                for i in 0..8 {
                    state[4 + i] = LittleEndian::read_u32(&key[i * 4..(i + 1) * 4]);
                }
            }
            CHACHA20_SHORT_KEY_SIZE => {
                // 128-bit keys use the tau constants with the key repeated
                state[0..4].copy_from_slice(&TAU);
                for i in 0..4 {
                    let word = LittleEndian::read_u32(&key[i * 4..(i + 1) * 4]);
                    state[4 + i] = word;
                    state[8 + i] = word;
                }
            }
            _ => {
                return Err(Error::param("key", "ChaCha20 key must be 16 or 32 bytes"));
            }
        }

        state[12] = initial_counter;
        state[13] = LittleEndian::read_u32(&nonce[0..4]);
        state[14] = LittleEndian::read_u32(&nonce[4..8]);
        state[15] = LittleEndian::read_u32(&nonce[8..12]);

        Ok(ChaCha20 {
            state,
            buffer: [0u8; CHACHA20_BLOCK_SIZE],
            position: CHACHA20_BLOCK_SIZE, // force a refill on first use
            counter: initial_counter,
        })
    }

    /// Generate the next keystream block into the internal buffer
    fn refill(&mut self) {
        let mut input = self.state;
        input[12] = self.counter;
        chacha20_block(&input, &mut self.buffer);
        input.zeroize();
        self.counter = self.counter.wrapping_add(1);
        self.position = 0;
    }

    /// XOR `data` in place with the keystream; continues from where the
    /// previous call left off
    pub fn process(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            if self.position == CHACHA20_BLOCK_SIZE {
                self.refill();
            }
            *byte ^= self.buffer[self.position];
            self.position += 1;
        }
    }

    /// Produce `output.len()` raw keystream bytes
    pub fn keystream(&mut self, output: &mut [u8]) {
        output.iter_mut().for_each(|b| *b = 0);
        self.process(output);
    }
}
