//! Block cipher implementations
//!
//! All ciphers here operate on 16-byte blocks and expose the same in-place
//! single-block interface, so the engine can drive them interchangeably.
//! AES is implemented in-tree; Camellia and ARIA are thin adapters over the
//! RustCrypto `camellia` and `aria` crates.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::Result;

pub mod aes;
pub mod aria;
pub mod camellia;

// Re-exports
pub use aes::{Aes128, Aes192, Aes256};
pub use aria::{Aria128, Aria192, Aria256};
pub use camellia::{Camellia128, Camellia192, Camellia256};

/// Size of the block used by every cipher in this module, in bytes
pub const BLOCK_SIZE: usize = 16;

/// Trait for block ciphers operating on 16-byte blocks
pub trait BlockCipher {
    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Algorithm name
    fn name() -> &'static str;

    /// Creates a new block cipher instance; the key must be exactly
    /// `KEY_SIZE` bytes long
    fn new(key: &[u8]) -> Result<Self>
    where
        Self: Sized;

    /// Encrypts a single block in place
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypts a single block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Generate a random key
    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(vec![0u8; Self::KEY_SIZE]);
        rng.fill_bytes(&mut key);
        key
    }
}
