//! Primitive adapters: one uniform transform surface per cipher family
//!
//! The context owns exactly one adapter at a time; switching algorithms
//! drops the old adapter (key schedules zeroize themselves) and builds a
//! fresh one on the next lazy init.

use cryptport_primitives::block::{
    Aes128, Aes192, Aes256, Aria128, Aria192, Aria256, BlockCipher, Camellia128, Camellia192,
    Camellia256, BLOCK_SIZE,
};
use cryptport_primitives::stream::chacha20::ChaCha20;
use cryptport_primitives::ChaChaPolyStream;
use zeroize::Zeroizing;

use crate::algorithm::{Algorithm, Direction};
use crate::error::{Error, Result};

/// One concrete block cipher instance
pub(crate) enum BlockKind {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
    Camellia128(Camellia128),
    Camellia192(Camellia192),
    Camellia256(Camellia256),
    Aria128(Aria128),
    Aria192(Aria192),
    Aria256(Aria256),
}

impl BlockKind {
    /// Build the cipher named by `algorithm` from an exactly-sized key
    pub(crate) fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self> {
        let kind = match algorithm {
            Algorithm::Aes128Ecb | Algorithm::Aes128Cbc => BlockKind::Aes128(Aes128::new(key)?),
            Algorithm::Aes192Ecb | Algorithm::Aes192Cbc => BlockKind::Aes192(Aes192::new(key)?),
            Algorithm::Aes256Ecb | Algorithm::Aes256Cbc => BlockKind::Aes256(Aes256::new(key)?),
            Algorithm::Camellia128Ecb | Algorithm::Camellia128Cbc => {
                BlockKind::Camellia128(Camellia128::new(key)?)
            }
            Algorithm::Camellia192Ecb | Algorithm::Camellia192Cbc => {
                BlockKind::Camellia192(Camellia192::new(key)?)
            }
            Algorithm::Camellia256Ecb | Algorithm::Camellia256Cbc => {
                BlockKind::Camellia256(Camellia256::new(key)?)
            }
            Algorithm::Aria128Ecb | Algorithm::Aria128Cbc => BlockKind::Aria128(Aria128::new(key)?),
            Algorithm::Aria192Ecb | Algorithm::Aria192Cbc => BlockKind::Aria192(Aria192::new(key)?),
            Algorithm::Aria256Ecb | Algorithm::Aria256Cbc => BlockKind::Aria256(Aria256::new(key)?),
            Algorithm::ChaCha20 | Algorithm::ChaCha20Poly1305 => {
                return Err(Error::Unsupported("not a block cipher algorithm"));
            }
        };
        Ok(kind)
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        match self {
            BlockKind::Aes128(c) => c.encrypt_block(block)?,
            BlockKind::Aes192(c) => c.encrypt_block(block)?,
            BlockKind::Aes256(c) => c.encrypt_block(block)?,
            BlockKind::Camellia128(c) => c.encrypt_block(block)?,
            BlockKind::Camellia192(c) => c.encrypt_block(block)?,
            BlockKind::Camellia256(c) => c.encrypt_block(block)?,
            BlockKind::Aria128(c) => c.encrypt_block(block)?,
            BlockKind::Aria192(c) => c.encrypt_block(block)?,
            BlockKind::Aria256(c) => c.encrypt_block(block)?,
        }
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        match self {
            BlockKind::Aes128(c) => c.decrypt_block(block)?,
            BlockKind::Aes192(c) => c.decrypt_block(block)?,
            BlockKind::Aes256(c) => c.decrypt_block(block)?,
            BlockKind::Camellia128(c) => c.decrypt_block(block)?,
            BlockKind::Camellia192(c) => c.decrypt_block(block)?,
            BlockKind::Camellia256(c) => c.decrypt_block(block)?,
            BlockKind::Aria128(c) => c.decrypt_block(block)?,
            BlockKind::Aria192(c) => c.decrypt_block(block)?,
            BlockKind::Aria256(c) => c.decrypt_block(block)?,
        }
        Ok(())
    }
}

/// The per-algorithm state owned by an initialized context
pub(crate) enum Adapter {
    /// Electronic codebook: independent blocks
    Ecb(BlockKind),
    /// Cipher block chaining; `chain` carries across write calls
    Cbc { cipher: BlockKind, chain: [u8; BLOCK_SIZE] },
    /// ChaCha20 keystream, position carried across write calls
    Stream(ChaCha20),
    /// ChaCha20-Poly1305. `stream` is rebuilt per message once the AAD
    /// arrives; the key is retained for that.
    Aead {
        key: Zeroizing<Vec<u8>>,
        stream: Option<ChaChaPolyStream>,
    },
}

impl Adapter {
    /// Transform `data` in place. Ecb/Cbc require block-aligned input; the
    /// pipeline guarantees that, so misalignment here is an internal bug.
    pub(crate) fn transform(&mut self, data: &mut [u8], direction: Direction) -> Result<()> {
        match self {
            Adapter::Ecb(cipher) => {
                check_aligned(data.len())?;
                for block in data.chunks_mut(BLOCK_SIZE) {
                    match direction {
                        Direction::Encrypt => cipher.encrypt_block(block)?,
                        Direction::Decrypt => cipher.decrypt_block(block)?,
                    }
                }
            }
            Adapter::Cbc { cipher, chain } => {
                check_aligned(data.len())?;
                for block in data.chunks_mut(BLOCK_SIZE) {
                    match direction {
                        Direction::Encrypt => {
                            for (b, c) in block.iter_mut().zip(chain.iter()) {
                                *b ^= *c;
                            }
                            cipher.encrypt_block(block)?;
                            chain.copy_from_slice(block);
                        }
                        Direction::Decrypt => {
                            let mut next_chain = [0u8; BLOCK_SIZE];
                            next_chain.copy_from_slice(block);
                            cipher.decrypt_block(block)?;
                            for (b, c) in block.iter_mut().zip(chain.iter()) {
                                *b ^= *c;
                            }
                            *chain = next_chain;
                        }
                    }
                }
            }
            Adapter::Stream(cipher) => {
                // XOR transform, same both directions
                cipher.process(data);
            }
            Adapter::Aead { .. } => {
                return Err(Error::Unsupported("AEAD data goes through the framing layer"));
            }
        }
        Ok(())
    }
}

#[inline]
fn check_aligned(len: usize) -> Result<()> {
    if len % BLOCK_SIZE != 0 {
        return Err(Error::BadBlockSize {
            expected: BLOCK_SIZE,
            actual: len,
        });
    }
    Ok(())
}
