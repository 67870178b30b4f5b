//! Cipher context: configuration, lazy init and the write pipeline
//!
//! A context holds the configured algorithm, key, IV and direction together
//! with the buffering state that lets callers write arbitrary-sized chunks
//! while the primitives only see block-aligned input. Reconfiguring any
//! setting marks the context for re-initialization; the key schedule is
//! rebuilt lazily on the next write.

use cryptport_primitives::stream::chacha20::ChaCha20;
use cryptport_primitives::ChaChaPolyStream;
use zeroize::{Zeroize, Zeroizing};

use crate::adapter::{Adapter, BlockKind};
use crate::algorithm::{Algorithm, Direction};
use crate::error::{Error, Result};

/// Largest key the context will store, across all supported ciphers
pub const MAX_KEY_LEN: usize = 64;
/// Largest IV the context will store
pub const MAX_IV_LEN: usize = 16;
/// Largest primitive block size
pub const MAX_BLOCK_LEN: usize = 16;
/// AEAD authentication tag length
pub const TAG_LEN: usize = 16;
/// AEAD nonce length
pub const NONCE_LEN: usize = 12;

/// Lifecycle state of an open context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PortState {
    /// Configuration changed; key schedule must be rebuilt before use
    NeedsInit,
    /// Initialized and accepting message bytes
    Ready,
    /// AEAD only: the next write carries associated data
    NeedsAad,
}

/// Derive the per-message working nonce: the IV anchor with its trailing
/// `min(len(aad), 8)` bytes XOR-ed against the leading AAD bytes. Not a
/// standard construction, but the framing depends on it bit for bit.
pub(crate) fn derive_nonce(anchor: &[u8; NONCE_LEN], aad: &[u8]) -> [u8; NONCE_LEN] {
    let mut nonce = *anchor;
    let n = usize::min(aad.len(), 8);
    for i in 0..n {
        nonce[NONCE_LEN - n + i] ^= aad[i];
    }
    nonce
}

/// Per-port cipher state
pub(crate) struct CipherContext {
    algorithm: Algorithm,
    direction: Direction,
    /// Configured key, zero-padded; the active prefix is `algorithm.key_len()`
    key: [u8; MAX_KEY_LEN],
    /// Configured IV, zero-padded
    iv: [u8; MAX_IV_LEN],
    /// Working nonce, derived per AEAD message without disturbing `iv`
    nonce: [u8; MAX_IV_LEN],
    block_size: usize,
    adapter: Option<Adapter>,
    unprocessed: [u8; MAX_BLOCK_LEN],
    unprocessed_len: usize,
    output: Vec<u8>,
    state: PortState,
}

impl CipherContext {
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        CipherContext {
            algorithm,
            direction: Direction::Encrypt,
            key: [0u8; MAX_KEY_LEN],
            iv: [0u8; MAX_IV_LEN],
            nonce: [0u8; MAX_IV_LEN],
            block_size: algorithm.block_size(),
            adapter: None,
            unprocessed: [0u8; MAX_BLOCK_LEN],
            unprocessed_len: 0,
            output: Vec::new(),
            state: PortState::NeedsInit,
        }
    }

    /// Switch algorithms. Buffered bytes were produced under the old block
    /// size and are dropped along with the adapter.
    pub(crate) fn set_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm != self.algorithm {
            self.adapter = None;
            self.unprocessed.zeroize();
            self.unprocessed_len = 0;
            self.block_size = algorithm.block_size();
            self.algorithm = algorithm;
        }
        self.state = PortState::NeedsInit;
    }

    /// Store a key. `None` zeroes it; over-long input is truncated to
    /// `MAX_KEY_LEN` (bounded copy, not an error), under-long input is
    /// implicitly zero-padded.
    pub(crate) fn set_key(&mut self, key: Option<&[u8]>) {
        self.key.zeroize();
        if let Some(bytes) = key {
            let n = usize::min(bytes.len(), MAX_KEY_LEN);
            self.key[..n].copy_from_slice(&bytes[..n]);
        }
        self.state = PortState::NeedsInit;
    }

    /// Store an IV, clearing the working nonce alongside it
    pub(crate) fn set_iv(&mut self, iv: Option<&[u8]>) {
        self.iv.zeroize();
        self.nonce.zeroize();
        if let Some(bytes) = iv {
            let n = usize::min(bytes.len(), MAX_IV_LEN);
            self.iv[..n].copy_from_slice(&bytes[..n]);
        }
        self.state = PortState::NeedsInit;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.state = PortState::NeedsInit;
    }

    /// Rebuild the adapter from the current configuration. Pending output
    /// belongs to the previous configuration and is discarded. On failure
    /// the context stays in `NeedsInit` and is retryable.
    fn init(&mut self) -> Result<()> {
        let key = &self.key[..self.algorithm.key_len()];
        let adapter = match self.algorithm {
            Algorithm::ChaCha20Poly1305 => Adapter::Aead {
                key: Zeroizing::new(key.to_vec()),
                stream: None,
            },
            Algorithm::ChaCha20 => {
                let mut nonce = [0u8; NONCE_LEN];
                nonce.copy_from_slice(&self.iv[..NONCE_LEN]);
                // initial counter rides in the top 4 bytes of the IV buffer
                let counter =
                    u32::from_be_bytes([self.iv[12], self.iv[13], self.iv[14], self.iv[15]]);
                Adapter::Stream(ChaCha20::new(key, &nonce, counter)?)
            }
            alg if alg.is_cbc() => {
                let cipher = BlockKind::new(alg, key)?;
                let mut chain = [0u8; MAX_BLOCK_LEN];
                chain.copy_from_slice(&self.iv);
                Adapter::Cbc { cipher, chain }
            }
            alg => Adapter::Ecb(BlockKind::new(alg, key)?),
        };

        self.adapter = Some(adapter);
        self.unprocessed.zeroize();
        self.unprocessed_len = 0;
        self.output.clear();
        self.state = if self.algorithm.is_aead() {
            PortState::NeedsAad
        } else {
            PortState::Ready
        };
        Ok(())
    }

    /// Feed input through the pipeline. Empty input is a no-op.
    pub(crate) fn write(&mut self, input: &[u8]) -> Result<()> {
        if input.is_empty() {
            return Ok(());
        }
        if self.state == PortState::NeedsInit {
            self.init()?;
        }
        if self.algorithm.is_aead() {
            self.write_aead(input)
        } else {
            self.write_blocks(input)
        }
    }

    /// Partial-block buffering: hold back a tail shorter than one block and
    /// submit everything else block-aligned. Splitting an input across
    /// write calls never changes the produced output.
    fn write_blocks(&mut self, mut input: &[u8]) -> Result<()> {
        let bs = self.block_size;
        let direction = self.direction;
        let Some(adapter) = self.adapter.as_mut() else {
            return Err(Error::NotOpen);
        };

        if bs == 0 {
            // stream with no alignment requirement
            let start = self.output.len();
            self.output.extend_from_slice(input);
            adapter.transform(&mut self.output[start..], direction)?;
            return Ok(());
        }

        if self.unprocessed_len > 0 {
            let free = bs - self.unprocessed_len;
            if input.len() < free {
                self.unprocessed[self.unprocessed_len..self.unprocessed_len + input.len()]
                    .copy_from_slice(input);
                self.unprocessed_len += input.len();
                return Ok(());
            }
            self.unprocessed[self.unprocessed_len..bs].copy_from_slice(&input[..free]);
            input = &input[free..];
            adapter.transform(&mut self.unprocessed[..bs], direction)?;
            self.output.extend_from_slice(&self.unprocessed[..bs]);
            self.unprocessed.zeroize();
            self.unprocessed_len = 0;
        }

        let aligned = input.len() - input.len() % bs;
        if aligned > 0 {
            let start = self.output.len();
            self.output.extend_from_slice(&input[..aligned]);
            adapter.transform(&mut self.output[start..], direction)?;
            input = &input[aligned..];
        }

        if !input.is_empty() {
            self.unprocessed[..input.len()].copy_from_slice(input);
            self.unprocessed_len = input.len();
        }
        Ok(())
    }

    /// AEAD framing: the first write of each message is associated data and
    /// produces no output; later writes are transformed and authenticated.
    fn write_aead(&mut self, input: &[u8]) -> Result<()> {
        match self.state {
            PortState::NeedsAad => {
                let mut anchor = [0u8; NONCE_LEN];
                anchor.copy_from_slice(&self.iv[..NONCE_LEN]);
                let nonce = derive_nonce(&anchor, input);
                self.nonce[..NONCE_LEN].copy_from_slice(&nonce);

                let direction = self.direction;
                let Some(Adapter::Aead { key, stream }) = self.adapter.as_mut() else {
                    return Err(Error::NotOpen);
                };
                let mut message = match direction {
                    Direction::Encrypt => ChaChaPolyStream::encrypt(key, &nonce)?,
                    Direction::Decrypt => ChaChaPolyStream::decrypt(key, &nonce)?,
                };
                message.update_aad(input)?;
                *stream = Some(message);
                self.state = PortState::Ready;
                Ok(())
            }
            PortState::Ready => {
                let start = self.output.len();
                self.output.extend_from_slice(input);
                let Some(Adapter::Aead {
                    stream: Some(stream),
                    ..
                }) = self.adapter.as_mut()
                else {
                    return Err(Error::NotOpen);
                };
                stream.process(&mut self.output[start..]);
                Ok(())
            }
            PortState::NeedsInit => Err(Error::NotOpen),
        }
    }

    /// Finish the current unit of work. Block ciphers zero-pad and process
    /// the buffered tail; AEAD appends the authentication tag and arms the
    /// next message. A context with nothing pending is left untouched.
    pub(crate) fn update(&mut self) -> Result<()> {
        if self.algorithm.is_aead() {
            if self.state == PortState::Ready {
                let Some(Adapter::Aead { stream, .. }) = self.adapter.as_mut() else {
                    return Err(Error::NotOpen);
                };
                if let Some(message) = stream.take() {
                    self.output.extend_from_slice(&message.finish());
                }
                self.state = PortState::NeedsAad;
            }
            return Ok(());
        }

        if self.unprocessed_len > 0 {
            let bs = self.block_size;
            let direction = self.direction;
            for byte in &mut self.unprocessed[self.unprocessed_len..bs] {
                *byte = 0;
            }
            let Some(adapter) = self.adapter.as_mut() else {
                return Err(Error::NotOpen);
            };
            adapter.transform(&mut self.unprocessed[..bs], direction)?;
            self.output.extend_from_slice(&self.unprocessed[..bs]);
            self.unprocessed.zeroize();
            self.unprocessed_len = 0;
        }
        Ok(())
    }

    /// Drain all produced output, or `None` if there is none
    pub(crate) fn drain(&mut self) -> Option<Vec<u8>> {
        if self.output.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.output))
        }
    }
}

impl Drop for CipherContext {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
        self.nonce.zeroize();
        self.unprocessed.zeroize();
        self.output.zeroize();
    }
}
