//! ChaCha20-Poly1305 AEAD (RFC 8439)
//!
//! Two surfaces over the same construction:
//!
//! * [`ChaChaPolyStream`] is the incremental form. Associated data and
//!   message bytes are fed in as they arrive and [`finish`] yields the tag.
//!   Decryption does not verify; the caller decides what to do with the
//!   recomputed tag. The streaming cipher engine is built on this.
//! * [`ChaCha20Poly1305`] is the one-shot form with mandatory constant-time
//!   verification on decrypt, used by the duplex channel.
//!
//! The one-time Poly1305 key is the first 32 bytes of keystream at counter 0;
//! message data starts at counter 1. The tag covers
//! `aad || pad16 || ciphertext || pad16 || le64(aad_len) || le64(ct_len)`.
//!
//! [`finish`]: ChaChaPolyStream::finish

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{validate, Error, Result};
use crate::mac::poly1305::{Poly1305, POLY1305_KEY_SIZE};
use crate::stream::chacha20::{ChaCha20, CHACHA20_NONCE_SIZE};

/// Authentication tag size in bytes
pub const CHACHA20POLY1305_TAG_SIZE: usize = 16;
/// Nonce size in bytes
pub const CHACHA20POLY1305_NONCE_SIZE: usize = CHACHA20_NONCE_SIZE;

/// Which half of the transform the stream is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamDirection {
    Encrypt,
    Decrypt,
}

/// Internal phase of the incremental stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamPhase {
    /// Still accepting associated data
    Aad,
    /// Associated data padded out; accepting message bytes
    Message,
}

/// Incremental ChaCha20-Poly1305 transform
pub struct ChaChaPolyStream {
    cipher: ChaCha20,
    mac: Poly1305,
    direction: StreamDirection,
    phase: StreamPhase,
    aad_len: u64,
    msg_len: u64,
}

impl ChaChaPolyStream {
    fn start(key: &[u8], nonce: &[u8], direction: StreamDirection) -> Result<Self> {
        validate::length(
            "ChaCha20-Poly1305 nonce",
            nonce.len(),
            CHACHA20POLY1305_NONCE_SIZE,
        )?;

        // one-time MAC key from the block at counter 0
        let mut mac_key_block = Zeroizing::new([0u8; 64]);
        let mut key_cipher = ChaCha20::new(key, nonce, 0)?;
        key_cipher.keystream(mac_key_block.as_mut());

        let mut mac_key = [0u8; POLY1305_KEY_SIZE];
        mac_key.copy_from_slice(&mac_key_block[..POLY1305_KEY_SIZE]);
        let mac = Poly1305::new(&mac_key);
        mac_key.zeroize();

        Ok(ChaChaPolyStream {
            cipher: ChaCha20::new(key, nonce, 1)?,
            mac,
            direction,
            phase: StreamPhase::Aad,
            aad_len: 0,
            msg_len: 0,
        })
    }

    /// Begin an encryption stream
    pub fn encrypt(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::start(key, nonce, StreamDirection::Encrypt)
    }

    /// Begin a decryption stream
    pub fn decrypt(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::start(key, nonce, StreamDirection::Decrypt)
    }

    /// Feed associated data. Must precede all message bytes.
    pub fn update_aad(&mut self, aad: &[u8]) -> Result<()> {
        if self.phase != StreamPhase::Aad {
            return Err(Error::Processing {
                operation: "ChaCha20-Poly1305",
                details: "associated data after message bytes",
            });
        }
        self.mac.update(aad);
        self.aad_len += aad.len() as u64;
        Ok(())
    }

    /// Pad the associated data out to a 16-byte boundary
    fn close_aad(&mut self) {
        if self.phase == StreamPhase::Aad {
            let rem = (self.aad_len % 16) as usize;
            if rem != 0 {
                self.mac.update(&[0u8; 16][..16 - rem]);
            }
            self.phase = StreamPhase::Message;
        }
    }

    /// Transform message bytes in place. Encrypting authenticates the output,
    /// decrypting authenticates the input; either way the MAC sees ciphertext.
    pub fn process(&mut self, data: &mut [u8]) {
        self.close_aad();
        match self.direction {
            StreamDirection::Encrypt => {
                self.cipher.process(data);
                self.mac.update(data);
            }
            StreamDirection::Decrypt => {
                self.mac.update(data);
                self.cipher.process(data);
            }
        }
        self.msg_len += data.len() as u64;
    }

    /// Close the stream and produce the authentication tag
    pub fn finish(mut self) -> [u8; CHACHA20POLY1305_TAG_SIZE] {
        self.close_aad();

        let rem = (self.msg_len % 16) as usize;
        if rem != 0 {
            self.mac.update(&[0u8; 16][..16 - rem]);
        }

        let mut lengths = [0u8; 16];
        LittleEndian::write_u64(&mut lengths[0..8], self.aad_len);
        LittleEndian::write_u64(&mut lengths[8..16], self.msg_len);
        self.mac.update(&lengths);

        self.mac.finalize()
    }
}

/// One-shot ChaCha20-Poly1305 AEAD cipher
pub struct ChaCha20Poly1305 {
    key: Zeroizing<Vec<u8>>,
}

impl ChaCha20Poly1305 {
    /// Create a cipher from a 16- or 32-byte key
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.len() != 16 && key.len() != 32 {
            return Err(Error::param(
                "key",
                "ChaCha20-Poly1305 key must be 16 or 32 bytes",
            ));
        }
        Ok(ChaCha20Poly1305 {
            key: Zeroizing::new(key.to_vec()),
        })
    }

    /// Encrypt and authenticate, returning `ciphertext || tag`
    pub fn encrypt_with_nonce(
        &self,
        nonce: &[u8],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let mut stream = ChaChaPolyStream::encrypt(&self.key, nonce)?;
        stream.update_aad(aad)?;

        let mut out = Vec::with_capacity(plaintext.len() + CHACHA20POLY1305_TAG_SIZE);
        out.extend_from_slice(plaintext);
        stream.process(&mut out);
        out.extend_from_slice(&stream.finish());
        Ok(out)
    }

    /// Verify and decrypt `ciphertext || tag`. Fails closed: no plaintext is
    /// returned unless the tag matches.
    pub fn decrypt_with_nonce(
        &self,
        nonce: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        validate::min_length(
            "ChaCha20-Poly1305 ciphertext",
            ciphertext.len(),
            CHACHA20POLY1305_TAG_SIZE,
        )?;
        let (body, tag) = ciphertext.split_at(ciphertext.len() - CHACHA20POLY1305_TAG_SIZE);

        let mut stream = ChaChaPolyStream::decrypt(&self.key, nonce)?;
        stream.update_aad(aad)?;

        let mut out = body.to_vec();
        stream.process(&mut out);
        let computed = stream.finish();

        let ok: bool = subtle::ConstantTimeEq::ct_eq(&computed[..], tag).into();
        if !ok {
            out.zeroize();
        }
        validate::authentication(ok, "ChaCha20-Poly1305")?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests;
