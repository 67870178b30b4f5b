//! Duplex AEAD channel: one half encrypts outbound, the other verifies and
//! decrypts inbound. The halves share no mutable state, so a conversation
//! can interleave directions freely.

use cryptport_primitives::ChaChaPolyStream;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::context::{derive_nonce, NONCE_LEN, TAG_LEN};
use crate::error::{Error, Result};

/// Key and nonce anchor for one direction
struct ChannelHalf {
    /// 16 or 32 bytes
    key: Zeroizing<Vec<u8>>,
    /// 12-byte anchor; 8-byte input is zero-extended at the tail
    iv: [u8; NONCE_LEN],
}

impl ChannelHalf {
    fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        if key.len() != 16 && key.len() != 32 {
            return Err(Error::BadKeyLength(key.len()));
        }
        if iv.len() != 8 && iv.len() != NONCE_LEN {
            return Err(Error::BadIvLength(iv.len()));
        }
        let mut anchor = [0u8; NONCE_LEN];
        anchor[..iv.len()].copy_from_slice(iv);
        Ok(ChannelHalf {
            key: Zeroizing::new(key.to_vec()),
            iv: anchor,
        })
    }
}

impl Drop for ChannelHalf {
    fn drop(&mut self) {
        self.iv.zeroize();
    }
}

/// Two-direction ChaCha20-Poly1305 channel
pub struct DuplexChannel {
    local: ChannelHalf,
    remote: ChannelHalf,
}

impl DuplexChannel {
    /// Establish a channel. Keys must be 16 or 32 bytes, IVs 8 or 12 bytes.
    pub fn new(
        local_key: &[u8],
        local_iv: &[u8],
        remote_key: &[u8],
        remote_iv: &[u8],
    ) -> Result<Self> {
        Ok(DuplexChannel {
            local: ChannelHalf::new(local_key, local_iv)?,
            remote: ChannelHalf::new(remote_key, remote_iv)?,
        })
    }

    /// Encrypt and authenticate an outbound message, returning
    /// `ciphertext || tag`. Empty plaintext is legal and yields just a tag.
    pub fn encrypt(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let nonce = derive_nonce(&self.local.iv, aad);
        let mut stream = ChaChaPolyStream::encrypt(&self.local.key, &nonce)?;
        stream.update_aad(aad)?;

        let mut out = Vec::with_capacity(plaintext.len() + TAG_LEN);
        out.extend_from_slice(plaintext);
        stream.process(&mut out);
        out.extend_from_slice(&stream.finish());
        Ok(out)
    }

    /// Verify and decrypt an inbound `ciphertext || tag`. Fails closed: on
    /// tag mismatch the decrypted bytes are wiped and never returned.
    pub fn decrypt(&self, ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < TAG_LEN {
            return Err(Error::AuthenticationFailure);
        }
        let (body, tag) = ciphertext.split_at(ciphertext.len() - TAG_LEN);

        let nonce = derive_nonce(&self.remote.iv, aad);
        let mut stream = ChaChaPolyStream::decrypt(&self.remote.key, &nonce)?;
        stream.update_aad(aad)?;

        let mut plaintext = body.to_vec();
        stream.process(&mut plaintext);
        let computed = stream.finish();

        let ok: bool = computed.ct_eq(tag).into();
        if !ok {
            plaintext.zeroize();
            return Err(Error::AuthenticationFailure);
        }
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symmetric_channel() -> DuplexChannel {
        DuplexChannel::new(&[0x01u8; 32], &[0x00u8; 12], &[0x01u8; 32], &[0x00u8; 12]).unwrap()
    }

    #[test]
    fn round_trip_with_aad() {
        let channel = symmetric_channel();
        let sealed = channel.encrypt(b"over the wire", b"header").unwrap();
        assert_eq!(sealed.len(), 13 + TAG_LEN);
        let opened = channel.decrypt(&sealed, b"header").unwrap();
        assert_eq!(opened, b"over the wire");
    }

    #[test]
    fn empty_plaintext_round_trip() {
        let channel = symmetric_channel();
        let sealed = channel.encrypt(b"", b"msg1").unwrap();
        assert_eq!(sealed.len(), TAG_LEN);
        let opened = channel.decrypt(&sealed, b"msg1").unwrap();
        assert!(opened.is_empty());

        let mut corrupt = sealed;
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0x01;
        assert_eq!(
            channel.decrypt(&corrupt, b"msg1"),
            Err(Error::AuthenticationFailure)
        );
    }

    #[test]
    fn independent_directions() {
        // asymmetric keys: what local seals only the peer's remote half opens
        let a = DuplexChannel::new(&[0x11u8; 32], &[0x01u8; 12], &[0x22u8; 32], &[0x02u8; 12])
            .unwrap();
        let b = DuplexChannel::new(&[0x22u8; 32], &[0x02u8; 12], &[0x11u8; 32], &[0x01u8; 12])
            .unwrap();

        let sealed = a.encrypt(b"ping", b"").unwrap();
        assert_eq!(b.decrypt(&sealed, b"").unwrap(), b"ping");
        // a cannot open its own traffic
        assert!(a.decrypt(&sealed, b"").is_err());
    }

    #[test]
    fn short_iv_is_zero_extended() {
        let full = DuplexChannel::new(
            &[0x05u8; 16],
            &[1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 0],
            &[0x05u8; 16],
            &[1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 0],
        )
        .unwrap();
        let short = DuplexChannel::new(
            &[0x05u8; 16],
            &[1, 2, 3, 4, 5, 6, 7, 8],
            &[0x05u8; 16],
            &[1, 2, 3, 4, 5, 6, 7, 8],
        )
        .unwrap();

        let sealed = short.encrypt(b"payload", b"aad").unwrap();
        assert_eq!(full.decrypt(&sealed, b"aad").unwrap(), b"payload");
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(matches!(
            DuplexChannel::new(&[0u8; 20], &[0u8; 12], &[0u8; 32], &[0u8; 12]),
            Err(Error::BadKeyLength(20))
        ));
        assert!(matches!(
            DuplexChannel::new(&[0u8; 32], &[0u8; 7], &[0u8; 32], &[0u8; 12]),
            Err(Error::BadIvLength(7))
        ));
        assert!(matches!(
            DuplexChannel::new(&[0u8; 32], &[0u8; 12], &[0u8; 31], &[0u8; 12]),
            Err(Error::BadKeyLength(31))
        ));
    }

    #[test]
    fn truncated_ciphertext_fails_closed() {
        let channel = symmetric_channel();
        assert_eq!(
            channel.decrypt(&[0u8; 5], b""),
            Err(Error::AuthenticationFailure)
        );
    }
}
