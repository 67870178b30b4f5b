//! Cryptographic building blocks for the cryptport engine
//!
//! Constant-time implementations of the symmetric primitives the streaming
//! cipher engine is built on: AES, Camellia and ARIA block ciphers, the
//! ChaCha20 stream cipher, Poly1305 and the ChaCha20-Poly1305 AEAD. Key
//! material is zeroized on drop throughout.

#![forbid(unsafe_code)]

pub mod aead;
pub mod block;
pub mod error;
pub mod mac;
pub mod stream;

pub use error::{Error, Result};

pub use aead::{ChaCha20Poly1305, ChaChaPolyStream};
pub use block::{
    Aes128, Aes192, Aes256, Aria128, Aria192, Aria256, BlockCipher, Camellia128, Camellia192,
    Camellia256, BLOCK_SIZE,
};
pub use mac::Poly1305;
pub use stream::ChaCha20;
