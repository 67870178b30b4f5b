//! Streaming symmetric cipher engine
//!
//! A byte-stream port that turns algorithm/key/IV/direction settings into an
//! incremental encrypt/decrypt pipeline. Callers write arbitrary-sized
//! chunks; the engine buffers partial blocks, drives the primitive with
//! aligned input, and accumulates output until it is drained with `read`.
//! ChaCha20-Poly1305 ports add AEAD framing (per-message nonce derivation,
//! AAD authentication, tag emission), and [`DuplexChannel`] pairs two
//! independent AEAD directions for a secure two-way channel.
//!
//! ```
//! use cryptport_engine::{Algorithm, CryptPort, Direction, PortSpec};
//!
//! let mut port = CryptPort::new();
//! port.open(PortSpec {
//!     algorithm: Algorithm::Aes128Ecb,
//!     key: Some(&[0u8; 16]),
//!     iv: None,
//!     direction: Direction::Encrypt,
//! })?;
//! port.write(b"HelloHelloHello!")?;
//! let ciphertext = port.read()?.unwrap();
//! assert_eq!(ciphertext.len(), 16);
//! port.close()?;
//! # Ok::<(), cryptport_engine::Error>(())
//! ```

#![forbid(unsafe_code)]

mod adapter;
mod context;

pub mod algorithm;
pub mod duplex;
pub mod error;
pub mod port;

pub use algorithm::{Algorithm, Direction, ALGORITHMS};
pub use context::{MAX_BLOCK_LEN, MAX_IV_LEN, MAX_KEY_LEN, NONCE_LEN, TAG_LEN};
pub use duplex::DuplexChannel;
pub use error::{Error, Result};
pub use port::{CryptPort, Modify, PortSpec};
