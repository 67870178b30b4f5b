//! # cryptport
//!
//! A streaming symmetric-cipher port: algorithm, key, IV and direction
//! settings become an incremental encrypt/decrypt pipeline over AES,
//! Camellia and ARIA (ECB/CBC), the ChaCha20 stream cipher and the
//! ChaCha20-Poly1305 AEAD, plus a duplex secure-channel variant.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cryptport = "0.1"
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from two sub-crates:
//!
//! - [`cryptport-primitives`](primitives): block ciphers, ChaCha20,
//!   Poly1305 and the ChaCha20-Poly1305 construction
//! - [`cryptport-engine`](engine): the cipher context, write pipeline,
//!   AEAD framing, port state machine and duplex channel

#![forbid(unsafe_code)]

pub use cryptport_engine as engine;
pub use cryptport_primitives as primitives;

// Secret-hygiene crates re-exported so callers can match versions
pub use subtle;
pub use zeroize;

#[cfg(feature = "rand")]
pub use rand;

/// Common imports for cryptport users
pub mod prelude {
    pub use crate::engine::{
        Algorithm, CryptPort, Direction, DuplexChannel, Error, Modify, PortSpec, Result,
        ALGORITHMS,
    };
    pub use crate::primitives::block::BlockCipher;
    pub use crate::primitives::{ChaCha20, ChaCha20Poly1305, ChaChaPolyStream, Poly1305};
}
