//! Authenticated encryption

pub mod chacha20poly1305;

pub use chacha20poly1305::{ChaCha20Poly1305, ChaChaPolyStream, CHACHA20POLY1305_TAG_SIZE};
