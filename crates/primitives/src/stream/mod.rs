//! Stream cipher implementations

pub mod chacha20;

pub use chacha20::{ChaCha20, CHACHA20_KEY_SIZE, CHACHA20_NONCE_SIZE, CHACHA20_SHORT_KEY_SIZE};
