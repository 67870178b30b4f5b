//! Message authentication codes

pub mod poly1305;

pub use poly1305::{Poly1305, POLY1305_KEY_SIZE, POLY1305_TAG_SIZE};
