//! The externally visible port: open, write, read, update, close, modify
//!
//! A port is a handle that may or may not have a cipher context attached.
//! Every operation other than `open` and `is_open` requires an attached
//! context and fails with [`Error::NotOpen`] otherwise. Closing detaches
//! and zeroizes the context; the handle itself can be reopened.

use crate::algorithm::{Algorithm, Direction};
use crate::context::CipherContext;
use crate::error::{Error, Result};

/// Configuration supplied to [`CryptPort::open`]
#[derive(Debug, Clone, Copy)]
pub struct PortSpec<'a> {
    /// Cipher to run
    pub algorithm: Algorithm,
    /// Key bytes; `None` means an all-zero key
    pub key: Option<&'a [u8]>,
    /// IV/nonce bytes; `None` means an all-zero IV
    pub iv: Option<&'a [u8]>,
    /// Transform direction
    pub direction: Direction,
}

/// A single reconfiguration applied by [`CryptPort::modify`]
#[derive(Debug, Clone, Copy)]
pub enum Modify<'a> {
    /// Switch to a different cipher; drops buffered state
    Algorithm(Algorithm),
    /// Replace the key (`None` zeroes it)
    Key(Option<&'a [u8]>),
    /// Replace the IV (`None` zeroes it)
    Iv(Option<&'a [u8]>),
    /// Flip the transform direction
    Direction(Direction),
}

/// Streaming encrypt/decrypt port
#[derive(Default)]
pub struct CryptPort {
    ctx: Option<CipherContext>,
}

impl CryptPort {
    /// Create a closed port
    pub fn new() -> Self {
        CryptPort { ctx: None }
    }

    /// Attach a context configured per `spec`. The key schedule itself is
    /// built lazily on the first write.
    pub fn open(&mut self, spec: PortSpec<'_>) -> Result<()> {
        if self.ctx.is_some() {
            return Err(Error::AlreadyOpen);
        }
        let mut ctx = CipherContext::new(spec.algorithm);
        ctx.set_key(spec.key);
        ctx.set_iv(spec.iv);
        ctx.set_direction(spec.direction);
        self.ctx = Some(ctx);
        Ok(())
    }

    /// Feed bytes through the pipeline
    pub fn write(&mut self, input: &[u8]) -> Result<()> {
        self.ctx.as_mut().ok_or(Error::NotOpen)?.write(input)
    }

    /// Drain and return everything produced so far; `Ok(None)` when the
    /// output buffer is empty
    pub fn read(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.ctx.as_mut().ok_or(Error::NotOpen)?.drain())
    }

    /// Finish the current unit of work: flush the zero-padded tail for
    /// block ciphers, or append the authentication tag for AEAD
    pub fn update(&mut self) -> Result<()> {
        self.ctx.as_mut().ok_or(Error::NotOpen)?.update()
    }

    /// Detach and destroy the context. Key material and pending output are
    /// zeroized on the way out.
    pub fn close(&mut self) -> Result<()> {
        match self.ctx.take() {
            Some(_) => Ok(()),
            None => Err(Error::NotOpen),
        }
    }

    /// Reconfigure the open port without closing it
    pub fn modify(&mut self, change: Modify<'_>) -> Result<()> {
        let ctx = self.ctx.as_mut().ok_or(Error::NotOpen)?;
        match change {
            Modify::Algorithm(algorithm) => ctx.set_algorithm(algorithm),
            Modify::Key(key) => ctx.set_key(key),
            Modify::Iv(iv) => ctx.set_iv(iv),
            Modify::Direction(direction) => ctx.set_direction(direction),
        }
        Ok(())
    }

    /// Whether a context is currently attached
    pub fn is_open(&self) -> bool {
        self.ctx.is_some()
    }
}
