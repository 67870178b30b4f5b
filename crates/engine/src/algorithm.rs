//! Algorithm identifiers and their static metadata

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Block and stream cipher algorithms the port can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Algorithm {
    Aes128Ecb,
    Aes192Ecb,
    Aes256Ecb,
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
    Camellia128Ecb,
    Camellia192Ecb,
    Camellia256Ecb,
    Camellia128Cbc,
    Camellia192Cbc,
    Camellia256Cbc,
    Aria128Ecb,
    Aria192Ecb,
    Aria256Ecb,
    Aria128Cbc,
    Aria192Cbc,
    Aria256Cbc,
    ChaCha20,
    ChaCha20Poly1305,
}

/// All supported algorithms, in identifier order
pub const ALGORITHMS: [Algorithm; 20] = [
    Algorithm::Aes128Ecb,
    Algorithm::Aes192Ecb,
    Algorithm::Aes256Ecb,
    Algorithm::Aes128Cbc,
    Algorithm::Aes192Cbc,
    Algorithm::Aes256Cbc,
    Algorithm::Camellia128Ecb,
    Algorithm::Camellia192Ecb,
    Algorithm::Camellia256Ecb,
    Algorithm::Camellia128Cbc,
    Algorithm::Camellia192Cbc,
    Algorithm::Camellia256Cbc,
    Algorithm::Aria128Ecb,
    Algorithm::Aria192Ecb,
    Algorithm::Aria256Ecb,
    Algorithm::Aria128Cbc,
    Algorithm::Aria192Cbc,
    Algorithm::Aria256Cbc,
    Algorithm::ChaCha20,
    Algorithm::ChaCha20Poly1305,
];

impl Algorithm {
    /// Canonical lowercase identifier
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Aes128Ecb => "aes-128-ecb",
            Algorithm::Aes192Ecb => "aes-192-ecb",
            Algorithm::Aes256Ecb => "aes-256-ecb",
            Algorithm::Aes128Cbc => "aes-128-cbc",
            Algorithm::Aes192Cbc => "aes-192-cbc",
            Algorithm::Aes256Cbc => "aes-256-cbc",
            Algorithm::Camellia128Ecb => "camellia-128-ecb",
            Algorithm::Camellia192Ecb => "camellia-192-ecb",
            Algorithm::Camellia256Ecb => "camellia-256-ecb",
            Algorithm::Camellia128Cbc => "camellia-128-cbc",
            Algorithm::Camellia192Cbc => "camellia-192-cbc",
            Algorithm::Camellia256Cbc => "camellia-256-cbc",
            Algorithm::Aria128Ecb => "aria-128-ecb",
            Algorithm::Aria192Ecb => "aria-192-ecb",
            Algorithm::Aria256Ecb => "aria-256-ecb",
            Algorithm::Aria128Cbc => "aria-128-cbc",
            Algorithm::Aria192Cbc => "aria-192-cbc",
            Algorithm::Aria256Cbc => "aria-256-cbc",
            Algorithm::ChaCha20 => "chacha20",
            Algorithm::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }

    /// Bytes consumed per primitive invocation. Zero means the write
    /// pipeline bypasses buffering entirely; ChaCha20 keeps the nominal 16
    /// so held-back output timing matches the block-cipher paths.
    pub fn block_size(self) -> usize {
        match self {
            Algorithm::ChaCha20Poly1305 => 0,
            _ => 16,
        }
    }

    /// Key length in bytes
    pub fn key_len(self) -> usize {
        match self {
            Algorithm::Aes128Ecb
            | Algorithm::Aes128Cbc
            | Algorithm::Camellia128Ecb
            | Algorithm::Camellia128Cbc
            | Algorithm::Aria128Ecb
            | Algorithm::Aria128Cbc => 16,
            Algorithm::Aes192Ecb
            | Algorithm::Aes192Cbc
            | Algorithm::Camellia192Ecb
            | Algorithm::Camellia192Cbc
            | Algorithm::Aria192Ecb
            | Algorithm::Aria192Cbc => 24,
            Algorithm::Aes256Ecb
            | Algorithm::Aes256Cbc
            | Algorithm::Camellia256Ecb
            | Algorithm::Camellia256Cbc
            | Algorithm::Aria256Ecb
            | Algorithm::Aria256Cbc
            | Algorithm::ChaCha20
            | Algorithm::ChaCha20Poly1305 => 32,
        }
    }

    /// Whether the algorithm chains blocks with an IV
    pub fn is_cbc(self) -> bool {
        matches!(
            self,
            Algorithm::Aes128Cbc
                | Algorithm::Aes192Cbc
                | Algorithm::Aes256Cbc
                | Algorithm::Camellia128Cbc
                | Algorithm::Camellia192Cbc
                | Algorithm::Camellia256Cbc
                | Algorithm::Aria128Cbc
                | Algorithm::Aria192Cbc
                | Algorithm::Aria256Cbc
        )
    }

    /// Whether the algorithm authenticates as well as encrypts
    pub fn is_aead(self) -> bool {
        self == Algorithm::ChaCha20Poly1305
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALGORITHMS
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out
    Encrypt,
    /// Ciphertext in, plaintext out
    Decrypt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for alg in ALGORITHMS {
            assert_eq!(alg.name().parse::<Algorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            "aes-512-gcm".parse::<Algorithm>(),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn metadata_table() {
        assert_eq!(Algorithm::Aes128Ecb.block_size(), 16);
        assert_eq!(Algorithm::ChaCha20.block_size(), 16);
        assert_eq!(Algorithm::ChaCha20Poly1305.block_size(), 0);
        assert_eq!(Algorithm::Camellia192Cbc.key_len(), 24);
        assert!(Algorithm::Aria256Cbc.is_cbc());
        assert!(!Algorithm::Aria256Ecb.is_cbc());
        assert!(Algorithm::ChaCha20Poly1305.is_aead());
        assert!(!Algorithm::ChaCha20.is_aead());
    }
}
