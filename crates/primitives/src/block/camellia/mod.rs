//! Camellia block cipher (RFC 3713)
//!
//! Adapters over the RustCrypto `camellia` crate, exposing the same
//! in-place block interface as the in-tree AES implementation.

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use super::{BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Result};

macro_rules! camellia_variant {
    ($name:ident, $inner:ty, $key_size:expr, $label:expr) => {
        #[doc = concat!($label, " block cipher")]
        #[derive(Clone)]
        pub struct $name {
            inner: $inner,
        }

        impl BlockCipher for $name {
            const KEY_SIZE: usize = $key_size;

            fn name() -> &'static str {
                $label
            }

            fn new(key: &[u8]) -> Result<Self> {
                validate::length(concat!($label, " key"), key.len(), $key_size)?;
                let inner = <$inner>::new(GenericArray::from_slice(key));
                Ok($name { inner })
            }

            fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
                validate::length(concat!($label, " block"), block.len(), BLOCK_SIZE)?;
                self.inner
                    .encrypt_block(GenericArray::from_mut_slice(block));
                Ok(())
            }

            fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
                validate::length(concat!($label, " block"), block.len(), BLOCK_SIZE)?;
                self.inner
                    .decrypt_block(GenericArray::from_mut_slice(block));
                Ok(())
            }
        }
    };
}

camellia_variant!(Camellia128, camellia::Camellia128, 16, "Camellia-128");
camellia_variant!(Camellia192, camellia::Camellia192, 24, "Camellia-192");
camellia_variant!(Camellia256, camellia::Camellia256, 32, "Camellia-256");

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 3713 test vectors
    #[test]
    fn camellia128_rfc3713_vector() {
        let key = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
        let plaintext = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
        let expected = hex::decode("67673138549669730857065648eabe43").unwrap();

        let cipher = Camellia128::new(&key).unwrap();
        let mut block = plaintext.clone();
        cipher.encrypt_block(&mut block).unwrap();
        assert_eq!(block, expected);

        cipher.decrypt_block(&mut block).unwrap();
        assert_eq!(block, plaintext);
    }

    #[test]
    fn camellia192_rfc3713_vector() {
        let key = hex::decode("0123456789abcdeffedcba98765432100011223344556677").unwrap();
        let plaintext = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
        let expected = hex::decode("b4993401b3e996f84ee5cee7d79b09b9").unwrap();

        let cipher = Camellia192::new(&key).unwrap();
        let mut block = plaintext.clone();
        cipher.encrypt_block(&mut block).unwrap();
        assert_eq!(block, expected);
    }

    #[test]
    fn camellia256_rfc3713_vector() {
        let key =
            hex::decode("0123456789abcdeffedcba987654321000112233445566778899aabbccddeeff")
                .unwrap();
        let plaintext = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
        let expected = hex::decode("9acc237dff16d76c20ef7c919e3a7509").unwrap();

        let cipher = Camellia256::new(&key).unwrap();
        let mut block = plaintext.clone();
        cipher.encrypt_block(&mut block).unwrap();
        assert_eq!(block, expected);
    }

    #[test]
    fn rejects_wrong_key_length() {
        assert!(Camellia128::new(&[0u8; 17]).is_err());
        assert!(Camellia192::new(&[0u8; 16]).is_err());
        assert!(Camellia256::new(&[0u8; 24]).is_err());
    }
}
