use super::*;
use crate::block::BlockCipher;

// FIPS 197 / NIST SP 800-38A ECB vectors

#[test]
fn aes128_encrypt_nist_vector() {
    let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
    let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
    let expected = hex::decode("3ad77bb40d7a3660a89ecaf32466ef97").unwrap();

    let cipher = Aes128::new(&key).unwrap();
    let mut block = plaintext.clone();
    cipher.encrypt_block(&mut block).unwrap();
    assert_eq!(block, expected);

    cipher.decrypt_block(&mut block).unwrap();
    assert_eq!(block, plaintext);
}

#[test]
fn aes192_encrypt_nist_vector() {
    let key = hex::decode("8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b").unwrap();
    let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
    let expected = hex::decode("bd334f1d6e45f25ff712a214571fa5cc").unwrap();

    let cipher = Aes192::new(&key).unwrap();
    let mut block = plaintext.clone();
    cipher.encrypt_block(&mut block).unwrap();
    assert_eq!(block, expected);

    cipher.decrypt_block(&mut block).unwrap();
    assert_eq!(block, plaintext);
}

#[test]
fn aes256_encrypt_nist_vector() {
    let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
        .unwrap();
    let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
    let expected = hex::decode("f3eed1bdb5d2a03c064b5a7e3db181f8").unwrap();

    let cipher = Aes256::new(&key).unwrap();
    let mut block = plaintext.clone();
    cipher.encrypt_block(&mut block).unwrap();
    assert_eq!(block, expected);

    cipher.decrypt_block(&mut block).unwrap();
    assert_eq!(block, plaintext);
}

#[test]
fn aes128_fips197_appendix_b() {
    let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let plaintext = hex::decode("00112233445566778899aabbccddeeff").unwrap();
    let expected = hex::decode("69c4e0d86a7b0430d8cdb78070b4c55a").unwrap();

    let cipher = Aes128::new(&key).unwrap();
    let mut block = plaintext.clone();
    cipher.encrypt_block(&mut block).unwrap();
    assert_eq!(block, expected);
}

#[test]
fn rejects_wrong_key_length() {
    assert!(Aes128::new(&[0u8; 15]).is_err());
    assert!(Aes128::new(&[0u8; 24]).is_err());
    assert!(Aes192::new(&[0u8; 16]).is_err());
    assert!(Aes256::new(&[0u8; 16]).is_err());
}

#[test]
fn rejects_wrong_block_length() {
    let cipher = Aes128::new(&[0u8; 16]).unwrap();
    let mut short = [0u8; 15];
    assert!(cipher.encrypt_block(&mut short).is_err());
    let mut long = [0u8; 17];
    assert!(cipher.decrypt_block(&mut long).is_err());
}

#[test]
fn sbox_matches_its_inverse() {
    for x in 0u16..=255 {
        let s = sbox(x as u8);
        assert_eq!(inv_sbox(s), x as u8);
    }
    // spot-check known entries
    assert_eq!(sbox(0x00), 0x63);
    assert_eq!(sbox(0x53), 0xed);
}
