use super::*;

// RFC 8439 section 2.8.2
fn rfc_key() -> Vec<u8> {
    hex::decode("808182838485868788898a8b8c8d8e8f909192939495969798999a9b9c9d9e9f").unwrap()
}

fn rfc_nonce() -> Vec<u8> {
    hex::decode("070000004041424344454647").unwrap()
}

fn rfc_aad() -> Vec<u8> {
    hex::decode("50515253c0c1c2c3c4c5c6c7").unwrap()
}

const RFC_PLAINTEXT: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you \
only one tip for the future, sunscreen would be it.";

fn rfc_ciphertext_and_tag() -> Vec<u8> {
    let mut out = hex::decode(
        "d31a8d34648e60db7b86afbc53ef7ec2a4aded51296e08fea9e2b5a736ee62d6\
         3dbea45e8ca9671282fafb69da92728b1a71de0a9e060b2905d6a5b67ecd3b36\
         92ddbd7f2d778b8c9803aee328091b58fab324e4fad675945585808b4831d7bc\
         3ff4def08e4b7a9de576d26586cec64b6116",
    )
    .unwrap();
    out.extend_from_slice(&hex::decode("1ae10b594f09e26a7e902ecbd0600691").unwrap());
    out
}

#[test]
fn rfc8439_encrypt_vector() {
    let cipher = ChaCha20Poly1305::new(&rfc_key()).unwrap();
    let out = cipher
        .encrypt_with_nonce(&rfc_nonce(), &rfc_aad(), RFC_PLAINTEXT)
        .unwrap();
    assert_eq!(out, rfc_ciphertext_and_tag());
}

#[test]
fn rfc8439_decrypt_vector() {
    let cipher = ChaCha20Poly1305::new(&rfc_key()).unwrap();
    let out = cipher
        .decrypt_with_nonce(&rfc_nonce(), &rfc_aad(), &rfc_ciphertext_and_tag())
        .unwrap();
    assert_eq!(out, RFC_PLAINTEXT);
}

#[test]
fn tampered_ciphertext_is_rejected() {
    let cipher = ChaCha20Poly1305::new(&rfc_key()).unwrap();
    let mut ct = rfc_ciphertext_and_tag();
    ct[0] ^= 0x01;
    assert!(matches!(
        cipher.decrypt_with_nonce(&rfc_nonce(), &rfc_aad(), &ct),
        Err(Error::Authentication { .. })
    ));
}

#[test]
fn tampered_tag_is_rejected() {
    let cipher = ChaCha20Poly1305::new(&rfc_key()).unwrap();
    let mut ct = rfc_ciphertext_and_tag();
    let last = ct.len() - 1;
    ct[last] ^= 0x80;
    assert!(cipher.decrypt_with_nonce(&rfc_nonce(), &rfc_aad(), &ct).is_err());
}

#[test]
fn wrong_aad_is_rejected() {
    let cipher = ChaCha20Poly1305::new(&rfc_key()).unwrap();
    assert!(cipher
        .decrypt_with_nonce(&rfc_nonce(), b"different aad", &rfc_ciphertext_and_tag())
        .is_err());
}

#[test]
fn empty_plaintext_round_trip() {
    let cipher = ChaCha20Poly1305::new(&rfc_key()).unwrap();
    let ct = cipher
        .encrypt_with_nonce(&rfc_nonce(), &rfc_aad(), b"")
        .unwrap();
    assert_eq!(ct.len(), CHACHA20POLY1305_TAG_SIZE);
    let pt = cipher
        .decrypt_with_nonce(&rfc_nonce(), &rfc_aad(), &ct)
        .unwrap();
    assert!(pt.is_empty());
}

#[test]
fn stream_matches_one_shot() {
    let key = rfc_key();
    let nonce = rfc_nonce();
    let aad = rfc_aad();

    let mut stream = ChaChaPolyStream::encrypt(&key, &nonce).unwrap();
    stream.update_aad(&aad[..5]).unwrap();
    stream.update_aad(&aad[5..]).unwrap();
    let mut data = RFC_PLAINTEXT.to_vec();
    for chunk in data.chunks_mut(7) {
        stream.process(chunk);
    }
    let tag = stream.finish();

    let mut expected = rfc_ciphertext_and_tag();
    let expected_tag = expected.split_off(expected.len() - CHACHA20POLY1305_TAG_SIZE);
    assert_eq!(data, expected);
    assert_eq!(tag.to_vec(), expected_tag);
}

#[test]
fn stream_decrypt_recomputes_same_tag() {
    let key = rfc_key();
    let nonce = rfc_nonce();
    let aad = rfc_aad();

    let mut expected = rfc_ciphertext_and_tag();
    let expected_tag = expected.split_off(expected.len() - CHACHA20POLY1305_TAG_SIZE);

    let mut stream = ChaChaPolyStream::decrypt(&key, &nonce).unwrap();
    stream.update_aad(&aad).unwrap();
    let mut data = expected;
    stream.process(&mut data);
    assert_eq!(data, RFC_PLAINTEXT);
    assert_eq!(stream.finish().to_vec(), expected_tag);
}

#[test]
fn aad_after_message_is_an_error() {
    let mut stream = ChaChaPolyStream::encrypt(&rfc_key(), &rfc_nonce()).unwrap();
    let mut data = [0u8; 4];
    stream.process(&mut data);
    assert!(stream.update_aad(b"late").is_err());
}

#[test]
fn short_key_round_trip() {
    let key = [0x11u8; 16];
    let cipher = ChaCha20Poly1305::new(&key).unwrap();
    let nonce = [0u8; 12];
    let ct = cipher.encrypt_with_nonce(&nonce, b"hdr", b"payload").unwrap();
    let pt = cipher.decrypt_with_nonce(&nonce, b"hdr", &ct).unwrap();
    assert_eq!(pt, b"payload");
}
