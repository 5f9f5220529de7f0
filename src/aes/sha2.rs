//! https://www.rfc-editor.org/rfc/rfc8009.html
//!
//! The SHA-2 AES profiles replace the RFC 3961 DR chain with an SP800-108
//! counter-mode KDF and authenticate the *ciphertext* (prefixed with the IV)
//! instead of the plaintext. Both differences are normative.

use byteorder::{BigEndian, ByteOrder};
use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha384};
use zeroize::Zeroizing;

use crate::common::{hmac_sha256, hmac_sha384};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{checksum_compare, pbkdf2_iterations, usage_kc, usage_ke, usage_ki, validate_key_usage};
use crate::KERBEROS;

use super::decrypt::decrypt_aes_cts;
use super::encrypt::encrypt_aes_cts;
use super::{AesSize, AES_BLOCK_SIZE};

/// https://www.rfc-editor.org/rfc/rfc8009.html#section-4
/// 00 00 80 00 (decimal 32,768, indicating 32,768 iterations)
pub const AES_SHA2_ITERATION_COUNT: u32 = 0x8000;

/// Truncated HMAC length: 128 bits for aes128-sha256, 192 bits for
/// aes256-sha384.
pub fn mac_size(aes_size: &AesSize) -> usize {
    match aes_size {
        AesSize::Aes128 => 16,
        AesSize::Aes256 => 24,
    }
}

/// Ki and Kc are 128/192 bits; only Ke matches the AES key length.
fn integrity_key_size(aes_size: &AesSize) -> usize {
    mac_size(aes_size)
}

/// The fixed 26-octet encryption type names used as the salt prefix.
fn etype_name(aes_size: &AesSize) -> &'static [u8] {
    match aes_size {
        AesSize::Aes128 => b"aes128-cts-hmac-sha256-128",
        AesSize::Aes256 => b"aes256-cts-hmac-sha384-192",
    }
}

fn hmac_hash(aes_size: &AesSize, key: &[u8], payload: &[u8], mac_size: usize) -> KerberosCryptoResult<Vec<u8>> {
    match aes_size {
        AesSize::Aes128 => hmac_sha256(key, payload, mac_size),
        AesSize::Aes256 => hmac_sha384(key, payload, mac_size),
    }
}

/// KDF-HMAC-SHA2(key, label, k): SP800-108 in counter mode with the input
/// `[i]_4 | label | 0x00 | [k]_4` (k in bits), truncated to k bits.
pub fn kdf_hmac_sha2(key: &[u8], label: &[u8], out_len: usize, aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    let mut input = vec![0u8; 4 + label.len() + 1 + 4];
    input[4..4 + label.len()].copy_from_slice(label);
    BigEndian::write_u32(&mut input[5 + label.len()..], (out_len * 8) as u32);

    let mut out = Vec::with_capacity(out_len);
    let mut counter = 1u32;

    while out.len() < out_len {
        BigEndian::write_u32(&mut input[0..4], counter);
        let digest_len = match aes_size {
            AesSize::Aes128 => 32,
            AesSize::Aes256 => 48,
        };
        out.extend_from_slice(&hmac_hash(aes_size, key, &input, digest_len)?);
        counter += 1;
    }

    out.truncate(out_len);

    Ok(out)
}

pub fn derive_key_from_password<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    password: P,
    salt: S,
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    derive_key_from_password_with_params(password, salt, None, aes_size)
}

/// https://www.rfc-editor.org/rfc/rfc8009.html#section-4
///
/// `saltp = enctype-name | 0x00 | salt`, PBKDF2 with the matching SHA-2 hash,
/// then `base-key = KDF-HMAC-SHA2(tkey, "kerberos", keylength)`.
pub fn derive_key_from_password_with_params<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    password: P,
    salt: S,
    params: Option<&[u8]>,
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    let iterations = pbkdf2_iterations(params, AES_SHA2_ITERATION_COUNT)?;

    let mut saltp = Vec::with_capacity(etype_name(aes_size).len() + 1 + salt.as_ref().len());
    saltp.extend_from_slice(etype_name(aes_size));
    saltp.push(0);
    saltp.extend_from_slice(salt.as_ref());

    let mut tkey = Zeroizing::new(vec![0; aes_size.key_length()]);
    match aes_size {
        AesSize::Aes128 => pbkdf2_hmac::<Sha256>(password.as_ref(), &saltp, iterations, &mut tkey),
        AesSize::Aes256 => pbkdf2_hmac::<Sha384>(password.as_ref(), &saltp, iterations, &mut tkey),
    }

    kdf_hmac_sha2(&tkey, KERBEROS, aes_size.key_length(), aes_size)
}

/// `CTS(Ke, confounder | plaintext) | HMAC(Ki, IV | ciphertext)` with a zero
/// IV. Note the MAC covers the ciphertext, unlike the SHA-1 profiles.
pub fn encrypt_message(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
    confounder: [u8; AES_BLOCK_SIZE],
) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let mut data_to_encrypt = Zeroizing::new(Vec::with_capacity(AES_BLOCK_SIZE + payload.len()));
    data_to_encrypt.extend_from_slice(&confounder);
    data_to_encrypt.extend_from_slice(payload);

    let ke = Zeroizing::new(kdf_hmac_sha2(key, &usage_ke(key_usage), aes_size.key_length(), aes_size)?);
    let mut ciphertext = encrypt_aes_cts(&ke, &data_to_encrypt, aes_size)?;

    let ki = Zeroizing::new(kdf_hmac_sha2(
        key,
        &usage_ki(key_usage),
        integrity_key_size(aes_size),
        aes_size,
    )?);

    let mut iv_and_ciphertext = Vec::with_capacity(AES_BLOCK_SIZE + ciphertext.len());
    iv_and_ciphertext.extend_from_slice(&[0; AES_BLOCK_SIZE]);
    iv_and_ciphertext.extend_from_slice(&ciphertext);

    let hmac = hmac_hash(aes_size, &ki, &iv_and_ciphertext, mac_size(aes_size))?;
    ciphertext.extend_from_slice(&hmac);

    Ok(ciphertext)
}

/// Mirror of [`encrypt_message`]. The tag is verified over `IV | ciphertext`
/// *before* decryption.
pub fn decrypt_message(
    key: &[u8],
    key_usage: i32,
    cipher_data: &[u8],
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    if cipher_data.len() < AES_BLOCK_SIZE + mac_size(aes_size) {
        return Err(KerberosCryptoError::CipherLength(
            cipher_data.len(),
            AES_BLOCK_SIZE + mac_size(aes_size),
        ));
    }

    let (cipher_data, checksum) = cipher_data.split_at(cipher_data.len() - mac_size(aes_size));

    let ki = Zeroizing::new(kdf_hmac_sha2(
        key,
        &usage_ki(key_usage),
        integrity_key_size(aes_size),
        aes_size,
    )?);

    let mut iv_and_ciphertext = Vec::with_capacity(AES_BLOCK_SIZE + cipher_data.len());
    iv_and_ciphertext.extend_from_slice(&[0; AES_BLOCK_SIZE]);
    iv_and_ciphertext.extend_from_slice(cipher_data);

    let calculated_checksum = hmac_hash(aes_size, &ki, &iv_and_ciphertext, mac_size(aes_size))?;

    if !checksum_compare(&calculated_checksum, checksum) {
        return Err(KerberosCryptoError::IntegrityCheck);
    }

    let ke = Zeroizing::new(kdf_hmac_sha2(key, &usage_ke(key_usage), aes_size.key_length(), aes_size)?);
    let plaintext = Zeroizing::new(decrypt_aes_cts(&ke, cipher_data, aes_size)?);

    // the first block is the random confounder
    Ok(plaintext[AES_BLOCK_SIZE..].to_vec())
}

/// `HMAC(Kc, message)` truncated to the suite's tag length.
pub fn checksum_sha2(key: &[u8], key_usage: i32, payload: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let kc = Zeroizing::new(kdf_hmac_sha2(
        key,
        &usage_kc(key_usage),
        integrity_key_size(aes_size),
        aes_size,
    )?);

    hmac_hash(aes_size, &kc, payload, mac_size(aes_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://www.rfc-editor.org/rfc/rfc8009.html#appendix-A

    fn aes128_base_key() -> Vec<u8> {
        hex::decode("3705d96080c17728a0e800eab6e0d23c").unwrap()
    }

    fn aes256_base_key() -> Vec<u8> {
        hex::decode("6d404d37faf79f9df0d33568d320669800eb4836472ea8a026d16b7182460c52").unwrap()
    }

    #[test]
    fn string_to_key() {
        let iterations = 32768u32.to_be_bytes();

        let key = derive_key_from_password_with_params(
            "password",
            "ATHENA.MIT.EDUraeburn",
            Some(&iterations),
            &AesSize::Aes128,
        )
        .unwrap();
        assert_eq!(hex::decode("089bca48b105ea6ea77ca5d2f39dc5e7").unwrap(), key);

        let key = derive_key_from_password_with_params(
            "password",
            "ATHENA.MIT.EDUraeburn",
            Some(&iterations),
            &AesSize::Aes256,
        )
        .unwrap();
        assert_eq!(
            hex::decode("45bd806dbf6a833a9cffc1c94589a222367a79bc21c413718906e9f578a78467").unwrap(),
            key
        );
    }

    #[test]
    fn key_derivation_aes128() {
        let base_key = aes128_base_key();

        assert_eq!(
            hex::decode("b31a018a48f54776f403e9a396325dc3").unwrap(),
            kdf_hmac_sha2(&base_key, &usage_kc(2), 16, &AesSize::Aes128).unwrap()
        );
        assert_eq!(
            hex::decode("9b197dd1e8c5609d6e67c3e37c62c72e").unwrap(),
            kdf_hmac_sha2(&base_key, &usage_ke(2), 16, &AesSize::Aes128).unwrap()
        );
        assert_eq!(
            hex::decode("9fda0e56ab2d85e1569a688696c26a6c").unwrap(),
            kdf_hmac_sha2(&base_key, &usage_ki(2), 16, &AesSize::Aes128).unwrap()
        );
    }

    #[test]
    fn key_derivation_aes256() {
        let base_key = aes256_base_key();

        assert_eq!(
            hex::decode("ef5718be86cc84963d8bbb5031e9f5c4ba41f28faf69e73d").unwrap(),
            kdf_hmac_sha2(&base_key, &usage_kc(2), 24, &AesSize::Aes256).unwrap()
        );
        assert_eq!(
            hex::decode("56ab22bee63d82d7bc5227f6773f8ea7a5eb1c825160c38312980c442e5c7e49").unwrap(),
            kdf_hmac_sha2(&base_key, &usage_ke(2), 32, &AesSize::Aes256).unwrap()
        );
        assert_eq!(
            hex::decode("69b16514e3cd8e56b82010d5c73012b622c4d00ffc23ed1f").unwrap(),
            kdf_hmac_sha2(&base_key, &usage_ki(2), 24, &AesSize::Aes256).unwrap()
        );
    }

    #[test]
    fn encrypt_empty_plaintext_aes128() {
        let confounder: [u8; 16] = hex::decode("7e5895eaf2672435bad817f545a37148").unwrap().try_into().unwrap();

        let ciphertext = encrypt_message(&aes128_base_key(), 2, &[], &AesSize::Aes128, confounder).unwrap();

        assert_eq!(
            hex::decode("ef85fb890bb8472f4dab20394dca781dad877eda39d50c870c0d5a0a8e48c718").unwrap(),
            ciphertext
        );

        assert_eq!(
            Vec::<u8>::new(),
            decrypt_message(&aes128_base_key(), 2, &ciphertext, &AesSize::Aes128).unwrap()
        );
    }

    #[test]
    fn encrypt_short_plaintext_aes128() {
        let confounder: [u8; 16] = hex::decode("7bca285e2fd4130fb55b1a5c83bc5b24").unwrap().try_into().unwrap();
        let plaintext = hex::decode("000102030405").unwrap();

        let ciphertext = encrypt_message(&aes128_base_key(), 2, &plaintext, &AesSize::Aes128, confounder).unwrap();

        assert_eq!(
            hex::decode("84d7f30754ed987bab0bf3506beb09cfb55402cef7e6877ce99e247e52d16ed4421dfdf8976c").unwrap(),
            ciphertext
        );

        assert_eq!(
            plaintext,
            decrypt_message(&aes128_base_key(), 2, &ciphertext, &AesSize::Aes128).unwrap()
        );
    }

    #[test]
    fn encrypt_block_plaintext_aes128() {
        let confounder: [u8; 16] = hex::decode("56ab21713ff62c0a1457200f6fa9948f").unwrap().try_into().unwrap();
        let plaintext = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();

        let ciphertext = encrypt_message(&aes128_base_key(), 2, &plaintext, &AesSize::Aes128, confounder).unwrap();

        assert_eq!(
            hex::decode(
                "3517d640f50ddc8ad3628722b3569d2ae07493fa8263254080ea65c1008e8fc295fb4852e7d83e1e7c48c37eebe6b0d3"
            )
            .unwrap(),
            ciphertext
        );
    }

    #[test]
    fn encrypt_long_plaintext_aes128() {
        let confounder: [u8; 16] = hex::decode("a7a4e29a4728ce10664fb64e49ad3fac").unwrap().try_into().unwrap();
        let plaintext = hex::decode("000102030405060708090a0b0c0d0e0f1011121314").unwrap();

        let ciphertext = encrypt_message(&aes128_base_key(), 2, &plaintext, &AesSize::Aes128, confounder).unwrap();

        assert_eq!(
            hex::decode(
                "720f73b18d9859cd6ccb4346115cd336c70f58edc0c4437c5573544c31c813bce1e6d072c186b39a413c2f92ca9b8334a287ffcbfc"
            )
            .unwrap(),
            ciphertext
        );
    }

    #[test]
    fn encrypt_empty_plaintext_aes256() {
        let confounder: [u8; 16] = hex::decode("f764e9fa15c276478b2c7d0c4e5f58e4").unwrap().try_into().unwrap();

        let ciphertext = encrypt_message(&aes256_base_key(), 2, &[], &AesSize::Aes256, confounder).unwrap();

        assert_eq!(
            hex::decode("41f53fa5bfe7026d91faf9be959195a058707273a96a40f0a01960621ac612748b9bbfbe7eb4ce3c").unwrap(),
            ciphertext
        );
    }

    #[test]
    fn encrypt_long_plaintext_aes256() {
        let confounder: [u8; 16] = hex::decode("763e65367e864f02f55153c7e3b58af1").unwrap().try_into().unwrap();
        let plaintext = hex::decode("000102030405060708090a0b0c0d0e0f1011121314").unwrap();

        let ciphertext = encrypt_message(&aes256_base_key(), 2, &plaintext, &AesSize::Aes256, confounder).unwrap();

        assert_eq!(
            hex::decode(
                "40013e2df58e8751957d2878bcd2d6fe101ccfd556cb1eae79db3c3ee86429f2b2a602ac86fef6ecb647d6295fae077a1feb517508d2c16b4192e01f62"
            )
            .unwrap(),
            ciphertext
        );

        assert_eq!(
            plaintext,
            decrypt_message(&aes256_base_key(), 2, &ciphertext, &AesSize::Aes256).unwrap()
        );
    }

    #[test]
    fn checksum_known_answer() {
        let payload = hex::decode("000102030405060708090a0b0c0d0e0f1011121314").unwrap();

        assert_eq!(
            hex::decode("d78367186643d67b411cba9139fc1dee").unwrap(),
            checksum_sha2(&aes128_base_key(), 2, &payload, &AesSize::Aes128).unwrap()
        );
        assert_eq!(
            hex::decode("45ee791567eefca37f4ac1e0222de80d43c3bfa06699672a").unwrap(),
            checksum_sha2(&aes256_base_key(), 2, &payload, &AesSize::Aes256).unwrap()
        );
    }

    #[test]
    fn tampered_tag_is_rejected() {
        let confounder: [u8; 16] = hex::decode("7e5895eaf2672435bad817f545a37148").unwrap().try_into().unwrap();
        let mut ciphertext = encrypt_message(&aes128_base_key(), 2, b"data", &AesSize::Aes128, confounder).unwrap();

        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;

        assert_eq!(
            Err(KerberosCryptoError::IntegrityCheck),
            decrypt_message(&aes128_base_key(), 2, &ciphertext, &AesSize::Aes128)
        );
    }
}
