use md5::{Digest, Md5};
use rand::rngs::OsRng;
use rand::Rng;

use crate::checksum::ChecksumSuite;
use crate::cipher::{Cipher, CipherSuite};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};

use super::key_derivation::fix_weak_key;
use super::string_to_key::{derive_key_from_password, fix_parity};
use super::{legacy, DES_BLOCK_SIZE, DES_CONFOUNDER_SIZE, DES_KEY_SIZE};

const MD5_CHECKSUM_SIZE: usize = 16;

/// des-cbc-md5 (etype 3): old-style framing with an RSA-MD5 checksum and a
/// zero IV.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesCbcMd5;

impl DesCbcMd5 {
    pub fn new() -> Self {
        Self
    }
}

fn md5_digest(payload: &[u8]) -> Vec<u8> {
    Md5::digest(payload).to_vec()
}

impl Cipher for DesCbcMd5 {
    fn key_size(&self) -> usize {
        DES_KEY_SIZE
    }

    fn seed_bit_len(&self) -> usize {
        DES_KEY_SIZE * 8
    }

    fn confounder_byte_size(&self) -> usize {
        DES_CONFOUNDER_SIZE
    }

    fn checksum_byte_size(&self) -> usize {
        MD5_CHECKSUM_SIZE
    }

    fn block_byte_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::DesCbcMd5
    }

    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::RsaMd5
    }

    fn random_to_key(&self, seed: Vec<u8>) -> Vec<u8> {
        fix_weak_key(fix_parity(seed))
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        legacy::encrypt_message(
            key,
            key_usage,
            payload,
            MD5_CHECKSUM_SIZE,
            md5_digest,
            &[0; DES_BLOCK_SIZE],
            OsRng::default().gen::<[u8; DES_CONFOUNDER_SIZE]>(),
        )
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        legacy::decrypt_message(
            key,
            key_usage,
            cipher_data,
            MD5_CHECKSUM_SIZE,
            md5_digest,
            &[0; DES_BLOCK_SIZE],
        )
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        self.checksum_type().hasher().checksum(key, key_usage, payload)
    }

    fn generate_key_from_password_with_params(
        &self,
        password: &[u8],
        salt: &[u8],
        params: Option<&[u8]>,
    ) -> KerberosCryptoResult<Vec<u8>> {
        if params.map_or(false, |params| !params.is_empty()) {
            return Err(KerberosCryptoError::CipherError(
                "des-cbc-md5 string-to-key expects empty parameters".to_owned(),
            ));
        }

        derive_key_from_password(password, salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_keeps_self_describing_pad() {
        let cipher = DesCbcMd5::new();
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();
        let plaintext = b"des-cbc-md5 plaintext";

        let cipher_data = cipher.encrypt(&key, 2, plaintext).unwrap();
        let decrypted = cipher.decrypt(&key, 2, &cipher_data).unwrap();

        assert_eq!(plaintext.as_slice(), &decrypted[0..plaintext.len()]);

        // pad bytes each carry the pad count and stay in the returned data
        let pad = decrypted.len() - plaintext.len();
        assert!((1..=8).contains(&pad));
        assert!(decrypted[plaintext.len()..].iter().all(|&b| b as usize == pad));
    }

    #[test]
    fn aligned_plaintext_gets_a_full_pad_block() {
        let cipher = DesCbcMd5::new();
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();

        // confounder (8) + checksum (16) + data (8) is already aligned
        let cipher_data = cipher.encrypt(&key, 2, &[0xaa; 8]).unwrap();
        assert_eq!(8 + 16 + 8 + 8, cipher_data.len());
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let cipher = DesCbcMd5::new();
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();

        let mut cipher_data = cipher.encrypt(&key, 2, b"payload").unwrap();
        let index = cipher_data.len() - 1;
        cipher_data[index] ^= 0x01;

        assert_eq!(
            Err(KerberosCryptoError::IntegrityCheck),
            cipher.decrypt(&key, 2, &cipher_data)
        );
    }
}
