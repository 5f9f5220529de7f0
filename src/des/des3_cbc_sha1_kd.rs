use rand::rngs::OsRng;
use rand::Rng;

use crate::checksum::ChecksumSuite;
use crate::cipher::{Cipher, CipherSuite};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};

use super::decrypt::decrypt_message;
use super::encrypt::encrypt_message;
use super::key_derivation::{derive_key_from_password, random_to_key};
use super::{DES3_BLOCK_SIZE, DES3_KEY_SIZE, DES3_MAC_SIZE, DES3_SEED_LEN};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Des3CbcSha1Kd;

impl Des3CbcSha1Kd {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for Des3CbcSha1Kd {
    fn key_size(&self) -> usize {
        DES3_KEY_SIZE
    }

    fn seed_bit_len(&self) -> usize {
        DES3_SEED_LEN * 8
    }

    fn confounder_byte_size(&self) -> usize {
        DES3_BLOCK_SIZE
    }

    fn checksum_byte_size(&self) -> usize {
        DES3_MAC_SIZE
    }

    fn block_byte_size(&self) -> usize {
        DES3_BLOCK_SIZE
    }

    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Des3CbcSha1Kd
    }

    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha1Des3Kd
    }

    fn random_to_key(&self, seed: Vec<u8>) -> Vec<u8> {
        random_to_key(&seed)
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        if key.len() != DES3_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE));
        }

        encrypt_message(key, key_usage, payload, OsRng::default().gen::<[u8; DES3_BLOCK_SIZE]>())
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        if key.len() != DES3_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE));
        }

        decrypt_message(key, key_usage, cipher_data)
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        super::checksum_hmac_sha1(key, key_usage, payload)
    }

    fn generate_key_from_password_with_params(
        &self,
        password: &[u8],
        salt: &[u8],
        params: Option<&[u8]>,
    ) -> KerberosCryptoResult<Vec<u8>> {
        if params.map_or(false, |params| !params.is_empty()) {
            return Err(KerberosCryptoError::CipherError(
                "des3-cbc-sha1-kd string-to-key expects empty parameters".to_owned(),
            ));
        }

        derive_key_from_password(password, salt)
    }
}
