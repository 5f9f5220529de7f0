use rand::rngs::OsRng;
use rand::Rng;

use crate::checksum::ChecksumSuite;
use crate::cipher::{Cipher, CipherSuite};
use crate::error::KerberosCryptoResult;

use super::sha2::{self, checksum_sha2, derive_key_from_password_with_params};
use super::{AesSize, AES256_KEY_SIZE, AES_BLOCK_SIZE};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aes256CtsHmacSha384192;

impl Aes256CtsHmacSha384192 {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for Aes256CtsHmacSha384192 {
    fn key_size(&self) -> usize {
        AES256_KEY_SIZE
    }

    fn seed_bit_len(&self) -> usize {
        AesSize::Aes256.seed_bit_len()
    }

    fn confounder_byte_size(&self) -> usize {
        AES_BLOCK_SIZE
    }

    fn checksum_byte_size(&self) -> usize {
        sha2::mac_size(&AesSize::Aes256)
    }

    fn block_byte_size(&self) -> usize {
        AES_BLOCK_SIZE
    }

    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Aes256CtsHmacSha384192
    }

    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha384192Aes256
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        sha2::encrypt_message(
            key,
            key_usage,
            payload,
            &AesSize::Aes256,
            OsRng::default().gen::<[u8; AES_BLOCK_SIZE]>(),
        )
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        sha2::decrypt_message(key, key_usage, cipher_data, &AesSize::Aes256)
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        checksum_sha2(key, key_usage, payload, &AesSize::Aes256)
    }

    fn generate_key_from_password_with_params(
        &self,
        password: &[u8],
        salt: &[u8],
        params: Option<&[u8]>,
    ) -> KerberosCryptoResult<Vec<u8>> {
        derive_key_from_password_with_params(password, salt, params, &AesSize::Aes256)
    }
}
