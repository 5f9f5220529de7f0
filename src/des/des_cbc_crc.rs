use rand::rngs::OsRng;
use rand::Rng;

use crate::checksum::ChecksumSuite;
use crate::cipher::{Cipher, CipherSuite};
use crate::crc32::checksum_crc32;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};

use super::key_derivation::fix_weak_key;
use super::string_to_key::{derive_key_from_password, fix_parity};
use super::{legacy, DES_BLOCK_SIZE, DES_CONFOUNDER_SIZE, DES_KEY_SIZE};

const CRC32_CHECKSUM_SIZE: usize = 4;

/// des-cbc-crc (etype 1): old-style framing with the Kerberos-modified CRC-32
/// and — a preserved historical quirk — the key itself as the IV.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesCbcCrc;

impl DesCbcCrc {
    pub fn new() -> Self {
        Self
    }
}

fn crc32_digest(payload: &[u8]) -> Vec<u8> {
    checksum_crc32(payload).to_vec()
}

impl Cipher for DesCbcCrc {
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
        CRC32_CHECKSUM_SIZE
    }

    fn block_byte_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::DesCbcCrc
    }

    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::Crc32
    }

    fn random_to_key(&self, seed: Vec<u8>) -> Vec<u8> {
        fix_weak_key(fix_parity(seed))
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        legacy::encrypt_message(
            key,
            key_usage,
            payload,
            CRC32_CHECKSUM_SIZE,
            crc32_digest,
            key,
            OsRng::default().gen::<[u8; DES_CONFOUNDER_SIZE]>(),
        )
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        legacy::decrypt_message(key, key_usage, cipher_data, CRC32_CHECKSUM_SIZE, crc32_digest, key)
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
                "des-cbc-crc string-to-key expects empty parameters".to_owned(),
            ));
        }

        derive_key_from_password(password, salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let cipher = DesCbcCrc::new();
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();
        let plaintext = b"des-cbc-crc ticket data";

        let cipher_data = cipher.encrypt(&key, 2, plaintext).unwrap();
        let decrypted = cipher.decrypt(&key, 2, &cipher_data).unwrap();

        assert_eq!(plaintext.as_slice(), &decrypted[0..plaintext.len()]);
    }

    #[test]
    fn tampered_checksum_is_rejected() {
        let cipher = DesCbcCrc::new();
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();

        let mut cipher_data = cipher.encrypt(&key, 2, b"payload").unwrap();
        // second block holds the encrypted checksum field
        cipher_data[9] ^= 0x01;

        assert_eq!(
            Err(KerberosCryptoError::IntegrityCheck),
            cipher.decrypt(&key, 2, &cipher_data)
        );
    }

    #[test]
    fn different_ciphertexts_same_plaintext() {
        let cipher = DesCbcCrc::new();
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();

        let first = cipher.encrypt(&key, 2, b"payload").unwrap();
        let second = cipher.encrypt(&key, 2, b"payload").unwrap();

        assert_ne!(first, second);
        assert_eq!(
            cipher.decrypt(&key, 2, &first).unwrap(),
            cipher.decrypt(&key, 2, &second).unwrap()
        );
    }
}
