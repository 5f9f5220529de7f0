use md5::{Digest, Md5};
use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{checksum_compare, validate_key_usage};

use super::decrypt::decrypt_des;
use super::encrypt::encrypt_des;
use super::key_derivation::variant_key;
use super::{DES_BLOCK_SIZE, DES_CONFOUNDER_SIZE, DES_KEY_SIZE};

const RSA_MD5_DES_CHECKSUM_SIZE: usize = DES_CONFOUNDER_SIZE + 16;

/// rsa-md5-des (cksumtype 8): MD5 over a random confounder and the message,
/// with confounder and digest DES-CBC-encrypted under the variant key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RsaMd5Des;

impl RsaMd5Des {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for RsaMd5Des {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::RsaMd5Des
    }

    fn checksum_byte_size(&self) -> usize {
        RSA_MD5_DES_CHECKSUM_SIZE
    }

    fn confounder_byte_size(&self) -> usize {
        DES_CONFOUNDER_SIZE
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        validate_key_usage(key_usage)?;

        if key.len() != DES_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
        }

        let confounder = OsRng::default().gen::<[u8; DES_CONFOUNDER_SIZE]>();

        let mut to_digest = Vec::with_capacity(DES_CONFOUNDER_SIZE + payload.len());
        to_digest.extend_from_slice(&confounder);
        to_digest.extend_from_slice(payload);

        let mut to_encrypt = Vec::with_capacity(RSA_MD5_DES_CHECKSUM_SIZE);
        to_encrypt.extend_from_slice(&confounder);
        to_encrypt.extend_from_slice(&Md5::digest(&to_digest));

        let variant = Zeroizing::new(variant_key(key));

        encrypt_des(&variant, &[0; DES_BLOCK_SIZE], &to_encrypt)
    }

    /// The confounder is random, so verification decrypts the checksum
    /// instead of recomputing it.
    fn verify_checksum(
        &self,
        key: &[u8],
        key_usage: i32,
        payload: &[u8],
        checksum: &[u8],
    ) -> KerberosCryptoResult<bool> {
        validate_key_usage(key_usage)?;

        if key.len() != DES_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
        }

        if checksum.len() != RSA_MD5_DES_CHECKSUM_SIZE {
            return Ok(false);
        }

        let variant = Zeroizing::new(variant_key(key));
        let decrypted = decrypt_des(&variant, &[0; DES_BLOCK_SIZE], checksum)?;

        let (confounder, digest) = decrypted.split_at(DES_CONFOUNDER_SIZE);

        let mut to_digest = Vec::with_capacity(DES_CONFOUNDER_SIZE + payload.len());
        to_digest.extend_from_slice(confounder);
        to_digest.extend_from_slice(payload);

        Ok(checksum_compare(&Md5::digest(&to_digest), digest))
    }
}
