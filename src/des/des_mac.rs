use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{checksum_compare, validate_key_usage};

use super::decrypt::decrypt_des;
use super::encrypt::{des_cbc_residue, encrypt_des};
use super::key_derivation::variant_key;
use super::{DES_BLOCK_SIZE, DES_CONFOUNDER_SIZE, DES_KEY_SIZE};

const DES_MAC_CHECKSUM_SIZE: usize = DES_CONFOUNDER_SIZE + DES_BLOCK_SIZE;

fn zero_padded(confounder: Option<&[u8]>, payload: &[u8]) -> Vec<u8> {
    let len = confounder.map_or(0, <[u8]>::len) + payload.len();
    let pad_length = (DES_BLOCK_SIZE - (len % DES_BLOCK_SIZE)) % DES_BLOCK_SIZE;

    let mut data = Vec::with_capacity(len + pad_length);
    if let Some(confounder) = confounder {
        data.extend_from_slice(confounder);
    }
    data.extend_from_slice(payload);
    data.extend_from_slice(&vec![0; pad_length]);

    data
}

/// des-mac (cksumtype 4): CBC residue over a random confounder and the
/// message, the confounder and residue then encrypted under the variant key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesMac;

impl DesMac {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for DesMac {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::DesMac
    }

    fn checksum_byte_size(&self) -> usize {
        DES_MAC_CHECKSUM_SIZE
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
        let data = zero_padded(Some(&confounder), payload);

        let residue = des_cbc_residue(key, &[0; DES_BLOCK_SIZE], &data)?;

        let mut to_encrypt = Vec::with_capacity(DES_MAC_CHECKSUM_SIZE);
        to_encrypt.extend_from_slice(&confounder);
        to_encrypt.extend_from_slice(&residue);

        let variant = Zeroizing::new(variant_key(key));

        encrypt_des(&variant, &[0; DES_BLOCK_SIZE], &to_encrypt)
    }

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

        if checksum.len() != DES_MAC_CHECKSUM_SIZE {
            return Ok(false);
        }

        let variant = Zeroizing::new(variant_key(key));
        let decrypted = decrypt_des(&variant, &[0; DES_BLOCK_SIZE], checksum)?;

        let (confounder, residue) = decrypted.split_at(DES_CONFOUNDER_SIZE);

        let data = zero_padded(Some(confounder), payload);
        let calculated_residue = des_cbc_residue(key, &[0; DES_BLOCK_SIZE], &data)?;

        Ok(checksum_compare(&calculated_residue, residue))
    }
}

/// des-mac-k (cksumtype 5): the bare CBC residue, keyed and chained with the
/// same key, no confounder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesMacK;

impl DesMacK {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for DesMacK {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::DesMacK
    }

    fn checksum_byte_size(&self) -> usize {
        DES_BLOCK_SIZE
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        validate_key_usage(key_usage)?;

        if key.len() != DES_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
        }

        des_cbc_residue(key, key, &zero_padded(None, payload))
    }
}

#[cfg(test)]
mod tests {
    use crate::checksum::Checksum;
    use crate::des::string_to_key::derive_key_from_password;

    use super::{DesMac, DesMacK};

    #[test]
    fn des_mac_verify_roundtrip() {
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();
        let hasher = DesMac::new();

        let checksum = hasher.checksum(&key, 15, b"checksum me").unwrap();
        assert_eq!(16, checksum.len());

        assert!(hasher.verify_checksum(&key, 15, b"checksum me", &checksum).unwrap());
        assert!(!hasher.verify_checksum(&key, 15, b"checksum you", &checksum).unwrap());
    }

    #[test]
    fn des_mac_k_is_deterministic() {
        let key = derive_key_from_password("password", "ATHENA.MIT.EDUraeburn").unwrap();
        let hasher = DesMacK::new();

        let first = hasher.checksum(&key, 15, b"payload").unwrap();
        let second = hasher.checksum(&key, 15, b"payload").unwrap();

        assert_eq!(first, second);
        assert_eq!(8, first.len());
        assert!(hasher.verify_checksum(&key, 15, b"payload", &first).unwrap());
    }
}
