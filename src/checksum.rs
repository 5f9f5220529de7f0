use md5::{Digest, Md5};

use crate::aes::{HmacSha196Aes128, HmacSha196Aes256, HmacSha256128Aes128, HmacSha384192Aes256};
use crate::constants::cksum_types;
use crate::crc32::checksum_crc32;
use crate::des::{DesMac, DesMacK, HmacSha1Des3Kd, RsaMd5Des};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::rc4::HmacMd5;
use crate::utils::checksum_compare;

/// One checksum-type profile, usable standalone or as part of an encryption
/// type's framing. Unkeyed algorithms ignore the key and usage arguments.
pub trait Checksum {
    fn checksum_type(&self) -> ChecksumSuite;

    fn checksum_byte_size(&self) -> usize;

    fn confounder_byte_size(&self) -> usize {
        0
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>>;

    /// Confounder-randomized checksums override this to decrypt-and-compare
    /// instead of recomputing.
    fn verify_checksum(&self, key: &[u8], key_usage: i32, payload: &[u8], checksum: &[u8]) -> KerberosCryptoResult<bool> {
        Ok(checksum_compare(&self.checksum(key, key_usage, payload)?, checksum))
    }
}

/// Closed registry of the supported checksum types. Identifiers are signed:
/// the Microsoft hmac-md5 type is negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChecksumSuite {
    Null,
    Crc32,
    DesMac,
    DesMacK,
    RsaMd5,
    RsaMd5Des,
    HmacSha1Des3Kd,
    HmacSha196Aes128,
    HmacSha196Aes256,
    HmacSha256128Aes128,
    HmacSha384192Aes256,
    HmacMd5,
}

impl ChecksumSuite {
    pub fn hasher(&self) -> Box<dyn Checksum> {
        match self {
            ChecksumSuite::Null => Box::new(NullChecksum::new()),
            ChecksumSuite::Crc32 => Box::new(Crc32::new()),
            ChecksumSuite::DesMac => Box::new(DesMac::new()),
            ChecksumSuite::DesMacK => Box::new(DesMacK::new()),
            ChecksumSuite::RsaMd5 => Box::new(RsaMd5::new()),
            ChecksumSuite::RsaMd5Des => Box::new(RsaMd5Des::new()),
            ChecksumSuite::HmacSha1Des3Kd => Box::new(HmacSha1Des3Kd::new()),
            ChecksumSuite::HmacSha196Aes128 => Box::new(HmacSha196Aes128::new()),
            ChecksumSuite::HmacSha196Aes256 => Box::new(HmacSha196Aes256::new()),
            ChecksumSuite::HmacSha256128Aes128 => Box::new(HmacSha256128Aes128::new()),
            ChecksumSuite::HmacSha384192Aes256 => Box::new(HmacSha384192Aes256::new()),
            ChecksumSuite::HmacMd5 => Box::new(HmacMd5::new()),
        }
    }

    /// True when the algorithm takes part of its input from a key.
    pub fn is_keyed(&self) -> bool {
        !matches!(self, ChecksumSuite::Null | ChecksumSuite::Crc32 | ChecksumSuite::RsaMd5)
    }
}

impl TryFrom<i32> for ChecksumSuite {
    type Error = KerberosCryptoError;

    fn try_from(identifier: i32) -> Result<Self, Self::Error> {
        match identifier {
            cksum_types::NULL => Ok(ChecksumSuite::Null),
            cksum_types::CRC32 => Ok(ChecksumSuite::Crc32),
            cksum_types::DES_MAC => Ok(ChecksumSuite::DesMac),
            cksum_types::DES_MAC_K => Ok(ChecksumSuite::DesMacK),
            cksum_types::RSA_MD5 => Ok(ChecksumSuite::RsaMd5),
            cksum_types::RSA_MD5_DES => Ok(ChecksumSuite::RsaMd5Des),
            cksum_types::HMAC_SHA1_DES3_KD => Ok(ChecksumSuite::HmacSha1Des3Kd),
            cksum_types::HMAC_SHA1_96_AES128 => Ok(ChecksumSuite::HmacSha196Aes128),
            cksum_types::HMAC_SHA1_96_AES256 => Ok(ChecksumSuite::HmacSha196Aes256),
            cksum_types::HMAC_SHA256_128_AES128 => Ok(ChecksumSuite::HmacSha256128Aes128),
            cksum_types::HMAC_SHA384_192_AES256 => Ok(ChecksumSuite::HmacSha384192Aes256),
            cksum_types::HMAC_MD5 => Ok(ChecksumSuite::HmacMd5),
            unknown => Err(KerberosCryptoError::ChecksumIdentifier(unknown)),
        }
    }
}

impl From<ChecksumSuite> for i32 {
    fn from(suite: ChecksumSuite) -> i32 {
        match suite {
            ChecksumSuite::Null => cksum_types::NULL,
            ChecksumSuite::Crc32 => cksum_types::CRC32,
            ChecksumSuite::DesMac => cksum_types::DES_MAC,
            ChecksumSuite::DesMacK => cksum_types::DES_MAC_K,
            ChecksumSuite::RsaMd5 => cksum_types::RSA_MD5,
            ChecksumSuite::RsaMd5Des => cksum_types::RSA_MD5_DES,
            ChecksumSuite::HmacSha1Des3Kd => cksum_types::HMAC_SHA1_DES3_KD,
            ChecksumSuite::HmacSha196Aes128 => cksum_types::HMAC_SHA1_96_AES128,
            ChecksumSuite::HmacSha196Aes256 => cksum_types::HMAC_SHA1_96_AES256,
            ChecksumSuite::HmacSha256128Aes128 => cksum_types::HMAC_SHA256_128_AES128,
            ChecksumSuite::HmacSha384192Aes256 => cksum_types::HMAC_SHA384_192_AES256,
            ChecksumSuite::HmacMd5 => cksum_types::HMAC_MD5,
        }
    }
}

/// The null checksum (cksumtype 0): zero length, matches anything of zero
/// length. Registry completeness only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullChecksum;

impl NullChecksum {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for NullChecksum {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::Null
    }

    fn checksum_byte_size(&self) -> usize {
        0
    }

    fn checksum(&self, _key: &[u8], _key_usage: i32, _payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// crc32 (cksumtype 1), unkeyed, Kerberos-modified CRC.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Crc32;

impl Crc32 {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for Crc32 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::Crc32
    }

    fn checksum_byte_size(&self) -> usize {
        4
    }

    fn checksum(&self, _key: &[u8], _key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        Ok(checksum_crc32(payload).to_vec())
    }
}

/// rsa-md5 (cksumtype 7), unkeyed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RsaMd5;

impl RsaMd5 {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for RsaMd5 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::RsaMd5
    }

    fn checksum_byte_size(&self) -> usize {
        16
    }

    fn checksum(&self, _key: &[u8], _key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        Ok(Md5::digest(payload).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identifier_fails_closed() {
        assert_eq!(
            Err(KerberosCryptoError::ChecksumIdentifier(2)),
            ChecksumSuite::try_from(2)
        );
        assert_eq!(
            Err(KerberosCryptoError::ChecksumIdentifier(-1)),
            ChecksumSuite::try_from(-1)
        );
    }

    #[test]
    fn identifier_roundtrip() {
        for identifier in [0, 1, 4, 5, 7, 8, 12, 15, 16, 19, 20, -138] {
            let suite = ChecksumSuite::try_from(identifier).unwrap();
            assert_eq!(identifier, i32::from(suite));
        }
    }

    #[test]
    fn keyed_flags() {
        assert!(!ChecksumSuite::Crc32.is_keyed());
        assert!(!ChecksumSuite::RsaMd5.is_keyed());
        assert!(ChecksumSuite::DesMac.is_keyed());
        assert!(ChecksumSuite::HmacSha196Aes256.is_keyed());
        assert!(ChecksumSuite::HmacMd5.is_keyed());
    }

    #[test]
    fn unkeyed_checksums_ignore_key_and_usage() {
        let hasher = ChecksumSuite::RsaMd5.hasher();

        assert_eq!(
            hasher.checksum(&[], 0, b"message digest").unwrap(),
            hasher.checksum(&[1, 2, 3], 7, b"message digest").unwrap()
        );
        // RFC 1321 test vector
        assert_eq!(
            hex::decode("f96b697d7cb7938d525a2f31aaf161d0").unwrap(),
            hasher.checksum(&[], 0, b"message digest").unwrap()
        );
    }

    #[test]
    fn verify_checksum_mismatch_is_false_not_error() {
        let hasher = ChecksumSuite::Crc32.hasher();

        assert!(hasher.verify_checksum(&[], 0, b"foo", &[0x33, 0xbc, 0x32, 0x73]).unwrap());
        assert!(!hasher.verify_checksum(&[], 0, b"foo", &[0x33, 0xbc, 0x32, 0x74]).unwrap());
        assert!(!hasher.verify_checksum(&[], 0, b"foo", &[]).unwrap());
    }
}
