use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::KerberosCryptoResult;

use super::{AesSize, AES_MAC_SIZE};

/// hmac-sha1-96-aes256 (cksumtype 16).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HmacSha196Aes256;

impl HmacSha196Aes256 {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for HmacSha196Aes256 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha196Aes256
    }

    fn checksum_byte_size(&self) -> usize {
        AES_MAC_SIZE
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        super::checksum_sha1(key, key_usage, payload, &AesSize::Aes256)
    }
}
