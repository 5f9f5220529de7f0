use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::KerberosCryptoResult;

use super::sha2::{checksum_sha2, mac_size};
use super::AesSize;

/// hmac-sha384-192-aes256 (cksumtype 20, RFC 8009).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HmacSha384192Aes256;

impl HmacSha384192Aes256 {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for HmacSha384192Aes256 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha384192Aes256
    }

    fn checksum_byte_size(&self) -> usize {
        mac_size(&AesSize::Aes256)
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        checksum_sha2(key, key_usage, payload, &AesSize::Aes256)
    }
}
