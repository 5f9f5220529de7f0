use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::KerberosCryptoResult;

use super::sha2::{checksum_sha2, mac_size};
use super::AesSize;

/// hmac-sha256-128-aes128 (cksumtype 19, RFC 8009).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HmacSha256128Aes128;

impl HmacSha256128Aes128 {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for HmacSha256128Aes128 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha256128Aes128
    }

    fn checksum_byte_size(&self) -> usize {
        mac_size(&AesSize::Aes128)
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        checksum_sha2(key, key_usage, payload, &AesSize::Aes128)
    }
}
