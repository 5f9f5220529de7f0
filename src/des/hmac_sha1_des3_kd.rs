use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::KerberosCryptoResult;

use super::DES3_MAC_SIZE;

/// hmac-sha1-des3-kd (cksumtype 12).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HmacSha1Des3Kd;

impl HmacSha1Des3Kd {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for HmacSha1Des3Kd {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha1Des3Kd
    }

    fn checksum_byte_size(&self) -> usize {
        DES3_MAC_SIZE
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        super::checksum_hmac_sha1(key, key_usage, payload)
    }
}
