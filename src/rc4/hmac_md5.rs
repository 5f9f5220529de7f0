use crate::checksum::{Checksum, ChecksumSuite};
use crate::error::KerberosCryptoResult;

use super::RC4_MAC_SIZE;

/// hmac-md5 (cksumtype -138), the keyed checksum of the rc4-hmac suite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HmacMd5;

impl HmacMd5 {
    pub fn new() -> Self {
        Self
    }
}

impl Checksum for HmacMd5 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacMd5
    }

    fn checksum_byte_size(&self) -> usize {
        RC4_MAC_SIZE
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        super::checksum_hmac_md5(key, key_usage, payload)
    }
}
