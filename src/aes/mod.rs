pub mod decrypt;
pub mod encrypt;
pub mod key_derivation;
pub mod sha2;

mod aes128_cts_hmac_sha1_96;
mod aes128_cts_hmac_sha256_128;
mod aes256_cts_hmac_sha1_96;
mod aes256_cts_hmac_sha384_192;
mod hmac_sha1_aes128;
mod hmac_sha1_aes256;
mod hmac_sha256_aes128;
mod hmac_sha384_aes256;

pub use aes128_cts_hmac_sha1_96::Aes128CtsHmacSha196;
pub use aes128_cts_hmac_sha256_128::Aes128CtsHmacSha256128;
pub use aes256_cts_hmac_sha1_96::Aes256CtsHmacSha196;
pub use aes256_cts_hmac_sha384_192::Aes256CtsHmacSha384192;
pub use hmac_sha1_aes128::HmacSha196Aes128;
pub use hmac_sha1_aes256::HmacSha196Aes256;
pub use hmac_sha256_aes128::HmacSha256128Aes128;
pub use hmac_sha384_aes256::HmacSha384192Aes256;

pub const AES_BLOCK_SIZE: usize = 16;
/// Truncated HMAC-SHA1 length for the RFC 3962 suites.
pub const AES_MAC_SIZE: usize = 12;

pub const AES128_KEY_SIZE: usize = 128 / 8;
pub const AES256_KEY_SIZE: usize = 256 / 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AesSize {
    Aes256,
    Aes128,
}

impl AesSize {
    pub fn key_length(&self) -> usize {
        match self {
            AesSize::Aes256 => AES256_KEY_SIZE,
            AesSize::Aes128 => AES128_KEY_SIZE,
        }
    }

    pub fn block_bit_len(&self) -> usize {
        AES_BLOCK_SIZE * 8
    }

    pub fn seed_bit_len(&self) -> usize {
        self.key_length() * 8
    }
}

/// `HMAC-SHA1(Kc, message)` truncated to 96 bits (RFC 3962 §6).
pub(crate) fn checksum_sha1(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
) -> crate::error::KerberosCryptoResult<Vec<u8>> {
    use zeroize::Zeroizing;

    crate::utils::validate_key_usage(key_usage)?;

    let kc = Zeroizing::new(key_derivation::derive_key(
        key,
        &crate::utils::usage_kc(key_usage),
        aes_size,
    )?);

    crate::common::hmac_sha1(&kc, payload, AES_MAC_SIZE)
}

/// CTS ("ciphertext stealing") is CBC with the last two blocks swapped and the
/// tail truncated: https://www.rfc-editor.org/rfc/rfc3962.html#section-5
pub(crate) fn swap_two_last_blocks(data: &mut [u8]) {
    debug_assert!(data.len() >= 2 * AES_BLOCK_SIZE);
    debug_assert_eq!(0, data.len() % AES_BLOCK_SIZE);

    let len = data.len();
    for i in 0..AES_BLOCK_SIZE {
        data.swap(len - 2 * AES_BLOCK_SIZE + i, len - AES_BLOCK_SIZE + i);
    }
}
