pub mod decrypt;
pub mod encrypt;
pub mod key_derivation;
pub mod string_to_key;

mod des3_cbc_sha1_kd;
mod des_cbc_crc;
mod des_cbc_md5;
mod des_mac;
mod hmac_sha1_des3_kd;
mod legacy;
mod rsa_md5_des;

pub use des3_cbc_sha1_kd::Des3CbcSha1Kd;
pub use des_cbc_crc::DesCbcCrc;
pub use des_cbc_md5::DesCbcMd5;
pub use des_mac::{DesMac, DesMacK};
pub use hmac_sha1_des3_kd::HmacSha1Des3Kd;
pub use rsa_md5_des::RsaMd5Des;

pub const DES_BLOCK_SIZE: usize = 8;
pub const DES_KEY_SIZE: usize = 8;

pub const DES3_BLOCK_SIZE: usize = 8;
pub const DES3_KEY_SIZE: usize = 24;
/// DR produces a 168-bit seed which random-to-key expands to 24 key bytes.
pub const DES3_SEED_LEN: usize = 21;
/// des3-cbc-hmac-sha1-kd carries the full (untruncated) HMAC-SHA1.
pub const DES3_MAC_SIZE: usize = 20;

/// Confounder size for the legacy single-DES encryption types and keyed
/// checksums.
pub const DES_CONFOUNDER_SIZE: usize = 8;

/// hmac-sha1-des3-kd: `HMAC-SHA1(Kc, message)`, untruncated (RFC 3961 §6.3).
pub(crate) fn checksum_hmac_sha1(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
) -> crate::error::KerberosCryptoResult<Vec<u8>> {
    use zeroize::Zeroizing;

    crate::utils::validate_key_usage(key_usage)?;

    let kc = Zeroizing::new(key_derivation::derive_key(key, &crate::utils::usage_kc(key_usage))?);

    crate::common::hmac_sha1(&kc, payload, DES3_MAC_SIZE)
}
