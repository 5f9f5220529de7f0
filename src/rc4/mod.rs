//! https://www.rfc-editor.org/rfc/rfc4757.html
//!
//! The Microsoft RC4-HMAC encryption type. Unlike the RFC 3961 simplified
//! profile it keys everything off HMAC-MD5 chains, encodes the key usage in
//! little-endian and remaps a few usage numbers for KILE compatibility.

mod hmac_md5;
mod rc4_hmac;

pub use hmac_md5::HmacMd5;
pub use rc4_hmac::Rc4Hmac;

use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroizing;

use crate::common::hmac_md5;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::validate_key_usage;

pub const RC4_KEY_SIZE: usize = 16;
pub const RC4_CONFOUNDER_SIZE: usize = 8;
pub const RC4_MAC_SIZE: usize = 16;

const SIGNATURE_KEY_LABEL: &[u8] = b"signaturekey\x00";

/// KILE remaps a few protocol usages before they reach the HMAC chain.
fn translate_key_usage(key_usage: i32) -> i32 {
    match key_usage {
        3 => 8,
        9 => 8,
        23 => 13,
        other => other,
    }
}

/// `T`: the translated key usage as four little-endian octets.
fn usage_bytes(key_usage: i32) -> [u8; 4] {
    let mut t = [0u8; 4];
    LittleEndian::write_i32(&mut t, translate_key_usage(key_usage));
    t
}

/// `K1 = HMAC-MD5(key, T)`.
fn derive_k1(key: &[u8], key_usage: i32) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if key.len() != RC4_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), RC4_KEY_SIZE));
    }

    hmac_md5(key, &usage_bytes(key_usage))
}

/// Standalone HMAC-MD5 checksum (RFC 4757 §4):
/// `HMAC-MD5(Ksign, MD5(T | message))` with `Ksign = HMAC-MD5(key, "signaturekey\0")`.
pub(crate) fn checksum_hmac_md5(key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    use md5::{Digest, Md5};

    validate_key_usage(key_usage)?;

    if key.len() != RC4_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), RC4_KEY_SIZE));
    }

    let ksign = Zeroizing::new(hmac_md5(key, SIGNATURE_KEY_LABEL)?);

    let mut to_digest = Vec::with_capacity(4 + payload.len());
    to_digest.extend_from_slice(&usage_bytes(key_usage));
    to_digest.extend_from_slice(payload);

    hmac_md5(&ksign, &Md5::digest(&to_digest))
}
