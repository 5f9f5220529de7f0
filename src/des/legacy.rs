//! Pre-RFC 3961 "old style" framing shared by des-cbc-crc and des-cbc-md5:
//!
//! `CBC(key, confounder | checksum(zeroed) | data | pad)`
//!
//! The checksum is computed over the whole buffer with its own field zeroed
//! and written back in place before encryption. There is no key derivation;
//! the raw base key drives the cipher directly.

use zeroize::Zeroizing;

use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{checksum_compare, validate_key_usage};

use super::decrypt::decrypt_des;
use super::encrypt::encrypt_des;
use super::{DES_BLOCK_SIZE, DES_CONFOUNDER_SIZE, DES_KEY_SIZE};

pub(crate) fn encrypt_message<D>(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    checksum_size: usize,
    digest: D,
    ivec: &[u8],
    confounder: [u8; DES_CONFOUNDER_SIZE],
) -> KerberosCryptoResult<Vec<u8>>
where
    D: Fn(&[u8]) -> Vec<u8>,
{
    validate_key_usage(key_usage)?;

    if key.len() != DES_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
    }

    let header_size = DES_CONFOUNDER_SIZE + checksum_size;

    // Self-describing pad: 1..=8 bytes, each holding the pad count; a full
    // block of pad when the buffer is already aligned.
    let pad_length = DES_BLOCK_SIZE - ((header_size + payload.len()) % DES_BLOCK_SIZE);

    let mut buffer = Zeroizing::new(Vec::with_capacity(header_size + payload.len() + pad_length));
    buffer.extend_from_slice(&confounder);
    buffer.extend_from_slice(&vec![0; checksum_size]);
    buffer.extend_from_slice(payload);
    buffer.extend_from_slice(&vec![pad_length as u8; pad_length]);

    let checksum = digest(&buffer);
    buffer[DES_CONFOUNDER_SIZE..header_size].copy_from_slice(&checksum);

    encrypt_des(key, ivec, &buffer)
}

/// The returned "data" slice keeps the pad bytes: real deployments include
/// them and peers depend on it, even though the formal layout says otherwise.
pub(crate) fn decrypt_message<D>(
    key: &[u8],
    key_usage: i32,
    cipher_data: &[u8],
    checksum_size: usize,
    digest: D,
    ivec: &[u8],
) -> KerberosCryptoResult<Vec<u8>>
where
    D: Fn(&[u8]) -> Vec<u8>,
{
    validate_key_usage(key_usage)?;

    if key.len() != DES_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
    }

    let header_size = DES_CONFOUNDER_SIZE + checksum_size;
    let min_size = header_size + (DES_BLOCK_SIZE - header_size % DES_BLOCK_SIZE) % DES_BLOCK_SIZE;

    if cipher_data.len() < min_size || cipher_data.len() % DES_BLOCK_SIZE != 0 {
        return Err(KerberosCryptoError::CipherLength(cipher_data.len(), min_size));
    }

    let mut buffer = Zeroizing::new(decrypt_des(key, ivec, cipher_data)?);

    let checksum = buffer[DES_CONFOUNDER_SIZE..header_size].to_vec();
    buffer[DES_CONFOUNDER_SIZE..header_size].fill(0);

    let calculated_checksum = digest(&buffer);

    if !checksum_compare(&calculated_checksum, &checksum) {
        return Err(KerberosCryptoError::IntegrityCheck);
    }

    Ok(buffer[header_size..].to_vec())
}
