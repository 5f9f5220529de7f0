use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes256};
use zeroize::Zeroizing;

use crate::common::hmac_sha1;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{usage_ke, usage_ki, validate_key_usage};

use super::key_derivation::derive_key;
use super::{swap_two_last_blocks, AesSize, AES_BLOCK_SIZE, AES_MAC_SIZE};

type Aes128CbcEncryptor = cbc::Encryptor<Aes128>;
type Aes256CbcEncryptor = cbc::Encryptor<Aes256>;

/// Raw AES-CBC with a zero IV over block-aligned data.
pub fn encrypt_aes(key: &[u8], plaintext: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if plaintext.len() % AES_BLOCK_SIZE != 0 {
        return Err(KerberosCryptoError::CipherPad(format!(
            "AES-CBC input is not block aligned: {}",
            plaintext.len()
        )));
    }

    // RFC 3961: initial cipher state: all bits zero
    let iv = [0u8; AES_BLOCK_SIZE];

    match aes_size {
        AesSize::Aes128 => {
            let cipher = Aes128CbcEncryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(plaintext))
        }
        AesSize::Aes256 => {
            let cipher = Aes256CbcEncryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(plaintext))
        }
    }
}

/// https://www.rfc-editor.org/rfc/rfc3962.html#section-5
///
/// CBC with ciphertext stealing: pad with zeros, CBC-encrypt, swap the two
/// final blocks, then truncate back to the input length. Inputs shorter than
/// one block are never produced by the framing layer (the confounder fills
/// the first block).
pub fn encrypt_aes_cts(key: &[u8], payload: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    let pad_length = (AES_BLOCK_SIZE - (payload.len() % AES_BLOCK_SIZE)) % AES_BLOCK_SIZE;

    let mut padded_payload = Zeroizing::new(payload.to_vec());
    padded_payload.extend_from_slice(&vec![0; pad_length]);

    let mut ciphertext = encrypt_aes(key, &padded_payload, aes_size)?;

    if ciphertext.len() <= AES_BLOCK_SIZE {
        return Ok(ciphertext);
    }

    if ciphertext.len() >= 2 * AES_BLOCK_SIZE {
        swap_two_last_blocks(&mut ciphertext);
    }

    ciphertext.truncate(payload.len());

    Ok(ciphertext)
}

/// RFC 3962 framing: `CTS(Ke, confounder | plaintext) | HMAC-SHA1(Ki, confounder | plaintext)[0..12]`.
pub fn encrypt_message(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
    confounder: [u8; AES_BLOCK_SIZE],
) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let mut data_to_encrypt = Zeroizing::new(Vec::with_capacity(AES_BLOCK_SIZE + payload.len()));
    data_to_encrypt.extend_from_slice(&confounder);
    data_to_encrypt.extend_from_slice(payload);

    let ke = Zeroizing::new(derive_key(key, &usage_ke(key_usage), aes_size)?);
    let mut ciphertext = encrypt_aes_cts(&ke, &data_to_encrypt, aes_size)?;

    let ki = Zeroizing::new(derive_key(key, &usage_ki(key_usage), aes_size)?);
    let hmac = hmac_sha1(&ki, &data_to_encrypt, AES_MAC_SIZE)?;

    ciphertext.extend_from_slice(&hmac);

    Ok(ciphertext)
}
