use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use des::{Des, TdesEde3};
use zeroize::Zeroizing;

use crate::common::hmac_sha1;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{usage_ke, usage_ki, validate_key_usage};

use super::key_derivation::derive_key;
use super::{DES3_BLOCK_SIZE, DES3_KEY_SIZE, DES3_MAC_SIZE, DES_BLOCK_SIZE, DES_KEY_SIZE};

type Des3CbcEncryptor = cbc::Encryptor<TdesEde3>;
type DesCbcEncryptor = cbc::Encryptor<Des>;

/// Raw 3DES-CBC with a zero IV over block-aligned data.
pub fn encrypt_des3(key: &[u8], payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != DES3_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE));
    }

    if payload.len() % DES3_BLOCK_SIZE != 0 {
        return Err(KerberosCryptoError::CipherPad(format!(
            "3DES-CBC input is not block aligned: {}",
            payload.len()
        )));
    }

    // RFC 3961: initial cipher state: all bits zero
    let iv = [0u8; DES3_BLOCK_SIZE];

    let cipher = Des3CbcEncryptor::new_from_slices(key, &iv)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE))?;

    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(payload))
}

/// Raw single-DES-CBC under an explicit IV. The legacy encryption types pick
/// the IV themselves (the key for des-cbc-crc, zero for des-cbc-md5).
pub fn encrypt_des(key: &[u8], ivec: &[u8], payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != DES_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
    }

    if payload.len() % DES_BLOCK_SIZE != 0 {
        return Err(KerberosCryptoError::CipherPad(format!(
            "DES-CBC input is not block aligned: {}",
            payload.len()
        )));
    }

    let cipher = DesCbcEncryptor::new_from_slices(key, ivec)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE))?;

    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(payload))
}

/// RFC 3961 §6.3 framing:
/// `CBC(Ke, confounder | plaintext | zero-pad) | HMAC-SHA1(Ki, confounder | plaintext | pad)`.
/// The pad is covered by the HMAC and, being indistinguishable from trailing
/// data, stays part of the plaintext on decrypt.
pub fn encrypt_message(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    confounder: [u8; DES3_BLOCK_SIZE],
) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    let pad_length = (DES3_BLOCK_SIZE - ((DES3_BLOCK_SIZE + payload.len()) % DES3_BLOCK_SIZE)) % DES3_BLOCK_SIZE;

    let mut data_to_encrypt = Zeroizing::new(Vec::with_capacity(DES3_BLOCK_SIZE + payload.len() + pad_length));
    data_to_encrypt.extend_from_slice(&confounder);
    data_to_encrypt.extend_from_slice(payload);
    data_to_encrypt.extend_from_slice(&vec![0; pad_length]);

    let ke = Zeroizing::new(derive_key(key, &usage_ke(key_usage))?);
    let mut ciphertext = encrypt_des3(&ke, &data_to_encrypt)?;

    let ki = Zeroizing::new(derive_key(key, &usage_ki(key_usage))?);
    let hmac = hmac_sha1(&ki, &data_to_encrypt, DES3_MAC_SIZE)?;

    ciphertext.extend_from_slice(&hmac);

    Ok(ciphertext)
}

/// DES-CBC residue: the final block of the CBC encryption. Used by the
/// single-DES string-to-key and the DES-MAC family.
pub fn des_cbc_residue(key: &[u8], ivec: &[u8], payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if payload.is_empty() {
        return Err(KerberosCryptoError::CipherLength(0, DES_BLOCK_SIZE));
    }

    let ciphertext = encrypt_des(key, ivec, payload)?;

    Ok(ciphertext[ciphertext.len() - DES_BLOCK_SIZE..].to_vec())
}
