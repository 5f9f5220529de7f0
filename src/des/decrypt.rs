use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use des::{Des, TdesEde3};
use zeroize::Zeroizing;

use crate::common::hmac_sha1;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{checksum_compare, usage_ke, usage_ki, validate_key_usage};

use super::key_derivation::derive_key;
use super::{DES3_BLOCK_SIZE, DES3_KEY_SIZE, DES3_MAC_SIZE, DES_KEY_SIZE};

type Des3CbcDecryptor = cbc::Decryptor<TdesEde3>;
type DesCbcDecryptor = cbc::Decryptor<Des>;

/// Raw 3DES-CBC with a zero IV.
pub fn decrypt_des3(key: &[u8], cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != DES3_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE));
    }

    // RFC 3961: initial cipher state: all bits zero
    let iv = [0u8; DES3_BLOCK_SIZE];

    let cipher = Des3CbcDecryptor::new_from_slices(key, &iv)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE))?;

    cipher
        .decrypt_padded_vec_mut::<NoPadding>(cipher_data)
        .map_err(|err| KerberosCryptoError::CipherPad(format!("{:?}", err)))
}

/// Mirror of [`encrypt_message`](super::encrypt::encrypt_message). The
/// returned plaintext keeps the zero-pad tail: its length cannot be recovered
/// from the ciphertext, and peers rely on it staying in place.
pub fn decrypt_message(key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if cipher_data.len() < DES3_BLOCK_SIZE + DES3_MAC_SIZE {
        return Err(KerberosCryptoError::CipherLength(
            cipher_data.len(),
            DES3_BLOCK_SIZE + DES3_MAC_SIZE,
        ));
    }

    let (cipher_data, checksum) = cipher_data.split_at(cipher_data.len() - DES3_MAC_SIZE);

    let ke = Zeroizing::new(derive_key(key, &usage_ke(key_usage))?);
    let plaintext = Zeroizing::new(decrypt_des3(&ke, cipher_data)?);

    let ki = Zeroizing::new(derive_key(key, &usage_ki(key_usage))?);
    let calculated_checksum = hmac_sha1(&ki, &plaintext, DES3_MAC_SIZE)?;

    if !checksum_compare(&calculated_checksum, checksum) {
        return Err(KerberosCryptoError::IntegrityCheck);
    }

    // the first block is the random confounder
    Ok(plaintext[DES3_BLOCK_SIZE..].to_vec())
}

/// Raw single-DES-CBC under an explicit IV.
pub fn decrypt_des(key: &[u8], ivec: &[u8], cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != DES_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE));
    }

    let cipher = DesCbcDecryptor::new_from_slices(key, ivec)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE))?;

    cipher
        .decrypt_padded_vec_mut::<NoPadding>(cipher_data)
        .map_err(|err| KerberosCryptoError::CipherPad(format!("{:?}", err)))
}
