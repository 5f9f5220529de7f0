use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use aes::{Aes128, Aes256};
use zeroize::Zeroizing;

use crate::common::hmac_sha1;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::{checksum_compare, usage_ke, usage_ki, validate_key_usage};

use super::key_derivation::derive_key;
use super::{swap_two_last_blocks, AesSize, AES_BLOCK_SIZE, AES_MAC_SIZE};

type Aes128CbcDecryptor = cbc::Decryptor<Aes128>;
type Aes256CbcDecryptor = cbc::Decryptor<Aes256>;

/// Raw AES-CBC with a zero IV over block-aligned data.
pub fn decrypt_aes(key: &[u8], cipher_data: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    // RFC 3961: initial cipher state: all bits zero
    let iv = [0u8; AES_BLOCK_SIZE];

    match aes_size {
        AesSize::Aes128 => {
            let cipher = Aes128CbcDecryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            cipher
                .decrypt_padded_vec_mut::<NoPadding>(cipher_data)
                .map_err(|err| KerberosCryptoError::CipherPad(format!("{:?}", err)))
        }
        AesSize::Aes256 => {
            let cipher = Aes256CbcDecryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            cipher
                .decrypt_padded_vec_mut::<NoPadding>(cipher_data)
                .map_err(|err| KerberosCryptoError::CipherPad(format!("{:?}", err)))
        }
    }
}

/// Inverse of [`encrypt_aes_cts`](super::encrypt::encrypt_aes_cts): rebuild
/// the stolen tail of the next-to-last block, undo the block swap, then run
/// plain CBC.
pub fn decrypt_aes_cts(key: &[u8], cipher_data: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if cipher_data.len() < AES_BLOCK_SIZE {
        return Err(KerberosCryptoError::CipherLength(cipher_data.len(), AES_BLOCK_SIZE));
    }

    if cipher_data.len() == AES_BLOCK_SIZE {
        return decrypt_aes(key, cipher_data, aes_size);
    }

    let pad_length = (AES_BLOCK_SIZE - (cipher_data.len() % AES_BLOCK_SIZE)) % AES_BLOCK_SIZE;

    let mut cipher_data = cipher_data.to_vec();

    if pad_length != 0 {
        // The final (swapped-forward) full block starts right before the
        // truncated tail. Decrypting it with a zero IV recovers the zero-pad
        // bytes that were stolen from the next-to-last block.
        let start = cipher_data.len() + pad_length - 2 * AES_BLOCK_SIZE;

        let dn = decrypt_aes(key, &cipher_data[start..start + AES_BLOCK_SIZE], aes_size)?;
        cipher_data.extend_from_slice(&dn[dn.len() - pad_length..]);
    }

    if cipher_data.len() >= 2 * AES_BLOCK_SIZE {
        swap_two_last_blocks(&mut cipher_data);
    }

    let mut plaintext = decrypt_aes(key, &cipher_data, aes_size)?;
    plaintext.truncate(cipher_data.len() - pad_length);

    Ok(plaintext)
}

/// Mirror of [`encrypt_message`](super::encrypt::encrypt_message): strip the
/// trailing HMAC, decrypt, recompute the tag over the decrypted buffer, then
/// drop the confounder block.
pub fn decrypt_message(
    key: &[u8],
    key_usage: i32,
    cipher_data: &[u8],
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    validate_key_usage(key_usage)?;

    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    if cipher_data.len() < AES_BLOCK_SIZE + AES_MAC_SIZE {
        return Err(KerberosCryptoError::CipherLength(
            cipher_data.len(),
            AES_BLOCK_SIZE + AES_MAC_SIZE,
        ));
    }

    let (cipher_data, checksum) = cipher_data.split_at(cipher_data.len() - AES_MAC_SIZE);

    let ke = Zeroizing::new(derive_key(key, &usage_ke(key_usage), aes_size)?);
    let plaintext = Zeroizing::new(decrypt_aes_cts(&ke, cipher_data, aes_size)?);

    let ki = Zeroizing::new(derive_key(key, &usage_ki(key_usage), aes_size)?);
    let calculated_checksum = hmac_sha1(&ki, &plaintext, AES_MAC_SIZE)?;

    if !checksum_compare(&calculated_checksum, checksum) {
        return Err(KerberosCryptoError::IntegrityCheck);
    }

    // the first block is the random confounder
    Ok(plaintext[AES_BLOCK_SIZE..].to_vec())
}
