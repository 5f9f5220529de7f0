//! https://www.rfc-editor.org/rfc/rfc3961.html#section-6.2.3
//!
//! The single-DES string-to-key fan-folds the password/salt string 56 bits at
//! a time, reversing the bit string of every second block, then runs a
//! DES-CBC checksum over the same input under the intermediate key. The
//! byte-level algorithm below follows the RFC pseudo-code; it is pinned by
//! the appendix test vectors rather than derived from first principles.

use zeroize::Zeroizing;

use crate::error::{KerberosCryptoError, KerberosCryptoResult};

use super::encrypt::des_cbc_residue;
use super::key_derivation::{calc_even_parity, fix_weak_key};
use super::{DES_BLOCK_SIZE, DES_KEY_SIZE};

pub fn derive_key_from_password<P: AsRef<[u8]>, S: AsRef<[u8]>>(password: P, salt: S) -> KerberosCryptoResult<Vec<u8>> {
    let mut secret = Zeroizing::new(password.as_ref().to_vec());
    secret.extend_from_slice(salt.as_ref());

    if secret.is_empty() {
        return Err(KerberosCryptoError::CipherError(
            "empty password and salt".to_owned(),
        ));
    }

    let pad_length = (DES_BLOCK_SIZE - (secret.len() % DES_BLOCK_SIZE)) % DES_BLOCK_SIZE;
    secret.extend_from_slice(&vec![0; pad_length]);

    let mut temp_string: u64 = 0;
    let mut odd = true;

    for block in secret.chunks(DES_BLOCK_SIZE) {
        // the most significant bit of each octet is discarded
        let mut fifty_six: u64 = 0;
        for &byte in block {
            fifty_six = (fifty_six << 7) | u64::from(byte & 0x7f);
        }

        if !odd {
            // every second block is reversed as a 56-bit string
            fifty_six = fifty_six.reverse_bits() >> 8;
        }
        odd = !odd;

        temp_string ^= fifty_six;
    }

    let temp_key = Zeroizing::new(fix_weak_key(add_parity_bits(temp_string)));

    // DES-CBC checksum of the padded input, keyed and chained with the
    // intermediate key
    let residue = Zeroizing::new(des_cbc_residue(&temp_key, &temp_key, &secret)?);

    Ok(fix_weak_key(fix_parity(residue.to_vec())))
}

/// Distributes 56 bits over 8 octets, low bit of each octet carrying odd
/// parity.
fn add_parity_bits(temp_string: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(DES_KEY_SIZE);

    for i in 0..DES_KEY_SIZE {
        let seven_bits = ((temp_string >> (49 - 7 * i)) & 0x7f) as u8;
        key.push(seven_bits << 1);
    }

    fix_parity(key)
}

pub(crate) fn fix_parity(mut key: Vec<u8>) -> Vec<u8> {
    for byte in key.iter_mut() {
        let (_, corrected) = calc_even_parity(*byte);
        *byte = corrected;
    }

    key
}
