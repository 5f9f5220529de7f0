use zeroize::Zeroizing;

use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::key_derivation::derive_random;
use crate::nfold::n_fold;
use crate::KERBEROS;

use super::encrypt::encrypt_des3;
use super::{DES3_BLOCK_SIZE, DES3_KEY_SIZE, DES3_SEED_LEN};

const WEAK_KEYS: [[u8; 8]; 4] = [
    [0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01],
    [0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE],
    [0xE0, 0xE0, 0xE0, 0xE0, 0xF1, 0xF1, 0xF1, 0xF1],
    [0x1F, 0x1F, 0x1F, 0x1F, 0x0E, 0x0E, 0x0E, 0x0E],
];

const SEMI_WEAK_KEYS: [[u8; 8]; 12] = [
    [0x01, 0x1F, 0x01, 0x1F, 0x01, 0x0E, 0x01, 0x0E],
    [0x1F, 0x01, 0x1F, 0x01, 0x0E, 0x01, 0x0E, 0x01],
    [0x01, 0xE0, 0x01, 0xE0, 0x01, 0xF1, 0x01, 0xF1],
    [0xE0, 0x01, 0xE0, 0x01, 0xF1, 0x01, 0xF1, 0x01],
    [0x01, 0xFE, 0x01, 0xFE, 0x01, 0xFE, 0x01, 0xFE],
    [0xFE, 0x01, 0xFE, 0x01, 0xFE, 0x01, 0xFE, 0x01],
    [0x1F, 0xE0, 0x1F, 0xE0, 0x0E, 0xF1, 0x0E, 0xF1],
    [0xE0, 0x1F, 0xE0, 0x1F, 0xF1, 0x0E, 0xF1, 0x0E],
    [0x1F, 0xFE, 0x1F, 0xFE, 0x0E, 0xFE, 0x0E, 0xFE],
    [0xFE, 0x1F, 0xFE, 0x1F, 0xFE, 0x0E, 0xFE, 0x0E],
    [0xE0, 0xFE, 0xE0, 0xFE, 0xF1, 0xFE, 0xF1, 0xFE],
    [0xFE, 0xE0, 0xFE, 0xE0, 0xFE, 0xF1, 0xFE, 0xF1],
];

/// A (semi-)weak candidate is perturbed on its last octet. This is the
/// documented key correction from RFC 3961 §6.2/§6.3, not an error path.
pub(crate) fn fix_weak_key(mut key: Vec<u8>) -> Vec<u8> {
    if is_weak(&key) {
        key[7] ^= 0xF0;
    }

    key
}

/// Variant key for the legacy keyed checksums (RFC 3961 §6.2.5): every octet
/// XOR 0xF0, weak-key corrected.
pub(crate) fn variant_key(key: &[u8]) -> Vec<u8> {
    fix_weak_key(key.iter().map(|byte| byte ^ 0xF0).collect())
}

pub(crate) fn is_weak(key: &[u8]) -> bool {
    WEAK_KEYS.iter().any(|weak_key| weak_key == key) || SEMI_WEAK_KEYS.iter().any(|weak_key| weak_key == key)
}

/// Sets the DES odd-parity bit (the lowest bit) of `b` and returns the
/// previous lowest bit along with the corrected byte.
pub(crate) fn calc_even_parity(mut b: u8) -> (u8, u8) {
    let lowest_bit = b & 0x01;

    // count the 1s in the seven high bits
    let ones = (b >> 1).count_ones();

    if ones % 2 == 0 {
        b |= 1;
    } else {
        b &= !1;
    }

    (lowest_bit, b)
}

/// Spreads 7 seed bytes over 8 key bytes: the stolen low bits form the eighth
/// octet and every octet gets odd parity in its lowest bit
/// (https://www.rfc-editor.org/rfc/rfc3961.html#section-6.3.1).
pub(crate) fn stretch_56_bits(key: &[u8]) -> Vec<u8> {
    debug_assert_eq!(7, key.len());

    let mut d = key.to_vec();
    let mut lb: u8 = 0;

    for i in 0..d.len() {
        let (bit, corrected) = calc_even_parity(d[i]);
        d[i] = corrected;
        if bit != 0 {
            lb |= 1 << (i + 1);
        } else {
            lb &= !(1 << (i + 1));
        }
    }

    let (_, lb) = calc_even_parity(lb);
    d.push(lb);

    d
}

/// des3 random-to-key: each 7-byte third of the 168-bit seed becomes one
/// parity-corrected, weak-key-checked DES key.
pub fn random_to_key(key: &[u8]) -> Vec<u8> {
    debug_assert_eq!(DES3_SEED_LEN, key.len());

    let mut r = fix_weak_key(stretch_56_bits(&key[0..7]));
    r.extend_from_slice(&fix_weak_key(stretch_56_bits(&key[7..14])));
    r.extend_from_slice(&fix_weak_key(stretch_56_bits(&key[14..21])));

    r
}

/// `DK(key, constant)` over the 3DES block cipher (RFC 3961 §6.3.1).
pub fn derive_key(key: &[u8], well_known: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != DES3_KEY_SIZE {
        return Err(KerberosCryptoError::KeyLength(key.len(), DES3_KEY_SIZE));
    }

    let dr = Zeroizing::new(derive_random(well_known, DES3_BLOCK_SIZE, DES3_SEED_LEN, |block| {
        encrypt_des3(key, block)
    })?);

    Ok(random_to_key(&dr))
}

/// des3 string-to-key: no PBKDF2, the password and salt are n-folded straight
/// into the seed (RFC 3961 §6.3.1).
pub fn derive_key_from_password<P: AsRef<[u8]>, S: AsRef<[u8]>>(password: P, salt: S) -> KerberosCryptoResult<Vec<u8>> {
    let mut secret = Zeroizing::new(password.as_ref().to_vec());
    secret.extend_from_slice(salt.as_ref());

    let folded = Zeroizing::new(n_fold(&secret, DES3_SEED_LEN * 8));
    let temp_key = Zeroizing::new(random_to_key(&folded));

    derive_key(&temp_key, KERBEROS)
}
