use byteorder::{BigEndian, ByteOrder};

use crate::error::{KerberosCryptoError, KerberosCryptoResult};

/// https://www.rfc-editor.org/rfc/rfc3961.html#section-5.2
/// Derivation constant for the encryption key Ke: usage | 0xAA.
pub fn usage_ke(key_usage: i32) -> [u8; 5] {
    usage_constant(key_usage, 0xaa)
}

/// Derivation constant for the integrity key Ki: usage | 0x55.
pub fn usage_ki(key_usage: i32) -> [u8; 5] {
    usage_constant(key_usage, 0x55)
}

/// Derivation constant for the checksum key Kc: usage | 0x99.
pub fn usage_kc(key_usage: i32) -> [u8; 5] {
    usage_constant(key_usage, 0x99)
}

fn usage_constant(key_usage: i32, usage_type: u8) -> [u8; 5] {
    let mut well_known = [0u8; 5];
    BigEndian::write_i32(&mut well_known, key_usage);
    well_known[4] = usage_type;
    well_known
}

/// Key usage numbers are non-negative. A negative value is a caller bug and is
/// rejected before any key derivation takes place.
pub fn validate_key_usage(key_usage: i32) -> KerberosCryptoResult<()> {
    if key_usage < 0 {
        return Err(KerberosCryptoError::KeyUsage(key_usage));
    }

    Ok(())
}

/// Length-then-bytes comparison. A mismatch is an ordinary `false`, never an
/// error.
pub fn checksum_compare(expected: &[u8], actual: &[u8]) -> bool {
    expected.len() == actual.len() && expected == actual
}

/// Iteration count override for `string-to-key` parameter blocks: a 4-byte
/// big-endian count, or the suite default when absent.
pub fn pbkdf2_iterations(params: Option<&[u8]>, default: u32) -> KerberosCryptoResult<u32> {
    match params {
        None => Ok(default),
        Some(params) if params.is_empty() => Ok(default),
        Some(params) => {
            if params.len() != 4 {
                return Err(KerberosCryptoError::CipherError(format!(
                    "invalid string-to-key parameter length: {}. Expected: 4",
                    params.len()
                )));
            }

            Ok(BigEndian::read_u32(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_constants() {
        assert_eq!([0, 0, 0, 3, 0xaa], usage_ke(3));
        assert_eq!([0, 0, 0, 3, 0x55], usage_ki(3));
        assert_eq!([0, 0, 0, 3, 0x99], usage_kc(3));
        assert_eq!([0, 0, 4, 0, 0xaa], usage_ke(1024));
    }

    #[test]
    fn negative_key_usage_is_rejected() {
        assert_eq!(Err(KerberosCryptoError::KeyUsage(-1)), validate_key_usage(-1));
        assert_eq!(Ok(()), validate_key_usage(0));
        assert_eq!(Ok(()), validate_key_usage(25));
    }

    #[test]
    fn iteration_count_parameter() {
        assert_eq!(4096, pbkdf2_iterations(None, 4096).unwrap());
        assert_eq!(4096, pbkdf2_iterations(Some(&[]), 4096).unwrap());
        assert_eq!(1200, pbkdf2_iterations(Some(&[0, 0, 0x04, 0xb0]), 4096).unwrap());
        assert!(pbkdf2_iterations(Some(&[0, 1]), 4096).is_err());
    }

    #[test]
    fn compare_checksums() {
        assert!(checksum_compare(&[1, 2, 3], &[1, 2, 3]));
        assert!(!checksum_compare(&[1, 2, 3], &[1, 2]));
        assert!(!checksum_compare(&[1, 2, 3], &[1, 2, 4]));
        assert!(checksum_compare(&[], &[]));
    }
}
