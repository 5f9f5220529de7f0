use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::key_derivation::derive_random;
use crate::utils::pbkdf2_iterations;
use crate::KERBEROS;

use super::encrypt::encrypt_aes;
use super::{AesSize, AES_BLOCK_SIZE};

/// https://www.rfc-editor.org/rfc/rfc3962.html#section-4
/// Default iteration count (rounds) for the pbkdf2 function:
/// 00 00 10 00 (decimal 4,096, indicating 4,096 iterations)
pub const AES_ITERATION_COUNT: u32 = 0x1000;

// random-to-key is the identity for AES
fn random_to_key(data: Vec<u8>) -> Vec<u8> {
    data
}

/// `DK(key, constant)` over the AES block cipher (RFC 3962 §4).
pub fn derive_key(key: &[u8], well_known: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let dr = derive_random(well_known, AES_BLOCK_SIZE, aes_size.key_length(), |block| {
        encrypt_aes(key, block, aes_size)
    })?;

    Ok(random_to_key(dr))
}

pub fn derive_key_from_password<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    password: P,
    salt: S,
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    derive_key_from_password_with_params(password, salt, None, aes_size)
}

pub fn derive_key_from_password_with_params<P: AsRef<[u8]>, S: AsRef<[u8]>>(
    password: P,
    salt: S,
    params: Option<&[u8]>,
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    let iterations = pbkdf2_iterations(params, AES_ITERATION_COUNT)?;

    let mut tmp = Zeroizing::new(vec![0; aes_size.key_length()]);
    pbkdf2_hmac::<Sha1>(password.as_ref(), salt.as_ref(), iterations, &mut tmp);

    derive_key(&tmp, KERBEROS, aes_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://www.rfc-editor.org/rfc/rfc3962.html#appendix-B

    #[test]
    fn string_to_key_one_iteration() {
        let iterations = 1u32.to_be_bytes();

        let key =
            derive_key_from_password_with_params("password", "ATHENA.MIT.EDUraeburn", Some(&iterations), &AesSize::Aes128)
                .unwrap();
        assert_eq!(hex::decode("42263c6e89f4fc28b8df68ee09799f15").unwrap(), key);

        let key =
            derive_key_from_password_with_params("password", "ATHENA.MIT.EDUraeburn", Some(&iterations), &AesSize::Aes256)
                .unwrap();
        assert_eq!(
            hex::decode("fe697b52bc0d3ce14432ba036a92e65bbb52280990a2fa27883998d72af30161").unwrap(),
            key
        );
    }

    #[test]
    fn string_to_key_1200_iterations() {
        let iterations = 1200u32.to_be_bytes();

        let key =
            derive_key_from_password_with_params("password", "ATHENA.MIT.EDUraeburn", Some(&iterations), &AesSize::Aes128)
                .unwrap();
        assert_eq!(hex::decode("4c01cd46d632d01e6dbe230a01ed642a").unwrap(), key);

        let key =
            derive_key_from_password_with_params("password", "ATHENA.MIT.EDUraeburn", Some(&iterations), &AesSize::Aes256)
                .unwrap();
        assert_eq!(
            hex::decode("55a6ac740ad17b4846941051e1e8b0a7548d93b0ab30a8bc3ff16280382b8c2a").unwrap(),
            key
        );
    }

    #[test]
    fn string_to_key_default_iterations() {
        let key = derive_key_from_password("5hYYSAfFJp", "EXAMPLE.COMtest1", &AesSize::Aes256).unwrap();

        assert_eq!(
            &[
                218_u8, 222, 209, 204, 21, 174, 23, 222, 170, 99, 164, 144, 247, 103, 137, 68, 117, 143, 59, 37, 90,
                84, 37, 105, 203, 32, 235, 167, 97, 238, 171, 172
            ] as &[u8],
            key.as_slice()
        );
    }

    // base key / Kc pair captured from a live KDC exchange
    #[test]
    fn derive_checksum_key() {
        let base_key = hex::decode("3c4eefa91060dc4000582c17885aa63a58cd5a57c5cd3e7601a0587e7e05f9d0").unwrap();

        let kc = derive_key(&base_key, &crate::utils::usage_kc(6), &AesSize::Aes256).unwrap();

        assert_eq!(
            hex::decode("14ad9322e8134937815fb995067f8c1859a8237c599e450f2bc1e99330c94232").unwrap(),
            kc
        );
    }

    #[test]
    fn wrong_key_length_is_rejected() {
        assert_eq!(
            Err(KerberosCryptoError::KeyLength(16, 32)),
            derive_key(&[0; 16], KERBEROS, &AesSize::Aes256)
        );
    }
}
