use md4::{Digest, Md4};
use rand::rngs::OsRng;
use rand::Rng;
use rc4::consts::U16;
use rc4::{KeyInit, Rc4, StreamCipher};
use zeroize::Zeroizing;

use crate::checksum::ChecksumSuite;
use crate::cipher::{Cipher, CipherSuite};
use crate::common::hmac_md5;
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::utils::checksum_compare;

use super::{derive_k1, RC4_CONFOUNDER_SIZE, RC4_KEY_SIZE, RC4_MAC_SIZE};

/// rc4-hmac (etype 23).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rc4Hmac;

impl Rc4Hmac {
    pub fn new() -> Self {
        Self
    }
}

fn rc4_apply(key: &[u8], data: &mut [u8]) -> KerberosCryptoResult<()> {
    let mut cipher = Rc4::<U16>::new_from_slice(key)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), RC4_KEY_SIZE))?;

    cipher.apply_keystream(data);

    Ok(())
}

impl Cipher for Rc4Hmac {
    fn key_size(&self) -> usize {
        RC4_KEY_SIZE
    }

    fn seed_bit_len(&self) -> usize {
        RC4_KEY_SIZE * 8
    }

    fn confounder_byte_size(&self) -> usize {
        RC4_CONFOUNDER_SIZE
    }

    fn checksum_byte_size(&self) -> usize {
        RC4_MAC_SIZE
    }

    fn block_byte_size(&self) -> usize {
        // stream cipher; the "block" is a single octet
        1
    }

    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Rc4Hmac
    }

    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacMd5
    }

    /// https://www.rfc-editor.org/rfc/rfc4757.html#section-5
    ///
    /// `checksum = HMAC-MD5(K1, confounder | plaintext)`,
    /// `K3 = HMAC-MD5(K1, checksum)`, output
    /// `checksum | RC4(K3, confounder | plaintext)`.
    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        let k1 = Zeroizing::new(derive_k1(key, key_usage)?);

        let confounder = OsRng::default().gen::<[u8; RC4_CONFOUNDER_SIZE]>();

        let mut data = Zeroizing::new(Vec::with_capacity(RC4_CONFOUNDER_SIZE + payload.len()));
        data.extend_from_slice(&confounder);
        data.extend_from_slice(payload);

        let checksum = hmac_md5(&k1, &data)?;
        let k3 = Zeroizing::new(hmac_md5(&k1, &checksum)?);

        let mut cipher_data = Vec::with_capacity(RC4_MAC_SIZE + data.len());
        cipher_data.extend_from_slice(&checksum);
        cipher_data.extend_from_slice(&data);

        rc4_apply(&k3, &mut cipher_data[RC4_MAC_SIZE..])?;

        Ok(cipher_data)
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        let k1 = Zeroizing::new(derive_k1(key, key_usage)?);

        if cipher_data.len() < RC4_MAC_SIZE + RC4_CONFOUNDER_SIZE {
            return Err(KerberosCryptoError::CipherLength(
                cipher_data.len(),
                RC4_MAC_SIZE + RC4_CONFOUNDER_SIZE,
            ));
        }

        let (checksum, encrypted) = cipher_data.split_at(RC4_MAC_SIZE);

        let k3 = Zeroizing::new(hmac_md5(&k1, checksum)?);

        let mut data = Zeroizing::new(encrypted.to_vec());
        rc4_apply(&k3, &mut data)?;

        let calculated_checksum = hmac_md5(&k1, &data)?;

        if !checksum_compare(&calculated_checksum, checksum) {
            return Err(KerberosCryptoError::IntegrityCheck);
        }

        // the first eight octets are the random confounder
        Ok(data[RC4_CONFOUNDER_SIZE..].to_vec())
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        super::checksum_hmac_md5(key, key_usage, payload)
    }

    /// https://www.rfc-editor.org/rfc/rfc4757.html#section-3
    /// `K = MD4(UNICODE(password))`; the salt is unused.
    fn generate_key_from_password_with_params(
        &self,
        password: &[u8],
        _salt: &[u8],
        params: Option<&[u8]>,
    ) -> KerberosCryptoResult<Vec<u8>> {
        if params.map_or(false, |params| !params.is_empty()) {
            return Err(KerberosCryptoError::CipherError(
                "rc4-hmac string-to-key expects empty parameters".to_owned(),
            ));
        }

        let password = std::str::from_utf8(password)
            .map_err(|err| KerberosCryptoError::CipherError(format!("password is not valid utf-8: {}", err)))?;

        let utf16_password: Zeroizing<Vec<u8>> = Zeroizing::new(
            password
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
        );

        Ok(Md4::digest(utf16_password.as_slice()).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // the well-known NT hash of "password"
    #[test]
    fn string_to_key_is_the_nt_hash() {
        let key = Rc4Hmac::new()
            .generate_key_from_password(b"password", b"ignored salt")
            .unwrap();

        assert_eq!(hex::decode("8846f7eaee8fb117ad06bdd830b7586c").unwrap(), key);
    }

    #[test]
    fn roundtrip_is_exact() {
        let cipher = Rc4Hmac::new();
        let key = cipher.generate_key_from_password(b"password", b"").unwrap();

        for len in [0usize, 1, 7, 8, 9, 1024] {
            let plaintext = vec![0x5a; len];
            let cipher_data = cipher.encrypt(&key, 5, &plaintext).unwrap();

            assert_eq!(RC4_MAC_SIZE + RC4_CONFOUNDER_SIZE + len, cipher_data.len());
            assert_eq!(plaintext, cipher.decrypt(&key, 5, &cipher_data).unwrap());
        }
    }

    #[test]
    fn tampered_data_is_rejected() {
        let cipher = Rc4Hmac::new();
        let key = cipher.generate_key_from_password(b"password", b"").unwrap();

        let mut cipher_data = cipher.encrypt(&key, 5, b"payload").unwrap();
        let index = cipher_data.len() - 1;
        cipher_data[index] ^= 0x80;

        assert_eq!(
            Err(KerberosCryptoError::IntegrityCheck),
            cipher.decrypt(&key, 5, &cipher_data)
        );
    }

    #[test]
    fn usage_three_maps_to_eight() {
        let cipher = Rc4Hmac::new();
        let key = cipher.generate_key_from_password(b"password", b"").unwrap();

        // KILE quirk: usages 3 and 8 derive the same keys, so a message
        // sealed under usage 3 opens under usage 8
        let cipher_data = cipher.encrypt(&key, 3, b"payload").unwrap();
        assert_eq!(b"payload".to_vec(), cipher.decrypt(&key, 8, &cipher_data).unwrap());
    }
}
