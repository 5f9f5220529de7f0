use crate::aes::{Aes128CtsHmacSha196, Aes128CtsHmacSha256128, Aes256CtsHmacSha196, Aes256CtsHmacSha384192};
use crate::checksum::ChecksumSuite;
use crate::constants::etypes;
use crate::des::{Des3CbcSha1Kd, DesCbcCrc, DesCbcMd5};
use crate::error::{KerberosCryptoError, KerberosCryptoResult};
use crate::rc4::Rc4Hmac;

/// One encryption-type profile. Implementations are stateless: every method
/// is a pure function over its arguments (aside from confounder randomness),
/// safe to call concurrently.
pub trait Cipher {
    /// Base key length in bytes.
    fn key_size(&self) -> usize;

    /// Length in bits of the `random-to-key` input.
    fn seed_bit_len(&self) -> usize;

    fn confounder_byte_size(&self) -> usize;

    /// Size of the checksum/MAC carried by this encryption type's framing.
    fn checksum_byte_size(&self) -> usize;

    fn block_byte_size(&self) -> usize;

    fn cipher_type(&self) -> CipherSuite;

    /// The checksum type mandated for this encryption type.
    fn checksum_type(&self) -> ChecksumSuite;

    /// Suite-specific `random-to-key`. Identity unless the suite says
    /// otherwise (DES parity expansion).
    fn random_to_key(&self, seed: Vec<u8>) -> Vec<u8> {
        seed
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>>;

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>>;

    /// The suite's mandatory keyed checksum over `payload`.
    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>>;

    fn generate_key_from_password(&self, password: &[u8], salt: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        self.generate_key_from_password_with_params(password, salt, None)
    }

    /// `string-to-key` with an opaque parameter block (a 4-byte big-endian
    /// PBKDF2 iteration count for the AES suites; must be empty elsewhere).
    fn generate_key_from_password_with_params(
        &self,
        password: &[u8],
        salt: &[u8],
        params: Option<&[u8]>,
    ) -> KerberosCryptoResult<Vec<u8>>;
}

/// Closed registry of the supported encryption types. Unknown identifiers
/// fail closed in [`CipherSuite::try_from`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    Null,
    DesCbcCrc,
    DesCbcMd5,
    Des3CbcSha1Kd,
    Aes128CtsHmacSha196,
    Aes256CtsHmacSha196,
    Aes128CtsHmacSha256128,
    Aes256CtsHmacSha384192,
    Rc4Hmac,
}

impl CipherSuite {
    pub fn cipher(&self) -> Box<dyn Cipher> {
        match self {
            CipherSuite::Null => Box::new(NullCipher::new()),
            CipherSuite::DesCbcCrc => Box::new(DesCbcCrc::new()),
            CipherSuite::DesCbcMd5 => Box::new(DesCbcMd5::new()),
            CipherSuite::Des3CbcSha1Kd => Box::new(Des3CbcSha1Kd::new()),
            CipherSuite::Aes128CtsHmacSha196 => Box::new(Aes128CtsHmacSha196::new()),
            CipherSuite::Aes256CtsHmacSha196 => Box::new(Aes256CtsHmacSha196::new()),
            CipherSuite::Aes128CtsHmacSha256128 => Box::new(Aes128CtsHmacSha256128::new()),
            CipherSuite::Aes256CtsHmacSha384192 => Box::new(Aes256CtsHmacSha384192::new()),
            CipherSuite::Rc4Hmac => Box::new(Rc4Hmac::new()),
        }
    }

    /// True for the suites excluded from the defaults unless weak crypto is
    /// explicitly enabled.
    pub fn is_weak(&self) -> bool {
        matches!(
            self,
            CipherSuite::Null
                | CipherSuite::DesCbcCrc
                | CipherSuite::DesCbcMd5
                | CipherSuite::Des3CbcSha1Kd
                | CipherSuite::Rc4Hmac
        )
    }
}

impl TryFrom<usize> for CipherSuite {
    type Error = KerberosCryptoError;

    fn try_from(identifier: usize) -> Result<Self, Self::Error> {
        match identifier {
            etypes::NULL => Ok(CipherSuite::Null),
            etypes::DES_CBC_CRC => Ok(CipherSuite::DesCbcCrc),
            etypes::DES_CBC_MD5 => Ok(CipherSuite::DesCbcMd5),
            etypes::DES3_CBC_SHA1_KD => Ok(CipherSuite::Des3CbcSha1Kd),
            etypes::AES128_CTS_HMAC_SHA1_96 => Ok(CipherSuite::Aes128CtsHmacSha196),
            etypes::AES256_CTS_HMAC_SHA1_96 => Ok(CipherSuite::Aes256CtsHmacSha196),
            etypes::AES128_CTS_HMAC_SHA256_128 => Ok(CipherSuite::Aes128CtsHmacSha256128),
            etypes::AES256_CTS_HMAC_SHA384_192 => Ok(CipherSuite::Aes256CtsHmacSha384192),
            etypes::RC4_HMAC => Ok(CipherSuite::Rc4Hmac),
            unknown => Err(KerberosCryptoError::AlgorithmIdentifier(unknown)),
        }
    }
}

impl From<CipherSuite> for usize {
    fn from(suite: CipherSuite) -> usize {
        match suite {
            CipherSuite::Null => etypes::NULL,
            CipherSuite::DesCbcCrc => etypes::DES_CBC_CRC,
            CipherSuite::DesCbcMd5 => etypes::DES_CBC_MD5,
            CipherSuite::Des3CbcSha1Kd => etypes::DES3_CBC_SHA1_KD,
            CipherSuite::Aes128CtsHmacSha196 => etypes::AES128_CTS_HMAC_SHA1_96,
            CipherSuite::Aes256CtsHmacSha196 => etypes::AES256_CTS_HMAC_SHA1_96,
            CipherSuite::Aes128CtsHmacSha256128 => etypes::AES128_CTS_HMAC_SHA256_128,
            CipherSuite::Aes256CtsHmacSha384192 => etypes::AES256_CTS_HMAC_SHA384_192,
            CipherSuite::Rc4Hmac => etypes::RC4_HMAC,
        }
    }
}

/// The null encryption type (etype 0): no confounder, no checksum, data
/// passes through untouched. Kept for registry completeness; it offers no
/// protection and is never part of the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullCipher;

impl NullCipher {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for NullCipher {
    fn key_size(&self) -> usize {
        0
    }

    fn seed_bit_len(&self) -> usize {
        0
    }

    fn confounder_byte_size(&self) -> usize {
        0
    }

    fn checksum_byte_size(&self) -> usize {
        0
    }

    fn block_byte_size(&self) -> usize {
        1
    }

    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Null
    }

    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::Null
    }

    fn encrypt(&self, _key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        crate::utils::validate_key_usage(key_usage)?;

        Ok(payload.to_vec())
    }

    fn decrypt(&self, _key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        crate::utils::validate_key_usage(key_usage)?;

        Ok(cipher_data.to_vec())
    }

    fn checksum(&self, _key: &[u8], key_usage: i32, _payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        crate::utils::validate_key_usage(key_usage)?;

        Ok(Vec::new())
    }

    fn generate_key_from_password_with_params(
        &self,
        _password: &[u8],
        _salt: &[u8],
        _params: Option<&[u8]>,
    ) -> KerberosCryptoResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Supported encryption types in descending preference order. Callers use the
/// order as a negotiation priority signal. The legacy suites (RC4, DES3,
/// single DES) are appended only when `allow_weak_crypto` is set; the flag is
/// an explicit parameter rather than process-global state.
pub fn default_cipher_suites(allow_weak_crypto: bool) -> Vec<CipherSuite> {
    let mut suites = vec![
        CipherSuite::Aes256CtsHmacSha384192,
        CipherSuite::Aes128CtsHmacSha256128,
        CipherSuite::Aes256CtsHmacSha196,
        CipherSuite::Aes128CtsHmacSha196,
    ];

    if allow_weak_crypto {
        suites.extend([
            CipherSuite::Des3CbcSha1Kd,
            CipherSuite::Rc4Hmac,
            CipherSuite::DesCbcMd5,
            CipherSuite::DesCbcCrc,
        ]);
    }

    suites
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn unknown_identifier_fails_closed() {
        assert_eq!(
            Err(KerberosCryptoError::AlgorithmIdentifier(99)),
            CipherSuite::try_from(99)
        );
        assert_eq!(Err(KerberosCryptoError::AlgorithmIdentifier(2)), CipherSuite::try_from(2));
    }

    #[test]
    fn null_cipher_passes_data_through() {
        let cipher = CipherSuite::Null.cipher();

        let cipher_data = cipher.encrypt(&[], 5, b"payload").unwrap();
        assert_eq!(b"payload".to_vec(), cipher_data);
        assert_eq!(b"payload".to_vec(), cipher.decrypt(&[], 5, &cipher_data).unwrap());
        assert!(cipher.checksum(&[], 5, b"payload").unwrap().is_empty());
    }

    #[test]
    fn identifier_roundtrip() {
        for identifier in [0usize, 1, 3, 16, 17, 18, 19, 20, 23] {
            let suite = CipherSuite::try_from(identifier).unwrap();
            assert_eq!(identifier, usize::from(suite));
        }
    }

    #[test]
    fn defaults_exclude_weak_suites() {
        let suites = default_cipher_suites(false);

        assert_eq!(
            vec![
                CipherSuite::Aes256CtsHmacSha384192,
                CipherSuite::Aes128CtsHmacSha256128,
                CipherSuite::Aes256CtsHmacSha196,
                CipherSuite::Aes128CtsHmacSha196,
            ],
            suites
        );
        assert!(suites.iter().all(|suite| !suite.is_weak()));
    }

    #[test]
    fn defaults_with_weak_crypto_keep_preference_order() {
        let suites = default_cipher_suites(true);

        assert_eq!(CipherSuite::Aes256CtsHmacSha384192, suites[0]);
        assert!(suites.contains(&CipherSuite::Rc4Hmac));
        assert!(suites.contains(&CipherSuite::DesCbcCrc));
        assert!(suites.contains(&CipherSuite::DesCbcMd5));
        assert!(suites.contains(&CipherSuite::Des3CbcSha1Kd));
    }

    fn test_key(cipher: &dyn Cipher) -> Vec<u8> {
        cipher
            .generate_key_from_password(b"committedpassword", b"EXAMPLE.COMapplication")
            .unwrap()
    }

    #[rstest]
    #[case(CipherSuite::DesCbcCrc)]
    #[case(CipherSuite::DesCbcMd5)]
    #[case(CipherSuite::Des3CbcSha1Kd)]
    #[case(CipherSuite::Aes128CtsHmacSha196)]
    #[case(CipherSuite::Aes256CtsHmacSha196)]
    #[case(CipherSuite::Aes128CtsHmacSha256128)]
    #[case(CipherSuite::Aes256CtsHmacSha384192)]
    #[case(CipherSuite::Rc4Hmac)]
    fn roundtrip_various_lengths(#[case] suite: CipherSuite) {
        let cipher = suite.cipher();
        let key = test_key(cipher.as_ref());
        assert_eq!(cipher.key_size(), key.len());

        let block = cipher.block_byte_size();
        for len in [0usize, 1, block.saturating_sub(1), block, block + 1, 4096] {
            let plaintext = (0..len).map(|i| i as u8).collect::<Vec<_>>();
            let cipher_data = cipher.encrypt(&key, 5, &plaintext).unwrap();
            let decrypted = cipher.decrypt(&key, 5, &cipher_data).unwrap();

            // CBC suites keep their pad tail; CTS/stream suites round-trip
            // exactly
            assert_eq!(plaintext.as_slice(), &decrypted[0..plaintext.len()]);
            assert!(decrypted.len() - plaintext.len() <= 8);
        }
    }

    #[rstest]
    #[case(CipherSuite::DesCbcCrc)]
    #[case(CipherSuite::DesCbcMd5)]
    #[case(CipherSuite::Des3CbcSha1Kd)]
    #[case(CipherSuite::Aes128CtsHmacSha196)]
    #[case(CipherSuite::Aes256CtsHmacSha196)]
    #[case(CipherSuite::Aes128CtsHmacSha256128)]
    #[case(CipherSuite::Aes256CtsHmacSha384192)]
    #[case(CipherSuite::Rc4Hmac)]
    fn encryption_is_randomized(#[case] suite: CipherSuite) {
        let cipher = suite.cipher();
        let key = test_key(cipher.as_ref());

        let first = cipher.encrypt(&key, 5, b"identical plaintext").unwrap();
        let second = cipher.encrypt(&key, 5, b"identical plaintext").unwrap();

        assert_ne!(first, second);
        assert_eq!(
            cipher.decrypt(&key, 5, &first).unwrap(),
            cipher.decrypt(&key, 5, &second).unwrap()
        );
    }

    #[rstest]
    #[case(CipherSuite::DesCbcCrc)]
    #[case(CipherSuite::DesCbcMd5)]
    #[case(CipherSuite::Des3CbcSha1Kd)]
    #[case(CipherSuite::Aes128CtsHmacSha196)]
    #[case(CipherSuite::Aes256CtsHmacSha196)]
    #[case(CipherSuite::Aes128CtsHmacSha256128)]
    #[case(CipherSuite::Aes256CtsHmacSha384192)]
    #[case(CipherSuite::Rc4Hmac)]
    fn single_bit_flips_are_detected(#[case] suite: CipherSuite) {
        let cipher = suite.cipher();
        let key = test_key(cipher.as_ref());

        let cipher_data = cipher.encrypt(&key, 5, b"tamper detection payload").unwrap();

        for index in 0..cipher_data.len() {
            for bit in [0x01u8, 0x80] {
                let mut tampered = cipher_data.clone();
                tampered[index] ^= bit;

                assert_eq!(
                    Err(KerberosCryptoError::IntegrityCheck),
                    cipher.decrypt(&key, 5, &tampered),
                    "bit flip at byte {index} went undetected"
                );
            }
        }
    }

    #[rstest]
    #[case(CipherSuite::Des3CbcSha1Kd)]
    #[case(CipherSuite::Aes128CtsHmacSha196)]
    #[case(CipherSuite::Aes256CtsHmacSha196)]
    #[case(CipherSuite::Aes128CtsHmacSha256128)]
    #[case(CipherSuite::Aes256CtsHmacSha384192)]
    #[case(CipherSuite::Rc4Hmac)]
    fn checksum_is_deterministic(#[case] suite: CipherSuite) {
        let cipher = suite.cipher();
        let key = test_key(cipher.as_ref());

        assert_eq!(
            cipher.checksum(&key, 6, b"checksum payload").unwrap(),
            cipher.checksum(&key, 6, b"checksum payload").unwrap()
        );
    }

    #[rstest]
    #[case(CipherSuite::Aes128CtsHmacSha196)]
    #[case(CipherSuite::Rc4Hmac)]
    fn negative_key_usage_is_rejected(#[case] suite: CipherSuite) {
        let cipher = suite.cipher();
        let key = test_key(cipher.as_ref());

        assert_eq!(
            Err(KerberosCryptoError::KeyUsage(-3)),
            cipher.encrypt(&key, -3, b"payload")
        );
        assert_eq!(
            Err(KerberosCryptoError::KeyUsage(-3)),
            cipher.decrypt(&key, -3, &[0; 64])
        );
        assert_eq!(
            Err(KerberosCryptoError::KeyUsage(-3)),
            cipher.checksum(&key, -3, b"payload")
        );
    }
}
