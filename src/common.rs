use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384};

use crate::error::{KerberosCryptoError, KerberosCryptoResult};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacMd5 = Hmac<Md5>;

macro_rules! hmac_fn {
    ($name:ident, $hmac:ty) => {
        pub(crate) fn $name(key: &[u8], payload: &[u8], mac_size: usize) -> KerberosCryptoResult<Vec<u8>> {
            let mut hmacker = <$hmac>::new_from_slice(key)
                .map_err(|err| KerberosCryptoError::CipherError(format!("invalid hmac key: {:?}", err)))?;

            hmacker.update(payload);

            let mut mac = hmacker.finalize().into_bytes().to_vec();

            if mac.len() < mac_size {
                // this would mean the hash was misconfigured for the suite
                return Err(KerberosCryptoError::CipherError(format!(
                    "hmac output is too short: {}. Expected at least: {}",
                    mac.len(),
                    mac_size
                )));
            }

            mac.truncate(mac_size);

            Ok(mac)
        }
    };
}

hmac_fn!(hmac_sha1, HmacSha1);
hmac_fn!(hmac_sha256, HmacSha256);
hmac_fn!(hmac_sha384, HmacSha384);

/// The RC4-HMAC suite always carries the full 16-byte MD5 tag.
pub(crate) fn hmac_md5(key: &[u8], payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    let mut hmacker = HmacMd5::new_from_slice(key)
        .map_err(|err| KerberosCryptoError::CipherError(format!("invalid hmac key: {:?}", err)))?;

    hmacker.update(payload);

    Ok(hmacker.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_mac_size() {
        let mac = hmac_sha1(&[0xb; 20], b"Hi There", 12).unwrap();
        assert_eq!(12, mac.len());

        let full = hmac_sha1(&[0xb; 20], b"Hi There", 20).unwrap();
        assert_eq!(&full[0..12], mac.as_slice());
    }

    // https://www.rfc-editor.org/rfc/rfc2202.html test case 1
    #[test]
    fn hmac_sha1_known_answer() {
        let mac = hmac_sha1(&[0xb; 20], b"Hi There", 20).unwrap();
        assert_eq!(hex::decode("b617318655057264e28bc0b6fb378c8ef146be00").unwrap(), mac);
    }

    // https://www.rfc-editor.org/rfc/rfc4231.html test case 2
    #[test]
    fn hmac_sha256_known_answer() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?", 32).unwrap();
        assert_eq!(
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843").unwrap(),
            mac
        );
    }
}
