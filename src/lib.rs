//! Kerberos 5 symmetric cryptography: encryption types, checksum types and
//! key derivation as specified by RFC 3961/3962 (DES, DES3, AES-SHA1),
//! RFC 8009 (AES-SHA2) and RFC 4757 (RC4-HMAC).
//!
//! The protocol layer hands this crate an encryption type identifier, a base
//! key, a key usage number and an opaque byte buffer, and gets an opaque byte
//! buffer (or a definite failure) back:
//!
//! ```
//! use krb5_crypto::{Cipher, CipherSuite};
//!
//! # fn main() -> Result<(), krb5_crypto::KerberosCryptoError> {
//! let cipher = CipherSuite::try_from(18)?.cipher(); // aes256-cts-hmac-sha1-96
//!
//! let key = cipher.generate_key_from_password(b"qwerty", b"EXAMPLE.COMuser")?;
//! let cipher_data = cipher.encrypt(&key, 2, b"ticket data")?;
//! assert_eq!(b"ticket data".to_vec(), cipher.decrypt(&key, 2, &cipher_data)?);
//! # Ok(())
//! # }
//! ```
//!
//! Every operation is stateless and safe to call from multiple threads.
//! Ciphertexts are intentionally non-deterministic: a fresh random confounder
//! is drawn on every encryption. Derived subkeys are zeroized on all paths.

pub mod aes;
pub mod checksum;
pub mod cipher;
pub mod constants;
pub mod des;
pub mod rc4;

mod common;
mod crc32;
mod error;
mod key_derivation;
mod nfold;
mod utils;

pub use checksum::{Checksum, ChecksumSuite};
pub use cipher::{default_cipher_suites, Cipher, CipherSuite};
pub use error::{KerberosCryptoError, KerberosCryptoResult};
pub use nfold::n_fold;
pub use utils::{checksum_compare, usage_kc, usage_ke, usage_ki, validate_key_usage};

/// https://www.rfc-editor.org/rfc/rfc3962.html#section-4
/// the 8-octet ASCII string "kerberos"
pub const KERBEROS: &[u8; 8] = b"kerberos";
