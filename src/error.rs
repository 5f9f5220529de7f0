use thiserror::Error;

pub type KerberosCryptoResult<T> = Result<T, KerberosCryptoError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KerberosCryptoError {
    /// Encryption type identifier outside the closed registry.
    #[error("unsupported encryption type: {0}")]
    AlgorithmIdentifier(usize),

    /// Checksum type identifier outside the closed registry.
    #[error("unsupported checksum type: {0}")]
    ChecksumIdentifier(i32),

    /// Negative key usage numbers indicate a caller bug.
    #[error("invalid key usage: {0}")]
    KeyUsage(i32),

    #[error("invalid key length: {0}. Expected: {1}")]
    KeyLength(usize, usize),

    #[error("invalid cipher data length: {0}. Expected at least: {1}")]
    CipherLength(usize, usize),

    /// Checksum/HMAC verification mismatch on decrypt. The message must be
    /// treated as tampered and no partially decrypted output is returned.
    #[error("integrity check failed")]
    IntegrityCheck,

    #[error("cipher error: {0}")]
    CipherError(String),

    #[error("cipher padding error: {0}")]
    CipherPad(String),
}
