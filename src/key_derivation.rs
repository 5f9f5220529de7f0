//! https://www.rfc-editor.org/rfc/rfc3961.html#section-5.1
//!
//! Generic DR ("derive random") engine shared by the DK-based suites. The
//! suite supplies its block cipher as a closure; this module only knows the
//! folding/chaining skeleton:
//!
//! `DR(key, constant) = k-truncate(E(key, n-fold(constant)) | E(key, prev) | ...)`
//!
//! `DK(key, constant) = random-to-key(DR(key, constant))`, with the suite's
//! own `random-to-key` applied by the caller.

use crate::error::KerberosCryptoResult;
use crate::nfold::n_fold;

/// Produces `seed_len` pseudo-random bytes from the key folded with
/// `constant`. `encrypt_block` must be the suite's raw block cipher with a
/// zero IV; any failure it reports is propagated, never papered over with
/// short output.
pub(crate) fn derive_random<E>(
    constant: &[u8],
    block_size: usize,
    seed_len: usize,
    mut encrypt_block: E,
) -> KerberosCryptoResult<Vec<u8>>
where
    E: FnMut(&[u8]) -> KerberosCryptoResult<Vec<u8>>,
{
    let mut state = if constant.len() == block_size {
        constant.to_vec()
    } else {
        n_fold(constant, block_size * 8)
    };

    let mut out = Vec::with_capacity(seed_len + block_size);

    while out.len() < seed_len {
        state = encrypt_block(&state)?;
        out.extend_from_slice(&state);
    }

    out.truncate(seed_len);

    Ok(out)
}
