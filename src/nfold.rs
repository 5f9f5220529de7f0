//! https://www.rfc-editor.org/rfc/rfc3961.html#section-5.1
//!
//! n-fold stretches or compresses an input bit string into `n` bits by
//! concatenating 13-bit-rotated copies of the input and summing them with
//! one's-complement (end-around carry) addition.

/// Folds `data` into a string of `nbits` bits.
///
/// `nbits` must be a non-zero multiple of 8; violating this is a programming
/// error in the caller, not a runtime condition.
pub fn n_fold(data: &[u8], nbits: usize) -> Vec<u8> {
    assert!(nbits != 0 && nbits % 8 == 0, "n-fold output size must be a non-zero multiple of 8 bits");

    let in_len = data.len();
    let out_len = nbits / 8;
    let lcm = in_len * out_len / gcd(in_len, out_len);

    let mut out = vec![0u8; out_len];
    let mut byte: u32 = 0;

    for i in (0..lcm).rev() {
        // msbit of the i-th 13-bit-rotated copy of the input, counting from
        // the least significant bit of the last byte
        let mut msbit = (in_len << 3) - 1;
        msbit += ((in_len << 3) + 13) * (i / in_len);
        msbit += (in_len - (i % in_len)) << 3;
        msbit %= in_len << 3;

        byte += ((u32::from(data[((in_len - 1) - (msbit >> 3)) % in_len]) << 8
            | u32::from(data[(in_len - (msbit >> 3)) % in_len]))
            >> ((msbit & 7) + 1))
            & 0xff;

        byte += u32::from(out[i % out_len]);
        out[i % out_len] = (byte & 0xff) as u8;

        byte >>= 8;
    }

    // end-around carry
    if byte != 0 {
        for i in (0..out_len).rev() {
            byte += u32::from(out[i]);
            out[i] = (byte & 0xff) as u8;
            byte >>= 8;
        }
    }

    out
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }

    a
}
