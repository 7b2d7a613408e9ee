/// Buffer length that fits any `i64` in decimal: a sign, 19 digits and a terminator.
pub const INTEGER_BUF_LEN: usize = 21;

/// Writes `val` in decimal into the tail of `buf` and returns the offset where the text begins.
///
/// The text is right-aligned: it occupies `buf[offset..buf.len() - 1]` and the last byte of
/// `buf` is set to a `0` terminator. Nothing is copied forward and nothing is allocated.
///
/// `buf` must be at least [`INTEGER_BUF_LEN`] bytes long.
pub fn integer_to_str(buf: &mut [u8], val: i64) -> usize {
    debug_assert!(buf.len() >= INTEGER_BUF_LEN, "integer buffer too small");

    let negative = val < 0;
    // unsigned_abs keeps i64::MIN representable
    let mut magnitude = val.unsigned_abs();
    let mut size = buf.len() - 1;
    buf[size] = 0;

    if magnitude == 0 {
        size -= 1;
        buf[size] = b'0';
    }
    while magnitude != 0 {
        size -= 1;
        buf[size] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
    }
    if negative {
        size -= 1;
        buf[size] = b'-';
    }
    size
}

/// Same as [`integer_to_str`] but hands back the text itself.
pub fn integer_str(buf: &mut [u8; INTEGER_BUF_LEN], val: i64) -> &str {
    let start = integer_to_str(buf, val);
    // Only ASCII digits and '-' are ever written
    std::str::from_utf8(&buf[start..INTEGER_BUF_LEN - 1]).unwrap_or_default()
}
