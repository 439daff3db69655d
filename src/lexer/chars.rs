//! Byte classification used by the scanner. ASCII only, no locale.

/// Space, tab, newline and NUL. Carriage return is not whitespace.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\0')
}

pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}
