//! XML character reference handling for term values.
//!
//! Filter strings restored from backend responses arrive with XML escapes
//! (`&lt;`, `&#62;`, ...) still in place. They are decoded once, before any
//! type conversion.

use std::borrow::Cow;

/// Decodes XML character references in `input`.
///
/// Recognizes the five predefined entities and decimal/hexadecimal numeric
/// references. Anything that does not form a valid reference is kept as is.
pub(crate) fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        match decode_reference(candidate) {
            Some((ch, consumed)) => {
                output.push(ch);
                rest = &candidate[consumed..];
            }
            None => {
                output.push('&');
                rest = &candidate[1..];
            }
        }
    }
    output.push_str(rest);

    Cow::Owned(output)
}

/// Escapes `&` so that a later [`decode`] yields `input` again.
///
/// Only applied when decoding would change the text, so ordinary values are
/// never touched.
pub(crate) fn protect(input: &str) -> Cow<'_, str> {
    match decode(input) {
        Cow::Borrowed(_) => Cow::Borrowed(input),
        Cow::Owned(decoded) if decoded == input => Cow::Borrowed(input),
        Cow::Owned(_) => Cow::Owned(input.replace('&', "&amp;")),
    }
}

/// Decodes one reference at the start of `s` (which begins with `&`).
///
/// Returns the character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let end = s.find(';')?;
    let body = &s[1..end];

    let ch = match body {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let numeric = body.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };

    Some((ch, end + 1))
}
