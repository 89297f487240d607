use crate::stream::encoding::Encoding;
use crate::{Error, ErrorKind};

/// Separators accepted between the values of a multi-value text field.
pub const REGULAR_DELIMITERS: &[char] = &[',', ';', '/'];

/// Decodes an ID3 style text value: the first byte selects the encoding, the remainder is the
/// encoded text, optionally followed by its terminator.
pub fn decode_selected_text(data: &[u8]) -> crate::Result<String> {
    let Some((&selector, text)) = data.split_first() else {
        return Ok(String::new());
    };
    decode_text(Encoding::from_byte(selector)?, text)
}

/// Decodes text in the given encoding after trimming trailing terminators.
pub fn decode_text(encoding: Encoding, data: &[u8]) -> crate::Result<String> {
    match encoding {
        Encoding::Latin1 => string_from_latin1(trim_terminators(encoding, data)),
        Encoding::UTF8 => Ok(String::from_utf8(trim_terminators(encoding, data).to_vec())?),
        Encoding::UTF16 => string_from_utf16(trim_terminators(encoding, data)),
        Encoding::UTF16BE => string_from_utf16be(trim_terminators(encoding, data)),
    }
}

fn trim_terminators(encoding: Encoding, data: &[u8]) -> &[u8] {
    let mut end = data.len();
    match encoding.delim_len() {
        1 => {
            while end > 0 && data[end - 1] == 0 {
                end -= 1;
            }
        }
        _ => {
            // Only whole code units are trimmed; an odd tail is left for the decoder to reject.
            if end % 2 == 0 {
                while end >= 2 && data[end - 2] == 0 && data[end - 1] == 0 {
                    end -= 2;
                }
            }
        }
    }
    &data[..end]
}

/// Returns a string created from the vector using Latin1 encoding.
/// Can never fail because all sequences of u8s are valid Latin1 strings.
pub fn string_from_latin1(data: &[u8]) -> crate::Result<String> {
    Ok(data.iter().map(|b| *b as char).collect())
}

/// Returns a string created from the vector using UTF-16 (with byte order mark) encoding.
/// Data without a byte order mark is read as big endian.
pub fn string_from_utf16(data: &[u8]) -> crate::Result<String> {
    if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xFE {
        string_from_utf16le(&data[2..])
    } else if data.len() >= 2 && data[0] == 0xFE && data[1] == 0xFF {
        string_from_utf16be(&data[2..])
    } else {
        string_from_utf16be(data)
    }
}

/// Returns a string created from the vector using UTF-16LE encoding.
pub fn string_from_utf16le(data: &[u8]) -> crate::Result<String> {
    string_from_utf16_units(data, u16::from_le_bytes, "data is not valid utf16-le")
}

/// Returns a string created from the vector using UTF-16BE encoding.
pub fn string_from_utf16be(data: &[u8]) -> crate::Result<String> {
    string_from_utf16_units(data, u16::from_be_bytes, "data is not valid utf16-be")
}

fn string_from_utf16_units(
    data: &[u8],
    unit: fn([u8; 2]) -> u16,
    description: &'static str,
) -> crate::Result<String> {
    if data.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::StringDecoding(data.to_vec()),
            "utf16 data has an odd length",
        ));
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();
    String::from_utf16(&units)
        .map_err(|_| Error::new(ErrorKind::StringDecoding(data.to_vec()), description))
}

/// Returns the index of the first delimiter for the specified encoding.
pub fn find_delim(encoding: Encoding, data: &[u8], index: usize) -> Option<usize> {
    let mut i = index;
    match encoding {
        Encoding::Latin1 | Encoding::UTF8 => {
            if i >= data.len() {
                return None;
            }
            data[i..].iter().position(|c| *c == 0).map(|p| p + i)
        }
        Encoding::UTF16 | Encoding::UTF16BE => {
            while i + 1 < data.len() && (data[i] != 0 || data[i + 1] != 0) {
                i += 2;
            }

            if i + 1 >= data.len() {
                // delimiter was not found
                return None;
            }

            Some(i)
        }
    }
}

/// Splits `data` at the first terminator of the encoding. Returns the terminated part (without
/// terminator) and everything after the terminator.
pub fn split_terminated(encoding: Encoding, data: &[u8]) -> crate::Result<(&[u8], &[u8])> {
    let end = find_delim(encoding, data, 0).ok_or_else(|| {
        Error::new(ErrorKind::Parsing, "string terminator not found")
    })?;
    Ok((&data[..end], &data[end + encoding.delim_len()..]))
}

/// Returns true if the text parses as an absolute URI: a scheme, a colon and a non-empty
/// remainder without whitespace.
pub fn is_absolute_uri(text: &str) -> bool {
    let Some((scheme, rest)) = text.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    };
    scheme_ok && !rest.is_empty() && !text.chars().any(char::is_whitespace)
}

/// Parses the leading decimal digits of a string, ignoring surrounding whitespace. Anything that
/// does not start with a digit yields zero.
pub fn naive_int(text: &str) -> u32 {
    text.trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0u32, |n, c| {
            n.saturating_mul(10)
                .saturating_add(c.to_digit(10).unwrap_or(0))
        })
}

/// Splits a string on any of the delimiters, trimming each field and dropping empty ones.
pub fn split_fields<'a>(text: &'a str, delimiters: &'a [char]) -> impl Iterator<Item = &'a str> {
    text.split(delimiters)
        .map(str::trim)
        .filter(|field| !field.is_empty())
}
