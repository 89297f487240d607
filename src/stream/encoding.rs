use crate::{Error, ErrorKind};

/// Types of text encodings used in ID3 frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// ISO-8859-1 text encoding, also referred to as latin1 encoding.
    Latin1,
    /// UTF-16 text encoding with a byte order mark.
    UTF16,
    /// UTF-16BE text encoding without a byte order mark. This encoding is only used in id3v2.4.
    UTF16BE,
    /// UTF-8 text encoding. This encoding is only used in id3v2.4.
    UTF8,
}

impl Encoding {
    /// Maps the encoding selector byte that starts most ID3 frames.
    pub fn from_byte(n: u8) -> crate::Result<Encoding> {
        match n {
            0 => Ok(Encoding::Latin1),
            1 => Ok(Encoding::UTF16),
            2 => Ok(Encoding::UTF16BE),
            3 => Ok(Encoding::UTF8),
            _ => Err(Error::new(
                ErrorKind::StringDecoding(vec![n]),
                "unknown text encoding selector",
            )),
        }
    }

    /// Returns the length of the string terminator.
    pub fn delim_len(self) -> usize {
        match self {
            Encoding::Latin1 | Encoding::UTF8 => 1,
            Encoding::UTF16 | Encoding::UTF16BE => 2,
        }
    }
}
