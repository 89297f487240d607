//! ID3v2 tags, as found in front of MP3 and FLAC streams and inside DSF files.

use self::frame::Target;
use crate::options::ReadOptions;
use crate::stream::cursor::Cursor;
use crate::tag::map::TagSink;
use crate::tag::{TagMap, TagScheme};
use crate::unsynch;
use crate::{Error, ErrorKind, Release, Track};
use bitflags::bitflags;
use byteorder::{BigEndian, ByteOrder};
use log::debug;
use std::io;
use std::str;

mod frame;
mod genre;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Flags: u8 {
        const UNSYNCHRONISATION = 0x80; // All versions
        const COMPRESSION       = 0x40; // =ID3v2.2
        const EXTENDED_HEADER   = 0x40; // >ID3v2.3, duplicate with COMPRESSION
        const EXPERIMENTAL      = 0x20; // >ID3v2.3
        const FOOTER            = 0x10; // >ID3v2.4
    }
}

bitflags! {
    /// Format flags of a frame, normalised across ID3v2.3 and ID3v2.4.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct FrameFlags: u8 {
        const GROUPING_IDENTITY     = 0x10;
        const COMPRESSION           = 0x01;
        const ENCRYPTION            = 0x02;
        const UNSYNCHRONISATION     = 0x04;
        const DATA_LENGTH_INDICATOR = 0x08;
    }
}

impl FrameFlags {
    /// Decodes the second frame flag byte.
    fn decode(version: u8, byte: u8) -> FrameFlags {
        let mut flags = FrameFlags::empty();
        let bits: &[(u8, FrameFlags)] = match version {
            3 => &[
                (0x80, FrameFlags::COMPRESSION),
                (0x40, FrameFlags::ENCRYPTION),
                (0x20, FrameFlags::GROUPING_IDENTITY),
            ],
            _ => &[
                (0x40, FrameFlags::GROUPING_IDENTITY),
                (0x08, FrameFlags::COMPRESSION),
                (0x04, FrameFlags::ENCRYPTION),
                (0x02, FrameFlags::UNSYNCHRONISATION),
                (0x01, FrameFlags::DATA_LENGTH_INDICATOR),
            ],
        };
        for (bit, flag) in bits {
            if byte & bit != 0 {
                flags |= *flag;
            }
        }
        flags
    }
}

struct Header {
    version: u8,
    flags: Flags,
    tag_size: u32,
}

impl Header {
    fn decode<R: io::Read + io::Seek>(cursor: &mut Cursor<R>) -> crate::Result<Header> {
        if !is_present(cursor)? {
            return Err(Error::new(
                ErrorKind::NoTag,
                "id3v2: reader does not contain an id3 tag",
            ));
        }
        let header: [u8; 10] = cursor.read_array()?;
        let version = header[3];
        if !(2..=4).contains(&version) {
            return Err(Error::new(
                ErrorKind::UnsupportedFeature,
                format!("id3v2: unsupported tag version 2.{}", version),
            ));
        }
        let flags = Flags::from_bits(header[5]).ok_or_else(|| {
            Error::new(ErrorKind::Parsing, "id3v2: unknown tag header flags are set")
        })?;
        if version == 2 && flags.contains(Flags::COMPRESSION) {
            return Err(Error::new(
                ErrorKind::UnsupportedFeature,
                "id3v2: id3v2.2 compression is not supported",
            ));
        }
        Ok(Header {
            version,
            flags,
            tag_size: unsynch::decode_bytes(&header[6..10]),
        })
    }

    /// Lengths of the frame id, the frame size field and the whole frame header.
    fn frame_header_len(&self) -> (usize, usize, usize) {
        match self.version {
            2 => (3, 3, 6),
            _ => (4, 4, 10),
        }
    }

    fn frame_size(&self, bytes: &[u8]) -> usize {
        let size = match self.version {
            2 => BigEndian::read_u24(bytes),
            3 => BigEndian::read_u32(bytes),
            _ => unsynch::decode_bytes(bytes),
        };
        size as usize
    }
}

/// Returns true if an ID3v2 tag starts at the current position. The position is left untouched.
pub(crate) fn is_present<R: io::Read + io::Seek>(cursor: &mut Cursor<R>) -> crate::Result<bool> {
    Ok(cursor.peek(3)? == b"ID3")
}

/// Reads one ID3v2 tag. Pictures are attached to the release directly, unmapped frames go to the
/// track's unprocessed tags.
pub(crate) struct Id3v2Decoder<'a, R> {
    cursor: &'a mut Cursor<R>,
    release: &'a mut Release,
    track: &'a mut Track,
    options: &'a ReadOptions,
}

impl<'a, R> Id3v2Decoder<'a, R>
where
    R: io::Read + io::Seek,
{
    pub fn new(
        cursor: &'a mut Cursor<R>,
        release: &'a mut Release,
        track: &'a mut Track,
        options: &'a ReadOptions,
    ) -> Self {
        Id3v2Decoder {
            cursor,
            release,
            track,
            options,
        }
    }

    /// Decodes the tag at the current position. Fails with `NoTag` if there is none.
    pub fn decode(self) -> crate::Result<TagMap> {
        let header = Header::decode(self.cursor)?;
        debug!(
            "id3v2.{}: {} byte tag, flags {:?}",
            header.version, header.tag_size, header.flags
        );
        let mut body = self.cursor.read_bytes(u64::from(header.tag_size))?;
        if header.version == 4 && header.flags.contains(Flags::FOOTER) {
            self.cursor.skip(10)?;
        }
        if header.version < 4 && header.flags.contains(Flags::UNSYNCHRONISATION) {
            unsynch::decode_vec(&mut body);
        }

        let mut pos = 0;
        if header.version > 2 && header.flags.contains(Flags::EXTENDED_HEADER) {
            pos = extended_header_len(header.version, &body)?;
        }

        let unprocessed = match self.options.unprocessed_enabled() {
            true => Some(&mut self.track.unprocessed),
            false => None,
        };
        let mut sink = TagSink::new(TagScheme::ID3v2, unprocessed);
        let mut target = Target {
            release: self.release,
            options: self.options,
            version: header.version,
        };

        let (id_len, size_len, frame_header_len) = header.frame_header_len();
        while pos + frame_header_len <= body.len() {
            let raw_id = &body[pos..pos + id_len];
            if !raw_id
                .iter()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            {
                // Padding, or garbage that cannot start a frame.
                break;
            }
            let mut id = str::from_utf8(raw_id)?;
            if header.version == 2 {
                id = frame::convert_id_2_to_3(id).unwrap_or(id);
            }
            let size = header.frame_size(&body[pos + id_len..pos + id_len + size_len]);
            let frame_flags = match header.version {
                2 => FrameFlags::empty(),
                _ => FrameFlags::decode(header.version, body[pos + 9]),
            };
            pos += frame_header_len;
            let end = pos
                .checked_add(size)
                .filter(|&end| end <= body.len())
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::Parsing,
                        format!("id3v2: frame {} exceeds the tag size", id),
                    )
                })?;
            let mut data = &body[pos..end];
            pos = end;
            if frame_flags.intersects(FrameFlags::COMPRESSION | FrameFlags::ENCRYPTION) {
                debug!("id3v2: skipping compressed or encrypted frame {}", id);
                continue;
            }
            // The group id byte precedes the data length indicator.
            if frame_flags.contains(FrameFlags::GROUPING_IDENTITY) {
                data = data.get(1..).unwrap_or_default();
            }
            if frame_flags.contains(FrameFlags::DATA_LENGTH_INDICATOR) {
                data = data.get(4..).unwrap_or_default();
            }
            if frame_flags.contains(FrameFlags::UNSYNCHRONISATION) {
                let mut decoded = data.to_vec();
                unsynch::decode_vec(&mut decoded);
                frame::apply(&mut sink, &mut target, id, &decoded)?;
            } else {
                frame::apply(&mut sink, &mut target, id, data)?;
            }
            while pos < body.len() && body[pos] == 0 {
                pos += 1;
            }
        }
        Ok(sink.into_tags())
    }
}

/// Returns the length of the extended header at the start of the tag body.
fn extended_header_len(version: u8, body: &[u8]) -> crate::Result<usize> {
    if body.len() < 4 {
        return Err(Error::new(
            ErrorKind::Parsing,
            "id3v2: extended header is truncated",
        ));
    }
    // ID3v2.3 does not count the size field itself, ID3v2.4 does and stores it synchsafe.
    let len = match version {
        3 => BigEndian::read_u32(&body[..4]) as usize + 4,
        _ => unsynch::decode_bytes(&body[..4]) as usize,
    };
    if len < 6 || len > body.len() {
        return Err(Error::new(
            ErrorKind::Parsing,
            "id3v2: extended header size is out of range",
        ));
    }
    Ok(len)
}
