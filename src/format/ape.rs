//! APEv2 tags, stored at the end of a file.

use crate::options::ReadOptions;
use crate::picture::{Picture, PictureType};
use crate::stream::cursor::Cursor;
use crate::tag::map::TagSink;
use crate::tag::{TagMap, TagScheme};
use crate::{Error, ErrorKind, Release, Track};
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use std::io::{self, SeekFrom};

const FOOTER_LEN: u64 = 32;
const ID3V1_LEN: u64 = 128;

struct Footer {
    version: u32,
    /// Size of all items plus the footer.
    tag_size: u32,
    item_count: u32,
}

impl Footer {
    fn decode(bytes: &[u8; 32]) -> crate::Result<Footer> {
        if &bytes[..8] != b"APETAGEX" {
            return Err(Error::new(
                ErrorKind::NoTag,
                "ape: reader does not contain an APEv2 tag",
            ));
        }
        // Flags and reserved bytes follow, none of them affect reading.
        Ok(Footer {
            version: LittleEndian::read_u32(&bytes[8..12]),
            tag_size: LittleEndian::read_u32(&bytes[12..16]),
            item_count: LittleEndian::read_u32(&bytes[16..20]),
        })
    }
}

/// Reads the APEv2 tag at the end of a stream, in front of an ID3v1 tag if there is one.
pub(crate) struct ApeDecoder<'a, R> {
    cursor: &'a mut Cursor<R>,
    release: &'a mut Release,
    track: &'a mut Track,
    options: &'a ReadOptions,
}

impl<'a, R> ApeDecoder<'a, R>
where
    R: io::Read + io::Seek,
{
    pub fn new(
        cursor: &'a mut Cursor<R>,
        release: &'a mut Release,
        track: &'a mut Track,
        options: &'a ReadOptions,
    ) -> Self {
        ApeDecoder {
            cursor,
            release,
            track,
            options,
        }
    }

    /// Decodes all items. Fails with `NoTag` if the footer is missing.
    pub fn decode(mut self) -> crate::Result<TagMap> {
        let footer_end = self.locate_footer_end()?;
        if footer_end < FOOTER_LEN {
            return Err(Error::new(
                ErrorKind::NoTag,
                "ape: stream is too short for an APEv2 tag",
            ));
        }
        self.cursor.seek(SeekFrom::Start(footer_end - FOOTER_LEN))?;
        let footer = Footer::decode(&self.cursor.read_array()?)?;
        let tag_size = u64::from(footer.tag_size);
        if tag_size < FOOTER_LEN || tag_size > footer_end {
            return Err(Error::new(
                ErrorKind::Parsing,
                format!("ape: tag size {} is out of range", tag_size),
            ));
        }
        debug!(
            "ape: version {}, {} items in {} bytes",
            footer.version, footer.item_count, tag_size
        );
        self.cursor.seek(SeekFrom::Start(footer_end - tag_size))?;

        let unprocessed = match self.options.unprocessed_enabled() {
            true => Some(&mut self.track.unprocessed),
            false => None,
        };
        let mut sink = TagSink::new(TagScheme::APEv2, unprocessed);
        for _ in 0..footer.item_count {
            let value_len = u64::from(self.cursor.read_u32::<LittleEndian>()?);
            // Item flags mark read-only and binary items; both are read the same way.
            self.cursor.read_u32::<LittleEndian>()?;
            let raw_name = String::from_utf8(self.cursor.read_until_nul()?)?;
            let name = raw_name.to_uppercase();

            if let Some(picture_type) = PictureType::from_ape_item(&name) {
                if !self.options.pictures_enabled() || self.release.has_cover() {
                    debug!("ape: skipping picture item {:?}", raw_name);
                    self.cursor.skip(value_len)?;
                    continue;
                }
                let picture = Picture {
                    picture_type,
                    data: self.cursor.read_bytes(value_len)?,
                    ..Picture::default()
                };
                self.release.add_cover(picture);
                continue;
            }

            let value = String::from_utf8(self.cursor.read_bytes(value_len)?)?;
            let value = value
                .split('\0')
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join("; ");
            sink.add(&name, None, &raw_name, value);
        }
        Ok(sink.into_tags())
    }

    /// Returns the offset just past the APEv2 footer.
    fn locate_footer_end(&mut self) -> crate::Result<u64> {
        let len = self.cursor.len()?;
        if len >= ID3V1_LEN + FOOTER_LEN {
            self.cursor.seek(SeekFrom::Start(len - ID3V1_LEN))?;
            if self.cursor.peek(3)? == b"TAG" {
                return Ok(len - ID3V1_LEN);
            }
        }
        Ok(len)
    }
}
