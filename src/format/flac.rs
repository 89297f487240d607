//! FLAC streams: an optional ID3v2 tag, the `fLaC` marker and a chain of metadata blocks.

use crate::format::id3v2::{self, Id3v2Decoder};
use crate::format::file_size;
use crate::merge;
use crate::model::IdType;
use crate::options::ReadOptions;
use crate::picture::{ImageInfo, Picture, PictureType};
use crate::stream::cursor::Cursor;
use crate::tag::map::TagSink;
use crate::tag::{TagMap, TagScheme};
use crate::{Error, ErrorKind, Release, Track};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::{debug, trace};
use std::io;

const STREAM_INFO_LEN: u64 = 34;
/// Catalog number, lead-in, flags, reserved bytes and track count.
const CUESHEET_HEADER_LEN: usize = 396;
/// Offset of the ISRC within a cuesheet track entry.
const CUESHEET_ISRC_OFFSET: usize = 9;
const ISRC_LEN: usize = 12;

#[derive(Debug, PartialEq, Eq)]
enum BlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    Cuesheet,
    Picture,
    Unknown(u8),
}

impl From<u8> for BlockType {
    fn from(n: u8) -> BlockType {
        match n {
            0 => BlockType::StreamInfo,
            1 => BlockType::Padding,
            2 => BlockType::Application,
            3 => BlockType::SeekTable,
            4 => BlockType::VorbisComment,
            5 => BlockType::Cuesheet,
            6 => BlockType::Picture,
            n => BlockType::Unknown(n),
        }
    }
}

pub(crate) struct FlacDecoder<'a, R> {
    cursor: &'a mut Cursor<R>,
    release: &'a mut Release,
    track: &'a mut Track,
    options: &'a ReadOptions,
}

impl<'a, R> FlacDecoder<'a, R>
where
    R: io::Read + io::Seek,
{
    pub fn new(
        cursor: &'a mut Cursor<R>,
        release: &'a mut Release,
        track: &'a mut Track,
        options: &'a ReadOptions,
    ) -> Self {
        FlacDecoder {
            cursor,
            release,
            track,
            options,
        }
    }

    /// Reads every metadata block up to and including the one flagged as last.
    pub fn read(mut self) -> crate::Result<()> {
        if id3v2::is_present(self.cursor)? {
            let tags = Id3v2Decoder::new(
                &mut *self.cursor,
                &mut *self.release,
                &mut *self.track,
                self.options,
            )
            .decode()?;
            merge::apply(&tags, self.release, self.track)?;
        }

        let marker: [u8; 4] = self.cursor.read_array()?;
        if &marker != b"fLaC" {
            return Err(Error::new(
                ErrorKind::Parsing,
                "flac: missing fLaC stream marker",
            ));
        }

        loop {
            let header = self.cursor.read_u32::<BigEndian>()?;
            let is_last = header & 0x8000_0000 != 0;
            let block_type = BlockType::from(((header >> 24) & 0x7f) as u8);
            let len = u64::from(header & 0x00ff_ffff);
            trace!("flac: {:?} block, {} bytes", block_type, len);

            match block_type {
                BlockType::StreamInfo => self.stream_info(len)?,
                BlockType::VorbisComment => {
                    let tags = self.vorbis_comment(len)?;
                    merge::apply(&tags, self.release, self.track)?;
                }
                BlockType::Cuesheet => self.cuesheet(len)?,
                BlockType::Picture => self.picture(len)?,
                _ => self.cursor.skip(len)?,
            }
            if is_last {
                break;
            }
        }
        Ok(())
    }

    fn stream_info(&mut self, len: u64) -> crate::Result<()> {
        if len != STREAM_INFO_LEN {
            return Err(Error::new(
                ErrorKind::Parsing,
                format!("flac: stream info block is {} bytes, expected 34", len),
            ));
        }
        let block = self.cursor.read_bytes(len)?;
        // Block and frame size bounds come first, the MD5 signature last.
        let packed = BigEndian::read_u64(&block[10..18]);
        let sample_rate = ((packed >> 44) & 0xf_ffff) as u32;
        let channels = ((packed >> 41) & 0x7) as u32 + 1;
        let bits_per_sample = ((packed >> 36) & 0x1f) as u32 + 1;
        let total_samples = packed & 0xf_ffff_ffff;
        if sample_rate == 0 {
            return Err(Error::new(
                ErrorKind::Parsing,
                "flac: stream info declares a sample rate of zero",
            ));
        }

        let duration = (1000.0 * total_samples as f64 / f64::from(sample_rate)).round() as u64;
        let size = file_size(self.track, self.cursor)?;
        self.track.duration = duration;
        self.track.audio.sample_rate = sample_rate;
        self.track.audio.channels = channels;
        self.track.audio.bits_per_sample = bits_per_sample;
        self.track.audio.avg_bitrate = match duration {
            0 => 0,
            _ => (0.008 * size as f64 / (duration as f64 / 1000.0)).round() as u32,
        };
        Ok(())
    }

    fn vorbis_comment(&mut self, len: u64) -> crate::Result<TagMap> {
        let block = self.cursor.read_bytes(len)?;
        let mut reader = Cursor::new(io::Cursor::new(block));

        let vendor_len = reader.read_u32::<LittleEndian>()?;
        reader.read_bytes(u64::from(vendor_len))?;
        let count = reader.read_u32::<LittleEndian>()?;

        let unprocessed = match self.options.unprocessed_enabled() {
            true => Some(&mut self.track.unprocessed),
            false => None,
        };
        let mut sink = TagSink::new(TagScheme::VorbisComment, unprocessed);
        for _ in 0..count {
            let comment_len = reader.read_u32::<LittleEndian>()?;
            let comment = String::from_utf8(reader.read_bytes(u64::from(comment_len))?)?;
            let (name, value) = comment.split_once('=').ok_or_else(|| {
                Error::new(
                    ErrorKind::Parsing,
                    format!("flac: vorbis comment {:?} has no '='", comment),
                )
            })?;
            sink.add(
                &name.to_uppercase(),
                None,
                name,
                value.trim().to_string(),
            );
        }
        Ok(sink.into_tags())
    }

    /// Only the ISRC of the first track entry is used.
    fn cuesheet(&mut self, len: u64) -> crate::Result<()> {
        let block = self.cursor.read_bytes(len)?;
        if block.len() < CUESHEET_HEADER_LEN || block[CUESHEET_HEADER_LEN - 1] == 0 {
            return Ok(());
        }
        let start = CUESHEET_HEADER_LEN + CUESHEET_ISRC_OFFSET;
        let Some(isrc) = block.get(start..start + ISRC_LEN) else {
            return Err(Error::new(
                ErrorKind::Parsing,
                "flac: cuesheet track entry is truncated",
            ));
        };
        let isrc: String = isrc
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect();
        if !isrc.is_empty() {
            self.track.ids.insert(IdType::ISRC, isrc);
        }
        Ok(())
    }

    fn picture(&mut self, len: u64) -> crate::Result<()> {
        if !self.options.pictures_enabled() || self.release.has_cover() {
            debug!("flac: skipping picture block");
            return self.cursor.skip(len);
        }
        let block = self.cursor.read_bytes(len)?;
        let mut reader = Cursor::new(io::Cursor::new(block));

        let picture_type = PictureType::from(reader.read_u32::<BigEndian>()?);
        let mime_len = reader.read_u32::<BigEndian>()?;
        let mime_type = String::from_utf8(reader.read_bytes(u64::from(mime_len))?)?;
        let description_len = reader.read_u32::<BigEndian>()?;
        let description = String::from_utf8(reader.read_bytes(u64::from(description_len))?)?;
        let image_info = ImageInfo {
            width: reader.read_u32::<BigEndian>()?,
            height: reader.read_u32::<BigEndian>()?,
            color_depth: reader.read_u32::<BigEndian>()?,
            colors: reader.read_u32::<BigEndian>()?,
        };
        let data_len = reader.read_u32::<BigEndian>()?;
        let expected = 32 + u64::from(mime_len) + u64::from(description_len) + u64::from(data_len);
        if len != expected {
            return Err(Error::new(
                ErrorKind::Parsing,
                format!(
                    "flac: picture block size mismatch, {} bytes declared, {} expected",
                    len, expected
                ),
            ));
        }

        let mut picture = Picture {
            mime_type,
            picture_type,
            image_info: Some(image_info),
            data: reader.read_bytes(u64::from(data_len))?,
            ..Picture::default()
        };
        picture.set_description(&description);
        self.release.add_cover(picture);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(block_type: u8, last: bool, body: &[u8]) -> Vec<u8> {
        let mut out = vec![block_type | if last { 0x80 } else { 0 }];
        out.extend(&(body.len() as u32).to_be_bytes()[1..]);
        out.extend(body);
        out
    }

    fn decode(data: Vec<u8>) -> (crate::Result<()>, Track, Release) {
        let mut cursor = Cursor::new(io::Cursor::new(data));
        let mut release = Release::new();
        let mut track = Track::new();
        let options = ReadOptions::new().decode_pictures(true);
        let result = FlacDecoder::new(&mut cursor, &mut release, &mut track, &options).read();
        (result, track, release)
    }

    #[test]
    fn test_block_types() {
        assert_eq!(BlockType::StreamInfo, BlockType::from(0));
        assert_eq!(BlockType::Picture, BlockType::from(6));
        assert_eq!(BlockType::Unknown(9), BlockType::from(9));
    }

    #[test]
    fn test_missing_marker() {
        let (result, _, _) = decode(b"OggS\x00\x00".to_vec());
        assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
    }

    #[test]
    fn test_stream_info_size_checked() {
        let mut data = b"fLaC".to_vec();
        data.extend(block(0, true, &[0; 30]));
        let (result, _, _) = decode(data);
        assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
    }

    #[test]
    fn test_vorbis_comment_without_separator() {
        let mut body = 0u32.to_le_bytes().to_vec();
        body.extend(1u32.to_le_bytes());
        body.extend(5u32.to_le_bytes());
        body.extend(b"TITLE");
        let mut data = b"fLaC".to_vec();
        data.extend(block(4, true, &body));
        let (result, _, _) = decode(data);
        assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
    }

    #[test]
    fn test_vorbis_comment() {
        let mut body = 4u32.to_le_bytes().to_vec();
        body.extend(b"test");
        body.extend(2u32.to_le_bytes());
        for comment in [&b"title= Blue in Green "[..], &b"Replaygain_Track_Gain=-7.1 dB"[..]] {
            body.extend((comment.len() as u32).to_le_bytes());
            body.extend(comment);
        }
        let mut data = b"fLaC".to_vec();
        data.extend(block(4, true, &body));
        let (result, track, _) = decode(data);
        result.unwrap();
        assert_eq!("Blue in Green", track.title);
        assert_eq!(
            Some(&"-7.1 dB".to_string()),
            track.unprocessed.get("Replaygain_Track_Gain")
        );
        assert!(!track.unprocessed.contains_key("title"));
    }

    #[test]
    fn test_cuesheet_isrc() {
        let mut body = vec![0; CUESHEET_HEADER_LEN];
        body[CUESHEET_HEADER_LEN - 1] = 1;
        body.extend(0u64.to_be_bytes());
        body.push(1);
        body.extend(b"USSM15900113");
        body.extend([0; 14]);
        body.push(0);
        let mut data = b"fLaC".to_vec();
        data.extend(block(5, false, &body));
        data.extend(block(1, true, &[0; 8]));
        let (result, track, _) = decode(data);
        result.unwrap();
        assert_eq!(Some(&"USSM15900113".to_string()), track.ids.get(&IdType::ISRC));
    }

    #[test]
    fn test_picture_size_mismatch() {
        let mut body = 3u32.to_be_bytes().to_vec();
        body.extend(9u32.to_be_bytes());
        body.extend(b"image/png");
        body.extend(0u32.to_be_bytes());
        body.extend([0; 16]);
        body.extend(10u32.to_be_bytes());
        body.extend(b"\x89PNG");
        let mut data = b"fLaC".to_vec();
        data.extend(block(6, true, &body));
        let (result, _, release) = decode(data);
        assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
        assert!(release.pictures.is_empty());
    }
}
