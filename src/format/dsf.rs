//! DSD stream files. A `DSD ` chunk points at an optional trailing ID3v2 tag, the `fmt ` chunk
//! carries the audio properties.

use crate::format::file_size;
use crate::format::id3v2::{self, Id3v2Decoder};
use crate::merge;
use crate::options::ReadOptions;
use crate::stream::cursor::Cursor;
use crate::{Error, ErrorKind, Release, Track};
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use std::io::{self, SeekFrom};

const DSD_CHUNK_LEN: u64 = 28;

#[derive(Debug)]
struct FormatChunk {
    channels: u32,
    sample_rate: u32,
    bits_per_sample: u32,
    sample_count: u64,
}

impl FormatChunk {
    fn decode(bytes: &[u8; 52]) -> crate::Result<FormatChunk> {
        if &bytes[..4] != b"fmt " {
            return Err(Error::new(ErrorKind::Parsing, "dsf: missing fmt chunk"));
        }
        Ok(FormatChunk {
            channels: LittleEndian::read_u32(&bytes[24..28]),
            sample_rate: LittleEndian::read_u32(&bytes[28..32]),
            bits_per_sample: LittleEndian::read_u32(&bytes[32..36]),
            sample_count: LittleEndian::read_u64(&bytes[36..44]),
        })
    }
}

pub(crate) struct DsfDecoder<'a, R> {
    cursor: &'a mut Cursor<R>,
    release: &'a mut Release,
    track: &'a mut Track,
    options: &'a ReadOptions,
}

impl<'a, R> DsfDecoder<'a, R>
where
    R: io::Read + io::Seek,
{
    pub fn new(
        cursor: &'a mut Cursor<R>,
        release: &'a mut Release,
        track: &'a mut Track,
        options: &'a ReadOptions,
    ) -> Self {
        DsfDecoder {
            cursor,
            release,
            track,
            options,
        }
    }

    pub fn read(mut self) -> crate::Result<()> {
        let size = file_size(self.track, self.cursor)?;
        let metadata_offset = self.read_dsd_chunk(size)?;

        let format = FormatChunk::decode(&self.cursor.read_array()?)?;
        debug!("dsf: {:?}", format);
        if format.sample_rate == 0 {
            return Err(Error::new(ErrorKind::Parsing, "dsf: sample rate is zero"));
        }
        let duration = format
            .sample_count
            .checked_mul(1000)
            .map(|ms| ms / u64::from(format.sample_rate))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::Parsing,
                    format!("dsf: sample count {} is out of range", format.sample_count),
                )
            })?;
        self.track.duration = duration;
        self.track.audio.channels = format.channels;
        self.track.audio.sample_rate = format.sample_rate;
        self.track.audio.bits_per_sample = format.bits_per_sample;
        self.track.audio.avg_bitrate = match duration {
            0 => 0,
            _ => (8.0 * size as f64 / duration as f64).round() as u32,
        };

        if metadata_offset == 0 {
            debug!("dsf: no metadata chunk");
            return Ok(());
        }
        self.cursor.seek(SeekFrom::Start(metadata_offset))?;
        if !id3v2::is_present(self.cursor)? {
            debug!("dsf: no ID3v2 tag at offset {}", metadata_offset);
            return Ok(());
        }
        let tags = Id3v2Decoder::new(
            &mut *self.cursor,
            &mut *self.release,
            &mut *self.track,
            self.options,
        )
        .decode()?;
        merge::apply(&tags, self.release, self.track)
    }

    /// Checks the leading chunk against the file size and returns the metadata offset.
    fn read_dsd_chunk(&mut self, size: u64) -> crate::Result<u64> {
        let magic: [u8; 4] = self.cursor.read_array()?;
        if &magic != b"DSD " {
            return Err(Error::new(ErrorKind::Parsing, "dsf: missing DSD chunk"));
        }
        let chunk_len = self.cursor.read_u64::<LittleEndian>()?;
        if chunk_len != DSD_CHUNK_LEN {
            return Err(Error::new(
                ErrorKind::Parsing,
                format!("dsf: DSD chunk size is {} instead of {}", chunk_len, DSD_CHUNK_LEN),
            ));
        }
        let declared = self.cursor.read_u64::<LittleEndian>()?;
        if declared != size {
            return Err(Error::new(
                ErrorKind::Parsing,
                format!("dsf: declared file size {} does not match {}", declared, size),
            ));
        }
        self.cursor.read_u64::<LittleEndian>()
    }
}
