//! MPEG audio files. Audio properties come from the first frame header, tags from a leading
//! ID3v2 tag.

use crate::format::file_size;
use crate::format::id3v2::{self, Id3v2Decoder};
use crate::merge;
use crate::options::ReadOptions;
use crate::stream::cursor::Cursor;
use crate::{Error, ErrorKind, Release, Track};
use byteorder::BigEndian;
use log::debug;
use std::io;

/// Kilobits per second by bitrate index, for MPEG-1 layers I, II and III. Index 0 is the free
/// format, index 15 is invalid.
static MPEG1_BITRATES: [[u32; 16]; 3] = [
    [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
    [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
];

/// The same for MPEG-2 low sampling frequencies, where layers II and III share a table.
static MPEG2_BITRATES: [[u32; 16]; 3] = [
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
];

static MPEG1_SAMPLE_RATES: [u32; 3] = [44100, 48000, 32000];
static MPEG2_SAMPLE_RATES: [u32; 3] = [22050, 24000, 16000];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Version {
    Mpeg1,
    Mpeg2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Layer {
    Layer1,
    Layer2,
    Layer3,
}

#[derive(Debug, PartialEq, Eq)]
struct FrameHeader {
    version: Version,
    layer: Layer,
    /// Kilobits per second.
    bitrate: u32,
    sample_rate: u32,
    channels: u32,
}

impl FrameHeader {
    /// Decodes the sync word and the two bytes following it.
    fn decode(sync: u16, bytes: [u8; 2]) -> crate::Result<FrameHeader> {
        match sync >> 4 {
            0xfff => {}
            0xffe => {
                return Err(Error::new(
                    ErrorKind::UnsupportedFeature,
                    "mp3: MPEG-2.5 is not supported",
                ))
            }
            _ => {
                return Err(Error::new(
                    ErrorKind::Parsing,
                    format!("mp3: wrong frame sync word {:#06x}", sync),
                ))
            }
        }
        let version = match (sync >> 3) & 0x1 {
            1 => Version::Mpeg1,
            _ => Version::Mpeg2,
        };
        let layer = match (sync >> 1) & 0x3 {
            1 => Layer::Layer3,
            2 => Layer::Layer2,
            3 => Layer::Layer1,
            _ => return Err(Error::new(ErrorKind::Parsing, "mp3: reserved layer")),
        };

        let bitrate_index = usize::from(bytes[0] >> 4);
        let rate_index = usize::from((bytes[0] >> 2) & 0x3);
        let (bitrates, sample_rates) = match version {
            Version::Mpeg1 => (&MPEG1_BITRATES, &MPEG1_SAMPLE_RATES),
            Version::Mpeg2 => (&MPEG2_BITRATES, &MPEG2_SAMPLE_RATES),
        };
        let bitrate = bitrates[layer as usize][bitrate_index];
        if bitrate == 0 {
            return Err(Error::new(
                ErrorKind::Parsing,
                format!("mp3: free or invalid bitrate index {}", bitrate_index),
            ));
        }
        let sample_rate = *sample_rates
            .get(rate_index)
            .ok_or_else(|| Error::new(ErrorKind::Parsing, "mp3: reserved sample rate index"))?;
        let channels = match bytes[1] >> 6 {
            3 => 1,
            _ => 2,
        };
        Ok(FrameHeader {
            version,
            layer,
            bitrate,
            sample_rate,
            channels,
        })
    }
}

pub(crate) struct Mp3Decoder<'a, R> {
    cursor: &'a mut Cursor<R>,
    release: &'a mut Release,
    track: &'a mut Track,
    options: &'a ReadOptions,
}

impl<'a, R> Mp3Decoder<'a, R>
where
    R: io::Read + io::Seek,
{
    pub fn new(
        cursor: &'a mut Cursor<R>,
        release: &'a mut Release,
        track: &'a mut Track,
        options: &'a ReadOptions,
    ) -> Self {
        Mp3Decoder {
            cursor,
            release,
            track,
            options,
        }
    }

    pub fn read(self) -> crate::Result<()> {
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

        let sync = self.cursor.read_u16::<BigEndian>()?;
        let header = FrameHeader::decode(sync, self.cursor.read_array()?)?;
        debug!("mp3: {:?}", header);

        // The estimate includes the bytes of any ID3v2 tag.
        let size = file_size(self.track, self.cursor)?;
        self.track.audio.avg_bitrate = header.bitrate;
        self.track.audio.sample_rate = header.sample_rate;
        self.track.audio.channels = header.channels;
        self.track.audio.bits_per_sample = 16;
        self.track.duration = 8 * size / u64::from(header.bitrate);
        Ok(())
    }
}
