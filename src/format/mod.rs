//! Container and tag decoders, one module per file format.

use crate::model::disc_number_by_track_pos;
use crate::options::ReadOptions;
use crate::stream::cursor::Cursor;
use crate::{Release, Track};
use std::fmt;
use std::io;

mod ape;
mod dsf;
mod flac;
mod id3v2;
mod mp3;
mod wavpack;

use self::dsf::DsfDecoder;
use self::flac::FlacDecoder;
use self::mp3::Mp3Decoder;
use self::wavpack::WavPackDecoder;

/// The audio file formats a track can be read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// DSD stream file with an optional ID3v2 tag.
    Dsf,
    /// FLAC with Vorbis comments and an optional leading ID3v2 tag.
    Flac,
    /// WavPack with an APEv2 tag.
    WavPack,
    /// MPEG audio with an optional leading ID3v2 tag.
    Mp3,
}

impl Format {
    /// Decodes one file onto `release` and `track`.
    ///
    /// On success the track is linked with the disc its position implies, creating that disc on
    /// the release if needed. On failure, whatever was merged before the error stays applied.
    pub fn read(
        self,
        reader: impl io::Read + io::Seek,
        release: &mut Release,
        track: &mut Track,
        options: &ReadOptions,
    ) -> crate::Result<()> {
        let mut cursor = Cursor::new(reader);
        match self {
            Format::Dsf => DsfDecoder::new(&mut cursor, release, track, options).read()?,
            Format::Flac => FlacDecoder::new(&mut cursor, release, track, options).read()?,
            Format::WavPack => WavPackDecoder::new(&mut cursor, release, track, options).read()?,
            Format::Mp3 => Mp3Decoder::new(&mut cursor, release, track, options).read()?,
        }
        let disc = release.disc(disc_number_by_track_pos(&track.position));
        track.link_with_disc(disc);
        Ok(())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Dsf => write!(f, "DSF"),
            Format::Flac => write!(f, "FLAC"),
            Format::WavPack => write!(f, "WavPack"),
            Format::Mp3 => write!(f, "MP3"),
        }
    }
}

/// The file size as supplied by the caller, or the stream length if it was not.
pub(crate) fn file_size<R: io::Read + io::Seek>(
    track: &Track,
    cursor: &mut Cursor<R>,
) -> crate::Result<u64> {
    match track.file_info.size {
        0 => cursor.len(),
        size => Ok(size),
    }
}
