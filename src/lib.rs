//! A library to read music metadata from DSF, FLAC, WavPack and MP3 files.
//!
//! Every format stores its tags in one of three schemes (ID3v2, Vorbis comments or APEv2). The
//! scheme specific field names are translated to one set of [`TagKey`]s, and the resulting
//! [`TagMap`] is merged onto a [`Release`] and a [`Track`].
//!
//! # Reading a directory of files
//!
//! ```no_run
//! use mdreader::{ReadOptions, Registry, Release};
//!
//! let registry = Registry::new(ReadOptions::new().decode_pictures(false));
//! let mut release = Release::new();
//! let mut tracks = Vec::new();
//! for entry in std::fs::read_dir("Kind of Blue")? {
//!     if let Some(track) = registry.read_path(entry?.path(), &mut release)? {
//!         tracks.push(track);
//!     }
//! }
//! println!("{}: {} tracks", release.title, tracks.len());
//! # Ok::<(), mdreader::Error>(())
//! ```
//!
//! # Reading from any stream
//!
//! ```no_run
//! use mdreader::{Format, ReadOptions, Release, Track};
//! use std::io::Cursor;
//!
//! let data = std::fs::read("track.mp3")?;
//! let mut release = Release::new();
//! let mut track = Track::new();
//! track.file_info.size = data.len() as u64;
//! Format::Mp3.read(Cursor::new(data), &mut release, &mut track, &ReadOptions::new())?;
//! println!("{} kbps", track.audio.avg_bitrate);
//! # Ok::<(), mdreader::Error>(())
//! ```

#![warn(missing_docs)]

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::format::Format;
pub use crate::merge::apply;
pub use crate::model::{
    disc_number_by_track_pos, Actor, ActorRoles, AudioInfo, Composition, Disc, FileInfo, IdType,
    Lyrics, Media, Publishing, Record, Release, Track,
};
pub use crate::options::ReadOptions;
pub use crate::picture::{ImageInfo, Picture, PictureType};
pub use crate::registry::Registry;
pub use crate::tag::{TagKey, TagMap, TagScheme};

pub mod format;
pub mod merge;
/// Canonical tag keys and the per scheme name tables.
pub mod tag;

mod error;
mod model;
mod options;
mod picture;
mod registry;
mod stream;
mod unsynch;
mod util;
