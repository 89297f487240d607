use crate::model::actor::ActorRoles;
use crate::model::release::{Disc, IdType};
use crate::util;
use std::collections::BTreeMap;

/// Audio stream properties as read from the container header.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AudioInfo {
    /// Number of channels.
    pub channels: u32,
    /// Samples per second.
    pub sample_rate: u32,
    /// Bits per sample, 1 for DSD.
    pub bits_per_sample: u32,
    /// Kilobits per second, averaged over the whole file.
    pub avg_bitrate: u32,
}

/// Facts about the file a track was read from, supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// File name without the directory.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Modification time as seconds since the Unix epoch.
    pub mod_time: i64,
}

/// Lyrics of a track.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lyrics {
    /// The lyrics, one line per line. Synced lyrics lose their timestamps.
    pub text: String,
    /// Whether the text came from a synchronised lyrics field.
    pub synced: bool,
    /// ISO 639-2 language code, empty if unknown.
    pub language: String,
}

/// The recording a track holds: performers, engineers and its style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// Performers and technical credits.
    pub actor_roles: ActorRoles,
    /// Genres, without duplicates.
    pub genres: Vec<String>,
    /// Moods, without duplicates.
    pub moods: Vec<String>,
}

/// The work a track is a recording of.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composition {
    /// Composers, lyricists and other writers.
    pub actor_roles: ActorRoles,
}

/// One audio file of a release.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Track {
    /// Track title, with the subtitle appended in parentheses.
    pub title: String,
    /// Position on the release, e.g. `"03"` or `"2.05"`.
    pub position: String,
    /// Duration in milliseconds.
    pub duration: u64,
    /// Track level identifiers such as the ISRC.
    pub ids: BTreeMap<IdType, String>,
    /// Free text, one entry per line.
    pub notes: String,
    pub lyrics: Option<Lyrics>,
    /// Stream properties from the container header.
    pub audio: AudioInfo,
    /// Name, size and modification time of the source file.
    pub file_info: FileInfo,
    /// Who performed the recording.
    pub record: Record,
    /// Who wrote the work.
    pub composition: Composition,
    /// Tags without a canonical mapping, keyed by their name in the file.
    pub unprocessed: BTreeMap<String, String>,
    disc: Option<u32>,
}

impl Track {
    /// Creates an empty track.
    pub fn new() -> Track {
        Track::default()
    }

    /// Sets the position. Single digit positions are padded to two digits.
    pub fn set_position(&mut self, position: &str) {
        let position = position.trim();
        if position.len() == 1 && position.chars().all(|c| c.is_ascii_digit()) {
            self.position = format!("0{}", position);
        } else {
            self.position = position.to_string();
        }
    }

    /// The disc the track is linked to.
    pub fn disc_number(&self) -> Option<u32> {
        self.disc
    }

    /// Records `disc` as the disc this track is on.
    pub fn link_with_disc(&mut self, disc: &Disc) {
        self.disc = Some(disc.number);
    }

    /// Appends a line to the notes.
    pub fn add_comment(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(text);
    }

    /// Replaces the lyrics text, keeping a language set earlier.
    pub fn set_lyrics(&mut self, text: &str, synced: bool) {
        let lyrics = self.lyrics.get_or_insert_with(Lyrics::default);
        lyrics.text = text.to_string();
        lyrics.synced = synced;
    }

    /// Sets the lyrics language, creating empty lyrics if needed.
    pub fn set_lyrics_language(&mut self, language: &str) {
        self.lyrics.get_or_insert_with(Lyrics::default).language = language.trim().to_string();
    }
}

/// Derives the disc number a position implies. `"2.05"` and `"2-05"` are on disc 2, three or more
/// digits carry the disc in the hundreds (`"203"` is on disc 2), everything else is on disc 1.
pub fn disc_number_by_track_pos(position: &str) -> u32 {
    let position = position.trim();
    if let Some((disc, _)) = position.split_once(&['.', '-'][..]) {
        return match util::naive_int(disc) {
            0 => 1,
            n => n,
        };
    }
    if position.len() >= 3 && position.chars().all(|c| c.is_ascii_digit()) {
        return match util::naive_int(position) / 100 {
            0 => 1,
            n => n,
        };
    }
    1
}
