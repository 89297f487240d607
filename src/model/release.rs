use crate::model::actor::ActorRoles;
use crate::model::media::Media;
use crate::picture::Picture;
use std::collections::BTreeMap;

/// Kinds of identifiers stored on releases, publishing entries, discs and tracks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum IdType {
    AccurateRip,
    Barcode,
    DiscId,
    Discogs,
    ISRC,
    MusicBrainz,
    Rutracker,
}

/// A label or publisher the release was issued by.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Publishing {
    /// Label name.
    pub name: String,
    /// Catalogue number.
    pub catno: String,
    /// Identifiers of the issue, such as the barcode.
    pub ids: BTreeMap<IdType, String>,
}

/// One disc of a release.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Disc {
    /// One based disc number.
    pub number: u32,
    /// The medium, when a media type tag names a known one.
    pub media: Option<Media>,
    /// Disc level identifiers, e.g. the CD TOC based disc id.
    pub ids: BTreeMap<IdType, String>,
}

/// The album a set of tracks belongs to. Decoders only ever add to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Release {
    /// Album title.
    pub title: String,
    /// Year of this issue, 0 if unknown.
    pub year: u32,
    /// Year of the first issue, 0 if unknown.
    pub original_year: u32,
    /// Country of release.
    pub country: String,
    /// Number of discs, 0 if unknown.
    pub total_discs: u32,
    /// Number of tracks, 0 if unknown.
    pub total_tracks: u32,
    /// Whether the release is a various artists compilation.
    pub compilation: bool,
    /// Release level identifiers.
    pub ids: BTreeMap<IdType, String>,
    /// Labels, the primary one first.
    pub publishing: Vec<Publishing>,
    /// Discs in the order they were first referenced.
    pub discs: Vec<Disc>,
    /// Embedded pictures. At most one cover is kept.
    pub pictures: Vec<Picture>,
    /// Album artists and release level credits.
    pub actor_roles: ActorRoles,
}

impl Release {
    /// Creates an empty release.
    pub fn new() -> Release {
        Release::default()
    }

    /// Returns the disc with the given number, creating it if it does not exist yet.
    pub fn disc(&mut self, number: u32) -> &mut Disc {
        let index = match self.discs.iter().position(|d| d.number == number) {
            Some(index) => index,
            None => {
                self.discs.push(Disc {
                    number,
                    ..Disc::default()
                });
                self.discs.len() - 1
            }
        };
        &mut self.discs[index]
    }

    /// Returns the disc with the given number without creating it.
    pub fn find_disc(&self, number: u32) -> Option<&Disc> {
        self.discs.iter().find(|d| d.number == number)
    }

    /// The retained cover picture, if any.
    pub fn cover(&self) -> Option<&Picture> {
        self.pictures.first()
    }

    /// Returns true once a cover picture is stored.
    pub fn has_cover(&self) -> bool {
        !self.pictures.is_empty()
    }

    /// Stores `picture` unless a cover is already present. Returns whether it was stored.
    pub fn add_cover(&mut self, picture: Picture) -> bool {
        if self.has_cover() {
            return false;
        }
        self.pictures.push(picture);
        true
    }

    /// Returns the primary publishing entry, creating it first if the list is empty.
    pub fn publishing_mut(&mut self) -> &mut Publishing {
        if self.publishing.is_empty() {
            self.publishing.push(Publishing::default());
        }
        &mut self.publishing[0]
    }
}
