//! Scheme specific field names and the canonical keys they stand for.
//!
//! Based on the mapping at <https://wiki.hydrogenaud.io/index.php?title=Tag_Mapping>. Names are
//! stored upper-cased; callers upper-case the raw name before looking it up. ID3v2 frames that
//! carry a sub-key inside their payload (`TXXX` descriptions, `TIPL`/`IPLS` roles) are looked up
//! as a `(frame id, sub-key)` pair.

use crate::tag::key::{TagKey, TagScheme};
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Default)]
struct Names {
    plain: Option<TagKey>,
    subs: HashMap<&'static str, TagKey>,
}

type NameTable = HashMap<&'static str, Names>;

fn table(entries: &[(&'static str, Option<&'static str>, TagKey)]) -> NameTable {
    let mut m = NameTable::new();
    for &(base, sub, key) in entries {
        let names = m.entry(base).or_default();
        match sub {
            Some(sub) => {
                names.subs.insert(sub, key);
            }
            None => names.plain = Some(key),
        }
    }
    m
}

lazy_static! {
    static ref ID3V2: NameTable = {
        use TagKey::*;
        table(&[
            ("TALB", None, AlbumTitle),
            ("TSST", None, DiscSetSubtitle),
            ("TIT1", None, ContentGroup),
            ("TIT2", None, TrackTitle),
            ("TIT3", None, TrackSubtitle),
            ("TPE2", None, AlbumArtist),
            ("TPE1", None, TrackArtist),
            ("IPLS", Some("ARRANGER"), Arranger),
            ("TIPL", Some("ARRANGER"), Arranger),
            ("TEXT", None, AuthorWriter),
            ("TCOM", None, Composer),
            ("TPE3", None, Conductor),
            ("IPLS", Some("ENGINEER"), Engineer),
            ("TIPL", Some("ENGINEER"), Engineer),
            ("IPLS", None, InvolvedPeople),
            ("TIPL", None, InvolvedPeople),
            ("IPLS", Some("DJ-MIX"), MixDJ),
            ("TIPL", Some("DJ-MIX"), MixDJ),
            ("IPLS", Some("MIX"), MixEngineer),
            ("TIPL", Some("MIX"), MixEngineer),
            ("TOPE", None, OriginalArtist),
            ("TMCL", None, Performer),
            ("IPLS", Some("PRODUCER"), Producer),
            ("TIPL", Some("PRODUCER"), Producer),
            ("TPUB", None, Publisher),
            ("TXXX", Some("LABEL"), Publisher),
            ("TPE4", None, RemixedBy),
            ("TPOS", None, DiscNumber),
            ("TRCK", None, TrackNumber),
            ("TXXX", Some("TRACKTOTAL"), TrackTotal),
            ("TXXX", Some("TOTALTRACKS"), TrackTotal),
            ("TXXX", Some("TOTALDISCS"), DiscTotal),
            ("TLEN", None, Length),
            ("TDRC", None, ReleaseDate),
            ("TDAT", None, ReleaseDate),
            ("TYER", None, Year),
            ("TORY", None, OriginalReleaseDate),
            ("TDOR", None, OriginalReleaseDate),
            ("TRDA", None, RecordingDates),
            ("TSRC", None, ISRC),
            ("TXXX", Some("DISCID"), DiscID),
            ("TXXX", Some("BARCODE"), Barcode),
            ("TXXX", Some("UPC"), UPC),
            ("TXXX", Some("CATALOGNUMBER"), CatalogueNumber),
            ("TXXX", Some("ACCURATERIPDISCID"), AccurateRipDiscID),
            ("TXXX", Some("DISCOGS_RELEASE_ID"), DiscogsReleaseID),
            ("TXXX", Some("MUSICBRAINZ_ALBUMID"), MusicbrainzAlbumID),
            ("TXXX", Some("MUSICBRAINZ ALBUM ID"), MusicbrainzAlbumID),
            ("TXXX", Some("RUTRACKER"), RutrackerID),
            ("TCMP", None, Compilation),
            ("TFLT", None, FileType),
            ("TMED", None, MediaType),
            ("WOAS", None, AudioSourceWebpageURL),
            ("WCOM", None, CommercialInformationURL),
            ("WOAR", None, TrackArtistWebPageURL),
            ("TCON", None, Genre),
            ("TMOO", None, Mood),
            ("TXXX", Some("RELEASECOUNTRY"), Country),
            ("COMM", None, Comments),
            ("TCOP", None, CopyrightMessage),
            ("SYLT", None, SyncedLyrics),
            ("USLT", None, UnsyncedLyrics),
            ("TLAN", None, Language),
        ])
    };

    static ref VORBIS_COMMENT: NameTable = {
        use TagKey::*;
        table(&[
            ("ALBUM", None, AlbumTitle),
            ("DISCSUBTITLE", None, DiscSetSubtitle),
            ("GROUPING", None, ContentGroup),
            ("TITLE", None, TrackTitle),
            ("SUBTITLE", None, TrackSubtitle),
            ("VERSION", None, Version),
            ("ALBUMARTIST", None, AlbumArtist),
            ("ALBUM ARTIST", None, AlbumArtist),
            ("ARTIST", None, TrackArtist),
            ("ARRANGER", None, Arranger),
            ("AUTHOR", None, AuthorWriter),
            ("WRITER", None, Writer),
            ("COMPOSER", None, Composer),
            ("CONDUCTOR", None, Conductor),
            ("ENGINEER", None, Engineer),
            ("ENSEMBLE", None, Ensemble),
            ("LYRICIST", None, Lyricist),
            ("LANGUAGE", None, Language),
            ("MIXER", None, MixEngineer),
            ("DJMIXER", None, MixDJ),
            ("ORGANIZATION", None, Organisation),
            ("PERFORMER", None, Performer),
            ("PRODUCER", None, Producer),
            ("PUBLISHER", None, Publisher),
            ("LABEL", None, Label),
            ("LABELNO", None, LabelNumber),
            ("REMIXER", None, RemixedBy),
            ("SOLOISTS", None, Soloists),
            ("DISCNUMBER", None, DiscNumber),
            ("DISCTOTAL", None, DiscTotal),
            ("TOTALDISCS", None, DiscTotal),
            ("TRACKNUMBER", None, TrackNumber),
            ("TRACKTOTAL", None, TrackTotal),
            ("TOTALTRACKS", None, TrackTotal),
            ("PARTNUMBER", None, PartNumber),
            ("DATE", None, ReleaseDate),
            ("ORIGINALDATE", None, OriginalReleaseDate),
            ("ISRC", None, ISRC),
            ("BARCODE", None, Barcode),
            ("CATALOGNUMBER", None, CatalogueNumber),
            ("UPC", None, UPC),
            ("DISCOGS_RELEASE_ID", None, DiscogsReleaseID),
            ("MUSICBRAINZ_ALBUMID", None, MusicbrainzAlbumID),
            ("RUTRACKER", None, RutrackerID),
            ("DISCID", None, DiscID),
            ("ACCURATERIPDISCID", None, AccurateRipDiscID),
            ("COMPILATION", None, Compilation),
            ("MEDIA", None, MediaType),
            ("SOURCEMEDIA", None, SourceMedia),
            ("SOURCE", None, Source),
            ("GENRE", None, Genre),
            ("MOOD", None, Mood),
            ("STYLE", None, Style),
            ("RELEASECOUNTRY", None, Country),
            ("COMMENT", None, Comments),
            ("DESCRIPTION", None, Description),
            ("COPYRIGHT", None, CopyrightMessage),
            ("LYRICS", None, UnsyncedLyrics),
        ])
    };

    static ref APEV2: NameTable = {
        use TagKey::*;
        table(&[
            ("ALBUM", None, AlbumTitle),
            ("DISCSUBTITLE", None, DiscSetSubtitle),
            ("GROUPING", None, ContentGroup),
            ("TITLE", None, TrackTitle),
            ("SUBTITLE", None, TrackSubtitle),
            ("ALBUMARTIST", None, AlbumArtist),
            ("ALBUM ARTIST", None, AlbumArtist),
            ("ARTIST", None, TrackArtist),
            ("ARRANGER", None, Arranger),
            ("WRITER", None, Writer),
            ("COMPOSER", None, Composer),
            ("CONDUCTOR", None, Conductor),
            ("ENGINEER", None, Engineer),
            ("LYRICIST", None, Lyricist),
            ("LANGUAGE", None, Language),
            ("MIXER", None, MixEngineer),
            ("DJMIXER", None, MixDJ),
            ("PERFORMER", None, Performer),
            ("PRODUCER", None, Producer),
            ("LABEL", None, Label),
            ("PUBLISHER", None, Publisher),
            ("MIXARTIST", None, RemixedBy),
            ("DISC", None, DiscNumber),
            ("TRACK", None, TrackNumber),
            ("TRACKTOTAL", None, TrackTotal),
            ("YEAR", None, Year),
            ("ISRC", None, ISRC),
            ("BARCODE", None, Barcode),
            ("CATALOGNUMBER", None, CatalogueNumber),
            ("DISCOGS_RELEASE_ID", None, DiscogsReleaseID),
            ("MUSICBRAINZ_ALBUMID", None, MusicbrainzAlbumID),
            ("RUTRACKER", None, RutrackerID),
            ("COMPILATION", None, Compilation),
            ("MEDIA", None, MediaType),
            ("SOURCEMEDIA", None, SourceMedia),
            ("GENRE", None, Genre),
            ("MOOD", None, Mood),
            ("RELEASECOUNTRY", None, Country),
            ("COMMENT", None, Comments),
            ("COPYRIGHT", None, CopyrightMessage),
            ("LYRICS", None, UnsyncedLyrics),
        ])
    };
}

/// Looks up the canonical key for an (upper-cased) field name of the given scheme.
pub(crate) fn lookup(scheme: TagScheme, base: &str, sub: Option<&str>) -> Option<TagKey> {
    let table: &NameTable = match scheme {
        TagScheme::ID3v2 => &ID3V2,
        TagScheme::VorbisComment => &VORBIS_COMMENT,
        TagScheme::APEv2 => &APEV2,
    };
    let names = table.get(base)?;
    match sub {
        Some(sub) => names.subs.get(sub).copied(),
        None => names.plain,
    }
}
