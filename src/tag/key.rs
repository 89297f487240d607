use std::fmt;

/// Tagging schemes whose field names are translated to [`TagKey`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagScheme {
    /// ID3v2 frames. Used by MP3, DSF and optionally in front of FLAC streams.
    ID3v2,
    /// Vorbis comments as embedded in FLAC.
    VorbisComment,
    /// APEv2 items. Used by WavPack.
    APEv2,
}

impl fmt::Display for TagScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagScheme::ID3v2 => write!(f, "ID3v2"),
            TagScheme::VorbisComment => write!(f, "Vorbis comment"),
            TagScheme::APEv2 => write!(f, "APEv2"),
        }
    }
}

/// The format independent tag vocabulary. Every scheme specific field name that has a meaning
/// for the release or track maps onto exactly one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum TagKey {
    // Titles
    AlbumTitle,
    DiscSetSubtitle,
    ContentGroup,
    TrackTitle,
    TrackSubtitle,
    Version,
    // People & organizations
    AlbumArtist,
    TrackArtist,
    Arranger,
    AuthorWriter,
    Writer,
    Composer,
    Conductor,
    Engineer,
    Ensemble,
    InvolvedPeople,
    Lyricist,
    MixDJ,
    MixEngineer,
    MusicianCredits,
    Organisation,
    OriginalArtist,
    Performer,
    Producer,
    Publisher,
    Label,
    LabelNumber,
    RemixedBy,
    Soloists,
    // Counts & indexes
    DiscNumber,
    DiscTotal,
    TrackNumber,
    TrackTotal,
    PartNumber,
    Length,
    // Dates
    ReleaseDate,
    Year,
    OriginalReleaseDate,
    RecordingDates,
    // Identifiers
    ISRC,
    Barcode,
    CatalogueNumber,
    UPC,
    DiscID,
    AccurateRipDiscID,
    DiscogsReleaseID,
    MusicbrainzAlbumID,
    RutrackerID,
    // Flags
    Compilation,
    // Ripping & encoding
    FileType,
    MediaType,
    SourceMedia,
    Source,
    // URLs
    AudioSourceWebpageURL,
    CommercialInformationURL,
    TrackArtistWebPageURL,
    // Style
    Genre,
    Mood,
    Style,
    // Miscellaneous
    Country,
    Comments,
    Description,
    CopyrightMessage,
    SyncedLyrics,
    UnsyncedLyrics,
    Language,
}
