use std::fmt;

/// The physical or digital medium a disc was released on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Media {
    CD,
    SACD,
    DVDAudio,
    DVDVideo,
    BluRay,
    Vinyl,
    Cassette,
    ReelToReel,
    DAT,
    MiniDisc,
    Digital,
}

impl Media {
    /// Recognizes the usual spellings of a media type tag. Returns `None` for anything else.
    pub fn decode(text: &str) -> Option<Media> {
        let text = text.trim().to_uppercase();
        let media = match text.as_str() {
            "CD" | "CDDA" | "CD-DA" | "COMPACT DISC" | "HDCD" | "CD-R" => Media::CD,
            "SACD" | "SA-CD" | "HYBRID SACD" | "SUPER AUDIO CD" => Media::SACD,
            "DVDA" | "DVD-A" | "DVD-AUDIO" => Media::DVDAudio,
            "DVD" | "DVD-V" | "DVD-VIDEO" => Media::DVDVideo,
            "BD" | "BLU-RAY" | "BLURAY" | "BD-A" => Media::BluRay,
            "LP" | "EP" | "VINYL" | "12\" VINYL" | "10\" VINYL" | "7\" VINYL" => Media::Vinyl,
            "MC" | "CASSETTE" | "TAPE" => Media::Cassette,
            "R2R" | "REEL" | "REEL-TO-REEL" => Media::ReelToReel,
            "DAT" => Media::DAT,
            "MD" | "MINIDISC" => Media::MiniDisc,
            "DIGITAL" | "DIGITAL MEDIA" | "WEB" | "FILE" => Media::Digital,
            _ => return None,
        };
        Some(media)
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Media::CD => "CD",
            Media::SACD => "SACD",
            Media::DVDAudio => "DVD-Audio",
            Media::DVDVideo => "DVD-Video",
            Media::BluRay => "Blu-ray",
            Media::Vinyl => "Vinyl",
            Media::Cassette => "Cassette",
            Media::ReelToReel => "Reel-to-reel",
            Media::DAT => "DAT",
            Media::MiniDisc => "MiniDisc",
            Media::Digital => "Digital Media",
        };
        f.write_str(name)
    }
}
