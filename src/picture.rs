use crate::util;

/// Types of embedded pictures, as numbered by ID3 APIC frames and FLAC PICTURE blocks.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(missing_docs)]
pub enum PictureType {
    Other,
    Icon,
    OtherIcon,
    CoverFront,
    CoverBack,
    Leaflet,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    ScreenCapture,
    BrightFish,
    Illustration,
    BandLogo,
    PublisherLogo,
    Undefined(u32),
}

impl Default for PictureType {
    fn default() -> PictureType {
        PictureType::Other
    }
}

impl From<u32> for PictureType {
    fn from(n: u32) -> PictureType {
        match n {
            0 => PictureType::Other,
            1 => PictureType::Icon,
            2 => PictureType::OtherIcon,
            3 => PictureType::CoverFront,
            4 => PictureType::CoverBack,
            5 => PictureType::Leaflet,
            6 => PictureType::Media,
            7 => PictureType::LeadArtist,
            8 => PictureType::Artist,
            9 => PictureType::Conductor,
            10 => PictureType::Band,
            11 => PictureType::Composer,
            12 => PictureType::Lyricist,
            13 => PictureType::RecordingLocation,
            14 => PictureType::DuringRecording,
            15 => PictureType::DuringPerformance,
            16 => PictureType::ScreenCapture,
            17 => PictureType::BrightFish,
            18 => PictureType::Illustration,
            19 => PictureType::BandLogo,
            20 => PictureType::PublisherLogo,
            n => PictureType::Undefined(n),
        }
    }
}

impl PictureType {
    /// Maps an APEv2 `COVER ART (...)` item name (upper-cased) to a picture type. Returns `None`
    /// if the name is not a picture item.
    pub fn from_ape_item(name: &str) -> Option<PictureType> {
        let kind = name.strip_prefix("COVER ART (")?.strip_suffix(')')?;
        Some(match kind {
            "FRONT" => PictureType::CoverFront,
            "BACK" => PictureType::CoverBack,
            "ICON" => PictureType::OtherIcon,
            "PNG ICON" => PictureType::Icon,
            "LEAFLET" => PictureType::Leaflet,
            "MEDIA" => PictureType::Media,
            "LEAD ARTIST" => PictureType::LeadArtist,
            "ARTIST" => PictureType::Artist,
            "CONDUCTOR" => PictureType::Conductor,
            "BAND" => PictureType::Band,
            "COMPOSER" => PictureType::Composer,
            "LYRICIST" => PictureType::Lyricist,
            "RECORDING LOCATION" => PictureType::RecordingLocation,
            "DURING RECORDING" => PictureType::DuringRecording,
            "DURING PERFORMANCE" => PictureType::DuringPerformance,
            "VIDEO CAPTURE" => PictureType::ScreenCapture,
            "FISH" => PictureType::BrightFish,
            "ILLUSTRATION" => PictureType::Illustration,
            "BAND LOGOTYPE" => PictureType::BandLogo,
            "PUBLISHER LOGOTYPE" => PictureType::PublisherLogo,
            _ => PictureType::Other,
        })
    }
}

/// Image geometry as declared by a FLAC PICTURE block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bits per pixel.
    pub color_depth: u32,
    /// Number of colors for indexed images, 0 otherwise.
    pub colors: u32,
}

/// A picture embedded in an audio file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Picture {
    /// The picture's MIME type. Empty when the container does not declare one.
    pub mime_type: String,
    /// The type of picture.
    pub picture_type: PictureType,
    /// The description, when it is an absolute URI.
    pub cover_url: Option<String>,
    /// The description, when it is free text.
    pub notes: Option<String>,
    /// Geometry, when the container declares it.
    pub image_info: Option<ImageInfo>,
    /// The image data.
    pub data: Vec<u8>,
}

impl Picture {
    /// Stores a picture description either as the cover URL or as notes.
    pub fn set_description(&mut self, description: &str) {
        let description = description.trim();
        if description.is_empty() {
            return;
        }
        if util::is_absolute_uri(description) {
            self.cover_url = Some(description.to_string());
        } else {
            self.notes = Some(description.to_string());
        }
    }
}
