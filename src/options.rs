/// Settings shared by every decoder call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    decode_pictures: bool,
    keep_unprocessed: bool,
}

impl ReadOptions {
    /// Constructs `ReadOptions` with the following configuration:
    ///
    /// * pictures are stored when the `decode_picture` feature is enabled
    /// * tags without a canonical mapping are kept on the track
    pub fn new() -> Self {
        Self {
            decode_pictures: cfg!(feature = "decode_picture"),
            keep_unprocessed: true,
        }
    }

    /// Enables or disables storing embedded pictures.
    ///
    /// Picture payloads are always consumed from the stream. With this disabled they are skipped
    /// instead of being attached to the release.
    pub fn decode_pictures(mut self, decode_pictures: bool) -> Self {
        self.decode_pictures = decode_pictures;
        self
    }

    /// Enables or disables keeping unmapped tags in [`Track::unprocessed`](crate::Track).
    pub fn keep_unprocessed(mut self, keep_unprocessed: bool) -> Self {
        self.keep_unprocessed = keep_unprocessed;
        self
    }

    /// Returns true if pictures are attached to the release. Always false without the
    /// `decode_picture` feature.
    pub fn pictures_enabled(&self) -> bool {
        cfg!(feature = "decode_picture") && self.decode_pictures
    }

    /// Returns true if unmapped tags are kept on the track.
    pub fn unprocessed_enabled(&self) -> bool {
        self.keep_unprocessed
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "decode_picture")]
    fn test_pictures_follow_option() {
        assert!(ReadOptions::new().pictures_enabled());
        assert!(!ReadOptions::new().decode_pictures(false).pictures_enabled());
    }

    #[test]
    #[cfg(not(feature = "decode_picture"))]
    fn test_pictures_need_feature() {
        assert!(!ReadOptions::new().pictures_enabled());
        assert!(!ReadOptions::new().decode_pictures(true).pictures_enabled());
    }

    #[test]
    fn test_unprocessed_default() {
        assert!(ReadOptions::new().unprocessed_enabled());
        assert!(!ReadOptions::new().keep_unprocessed(false).unprocessed_enabled());
    }
}
