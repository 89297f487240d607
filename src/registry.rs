use crate::format::Format;
use crate::model::{FileInfo, Release, Track};
use crate::options::ReadOptions;
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Maps file extensions to the [`Format`] that reads them.
///
/// A registry is built once and shared by reference; it holds no per-file state.
///
/// ```no_run
/// use mdreader::{ReadOptions, Registry, Release};
///
/// let registry = Registry::new(ReadOptions::new());
/// let mut release = Release::new();
/// if let Some(track) = registry.read_path("01 - So What.flac", &mut release)? {
///     println!("{} ({} ms)", track.title, track.duration);
/// }
/// # Ok::<(), mdreader::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    formats: HashMap<String, Format>,
    options: ReadOptions,
}

impl Registry {
    /// Creates a registry knowing the `dsf`, `flac`, `wv` and `mp3` extensions.
    pub fn new(options: ReadOptions) -> Registry {
        let formats = [
            ("dsf", Format::Dsf),
            ("flac", Format::Flac),
            ("wv", Format::WavPack),
            ("mp3", Format::Mp3),
        ]
        .into_iter()
        .map(|(ext, format)| (ext.to_string(), format))
        .collect();
        Registry { formats, options }
    }

    /// Associates an extension, given without the dot, with a format. Replaces any previous
    /// association.
    pub fn register(&mut self, ext: &str, format: Format) {
        self.formats.insert(ext.to_lowercase(), format);
    }

    /// Returns the format responsible for the extension of `path`, ignoring case.
    pub fn format_for(&self, path: impl AsRef<Path>) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        self.formats.get(&ext).copied()
    }

    /// The options every read goes through.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads the file at `path` into a new track, merging release level data onto `release`.
    ///
    /// Returns `Ok(None)` for files no format is registered for.
    pub fn read_path(
        &self,
        path: impl AsRef<Path>,
        release: &mut Release,
    ) -> crate::Result<Option<Track>> {
        let path = path.as_ref();
        let format = match self.format_for(path) {
            Some(format) => format,
            None => {
                debug!("no format for {}", path.display());
                return Ok(None);
            }
        };
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        let mut track = Track::new();
        track.file_info = FileInfo {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: metadata.len(),
            mod_time: metadata
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |since| since.as_secs() as i64),
        };
        debug!("reading {} as {}", path.display(), format);
        format.read(BufReader::new(file), release, &mut track, &self.options)?;
        Ok(Some(track))
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new(ReadOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for() {
        let mut registry = Registry::default();
        assert_eq!(Some(Format::Flac), registry.format_for("a/01.FLAC"));
        assert_eq!(Some(Format::WavPack), registry.format_for("01.wv"));
        assert_eq!(Some(Format::Dsf), registry.format_for("01.Dsf"));
        assert_eq!(None, registry.format_for("cover.jpg"));
        assert_eq!(None, registry.format_for("README"));
        registry.register("MP2", Format::Mp3);
        assert_eq!(Some(Format::Mp3), registry.format_for("01.mp2"));
    }

    #[test]
    fn test_unknown_extension_is_skipped() {
        let registry = Registry::default();
        let mut release = Release::new();
        let track = registry.read_path("does/not/exist.ogg", &mut release).unwrap();
        assert!(track.is_none());
    }
}
