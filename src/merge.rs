//! Applies a decoded [`TagMap`] to the release and track it was read for.
//!
//! Keys are applied in a fixed order: the track position and title first, so that rules which
//! depend on them (disc validation, composite titles, disc ids) always see them, and the media
//! type last, after the track had a chance to be linked with its disc.

use crate::model::{disc_number_by_track_pos, IdType, Media, Release, Track};
use crate::tag::{TagKey, TagMap};
use crate::util::{self, REGULAR_DELIMITERS};
use crate::{Error, ErrorKind};
use log::debug;

/// Applies every known key of `tags`. The first failing rule aborts the merge; whatever was
/// applied before it stays applied.
pub fn apply(tags: &TagMap, release: &mut Release, track: &mut Track) -> crate::Result<()> {
    let mut ordered: Vec<(&TagKey, &String)> = tags.iter().collect();
    ordered.sort_by_key(|(key, _)| (stage(**key), **key));
    for (key, value) in ordered {
        apply_one(*key, value, release, track)?;
    }
    Ok(())
}

fn stage(key: TagKey) -> u8 {
    match key {
        TagKey::TrackNumber | TagKey::TrackTitle => 0,
        TagKey::DiscNumber | TagKey::DiscID | TagKey::CopyrightMessage => 2,
        TagKey::MediaType => 3,
        _ => 1,
    }
}

fn apply_one(key: TagKey, value: &str, release: &mut Release, track: &mut Track) -> crate::Result<()> {
    match key {
        // Titles
        TagKey::AlbumTitle => release.title = value.to_string(),
        TagKey::TrackTitle => track.title = value.to_string(),
        TagKey::TrackSubtitle => {
            if !track.title.is_empty() {
                track.title = format!("{} ({})", track.title, value);
            }
        }

        // People & organizations
        TagKey::AlbumArtist | TagKey::Performer => {
            for name in util::split_fields(value, &[';']) {
                release.actor_roles.add(name, "performer");
            }
        }
        TagKey::TrackArtist | TagKey::InvolvedPeople => add_actors(value, track),
        TagKey::Publisher | TagKey::Label => release.publishing_mut().name = value.to_string(),
        TagKey::CopyrightMessage => {
            if release.publishing.is_empty() {
                release.publishing_mut().name = value.to_string();
            }
        }

        // Counts & indexes
        TagKey::TrackNumber => {
            let (position, total) = split_counter(value);
            track.set_position(position);
            if let Some(total) = total {
                release.total_tracks = util::naive_int(total);
            }
        }
        TagKey::TrackTotal => release.total_tracks = util::naive_int(value),
        TagKey::DiscNumber => set_disc_number(value, release, track)?,
        TagKey::DiscTotal => release.total_discs = util::naive_int(value),
        TagKey::Length => match parse_duration(value) {
            Some(duration) => track.duration = duration,
            None => debug!("merge: unparsable length {:?}", value),
        },

        // Dates
        TagKey::Year => set_years(value, release),
        TagKey::ReleaseDate => release.year = util::naive_int(value),
        TagKey::OriginalReleaseDate => release.original_year = util::naive_int(value),
        TagKey::RecordingDates => track.add_comment(&format!("Recording: {}", value)),

        // Identifiers
        TagKey::ISRC => {
            track.ids.insert(IdType::ISRC, value.to_string());
        }
        TagKey::Barcode | TagKey::UPC => {
            release
                .publishing_mut()
                .ids
                .insert(IdType::Barcode, value.to_string());
        }
        TagKey::CatalogueNumber | TagKey::LabelNumber => {
            release.publishing_mut().catno = value.to_string()
        }
        TagKey::AccurateRipDiscID => {
            release.ids.insert(IdType::AccurateRip, value.to_string());
        }
        TagKey::DiscogsReleaseID => {
            release.ids.insert(IdType::Discogs, value.to_string());
        }
        TagKey::MusicbrainzAlbumID => {
            release.ids.insert(IdType::MusicBrainz, value.to_string());
        }
        TagKey::RutrackerID => {
            release.ids.insert(IdType::Rutracker, value.to_string());
        }
        TagKey::DiscID => set_disc_id(value, release, track),

        TagKey::Compilation => release.compilation = value.trim() != "0",
        TagKey::MediaType => set_media(value, release, track),

        // Style
        TagKey::Genre | TagKey::Style => {
            let genres = util::split_fields(value, &[';']).map(str::to_string);
            track.record.genres.extend(genres);
        }
        TagKey::Mood => {
            let moods = util::split_fields(value, REGULAR_DELIMITERS).map(str::to_string);
            track.record.moods.extend(moods);
        }

        // Miscellaneous
        TagKey::Country => release.country = value.trim().to_string(),
        TagKey::Comments | TagKey::Description => track.add_comment(value),
        TagKey::SyncedLyrics => track.set_lyrics(value, true),
        TagKey::UnsyncedLyrics => track.set_lyrics(value, false),
        TagKey::Language => track.set_lyrics_language(value),

        key => match record_role(key) {
            Some(role) => {
                for name in util::split_fields(value, &[';']) {
                    track.record.actor_roles.add(name, role);
                }
            }
            None => match composition_role(key) {
                Some(role) => {
                    for name in util::split_fields(value, &[';']) {
                        track.composition.actor_roles.add(name, role);
                    }
                }
                None => debug!("merge: nothing to do for {:?}", key),
            },
        },
    }
    Ok(())
}

fn record_role(key: TagKey) -> Option<&'static str> {
    let role = match key {
        TagKey::Arranger => "arranger",
        TagKey::Conductor => "conductor",
        TagKey::Engineer => "engineer",
        TagKey::Ensemble => "ensemble",
        TagKey::MixDJ => "mix-DJ",
        TagKey::MixEngineer => "mix-engineer",
        TagKey::Producer => "producer",
        TagKey::RemixedBy => "remixer",
        TagKey::Soloists => "soloist",
        _ => return None,
    };
    Some(role)
}

fn composition_role(key: TagKey) -> Option<&'static str> {
    let role = match key {
        TagKey::AuthorWriter | TagKey::Writer => "writer",
        TagKey::Composer => "composer",
        TagKey::Lyricist => "lyricist",
        _ => return None,
    };
    Some(role)
}

/// Parses a list like `"Karajan, conductor; BPO"`: entries are separated by `;`, the first field
/// of an entry is the name and every further field a role.
fn add_actors(value: &str, track: &mut Track) {
    for entry in util::split_fields(value, &[';']) {
        let mut fields = util::split_fields(entry, &['-', ',', '(', ')']);
        let name = match fields.next() {
            Some(name) => name,
            None => continue,
        };
        let mut has_role = false;
        for role in fields {
            track.record.actor_roles.add(name, role);
            has_role = true;
        }
        if !has_role {
            track.record.actor_roles.add_actor(name);
        }
    }
}

/// Splits `"N/M"` into its parts. The total is `None` for a plain `"N"`.
fn split_counter(value: &str) -> (&str, Option<&str>) {
    match value.split_once('/') {
        Some((n, m)) => (n.trim(), Some(m.trim())),
        None => (value.trim(), None),
    }
}

fn set_years(value: &str, release: &mut Release) {
    let fields: Vec<&str> = util::split_fields(value, REGULAR_DELIMITERS).collect();
    match fields.as_slice() {
        [] => {}
        [year] => release.year = util::naive_int(year),
        [original, .., year] => {
            release.original_year = util::naive_int(original);
            release.year = util::naive_int(year);
        }
    }
}

/// A disc number is only checked once the track position is known. It must agree with the disc
/// the position implies.
fn set_disc_number(value: &str, release: &mut Release, track: &mut Track) -> crate::Result<()> {
    let (number, total) = split_counter(value);
    if let Some(total) = total {
        release.total_discs = util::naive_int(total);
    }
    if track.position.is_empty() {
        return Ok(());
    }
    let number: u32 = number.parse().map_err(|_| {
        Error::new(
            ErrorKind::Validation,
            format!("merge: disc number {:?} is not a number", number),
        )
    })?;
    let implied = disc_number_by_track_pos(&track.position);
    if number != implied {
        return Err(Error::new(
            ErrorKind::Validation,
            format!(
                "merge: disc number {} contradicts track position {:?}",
                number, track.position
            ),
        ));
    }
    track.link_with_disc(release.disc(number));
    Ok(())
}

fn set_disc_id(value: &str, release: &mut Release, track: &mut Track) {
    if track.position.is_empty() {
        debug!("merge: disc id without a track position");
        return;
    }
    let number = match track.disc_number() {
        Some(number) => number,
        None => {
            let number = disc_number_by_track_pos(&track.position);
            track.link_with_disc(release.disc(number));
            number
        }
    };
    release
        .disc(number)
        .ids
        .insert(IdType::DiscId, value.to_string());
}

fn set_media(value: &str, release: &mut Release, track: &mut Track) {
    let number = match track.disc_number() {
        Some(number) if number != 0 => number,
        _ => return,
    };
    match Media::decode(value) {
        Some(media) => release.disc(number).media = Some(media),
        None => debug!("merge: unknown media {:?}", value),
    }
}

/// Parses `"hh:mm:ss"` (or `"mm:ss"`) or a plain number of milliseconds.
fn parse_duration(value: &str) -> Option<u64> {
    let value = value.trim();
    if !value.contains(':') {
        return value.parse().ok();
    }
    let mut seconds = 0u64;
    for field in value.split(':') {
        seconds = seconds.checked_mul(60)?.checked_add(field.trim().parse().ok()?)?;
    }
    seconds.checked_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(pairs: &[(TagKey, &str)], release: &mut Release, track: &mut Track) -> crate::Result<()> {
        let tags: TagMap = pairs
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        apply(&tags, release, track)
    }

    #[test]
    fn test_track_number() {
        let mut release = Release::new();
        let mut track = Track::new();
        merge(&[(TagKey::TrackNumber, "3")], &mut release, &mut track).unwrap();
        assert_eq!("03", track.position);
        assert_eq!(0, release.total_tracks);
        merge(&[(TagKey::TrackNumber, "3/12")], &mut release, &mut track).unwrap();
        assert_eq!("03", track.position);
        assert_eq!(12, release.total_tracks);
    }

    #[test]
    fn test_years() {
        let mut release = Release::new();
        set_years("", &mut release);
        assert_eq!((0, 0), (release.year, release.original_year));
        set_years("2005", &mut release);
        assert_eq!((2005, 0), (release.year, release.original_year));
        set_years("1961,1962/2005", &mut release);
        assert_eq!((2005, 1961), (release.year, release.original_year));
    }

    #[test]
    fn test_actor_list() {
        let mut release = Release::new();
        let mut track = Track::new();
        let pairs = [(TagKey::TrackArtist, "Karajan, conductor; BPO")];
        merge(&pairs, &mut release, &mut track).unwrap();
        let actors = &track.record.actor_roles;
        assert_eq!(2, actors.len());
        assert_eq!(vec!["conductor"], actors.get("Karajan").unwrap().roles);
        assert!(actors.get("BPO").unwrap().roles.is_empty());
    }

    #[test]
    fn test_role_keys() {
        let mut release = Release::new();
        let mut track = Track::new();
        let pairs = [
            (TagKey::AlbumArtist, "Miles Davis"),
            (TagKey::Composer, "Bill Evans; Miles Davis"),
            (TagKey::Producer, "Teo Macero"),
        ];
        merge(&pairs, &mut release, &mut track).unwrap();
        let performer = release.actor_roles.get("Miles Davis").unwrap();
        assert_eq!(vec!["performer"], performer.roles);
        assert_eq!(2, track.composition.actor_roles.len());
        let producer = track.record.actor_roles.get("Teo Macero").unwrap();
        assert_eq!(vec!["producer"], producer.roles);
    }

    #[test]
    fn test_disc_number_validation() {
        let mut release = Release::new();
        let mut track = Track::new();
        merge(&[(TagKey::DiscNumber, "1")], &mut release, &mut track).unwrap();
        assert_eq!(None, track.disc_number());
        assert!(release.discs.is_empty());

        let pairs = [(TagKey::TrackNumber, "203"), (TagKey::DiscNumber, "2/3")];
        merge(&pairs, &mut release, &mut track).unwrap();
        assert_eq!(Some(2), track.disc_number());
        assert_eq!(3, release.total_discs);

        let err = merge(&[(TagKey::DiscNumber, "1")], &mut release, &mut track).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation));
        let err = merge(&[(TagKey::DiscNumber, "Vol.2")], &mut release, &mut track).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation));
    }

    #[test]
    fn test_disc_id_and_media() {
        let mut release = Release::new();
        let mut track = Track::new();
        merge(&[(TagKey::MediaType, "LP")], &mut release, &mut track).unwrap();
        assert!(release.discs.is_empty());

        let pairs = [
            (TagKey::MediaType, "SACD"),
            (TagKey::DiscID, "b40e8c0d"),
            (TagKey::TrackNumber, "1"),
        ];
        merge(&pairs, &mut release, &mut track).unwrap();
        assert_eq!(Some(1), track.disc_number());
        let disc = release.find_disc(1).unwrap();
        assert_eq!(Some(Media::SACD), disc.media);
        assert_eq!(Some(&"b40e8c0d".to_string()), disc.ids.get(&IdType::DiscId));
    }

    #[test]
    fn test_publishing() {
        let mut release = Release::new();
        let mut track = Track::new();
        let pairs = [
            (TagKey::CopyrightMessage, "(P) 1959 Columbia"),
            (TagKey::CatalogueNumber, "CL 1355"),
            (TagKey::UPC, "074646493524"),
        ];
        merge(&pairs, &mut release, &mut track).unwrap();
        // The catalogue number created the entry, so the copyright is not used as the label.
        assert_eq!(1, release.publishing.len());
        let publishing = &release.publishing[0];
        assert_eq!("", publishing.name);
        assert_eq!("CL 1355", publishing.catno);
        assert_eq!(
            Some(&"074646493524".to_string()),
            publishing.ids.get(&IdType::Barcode)
        );

        let mut release = Release::new();
        merge(
            &[(TagKey::CopyrightMessage, "Columbia")],
            &mut release,
            &mut track,
        )
        .unwrap();
        assert_eq!("Columbia", release.publishing[0].name);
    }

    #[test]
    fn test_titles_and_misc() {
        let mut release = Release::new();
        let mut track = Track::new();
        let pairs = [
            (TagKey::TrackSubtitle, "Take 2"),
            (TagKey::TrackTitle, "So What"),
            (TagKey::Length, "00:09:22"),
            (TagKey::RecordingDates, "1959-03-02"),
            (TagKey::Genre, "Jazz; Modal"),
            (TagKey::Mood, "Calm, Cool"),
            (TagKey::Compilation, "1"),
            (TagKey::UnsyncedLyrics, "instrumental"),
            (TagKey::Language, "eng"),
        ];
        merge(&pairs, &mut release, &mut track).unwrap();
        assert_eq!("So What (Take 2)", track.title);
        assert_eq!(562_000, track.duration);
        assert_eq!("Recording: 1959-03-02", track.notes);
        assert_eq!(vec!["Jazz", "Modal"], track.record.genres);
        assert_eq!(vec!["Calm", "Cool"], track.record.moods);
        assert!(release.compilation);
        let lyrics = track.lyrics.unwrap();
        assert_eq!("instrumental", lyrics.text);
        assert_eq!("eng", lyrics.language);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(Some(562_000), parse_duration("9:22"));
        assert_eq!(Some(3_723_000), parse_duration("1:02:03"));
        assert_eq!(Some(1500), parse_duration("1500"));
        assert_eq!(None, parse_duration("long"));
        assert_eq!(None, parse_duration("1:xx"));
    }
}
