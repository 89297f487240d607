mod common;

use common::*;
use mdreader::{Format, IdType, PictureType, ReadOptions, Release, Track};
use std::io::Cursor;

fn read(data: &[u8], options: &ReadOptions) -> (mdreader::Result<()>, Release, Track, u64) {
    let mut reader = Cursor::new(data);
    let mut release = Release::new();
    let mut track = Track::new();
    let result = Format::Flac.read(&mut reader, &mut release, &mut track, options);
    (result, release, track, reader.position())
}

#[test]
fn stream_info_properties() {
    let data = flac_file(&[(0, stream_info(44100, 1, 16, 22050))]);
    let (result, _, track, _) = read(&data, &ReadOptions::new());
    result.unwrap();
    assert_eq!(500, track.duration);
    assert_eq!(44100, track.audio.sample_rate);
    assert_eq!(1, track.audio.channels);
    assert_eq!(16, track.audio.bits_per_sample);
    let expected = (0.008 * data.len() as f64 / 0.5).round() as u32;
    assert_eq!(expected, track.audio.avg_bitrate);
}

#[test]
fn bitrate_uses_declared_file_size() {
    let data = flac_file(&[(0, stream_info(48000, 2, 24, 48000))]);
    let mut release = Release::new();
    let mut track = Track::new();
    track.file_info.size = 1_000_000;
    Format::Flac
        .read(Cursor::new(data), &mut release, &mut track, &ReadOptions::new())
        .unwrap();
    assert_eq!(1000, track.duration);
    assert_eq!(8000, track.audio.avg_bitrate);
}

#[test]
fn zero_sample_rate_is_rejected() {
    let data = flac_file(&[(0, stream_info(0, 2, 16, 0))]);
    let (result, _, _, _) = read(&data, &ReadOptions::new());
    assert!(matches!(result.unwrap_err().kind, mdreader::ErrorKind::Parsing));
}

#[test]
fn vorbis_comments_are_merged() {
    let data = flac_file(&[
        (0, stream_info(44100, 2, 16, 44100)),
        (
            4,
            vorbis_comment(&[
                "ALBUM=Kind of Blue",
                "TITLE=All Blues",
                "ARTIST=Miles Davis, trumpet; Bill Evans, piano",
                "TRACKNUMBER=4/5",
                "DISCNUMBER=1",
                "DATE=1959",
                "MEDIA=CD",
                "LABEL=Columbia",
                "ISRC=USSM15900116",
            ]),
        ),
        (1, vec![0; 16]),
    ]);
    let (result, release, track, _) = read(&data, &ReadOptions::new());
    result.unwrap();
    assert_eq!("Kind of Blue", release.title);
    assert_eq!("All Blues", track.title);
    assert_eq!("04", track.position);
    assert_eq!(5, release.total_tracks);
    assert_eq!(1959, release.year);
    assert_eq!("Columbia", release.publishing[0].name);
    assert_eq!(
        Some(&"USSM15900116".to_string()),
        track.ids.get(&IdType::ISRC)
    );
    assert_eq!(Some(1), track.disc_number());
    assert_eq!(Some(mdreader::Media::CD), release.find_disc(1).unwrap().media);
    let miles = track.record.actor_roles.get("Miles Davis").unwrap();
    assert_eq!(vec!["trumpet"], miles.roles);
}

#[test]
fn leading_id3v2_tag() {
    let mut data = id3v23_tag(&[("TALB", b"\x00Sketches of Spain")]);
    data.extend(flac_file(&[(0, stream_info(44100, 2, 16, 441))]));
    let (result, release, track, _) = read(&data, &ReadOptions::new());
    result.unwrap();
    assert_eq!("Sketches of Spain", release.title);
    assert_eq!(10, track.duration);
}

#[test]
fn first_picture_is_retained() {
    let data = flac_file(&[
        (0, stream_info(44100, 2, 16, 44100)),
        (6, flac_picture(3, "image/jpeg", "front", b"\xff\xd8first")),
        (
            6,
            flac_picture(4, "image/png", "http://example.com/back.png", b"\x89PNGsecond"),
        ),
    ]);
    let (result, release, _, position) = read(&data, &ReadOptions::new().decode_pictures(true));
    result.unwrap();
    assert_eq!(1, release.pictures.len());
    let cover = release.cover().unwrap();
    assert_eq!(PictureType::CoverFront, cover.picture_type);
    assert_eq!("image/jpeg", cover.mime_type);
    assert_eq!(Some("front"), cover.notes.as_deref());
    assert_eq!(b"\xff\xd8first".to_vec(), cover.data);
    assert_eq!(600, cover.image_info.unwrap().width);

    let (result, release, _, skipped_position) =
        read(&data, &ReadOptions::new().decode_pictures(false));
    result.unwrap();
    assert!(release.pictures.is_empty());
    assert_eq!(position, skipped_position);
    assert_eq!(data.len() as u64 - 4, position);
}

#[test]
fn picture_description_as_url() {
    let data = flac_file(&[(
        6,
        flac_picture(3, "-->", "http://example.com/front.jpg", b""),
    )]);
    let (result, release, _, _) = read(&data, &ReadOptions::new().decode_pictures(true));
    result.unwrap();
    let cover = release.cover().unwrap();
    assert_eq!(Some("http://example.com/front.jpg"), cover.cover_url.as_deref());
    assert_eq!(None, cover.notes);
}
