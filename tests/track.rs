mod common;

use common::*;
use mdreader::{ErrorKind, Format, ReadOptions, Release, Track};
use std::io::Cursor;

fn read_id3(frames: &[(&str, &[u8])]) -> (mdreader::Result<()>, Release, Track) {
    let mut release = Release::new();
    let mut track = Track::new();
    let data = mp3_file(&id3v23_tag(frames), 4000);
    let result = Format::Mp3.read(Cursor::new(data), &mut release, &mut track, &ReadOptions::new());
    (result, release, track)
}

#[test]
fn latin1() {
    let (result, release, track) = read_id3(&[("TRCK", b"\x005/10")]);
    result.unwrap();
    assert_eq!("05", track.position);
    assert_eq!(10, release.total_tracks);
}

#[test]
fn utf16_with_bom() {
    let (result, release, track) =
        read_id3(&[("TRCK", b"\x01\xff\xfe5\x00/\x001\x000\x00\x00\x00")]);
    result.unwrap();
    assert_eq!("05", track.position);
    assert_eq!(10, release.total_tracks);
}

#[test]
fn only_track() {
    let (result, release, track) = read_id3(&[("TRCK", b"\x035")]);
    result.unwrap();
    assert_eq!("05", track.position);
    assert_eq!(0, release.total_tracks);
}

#[test]
fn disc_from_position() {
    let (result, release, track) = read_id3(&[("TRCK", b"\x00203"), ("TPOS", b"\x002")]);
    result.unwrap();
    assert_eq!("203", track.position);
    assert_eq!(Some(2), track.disc_number());
    assert_eq!(vec![2], release.discs.iter().map(|d| d.number).collect::<Vec<_>>());
}

#[test]
fn contradicting_disc_number() {
    let (result, _, _) = read_id3(&[("TRCK", b"\x00203"), ("TPOS", b"\x001")]);
    assert!(matches!(result.unwrap_err().kind, ErrorKind::Validation));
}

#[test]
fn invalid_utf16() {
    let (result, _, _) = read_id3(&[("TRCK", b"\x01\xff\xfe5")]);
    assert!(matches!(result.unwrap_err().kind, ErrorKind::StringDecoding(_)));
}
