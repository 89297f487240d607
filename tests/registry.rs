mod common;

use common::*;
use mdreader::{Format, ReadOptions, Registry, Release};
use std::fs;

#[test]
fn read_path_fills_file_info() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("01 - So What.FLAC");
    let data = flac_file(&[
        (0, stream_info(44100, 2, 16, 44100 * 562)),
        (4, vorbis_comment(&["TITLE=So What", "TRACKNUMBER=1"])),
    ]);
    fs::write(&path, &data).unwrap();

    let registry = Registry::new(ReadOptions::new());
    let mut release = Release::new();
    let track = registry.read_path(&path, &mut release).unwrap().unwrap();
    assert_eq!("01 - So What.FLAC", track.file_info.name);
    assert_eq!(data.len() as u64, track.file_info.size);
    assert!(track.file_info.mod_time > 0);
    assert_eq!("So What", track.title);
    assert_eq!(562_000, track.duration);
    assert_eq!(Some(1), track.disc_number());
    assert_eq!(1, release.discs.len());
}

#[test]
fn tracks_share_the_release() {
    let dir = tempfile::tempdir().unwrap();
    for (name, position) in [("a.wv", "101"), ("b.wv", "201")] {
        let tag = ape_tag(&[("Album", b"Porgy and Bess"), ("Track", position.as_bytes())]);
        fs::write(dir.path().join(name), wavpack_file(16, &tag)).unwrap();
    }
    fs::write(dir.path().join("cover.jpg"), b"\xff\xd8").unwrap();

    let registry = Registry::default();
    let mut release = Release::new();
    let mut names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    names.sort();
    let mut tracks = Vec::new();
    for path in names {
        if let Some(track) = registry.read_path(&path, &mut release).unwrap() {
            tracks.push(track);
        }
    }
    assert_eq!(2, tracks.len());
    assert_eq!("Porgy and Bess", release.title);
    assert_eq!(Some(1), tracks[0].disc_number());
    assert_eq!(Some(2), tracks[1].disc_number());
    assert_eq!(2, release.discs.len());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.mp3");
    fs::write(&path, b"not an mpeg stream").unwrap();
    let registry = Registry::default();
    let mut release = Release::new();
    assert!(registry.read_path(&path, &mut release).is_err());
}

#[test]
fn registered_extension() {
    let mut registry = Registry::default();
    assert_eq!(None, registry.format_for("track.mp2"));
    registry.register("mp2", Format::Mp3);
    assert_eq!(Some(Format::Mp3), registry.format_for("track.MP2"));
}
