mod common;

use common::*;
use mdreader::{ErrorKind, Format, ReadOptions, Release, Track};
use std::io::Cursor;

fn read(data: Vec<u8>) -> (mdreader::Result<()>, Release, Track) {
    let mut release = Release::new();
    let mut track = Track::new();
    let result = Format::Dsf.read(Cursor::new(data), &mut release, &mut track, &ReadOptions::new());
    (result, release, track)
}

#[test]
fn format_chunk_properties() {
    let data = dsf_file(2, 2_822_400, 5_644_800, 4096, &[]);
    let len = data.len() as f64;
    let (result, _, track) = read(data);
    result.unwrap();
    assert_eq!(2000, track.duration);
    assert_eq!(2, track.audio.channels);
    assert_eq!(2_822_400, track.audio.sample_rate);
    assert_eq!(1, track.audio.bits_per_sample);
    assert_eq!((8.0 * len / 2000.0).round() as u32, track.audio.avg_bitrate);
}

#[test]
fn trailing_id3v2_tag() {
    let tag = id3v23_tag(&[("TIT2", b"\x00Flamenco Sketches"), ("TRCK", b"\x005")]);
    let (result, _, track) = read(dsf_file(2, 2_822_400, 2_822_400, 1024, &tag));
    result.unwrap();
    assert_eq!("Flamenco Sketches", track.title);
    assert_eq!("05", track.position);
    assert_eq!(1000, track.duration);
}

#[test]
fn file_size_mismatch() {
    let mut data = dsf_file(2, 2_822_400, 2_822_400, 1024, &[]);
    data.extend([0; 10]);
    let (result, _, _) = read(data);
    assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
}

#[test]
fn wrong_chunk_size() {
    let mut data = dsf_file(2, 2_822_400, 2_822_400, 1024, &[]);
    data[4] = 30;
    let (result, _, _) = read(data);
    assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
}

#[test]
fn zero_sample_rate() {
    let (result, _, _) = read(dsf_file(2, 0, 2_822_400, 1024, &[]));
    assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
}

#[test]
fn sample_count_out_of_range() {
    let (result, _, _) = read(dsf_file(2, 2_822_400, u64::MAX / 10, 16, &[]));
    assert!(matches!(result.unwrap_err().kind, ErrorKind::Parsing));
}
