use mdreader::{apply, Release, TagKey, TagMap, Track};

fn years(key: TagKey, value: &str) -> Release {
    let mut tags = TagMap::new();
    tags.insert(key, value);
    let mut release = Release::new();
    apply(&tags, &mut release, &mut Track::new()).unwrap();
    release
}

#[test]
fn single_year() {
    let release = years(TagKey::Year, "2014");
    assert_eq!(2014, release.year);
    assert_eq!(0, release.original_year);
}

#[test]
fn original_and_reissue() {
    let release = years(TagKey::Year, "1961,1962/2005");
    assert_eq!(1961, release.original_year);
    assert_eq!(2005, release.year);
}

#[test]
fn empty() {
    let release = years(TagKey::Year, "");
    assert_eq!(0, release.year);
    assert_eq!(0, release.original_year);
}

#[test]
fn invalid() {
    let release = years(TagKey::Year, "invalid");
    assert_eq!(0, release.year);
}

#[test]
fn dates() {
    assert_eq!(1959, years(TagKey::ReleaseDate, "1959-08-17").year);
    assert_eq!(1959, years(TagKey::OriginalReleaseDate, "1959").original_year);
}
