//! Genre references in TCON frames. ID3v2.3 writers refer to the ID3v1 genre list as `(N)`,
//! optionally followed by a refinement; ID3v2.4 writers may store the bare number.

static GENRE_LIST: &[&str] = &[
    "Blues",
    "Classic Rock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "New Age",
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae",
    "Rock",
    "Techno",
    "Industrial",
    "Alternative",
    "Ska",
    "Death Metal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion",
    "Trance",
    "Classical",
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "Sound Clip",
    "Gospel",
    "Noise",
    "Alternative Rock",
    "Bass",
    "Soul",
    "Punk",
    "Space",
    "Meditative",
    "Instrumental Pop",
    "Instrumental Rock",
    "Ethnic",
    "Gothic",
    "Darkwave",
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "Southern Rock",
    "Comedy",
    "Cult",
    "Gangsta",
    "Top 40",
    "Christian Rap",
    "Pop/Funk",
    "Jungle",
    "Native US",
    "Cabaret",
    "New Wave",
    "Psychadelic",
    "Rave",
    "Showtunes",
    "Trailer",
    "Lo-Fi",
    "Tribal",
    "Acid Punk",
    "Acid Jazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock & Roll",
    "Hard Rock",
    "Folk",
    "Folk-Rock",
    "National Folk",
    "Swing",
    "Fast Fusion",
    "Bebob",
    "Latin",
    "Revival",
    "Celtic",
    "Bluegrass",
    "Avantgarde",
    "Gothic Rock",
    "Progressive Rock",
    "Psychedelic Rock",
    "Symphonic Rock",
    "Slow Rock",
    "Big Band",
    "Chorus",
    "Easy Listening",
    "Acoustic",
    "Humour",
    "Speech",
    "Chanson",
    "Opera",
    "Chamber Music",
    "Sonata",
    "Symphony",
    "Booty Bass",
    "Primus",
    "Porn Groove",
    "Satire",
    "Slow Jam",
    "Club",
    "Tango",
    "Samba",
    "Folklore",
    "Ballad",
    "Power Ballad",
    "Rhytmic Soul",
    "Freestyle",
    "Duet",
    "Punk Rock",
    "Drum Solo",
    "Acapella",
    "Euro-House",
    "Dance Hall",
    "Goa",
    "Drum & Bass",
    "Club-House",
    "Hardcore",
    "Terror",
    "Indie",
    "BritPop",
    "Negerpunk",
    "Polsk Punk",
    "Beat",
    "Christian Gangsta",
];

/// Replaces genre references with genre names. Multiple genres are joined with `"; "`. Values
/// that are not references are returned unchanged.
pub fn resolve(value: &str) -> String {
    let value = value.trim();
    if let Some(escaped) = value.strip_prefix("((") {
        return format!("({}", escaped);
    }
    if let Ok(index) = value.parse::<usize>() {
        return match GENRE_LIST.get(index) {
            Some(name) => name.to_string(),
            None => value.to_string(),
        };
    }

    let mut names: Vec<String> = Vec::new();
    let mut rest = value;
    while let Some(inner) = rest.strip_prefix('(') {
        let Some(close) = inner.find(')') else {
            break;
        };
        let name = match &inner[..close] {
            "RX" => "Remix",
            "CR" => "Cover",
            reference => match reference.parse::<usize>().ok().and_then(|i| GENRE_LIST.get(i)) {
                Some(name) => *name,
                None => break,
            },
        };
        names.push(name.to_string());
        rest = &inner[close + 1..];
    }
    if names.is_empty() {
        return value.to_string();
    }

    let refinement = match rest.strip_prefix("((") {
        Some(escaped) => format!("({}", escaped),
        None => rest.trim().to_string(),
    };
    if !refinement.is_empty() && !names.contains(&refinement) {
        names.push(refinement);
    }
    names.join("; ")
}
