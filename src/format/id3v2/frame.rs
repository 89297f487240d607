use crate::format::id3v2::genre;
use crate::options::ReadOptions;
use crate::picture::{Picture, PictureType};
use crate::stream::encoding::Encoding;
use crate::tag::map::TagSink;
use crate::tag::TagKey;
use crate::util;
use crate::{Error, ErrorKind, Release};
use lazy_static::lazy_static;
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    static ref ID_2_TO_3: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("COM", "COMM");
        m.insert("IPL", "IPLS");
        m.insert("PIC", "APIC");
        m.insert("SLT", "SYLT");
        m.insert("TAL", "TALB");
        m.insert("TCM", "TCOM");
        m.insert("TCO", "TCON");
        m.insert("TCP", "TCMP");
        m.insert("TCR", "TCOP");
        m.insert("TDA", "TDAT");
        m.insert("TFT", "TFLT");
        m.insert("TLA", "TLAN");
        m.insert("TLE", "TLEN");
        m.insert("TMT", "TMED");
        m.insert("TOA", "TOPE");
        m.insert("TOR", "TORY");
        m.insert("TP1", "TPE1");
        m.insert("TP2", "TPE2");
        m.insert("TP3", "TPE3");
        m.insert("TP4", "TPE4");
        m.insert("TPA", "TPOS");
        m.insert("TPB", "TPUB");
        m.insert("TRC", "TSRC");
        m.insert("TRD", "TRDA");
        m.insert("TRK", "TRCK");
        m.insert("TT1", "TIT1");
        m.insert("TT2", "TIT2");
        m.insert("TT3", "TIT3");
        m.insert("TXT", "TEXT");
        m.insert("TXX", "TXXX");
        m.insert("TYE", "TYER");
        m.insert("ULT", "USLT");
        m.insert("WAR", "WOAR");
        m.insert("WAS", "WOAS");
        m.insert("WCM", "WCOM");
        m.insert("WXX", "WXXX");
        m
    };
}

/// Returns the ID3v2.3 frame id for an ID3v2.2 one.
pub fn convert_id_2_to_3(id: &str) -> Option<&'static str> {
    ID_2_TO_3.get(id).copied()
}

/// Everything a frame may write to besides the tag sink.
pub struct Target<'a> {
    pub release: &'a mut Release,
    pub options: &'a ReadOptions,
    /// Major version of the tag the frame belongs to.
    pub version: u8,
}

/// Decodes one frame body and routes its content.
pub fn apply(sink: &mut TagSink, target: &mut Target, id: &str, data: &[u8]) -> crate::Result<()> {
    match id {
        "APIC" => picture(target, data),
        "COMM" => {
            let (_, description, text) = comment(data)?;
            add_described(sink, id, &description, text);
            Ok(())
        }
        "USLT" => {
            let (language, description, text) = comment(data)?;
            if add_described(sink, id, &description, text) {
                set_language(sink, &language);
            }
            Ok(())
        }
        "SYLT" => {
            let (language, text) = synced_lyrics(data)?;
            sink.add(id, None, id, text);
            set_language(sink, &language);
            Ok(())
        }
        "TXXX" | "WXXX" => {
            let (description, value) = extended(id, data)?;
            let raw_name = format!("{}:{}", id, description);
            sink.add(id, Some(&description.to_uppercase()), &raw_name, value);
            Ok(())
        }
        "TIPL" | "IPLS" => people(sink, id, data),
        "TCON" => {
            let genres: Vec<String> = text_values(data)?
                .iter()
                .map(|value| genre::resolve(value))
                .collect();
            add_text(sink, id, genres.join("; "));
            Ok(())
        }
        _ if id.starts_with('T') => {
            add_text(sink, id, text_values(data)?.join("; "));
            Ok(())
        }
        _ if id.starts_with('W') => {
            let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
            add_text(sink, id, util::string_from_latin1(&data[..end])?);
            Ok(())
        }
        _ => {
            trace!("id3v2: keeping binary frame {} as text", id);
            let value = String::from_utf8_lossy(data);
            sink.add(id, None, id, value.trim_end_matches('\0').to_string());
            Ok(())
        }
    }
}

fn add_text(sink: &mut TagSink, id: &str, value: String) {
    if !value.is_empty() {
        sink.add(id, None, id, value);
    }
}

/// Routes a comment style frame. A description with its own table entry selects that key,
/// otherwise the frame id alone does. A described frame never replaces a value already mapped
/// under the plain key; it is kept as `ID:description` instead. Returns true if the text was
/// mapped.
fn add_described(sink: &mut TagSink, id: &str, description: &str, text: String) -> bool {
    if text.is_empty() {
        return false;
    }
    if description.is_empty() {
        sink.add(id, None, id, text);
        return sink.key_for(id, None).is_some();
    }
    let raw_name = format!("{}:{}", id, description);
    let sub = description.to_uppercase();
    if sink.key_for(id, Some(&sub)).is_some() {
        sink.add(id, Some(&sub), &raw_name, text);
        return true;
    }
    match sink.key_for(id, None) {
        Some(key) if !sink.contains(key) => {
            sink.insert(key, text);
            true
        }
        _ => {
            sink.add(id, Some(&sub), &raw_name, text);
            false
        }
    }
}

fn set_language(sink: &mut TagSink, language: &str) {
    let known = language.chars().all(|c| c.is_ascii_alphabetic())
        && !language.is_empty()
        && !language.eq_ignore_ascii_case("xxx");
    if known && !sink.contains(TagKey::Language) {
        sink.insert(TagKey::Language, language.to_string());
    }
}

fn split_encoding(data: &[u8]) -> crate::Result<(Encoding, &[u8])> {
    let (&selector, rest) = data
        .split_first()
        .ok_or_else(|| Error::new(ErrorKind::Parsing, "id3v2: frame is empty"))?;
    Ok((Encoding::from_byte(selector)?, rest))
}

/// Decodes the values of a text frame. ID3v2.4 separates multiple values with the terminator.
fn text_values(data: &[u8]) -> crate::Result<Vec<String>> {
    Ok(split_values(&util::decode_selected_text(data)?)
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect())
}

fn split_values(text: &str) -> Vec<String> {
    text.split('\0')
        .map(|v| v.trim_start_matches('\u{feff}').trim().to_string())
        .collect()
}

/// Parses COMM and USLT bodies into language, description and text.
fn comment(data: &[u8]) -> crate::Result<(String, String, String)> {
    let (encoding, rest) = split_encoding(data)?;
    if rest.len() < 3 {
        return Err(Error::new(
            ErrorKind::Parsing,
            "id3v2: comment frame is missing its language",
        ));
    }
    let language = util::string_from_latin1(&rest[..3])?
        .trim_matches('\0')
        .to_string();
    let rest = &rest[3..];
    let (description, text) = match util::split_terminated(encoding, rest) {
        Ok((description, text)) => (util::decode_text(encoding, description)?, text),
        Err(_) => (String::new(), rest),
    };
    let text = util::decode_text(encoding, text)?;
    Ok((language, description.trim().to_string(), text))
}

/// Parses TXXX and WXXX bodies into description and value. The WXXX value is always Latin-1.
fn extended(id: &str, data: &[u8]) -> crate::Result<(String, String)> {
    let (encoding, rest) = split_encoding(data)?;
    let (description, value) = util::split_terminated(encoding, rest)?;
    let description = util::decode_text(encoding, description)?;
    let value = if id == "WXXX" {
        let end = value.iter().position(|&b| b == 0).unwrap_or(value.len());
        util::string_from_latin1(&value[..end])?
    } else {
        split_values(&util::decode_text(encoding, value)?)
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    };
    Ok((description.trim().to_string(), value))
}

/// Parses a SYLT body, joining the text fragments line by line.
fn synced_lyrics(data: &[u8]) -> crate::Result<(String, String)> {
    let (encoding, rest) = split_encoding(data)?;
    if rest.len() < 5 {
        return Err(Error::new(
            ErrorKind::Parsing,
            "id3v2: synchronised lyrics frame is too short",
        ));
    }
    let language = util::string_from_latin1(&rest[..3])?
        .trim_matches('\0')
        .to_string();
    // Language, timestamp format and content type.
    let (_, mut rest) = util::split_terminated(encoding, &rest[5..])?;
    let mut lines = Vec::new();
    while !rest.is_empty() {
        let Ok((fragment, tail)) = util::split_terminated(encoding, rest) else {
            break;
        };
        let line = util::decode_text(encoding, fragment)?;
        lines.push(line.trim_matches(&['\n', '\r'][..]).to_string());
        if tail.len() < 4 {
            break;
        }
        rest = &tail[4..];
    }
    Ok((language, lines.join("\n")))
}

/// Resolves TIPL/IPLS role and name pairs. Roles with a canonical key are stored under it, all
/// other pairs are folded into the frame's own key as `name (role)` entries.
fn people(sink: &mut TagSink, id: &str, data: &[u8]) -> crate::Result<()> {
    let values = split_values(&util::decode_selected_text(data)?);
    let mut by_key: BTreeMap<TagKey, Vec<String>> = BTreeMap::new();
    let mut unmapped = Vec::new();
    for pair in values.chunks(2) {
        let role = pair[0].as_str();
        let name = pair.get(1).map(String::as_str).unwrap_or("");
        if name.is_empty() {
            continue;
        }
        match sink.key_for(id, Some(&role.to_uppercase())) {
            Some(key) => by_key.entry(key).or_default().push(name.to_string()),
            None if role.is_empty() => unmapped.push(name.to_string()),
            None => unmapped.push(format!("{} ({})", name, role)),
        }
    }
    for (key, names) in by_key {
        sink.insert(key, names.join("; "));
    }
    if !unmapped.is_empty() {
        sink.add(id, None, id, unmapped.join("; "));
    }
    Ok(())
}

fn mime_from_v22_format(format: &[u8]) -> String {
    match format {
        b"JPG" => "image/jpeg".to_string(),
        b"PNG" => "image/png".to_string(),
        other => format!("image/{}", String::from_utf8_lossy(other).to_lowercase()),
    }
}

/// Parses an APIC (or ID3v2.2 PIC) body onto the release, unless a cover is already stored.
fn picture(target: &mut Target, data: &[u8]) -> crate::Result<()> {
    if !target.options.pictures_enabled() {
        trace!("id3v2: picture decoding disabled");
        return Ok(());
    }
    if target.release.has_cover() {
        debug!("id3v2: cover already present, skipping picture");
        return Ok(());
    }
    let (encoding, rest) = split_encoding(data)?;
    let (mime_type, rest) = if target.version == 2 {
        if rest.len() < 3 {
            return Err(Error::new(
                ErrorKind::Parsing,
                "id3v2: picture frame is missing its image format",
            ));
        }
        (mime_from_v22_format(&rest[..3]), &rest[3..])
    } else {
        let (mime_type, rest) = util::split_terminated(Encoding::Latin1, rest)?;
        (util::string_from_latin1(mime_type)?, rest)
    };
    let (&picture_type, rest) = rest.split_first().ok_or_else(|| {
        Error::new(ErrorKind::Parsing, "id3v2: picture frame is missing its type")
    })?;
    let (description, data) = util::split_terminated(encoding, rest)?;
    let description = util::decode_text(encoding, description)?;

    let mut picture = Picture {
        mime_type,
        picture_type: PictureType::from(u32::from(picture_type)),
        data: data.to_vec(),
        ..Picture::default()
    };
    picture.set_description(&description);
    target.release.add_cover(picture);
    Ok(())
}
