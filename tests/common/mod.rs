//! Builders for small in-memory audio files.

#![allow(dead_code)]

/// An ID3v2.3 tag holding the given frames. Frame sizes are plain 32 bit integers.
pub fn id3v23_tag(frames: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (id, data) in frames {
        body.extend(id.as_bytes());
        body.extend((data.len() as u32).to_be_bytes());
        body.extend([0, 0]);
        body.extend(*data);
    }
    let mut out = b"ID3\x03\x00\x00".to_vec();
    out.extend(synchsafe(body.len() as u32));
    out.extend(body);
    out
}

fn synchsafe(n: u32) -> [u8; 4] {
    [
        (n >> 21 & 0x7f) as u8,
        (n >> 14 & 0x7f) as u8,
        (n >> 7 & 0x7f) as u8,
        (n & 0x7f) as u8,
    ]
}

/// A FLAC STREAMINFO block body.
pub fn stream_info(sample_rate: u32, channels: u32, bits_per_sample: u32, samples: u64) -> Vec<u8> {
    let mut out = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
    let packed = u64::from(sample_rate) << 44
        | u64::from(channels - 1) << 41
        | u64::from(bits_per_sample - 1) << 36
        | samples;
    out.extend(packed.to_be_bytes());
    out.extend([0; 16]);
    out
}

pub fn vorbis_comment(comments: &[&str]) -> Vec<u8> {
    let vendor = b"reference libFLAC 1.3.2";
    let mut out = (vendor.len() as u32).to_le_bytes().to_vec();
    out.extend(vendor);
    out.extend((comments.len() as u32).to_le_bytes());
    for comment in comments {
        out.extend((comment.len() as u32).to_le_bytes());
        out.extend(comment.as_bytes());
    }
    out
}

pub fn flac_picture(picture_type: u32, mime: &str, description: &str, data: &[u8]) -> Vec<u8> {
    let mut out = picture_type.to_be_bytes().to_vec();
    out.extend((mime.len() as u32).to_be_bytes());
    out.extend(mime.as_bytes());
    out.extend((description.len() as u32).to_be_bytes());
    out.extend(description.as_bytes());
    for n in [600u32, 600, 24, 0] {
        out.extend(n.to_be_bytes());
    }
    out.extend((data.len() as u32).to_be_bytes());
    out.extend(data);
    out
}

/// A FLAC stream made of the marker and the given `(type, body)` blocks. The last block is
/// flagged as such, and some audio bytes follow.
pub fn flac_file(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
    let mut out = b"fLaC".to_vec();
    for (i, (block_type, body)) in blocks.iter().enumerate() {
        let last = if i + 1 == blocks.len() { 0x80 } else { 0 };
        out.push(block_type | last);
        out.extend(&(body.len() as u32).to_be_bytes()[1..]);
        out.extend(body);
    }
    out.extend([0xff, 0xf8, 0x69, 0x08]);
    out
}

/// An APEv2 tag, footer only.
pub fn ape_tag(items: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in items {
        body.extend((value.len() as u32).to_le_bytes());
        body.extend(0u32.to_le_bytes());
        body.extend(name.as_bytes());
        body.push(0);
        body.extend(*value);
    }
    let mut out = body.clone();
    out.extend(b"APETAGEX");
    out.extend(2000u32.to_le_bytes());
    out.extend((body.len() as u32 + 32).to_le_bytes());
    out.extend((items.len() as u32).to_le_bytes());
    out.extend(0u32.to_le_bytes());
    out.extend([0; 8]);
    out
}

/// A single WavPack block of `audio_len` bytes followed by `tag`.
pub fn wavpack_file(audio_len: usize, tag: &[u8]) -> Vec<u8> {
    let mut out = b"wvpk".to_vec();
    out.extend((audio_len as u32 + 24).to_le_bytes());
    out.extend(0x410u16.to_le_bytes());
    out.extend([0, 0]);
    out.extend(44100u32.to_le_bytes());
    out.extend(0u32.to_le_bytes());
    out.extend(44100u32.to_le_bytes());
    out.extend(0x0080_1806u32.to_le_bytes());
    out.extend(0u32.to_le_bytes());
    out.extend(vec![0; audio_len]);
    out.extend(tag);
    out
}

/// An MPEG-1 layer III stream at 128 kbps, 44.1 kHz, joint stereo, padded to `len` bytes after
/// the optional ID3v2 tag.
pub fn mp3_file(tag: &[u8], len: usize) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend([0xff, 0xfb, 0x90, 0x44]);
    out.resize(tag.len() + len, 0);
    out
}

/// A DSF file of `sample_count` samples with `tag` as its metadata chunk, if not empty.
pub fn dsf_file(channels: u32, sample_rate: u32, sample_count: u64, audio_len: usize, tag: &[u8]) -> Vec<u8> {
    let metadata_offset = match tag.is_empty() {
        true => 0,
        false => (28 + 52 + 12 + audio_len) as u64,
    };
    let total = (28 + 52 + 12 + audio_len + tag.len()) as u64;

    let mut out = b"DSD ".to_vec();
    out.extend(28u64.to_le_bytes());
    out.extend(total.to_le_bytes());
    out.extend(metadata_offset.to_le_bytes());

    out.extend(b"fmt ");
    out.extend(52u64.to_le_bytes());
    out.extend(1u32.to_le_bytes());
    out.extend(0u32.to_le_bytes());
    out.extend(2u32.to_le_bytes());
    out.extend(channels.to_le_bytes());
    out.extend(sample_rate.to_le_bytes());
    out.extend(1u32.to_le_bytes());
    out.extend(sample_count.to_le_bytes());
    out.extend(4096u32.to_le_bytes());
    out.extend(0u32.to_le_bytes());

    out.extend(b"data");
    out.extend((12 + audio_len as u64).to_le_bytes());
    out.extend(vec![0x69; audio_len]);
    out.extend(tag);
    out
}
