//! WavPack files. Only the first block header is read; the tags live in a trailing APEv2 tag.

use crate::format::ape::ApeDecoder;
use crate::merge;
use crate::options::ReadOptions;
use crate::stream::cursor::Cursor;
use crate::{Error, ErrorKind, Release, Track};
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use std::io::{self, SeekFrom};

/// The 32 byte header in front of every WavPack block.
#[derive(Debug)]
struct BlockHeader {
    /// Size of the whole block minus 8.
    size: u32,
    version: u16,
    total_samples: u64,
    block_index: u64,
    block_samples: u32,
    /// Sample format, channel layout and sample rate. Not decoded.
    flags: u32,
    crc: u32,
}

impl BlockHeader {
    fn decode(bytes: &[u8; 32]) -> crate::Result<BlockHeader> {
        if &bytes[..4] != b"wvpk" {
            return Err(Error::new(
                ErrorKind::Parsing,
                "wavpack: missing wvpk block marker",
            ));
        }
        // The 40 bit counters keep their upper byte apart from the lower 32 bits.
        let block_index_high = u64::from(bytes[10]);
        let total_samples_high = u64::from(bytes[11]);
        Ok(BlockHeader {
            size: LittleEndian::read_u32(&bytes[4..8]),
            version: LittleEndian::read_u16(&bytes[8..10]),
            total_samples: total_samples_high << 32
                | u64::from(LittleEndian::read_u32(&bytes[12..16])),
            block_index: block_index_high << 32 | u64::from(LittleEndian::read_u32(&bytes[16..20])),
            block_samples: LittleEndian::read_u32(&bytes[20..24]),
            flags: LittleEndian::read_u32(&bytes[24..28]),
            crc: LittleEndian::read_u32(&bytes[28..32]),
        })
    }
}

pub(crate) struct WavPackDecoder<'a, R> {
    cursor: &'a mut Cursor<R>,
    release: &'a mut Release,
    track: &'a mut Track,
    options: &'a ReadOptions,
}

impl<'a, R> WavPackDecoder<'a, R>
where
    R: io::Read + io::Seek,
{
    pub fn new(
        cursor: &'a mut Cursor<R>,
        release: &'a mut Release,
        track: &'a mut Track,
        options: &'a ReadOptions,
    ) -> Self {
        WavPackDecoder {
            cursor,
            release,
            track,
            options,
        }
    }

    /// Checks the first block and merges the APEv2 tag, if there is one. Audio properties are
    /// left untouched.
    pub fn read(self) -> crate::Result<()> {
        let header = BlockHeader::decode(&self.cursor.read_array()?)?;
        debug!(
            "wavpack: version {:#x}, block {} of {} samples ({} total), flags {:#010x}, crc {:#010x}",
            header.version,
            header.block_index,
            header.block_samples,
            header.total_samples,
            header.flags,
            header.crc
        );
        self.cursor
            .seek(SeekFrom::Start(u64::from(header.size) + 8))?;

        let decoded =
            ApeDecoder::new(&mut *self.cursor, &mut *self.release, &mut *self.track, self.options)
                .decode();
        match decoded {
            Ok(tags) => merge::apply(&tags, self.release, self.track),
            Err(err) if err.is_absence() => {
                debug!("wavpack: no APEv2 tag");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
