use byteorder::{ByteOrder, ReadBytesExt};
use std::cmp;
use std::io::{self, Read, SeekFrom};

/// A seekable byte reader over one file. All multi-byte reads state their byte order explicitly;
/// every short read fails with `UnexpectedEof`.
pub struct Cursor<R> {
    reader: R,
}

impl<R> Cursor<R>
where
    R: io::Read + io::Seek,
{
    pub fn new(reader: R) -> Cursor<R> {
        Cursor { reader }
    }

    pub fn seek(&mut self, pos: SeekFrom) -> crate::Result<u64> {
        Ok(self.reader.seek(pos)?)
    }

    pub fn position(&mut self) -> crate::Result<u64> {
        Ok(self.reader.stream_position()?)
    }

    /// Returns the total length of the stream, leaving the position untouched.
    pub fn len(&mut self) -> crate::Result<u64> {
        let position = self.position()?;
        let len = self.reader.seek(SeekFrom::End(0))?;
        self.reader.seek(SeekFrom::Start(position))?;
        Ok(len)
    }

    pub fn skip(&mut self, n: u64) -> crate::Result<()> {
        let offset = i64::try_from(n).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "skip length out of range")
        })?;
        self.reader.seek(SeekFrom::Current(offset))?;
        Ok(())
    }

    /// Reads exactly `n` bytes.
    pub fn read_bytes(&mut self, n: u64) -> crate::Result<Vec<u8>> {
        // The length comes from the file itself, so the buffer grows with the data actually read
        // instead of being allocated up front.
        let mut buf = Vec::with_capacity(cmp::min(n, 0xffff) as usize);
        self.reader.by_ref().take(n).read_to_end(&mut buf)?;
        if (buf.len() as u64) < n {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {} bytes, got {}", n, buf.len()),
            )
            .into());
        }
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> crate::Result<[u8; N]> {
        let mut buf = [0; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Returns up to `n` upcoming bytes without consuming them. Fewer bytes are returned near the
    /// end of the stream.
    pub fn peek(&mut self, n: u64) -> crate::Result<Vec<u8>> {
        let position = self.position()?;
        let mut buf = Vec::new();
        self.reader.by_ref().take(n).read_to_end(&mut buf)?;
        self.reader.seek(SeekFrom::Start(position))?;
        Ok(buf)
    }

    /// Reads a NUL terminated string. The terminator is consumed but not returned.
    pub fn read_until_nul(&mut self) -> crate::Result<Vec<u8>> {
        let mut buf = Vec::new();
        loop {
            match self.reader.read_u8()? {
                0 => return Ok(buf),
                b => buf.push(b),
            }
        }
    }

    pub fn read_u16<B: ByteOrder>(&mut self) -> crate::Result<u16> {
        Ok(self.reader.read_u16::<B>()?)
    }

    pub fn read_u32<B: ByteOrder>(&mut self) -> crate::Result<u32> {
        Ok(self.reader.read_u32::<B>()?)
    }

    pub fn read_u64<B: ByteOrder>(&mut self) -> crate::Result<u64> {
        Ok(self.reader.read_u64::<B>()?)
    }
}
