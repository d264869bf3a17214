//! Fixed-width element encoding for the artifact stream.
//!
//! Every element is four bytes in host-native order. The stream carries no
//! separators, so both ends track their byte offset to report positions.

use std::io::{self, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Width in bytes of every element in the artifact.
pub const ELEMENT_BYTES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DType {
    F32,
    I32,
}

impl DType {
    pub fn byte_size(self) -> usize {
        match self {
            DType::F32 | DType::I32 => ELEMENT_BYTES,
        }
    }
}

pub fn encode_f32(values: &[f32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(values.len() * ELEMENT_BYTES);
    for &v in values {
        buf.put_f32_ne(v);
    }
    buf.freeze()
}

pub fn encode_i32(values: &[i32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(values.len() * ELEMENT_BYTES);
    for &v in values {
        buf.put_i32_ne(v);
    }
    buf.freeze()
}

/// Decodes whole elements; a trailing partial element is ignored.
pub fn decode_f32(mut bytes: &[u8]) -> Vec<f32> {
    let mut out = Vec::with_capacity(bytes.len() / ELEMENT_BYTES);
    while bytes.remaining() >= ELEMENT_BYTES {
        out.push(bytes.get_f32_ne());
    }
    out
}

/// Decodes whole elements; a trailing partial element is ignored.
pub fn decode_i32(mut bytes: &[u8]) -> Vec<i32> {
    let mut out = Vec::with_capacity(bytes.len() / ELEMENT_BYTES);
    while bytes.remaining() >= ELEMENT_BYTES {
        out.push(bytes.get_i32_ne());
    }
    out
}

/// Index of the first element whose bit pattern differs, or the shorter
/// length when one side is a strict prefix of the other.
pub fn first_difference_f32(expected: &[f32], actual: &[f32]) -> Option<usize> {
    let found = expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a.to_bits() != b.to_bits());
    found.or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())))
}

/// Appends elements to a sink and counts the bytes written.
pub struct ElementWriter<W> {
    inner: W,
    offset: u64,
}

impl<W: Write> ElementWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, offset: 0 }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn write_f32s(&mut self, values: &[f32]) -> io::Result<()> {
        self.write_bytes(encode_f32(values))
    }

    pub fn write_i32s(&mut self, values: &[i32]) -> io::Result<()> {
        self.write_bytes(encode_i32(values))
    }

    fn write_bytes(&mut self, bytes: Bytes) -> io::Result<()> {
        self.inner.write_all(&bytes)?;
        self.offset += bytes.len() as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Pulls elements from a source and counts the bytes consumed.
///
/// The `read_*` methods return fewer than `n` elements only when the source
/// is exhausted; callers treat that as a short read.
pub struct ElementReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ElementReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn read_f32s(&mut self, n: usize) -> io::Result<Vec<f32>> {
        let bytes = self.read_bytes(n)?;
        Ok(decode_f32(&bytes))
    }

    /// Reads a single element without buffering; `None` at end of input.
    pub fn read_i32(&mut self) -> io::Result<Option<i32>> {
        let mut buf = [0u8; ELEMENT_BYTES];
        let mut filled = 0;
        while filled < ELEMENT_BYTES {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        self.offset += filled as u64;
        if filled < ELEMENT_BYTES {
            return Ok(None);
        }
        Ok(Some((&buf[..]).get_i32_ne()))
    }

    /// Drains the source and returns how many bytes were left.
    pub fn remaining(&mut self) -> io::Result<u64> {
        let extra = io::copy(&mut self.inner, &mut io::sink())?;
        self.offset += extra;
        Ok(extra)
    }

    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let want = (n as u64).saturating_mul(ELEMENT_BYTES as u64);
        // No up-front reservation: `n` may come from a corrupted stream.
        let mut buf = Vec::new();
        Read::take(&mut self.inner, want).read_to_end(&mut buf)?;
        self.offset += buf.len() as u64;
        Ok(buf)
    }
}
