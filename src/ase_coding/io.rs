use std::io::{self, Write};

use super::Code;

/// Destination for emitted codes
pub trait CodeSink {
    /// Writes a single bit (0 or 1)
    fn write_bit(&mut self, bit: u8) -> io::Result<()>;

    /// Writes the flag bit, then the payload MSB first
    fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Pads the last byte with 0s and flushes the inner writer
    fn flush(&mut self) -> io::Result<()>;
}

/// Packs bits MSB first into bytes of an `io::Write`
pub struct BitWriter<W> {
    inner: W,
    buf: u8,
    idx: u8,
    bits: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, buf: 0, idx: 0, bits: 0 }
    }

    /// Bits written so far, padding excluded
    pub fn bits_written(&self) -> u64 {
        self.bits
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_bit_raw(&mut self, bit: u8) -> io::Result<()> {
        self.buf = (self.buf << 1) | bit;
        self.idx = (self.idx + 1) % 8;
        if self.idx == 0 {
            self.inner.write_all(&[self.buf])?;
            self.buf = 0;
        }
        Ok(())
    }
}

impl<W: Write> CodeSink for BitWriter<W> {
    fn write_bit(&mut self, bit: u8) -> io::Result<()> {
        debug_assert!(bit <= 1, "Tried to write invalid bit");
        self.bits += 1;
        self.write_bit_raw(bit & 1)
    }

    fn flush(&mut self) -> io::Result<()> {
        while self.idx > 0 {
            self.write_bit_raw(0)?;
        }
        self.inner.flush()
    }
}
