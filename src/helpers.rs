use std::io;

use crate::ase_coding::{Code, CodeSink};

/// Sink that only counts what would be written
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodeStats {
    bit_count: u64,
    hits: u64,
    misses: u64,
}

impl CodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits(&self) -> u64 {
        self.bit_count
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Compressed size in bytes, a partial last byte counts as a whole one
    pub fn result(&self) -> u64 {
        self.bit_count.div_ceil(8)
    }

    /// Compressed size over `raw_len` bytes
    pub fn ratio(&self, raw_len: usize) -> f64 {
        if raw_len == 0 {
            return 0.0;
        }
        self.result() as f64 / raw_len as f64
    }
}

impl CodeSink for CodeStats {
    fn write_bit(&mut self, _bit: u8) -> io::Result<()> {
        self.bit_count += 1;
        Ok(())
    }

    fn write_code(&mut self, code: &Code) -> io::Result<()> {
        self.bit_count += u64::from(code.bit_len());
        match code.flag {
            true => self.hits += 1,
            false => self.misses += 1,
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
