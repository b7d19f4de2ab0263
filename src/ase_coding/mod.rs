pub mod io;

use tracing::trace;

use crate::{
    config::{AseConfig, WidthMode},
    error::Result,
    recency_table::{ceil_log2, HitResult, RecencyTable},
};

pub use self::io::{BitWriter, CodeSink};

/// One emitted code: a flag bit followed by `width` payload bits (MSB first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// `true` for a hit index, `false` for a raw symbol
    pub flag: bool,
    pub payload: u32,
    pub width: u8,
}

impl Code {
    /// Length in bits, flag included
    pub fn bit_len(&self) -> u32 {
        1 + u32::from(self.width)
    }

    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        let payload = (0..self.width).rev().map(|i| u8::from(self.payload >> i & 1 == 1));
        std::iter::once(u8::from(self.flag)).chain(payload)
    }
}

/// Encodes symbols against an owned `RecencyTable`
#[derive(Debug, Clone)]
pub struct AdaptiveEncoder {
    table: RecencyTable<u32>,
    symbol_width: u8,
    width: WidthMode,
}

impl AdaptiveEncoder {
    pub fn new(config: &AseConfig) -> Result<Self> {
        config.validate()?;
        let table = RecencyTable::new(config.capacity, config.decay_period, config.search)?;
        Ok(Self { table, symbol_width: config.input_symbol_width, width: config.width })
    }

    pub fn encode(&mut self, symbol: u32) -> Code {
        let prev_occupied = self.table.occupied();
        match self.table.push(symbol) {
            HitResult::Miss => Code {
                flag: false,
                payload: symbol & mask(u32::from(self.symbol_width)),
                width: self.symbol_width,
            },
            HitResult::Hit(index) => {
                let m = match self.width {
                    // a cull may have emptied the table, its index then takes 0 bits
                    WidthMode::PostPush => self.table.entropy_width().unwrap_or(0),
                    // a hit was found in the live region, so it was non-empty
                    WidthMode::PrePush => ceil_log2(prev_occupied).unwrap_or_default(),
                };
                trace!(index, m, "hit code");
                let m = m.min(u32::BITS);
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                Code { flag: true, payload: index & mask(m), width: m as u8 }
            }
        }
    }

    /// Encodes every symbol into `sink`, returns the number of bits emitted
    pub fn encode_into<I, W>(&mut self, symbols: I, sink: &mut W) -> Result<u64>
    where
        I: IntoIterator<Item = u32>,
        W: CodeSink,
    {
        let mut bits = 0;
        for symbol in symbols {
            let code = self.encode(symbol);
            sink.write_code(&code)?;
            bits += u64::from(code.bit_len());
        }
        Ok(bits)
    }

    pub fn table(&self) -> &RecencyTable<u32> {
        &self.table
    }

    pub fn symbol_width(&self) -> u8 {
        self.symbol_width
    }
}

#[inline(always)]
fn mask(width: u32) -> u32 {
    u32::MAX.checked_shr(u32::BITS - width).unwrap_or(0)
}
