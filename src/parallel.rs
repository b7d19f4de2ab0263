//! Chunked compression: every chunk is an independent session with its own table.

use rayon::prelude::*;
use tracing::debug;

use crate::{
    ase_coding::{AdaptiveEncoder, BitWriter, CodeSink},
    config::AseConfig,
    error::{AseError, Result},
};

/// Packed codes of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Meaningful bits in `data`, the rest is padding
    pub bits: u64,
    pub data: Vec<u8>,
}

/// Encodes `input` as a single session
pub fn compress(input: &[u8], config: &AseConfig) -> Result<Chunk> {
    check_byte_symbols(config)?;
    let mut encoder = AdaptiveEncoder::new(config)?;
    let mut writer = BitWriter::new(Vec::with_capacity(input.len()));
    let bits = encoder.encode_into(input.iter().copied().map(u32::from), &mut writer)?;
    writer.flush()?;
    Ok(Chunk { bits, data: writer.into_inner() })
}

/// Splits `input` into `config.chunk_size` byte chunks and encodes them in parallel,
/// results keep input order
pub fn compress_chunks(input: &[u8], config: &AseConfig) -> Result<Vec<Chunk>> {
    config.validate()?;
    check_byte_symbols(config)?;
    debug!(
        len = input.len(),
        chunk_size = config.chunk_size,
        threads = rayon::current_num_threads(),
        "chunked compression"
    );
    input
        .par_chunks(config.chunk_size)
        .map(|chunk| compress(chunk, config))
        .collect()
}

fn check_byte_symbols(config: &AseConfig) -> Result<()> {
    if config.input_symbol_width < 8 {
        return Err(AseError::invalid(format!(
            "byte input needs input_symbol_width >= 8, got {}",
            config.input_symbol_width
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{compress, compress_chunks};
    use crate::{
        config::{AseConfig, SearchMode},
        helpers::CodeStats,
        AdaptiveEncoder,
    };

    fn sample() -> Vec<u8> {
        (0..10_000u32).map(|i| (i * 7 % 13) as u8 ^ (i / 512) as u8).collect()
    }

    #[test]
    fn single_session_matches_stats() {
        let input = sample();
        let config = AseConfig::default();
        let chunk = compress(&input, &config).unwrap();

        let mut stats = CodeStats::new();
        let mut encoder = AdaptiveEncoder::new(&config).unwrap();
        encoder.encode_into(input.iter().map(|&b| u32::from(b)), &mut stats).unwrap();
        assert_eq!(chunk.bits, stats.bits());
        assert_eq!(chunk.data.len() as u64, stats.result());
    }

    #[test]
    fn chunks_keep_order_and_independence() {
        let input = sample();
        let config = AseConfig { chunk_size: 1000, ..Default::default() };
        let chunks = compress_chunks(&input, &config).unwrap();
        assert_eq!(chunks.len(), 10);
        for (chunk, slice) in chunks.iter().zip(input.chunks(1000)) {
            assert_eq!(chunk, &compress(slice, &config).unwrap());
        }
    }

    #[test]
    fn last_chunk_may_be_short() {
        let input = sample();
        let config = AseConfig { chunk_size: 3000, ..Default::default() };
        let chunks = compress_chunks(&input, &config).unwrap();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3], compress(&input[9000..], &config).unwrap());
    }

    #[test]
    fn empty_input() {
        let config = AseConfig::default();
        assert!(compress_chunks(&[], &config).unwrap().is_empty());
        let chunk = compress(&[], &config).unwrap();
        assert_eq!((chunk.bits, chunk.data.len()), (0, 0));
    }

    #[test]
    fn flat_runs_with_full_search() {
        let config = AseConfig { search: SearchMode::Full, ..Default::default() };
        // the sixth 0xff culls the only entry, its hit still costs a flag bit
        let chunk = compress(&[0xff; 6], &config).unwrap();
        assert_eq!(chunk.bits, 9 + 1 + 1 + 1 + 1 + 1);

        let mut input = vec![1, 2, 3];
        input.extend([0; 64]);
        let chunks = compress_chunks(&input, &AseConfig { chunk_size: 16, ..config }).unwrap();
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.bits > 0));
    }

    #[test]
    fn narrow_symbols_rejected() {
        let config = AseConfig { input_symbol_width: 4, ..Default::default() };
        assert!(compress(b"abc", &config).is_err());
    }
}
