use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{AseError, Result};

/// How `RecencyTable::push` scans the live region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Scans `slots[0..occupied - 1]`, so the last live slot is never found
    #[default]
    Faithful,
    /// Scans the whole live region `slots[0..occupied]`
    Full,
}

/// Which occupancy a hit code's index width is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthMode {
    /// Occupancy after the push (and after a possible cull), may truncate the index
    #[default]
    PostPush,
    /// Occupancy the index was found against, the index always fits
    PrePush,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AseConfig {
    /// Number of table entries
    pub capacity: usize,
    /// Raw symbol width in bits
    pub input_symbol_width: u8,
    /// Hits allowed before the last live entry is culled
    pub decay_period: usize,
    pub search: SearchMode,
    pub width: WidthMode,
    /// Bytes per independently coded chunk
    pub chunk_size: usize,
}

impl Default for AseConfig {
    fn default() -> Self {
        Self {
            capacity: 8,
            input_symbol_width: 8,
            decay_period: 4,
            search: SearchMode::Faithful,
            width: WidthMode::PostPush,
            chunk_size: 1024,
        }
    }
}

impl AseConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(AseError::invalid("capacity must be at least 1"));
        }
        if self.decay_period < 1 {
            return Err(AseError::invalid("decay_period must be at least 1"));
        }
        if !(1..=32).contains(&self.input_symbol_width) {
            return Err(AseError::invalid(format!(
                "input_symbol_width must be in 1..=32, got {}",
                self.input_symbol_width
            )));
        }
        if self.chunk_size == 0 {
            return Err(AseError::invalid("chunk_size must be at least 1"));
        }
        Ok(())
    }

    /// Bits needed to address any slot of the table
    pub fn max_index_width(&self) -> u32 {
        usize::BITS - self.capacity.saturating_sub(1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_settings() {
        let config = AseConfig::default();
        assert_eq!(config.capacity, 8);
        assert_eq!(config.input_symbol_width, 8);
        assert_eq!(config.decay_period, 4);
        assert_eq!(config.max_index_width(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_toml() {
        let config = AseConfig::from_toml_str(
            r#"
            capacity = 16
            search = "full"
            width = "pre_push"
            "#,
        )
        .unwrap();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.search, SearchMode::Full);
        assert_eq!(config.width, WidthMode::PrePush);
        assert_eq!(config.decay_period, 4);
    }

    #[test]
    fn reject_bad_values() {
        let zero_capacity = AseConfig { capacity: 0, ..Default::default() };
        assert!(matches!(
            zero_capacity.validate(),
            Err(AseError::InvalidConfiguration { .. })
        ));
        let no_decay = AseConfig { decay_period: 0, ..Default::default() };
        assert!(no_decay.validate().is_err());
        let wide = AseConfig { input_symbol_width: 33, ..Default::default() };
        assert!(wide.validate().is_err());
        assert!(AseConfig::from_toml_str("decay_period = 0").is_err());
    }

    #[test]
    fn reject_unknown_keys() {
        let err = AseConfig::from_toml_str("length = 8").unwrap_err();
        assert!(matches!(err, AseError::ConfigParse(_)));
    }

    #[test]
    fn max_index_width_edges() {
        let width = |capacity| AseConfig { capacity, ..Default::default() }.max_index_width();
        assert_eq!(width(1), 0);
        assert_eq!(width(2), 1);
        assert_eq!(width(5), 3);
        assert_eq!(width(256), 8);
    }
}
