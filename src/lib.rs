pub mod ase_coding;
pub mod config;
pub mod error;
pub mod helpers;
pub mod parallel;
pub mod recency_table;

pub use ase_coding::{AdaptiveEncoder, BitWriter, Code, CodeSink};
pub use config::{AseConfig, SearchMode, WidthMode};
pub use error::{AseError, Result};
pub use recency_table::{HitResult, RecencyTable, SlotState};
