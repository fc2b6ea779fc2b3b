//! ICD-10 order file parsing and output generation

pub mod parser;
pub mod record;
pub mod render;
pub mod timestamp;

pub use parser::{parse_codes, ColumnLayout, FixedWidthParser};
pub use record::{CodeRecord, RecordCollection};
pub use render::{generate, render, OutputKind, RenderFlags, RenderedOutput};
pub use timestamp::Timestamp;
