//! Global output (`.go`) file generation
//!
//! Each output is a list of global nodes: a two line file header, the
//! global's root node carrying the day index and year, then one node per
//! code followed by its description. The decimal and non-decimal variants
//! differ only in the global name and which code spelling is used.

use bitflags::bitflags;

use super::record::RecordCollection;
use super::timestamp::Timestamp;

/// Rough output size per code, for pre-sizing buffers
const BYTES_PER_CODE: usize = 100;

const GLOBAL_NAME: &str = "DECGBL";
const SUBSCRIPT: &str = "Subscript 1";

bitflags! {
    /// Rendering options for one output buffer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Use decimal codes and the decimal global
        const DECIMAL = 0b0000_0001;
        /// Append two blank lines after the last code
        const TRAILER = 0b0000_0010;
        /// Prepend the file header and root node
        const HEADER  = 0b0000_0100;

        const INDIVIDUAL_NON_DECIMAL = Self::HEADER.bits() | Self::TRAILER.bits();
        const INDIVIDUAL_DECIMAL = Self::HEADER.bits() | Self::TRAILER.bits() | Self::DECIMAL.bits();
        /// First half of the combined file
        const COMBINED_HEAD = Self::HEADER.bits() | Self::DECIMAL.bits();
        /// Second half of the combined file
        const COMBINED_TAIL = Self::TRAILER.bits();
    }
}

impl RenderFlags {
    fn global_prefix(self) -> &'static str {
        if self.contains(Self::DECIMAL) {
            ""
        } else {
            "NON"
        }
    }
}

/// Render one buffer
pub fn render(records: &RecordCollection, year: &str, stamp: &Timestamp, flags: RenderFlags) -> String {
    let mut out = String::with_capacity(records.len() * BYTES_PER_CODE);
    let prefix = flags.global_prefix();

    if flags.contains(RenderFlags::HEADER) {
        out.push_str("~Format=5.S~\n");
        out.push_str(&stamp.header_line());
        out.push('\n');
        out.push_str(&format!("^{prefix}{GLOBAL_NAME}(\"{SUBSCRIPT}\")\n"));
        out.push_str(&format!("{}_PLACEHOLDER FOR YEAR {}\n", stamp.day_index, year));
    }

    let decimal = flags.contains(RenderFlags::DECIMAL);
    for record in records {
        let code = if decimal { &record.decimal_code } else { &record.code };
        out.push_str(&format!("^{prefix}{GLOBAL_NAME}(\"{SUBSCRIPT}\",\"{code}\")\n"));
        out.push_str(&record.description);
        out.push('\n');
    }

    if flags.contains(RenderFlags::TRAILER) {
        out.push_str("\n\n");
    }
    out
}

/// Which of the three output files a buffer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    NonDecimal,
    Decimal,
    Combined,
}

impl OutputKind {
    pub const ALL: [OutputKind; 3] = [OutputKind::NonDecimal, OutputKind::Decimal, OutputKind::Combined];

    /// Key the buffer is exposed under
    pub fn key(self) -> &'static str {
        match self {
            OutputKind::NonDecimal => "individual-A",
            OutputKind::Decimal => "individual-B",
            OutputKind::Combined => "combined",
        }
    }

    /// Prefix of the archive and member file names
    pub fn label(self) -> &'static str {
        match self {
            OutputKind::NonDecimal => "Non-decimal",
            OutputKind::Decimal => "Decimal",
            OutputKind::Combined => "Combined",
        }
    }
}

/// The three finished output buffers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedOutput {
    /// Individual non-decimal file ("individual-A")
    pub non_decimal: String,
    /// Individual decimal file ("individual-B")
    pub decimal: String,
    pub combined: String,
}

impl RenderedOutput {
    pub fn get(&self, kind: OutputKind) -> &str {
        match kind {
            OutputKind::NonDecimal => &self.non_decimal,
            OutputKind::Decimal => &self.decimal,
            OutputKind::Combined => &self.combined,
        }
    }

    /// Look up a buffer by its key
    pub fn by_key(&self, key: &str) -> Option<&str> {
        OutputKind::ALL.into_iter().find(|k| k.key() == key).map(|k| self.get(k))
    }

    pub fn into_entries(self) -> [(OutputKind, String); 3] {
        [
            (OutputKind::NonDecimal, self.non_decimal),
            (OutputKind::Decimal, self.decimal),
            (OutputKind::Combined, self.combined),
        ]
    }
}

/// Render all three outputs.
///
/// The four renders (two individual files and the two halves of the
/// combined file) run on scoped threads; each owns its own buffer and only
/// reads the shared records.
pub fn generate(records: &RecordCollection, year: &str, stamp: &Timestamp) -> RenderedOutput {
    let job = |flags: RenderFlags| move || render(records, year, stamp, flags);
    let (non_decimal, decimal, head, tail) = std::thread::scope(|s| {
        let non_decimal = s.spawn(job(RenderFlags::INDIVIDUAL_NON_DECIMAL));
        let decimal = s.spawn(job(RenderFlags::INDIVIDUAL_DECIMAL));
        let head = s.spawn(job(RenderFlags::COMBINED_HEAD));
        let tail = s.spawn(job(RenderFlags::COMBINED_TAIL));
        (join(non_decimal), join(decimal), join(head), join(tail))
    });

    let mut combined = head;
    combined.push_str(&tail);
    RenderedOutput {
        non_decimal,
        decimal,
        combined,
    }
}

/// Join a render thread, re-raising its panic
fn join(handle: std::thread::ScopedJoinHandle<'_, String>) -> String {
    match handle.join() {
        Ok(buf) => buf,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
