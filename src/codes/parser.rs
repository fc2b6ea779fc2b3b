//! Fixed-width order file parser
//!
//! The CMS tabular order file has one code per line, laid out by column
//! (0-indexed):
//!
//! | Columns | Content                                  |
//! |---------|------------------------------------------|
//! | 0-4     | Order number (ignored)                   |
//! | 6-13    | Code, blank padded                       |
//! | 14      | `1` when the code is valid for claims    |
//! | 16-75   | Short description (ignored)              |
//! | 77+     | Long description                         |
//!
//! Parsing is total: lines that are too short or carry another flag just
//! produce no record.

use serde::Deserialize;

use super::record::{CodeRecord, RecordCollection};

/// Average bytes per line, used to pre-size the output
const BYTES_PER_RECORD: usize = 240;

/// Column boundaries of the order file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// First column of the code field
    pub code_start: usize,
    /// Width of the code field
    pub code_width: usize,
    /// Column holding the classification flag
    pub flag_column: usize,
    /// First column of the long description
    pub description_start: usize,
    /// Number of code characters before the decimal point
    pub decimal_after: usize,
    /// Flag value marking lines to keep
    pub keep_flag: char,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            code_start: 6,
            code_width: 8,
            flag_column: 14,
            description_start: 77,
            decimal_after: 3,
            keep_flag: '1',
        }
    }
}

/// Column band a byte falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Ignored,
    Code,
    Flag,
    Description,
}

impl ColumnLayout {
    fn band(&self, col: usize) -> Band {
        if col == self.flag_column {
            Band::Flag
        } else if col >= self.code_start && col < self.code_start + self.code_width && col < self.flag_column {
            Band::Code
        } else if col >= self.description_start && col > self.flag_column {
            Band::Description
        } else {
            Band::Ignored
        }
    }
}

/// Accumulator for the physical line being scanned
#[derive(Debug, Default)]
struct LineState {
    col: usize,
    code: Vec<u8>,
    decimal: Vec<u8>,
    code_closed: bool,
    flag: Option<u8>,
    description: Vec<u8>,
}

impl LineState {
    fn feed(&mut self, layout: &ColumnLayout, keep: u8, byte: u8) {
        match layout.band(self.col) {
            Band::Code if !self.code_closed => {
                if byte == b' ' {
                    self.code_closed = true;
                } else {
                    if self.code.len() == layout.decimal_after {
                        self.decimal.push(b'.');
                    }
                    self.code.push(byte);
                    self.decimal.push(byte);
                }
            }
            Band::Flag => self.flag = Some(byte),
            Band::Description if self.flag == Some(keep) => self.description.push(byte),
            _ => {}
        }
        self.col += 1;
    }

    /// Finish the line, yielding a record if its flag qualifies
    fn finish(&mut self, keep: u8) -> Option<CodeRecord> {
        let line = std::mem::take(self);
        if line.flag != Some(keep) {
            return None;
        }
        let description = String::from_utf8_lossy(&line.description);
        Some(CodeRecord {
            code: String::from_utf8_lossy(&line.code).into_owned(),
            decimal_code: String::from_utf8_lossy(&line.decimal).into_owned(),
            description: description.trim_end_matches(' ').to_string(),
        })
    }
}

/// Parser over one in-memory order file
#[derive(Debug, Clone, Default)]
pub struct FixedWidthParser {
    layout: ColumnLayout,
}

impl FixedWidthParser {
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    /// Parse every qualifying line of `data` into a sorted collection
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. A final line without a
    /// terminator is still parsed.
    pub fn parse(&self, data: &[u8]) -> RecordCollection {
        let keep = u8::try_from(self.layout.keep_flag).unwrap_or(b'1');
        let mut records = Vec::with_capacity(data.len() / BYTES_PER_RECORD);
        let mut line = LineState::default();

        let mut bytes = data.iter().copied().peekable();
        while let Some(byte) = bytes.next() {
            match byte {
                b'\r' | b'\n' => {
                    if byte == b'\r' && bytes.peek() == Some(&b'\n') {
                        bytes.next();
                    }
                    records.extend(line.finish(keep));
                }
                _ => line.feed(&self.layout, keep, byte),
            }
        }
        records.extend(line.finish(keep));

        tracing::debug!(records = records.len(), bytes = data.len(), "Parsed order file");
        RecordCollection::from_unsorted(records)
    }
}

/// Parse with the default CMS layout
pub fn parse_codes(data: &[u8]) -> RecordCollection {
    FixedWidthParser::default().parse(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an order file line with the standard layout
    fn line(seq: u32, code: &str, flag: char, short: &str, long: &str) -> String {
        format!("{:05} {:<8}{} {:<60} {}", seq, code, flag, short, long)
    }

    #[test]
    fn test_line_helper_layout() {
        let l = line(1, "A000", '1', "Cholera", "Cholera due to Vibrio cholerae 01, biovar cholerae");
        assert_eq!(&l[6..10], "A000");
        assert_eq!(&l[14..15], "1");
        assert_eq!(&l[77..84], "Cholera");
    }

    #[test]
    fn test_full_width_code_with_trailing_spaces() {
        let data = format!("{:05} {}1{}{}\n", 1, "A0010000", " ".repeat(62), "Foo   ");
        let records = parse_codes(data.as_bytes());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], CodeRecord::new("A0010000", "A00.10000", "Foo"));
    }

    #[test]
    fn test_short_code_has_no_decimal() {
        let data = line(1, "A00", '0', "Cholera", "Cholera") + "\n" + &line(2, "B20", '1', "HIV", "Human immunodeficiency virus [HIV] disease") + "\n";
        let records = parse_codes(data.as_bytes());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "B20");
        assert_eq!(records[0].decimal_code, "B20");
        assert_eq!(records[0].description, "Human immunodeficiency virus [HIV] disease");
    }

    #[test]
    fn test_decimal_inserted_after_third_character() {
        let data = line(3, "A0100", '1', "Typhoid", "Typhoid fever, unspecified");
        let records = parse_codes(data.as_bytes());
        assert_eq!(records[0].decimal_code, "A01.00");
    }

    #[test]
    fn test_flag_filtering() {
        let kept = line(1, "A000", '1', "Cholera", "Cholera due to Vibrio cholerae");
        let dropped = line(1, "A000", '0', "Cholera", "Cholera due to Vibrio cholerae");
        assert_eq!(parse_codes(kept.as_bytes()).len(), 1);
        assert!(parse_codes(dropped.as_bytes()).is_empty());
    }

    #[test]
    fn test_crlf_and_lf_line_endings() {
        let a = line(1, "C01", '1', "Tongue", "Malignant neoplasm of base of tongue  ");
        let b = line(2, "A000", '1', "Cholera", "Cholera due to Vibrio cholerae");
        let unix = format!("{}\n{}\n", a, b);
        let windows = format!("{}\r\n{}\r\n", a, b);
        let from_unix = parse_codes(unix.as_bytes());
        let from_windows = parse_codes(windows.as_bytes());
        assert_eq!(from_unix, from_windows);
        assert_eq!(from_unix.len(), 2);
        assert_eq!(from_unix[0].code, "A000");
        assert_eq!(from_unix[1].description, "Malignant neoplasm of base of tongue");
    }

    #[test]
    fn test_lone_cr_line_endings() {
        let a = line(1, "C01", '1', "Tongue", "Malignant neoplasm of base of tongue  ");
        let b = line(2, "A000", '1', "Cholera", "Cholera due to Vibrio cholerae");
        let records = parse_codes(format!("{}\r{}", a, b).as_bytes());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], CodeRecord::new("A000", "A00.0", "Cholera due to Vibrio cholerae"));
        assert_eq!(records[1], CodeRecord::new("C01", "C01", "Malignant neoplasm of base of tongue"));
    }

    #[test]
    fn test_records_sorted_by_code() {
        let data = [
            line(3, "B20", '1', "HIV", "HIV disease"),
            line(1, "A0100", '1', "Typhoid", "Typhoid fever"),
            line(2, "A000", '1', "Cholera", "Cholera"),
        ]
        .join("\n");
        let records = parse_codes(data.as_bytes());
        assert_eq!(records.len(), 3);
        for pair in records.windows(2) {
            assert!(pair[0].code <= pair[1].code);
        }
    }

    #[test]
    fn test_truncated_lines_are_skipped() {
        let data = format!(
            "00001 A00\n{}\n00003 A01     \n\n{}",
            line(2, "A000", '1', "Cholera", "Cholera"),
            "00004 A0"
        );
        let records = parse_codes(data.as_bytes());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "A000");
    }

    #[test]
    fn test_flagged_line_without_description() {
        let data = "00001 A000    1 Cholera\n";
        let records = parse_codes(data.as_bytes());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let _ = parse_codes(&data);
        assert!(parse_codes(b"").is_empty());
        assert!(parse_codes(b"\r\n\r\r\n\n").is_empty());
    }

    #[test]
    fn test_custom_layout() {
        let layout = ColumnLayout {
            code_start: 0,
            code_width: 4,
            flag_column: 5,
            description_start: 7,
            decimal_after: 1,
            keep_flag: 'Y',
        };
        let records = FixedWidthParser::new(layout).parse(b"X123 Y Widget  \nX999 N Gadget\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], CodeRecord::new("X123", "X.123", "Widget"));
    }
}
