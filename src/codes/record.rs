//! Parsed ICD-10 code records

use std::ops::Deref;

/// One billable code and its long description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeRecord {
    /// Code as it appears in the source file, e.g. `A0100`
    pub code: String,
    /// Code with a `.` after the category, e.g. `A01.00`
    pub decimal_code: String,
    pub description: String,
}

impl CodeRecord {
    pub fn new(code: impl Into<String>, decimal_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            decimal_code: decimal_code.into(),
            description: description.into(),
        }
    }
}

/// Records sorted ascending by `code`
///
/// Only constructed through [`RecordCollection::from_unsorted`], which
/// performs a stable sort so equal codes keep their file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordCollection {
    records: Vec<CodeRecord>,
}

impl RecordCollection {
    pub fn from_unsorted(mut records: Vec<CodeRecord>) -> Self {
        records.sort_by(|a, b| a.code.cmp(&b.code));
        records.shrink_to_fit();
        Self { records }
    }
}

impl Deref for RecordCollection {
    type Target = [CodeRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a CodeRecord;
    type IntoIter = std::slice::Iter<'a, CodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
