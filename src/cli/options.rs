//! Program option vocabulary and usage text

use std::path::Path;

use super::registry::TokenRegistry;

/// Value-bearing, positional options in backfill order
pub const VALUE_OPTIONS: [(&str, &str); 10] = [
    ("p", "path"),
    ("y", "year"),
    ("f", "zip-file"),
    ("i", "icd10-url"),
    ("z", "zip-url"),
    ("o", "order-file"),
    ("d", "decimal-file"),
    ("n", "non-decimal-file"),
    ("c", "combined-file"),
    ("u", "cms-url"),
];

/// Registry for the `icdsync` command line
pub fn program_registry() -> TokenRegistry {
    let mut registry = TokenRegistry::from_pairs(&VALUE_OPTIONS);
    registry.register("?", "help", false, true);
    registry.register("q", "quiet", false, true);
    registry.register("v", "verbose", false, true);
    registry
}

/// Display name for the running binary, taken from argv[0]
pub fn program_name(argv0: Option<&str>) -> String {
    let name = argv0
        .and_then(|a| Path::new(a).file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let name = name.strip_prefix('"').unwrap_or(&name);
    name.strip_suffix('"').unwrap_or(name).to_string()
}

pub fn usage(program: &str) -> String {
    format!(
        r#"
ICD-10 codes update file generator:

Attempts to get the latest ICD-10 code information from the Centers for Medicare & Medicaid Services website, format it for importing, and compress it for delivery to sites.

{program} [[/p] Destination] [[/y] Year] [[/f] Zip file] [[/i] ICD-10 URL] [[/z] Zip URL] [[/o] Order file] [[/d] Decimal file [/n] Non-decimal file [/c] Combined file] [[/u] CMS URL] [/q] [/v]

{program} /?

  /p --path              Specifies the directory for the generated files to be written to.  If a file is
                         specified, the parent directory will be used.  If a zip file is specified, it is
                         assumed to be the ICD-10 code source file, unless the zip file is specified with /f.
  /y --year              Specifies the year that the ICD-10 codes apply for.
  /f --zip-file          Specifies a local file as the source for ICD-10 codes.
  /i --icd10-url         Specifies the URL to search for the ICD-10 code tabular order source file.
  /z --zip-url           Specifies the URL of the ICD-10 code tabular order source file.
  /o --order-file        Specifies a local file as the extracted tabular order ICD-10 codes.
  /d --decimal-file      Specifies a local file which contains formatted ICD-10 codes in decimal
                         format.  Must be used with /n and /c.
  /n --non-decimal-file  Specifies a local file which contains formatted ICD-10 codes in non-decimal
                         format.  Must be used with /d and /c.
  /c --combined-file     Specifies a local file which contains formatted ICD-10 codes in both decimal
                         and non-decimal format.  Must be used with /d and /n.
  /u --cms-url           Specifies the URL to begin searching for ICD-10 codes.
  /q --quiet             Suppress console output.
  /v --verbose           Show debug output.
  /? --help              Displays this help file.
"#
    )
}
