//! CSV field helpers
//!
//! Output is RFC 4180 style: comma separated, CRLF-free `\n` line endings,
//! double quotes doubled inside quoted fields.

/// Quote a field unconditionally, doubling embedded quotes
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Quote a field only when it contains a separator, quote or line break
pub fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}

/// Join already-escaped fields into one line
pub fn row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| f.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}
