pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

/// One output record. Rows of one call share a column count; the first row
/// of a result set holds the column headers.
pub type Row = Vec<String>;
