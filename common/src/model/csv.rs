/// Column layout of the reservation bulk-import file.
///
/// The header row of an uploaded CSV must contain every name in
/// [`REQUIRED_COLUMNS`]; column order is free. Columns outside
/// [`ALL_COLUMNS`] are accepted and ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "title",
    "bride",
    "groom",
    "contact",
    "venue",
    "ceremony_type",
    "ceremony_date",
    "ceremony_time",
];

/// Every column the importer understands, in template order.
pub const ALL_COLUMNS: [&str; 14] = [
    "title",
    "bride",
    "groom",
    "contact",
    "venue",
    "ceremony_type",
    "second_party",
    "ceremony_date",
    "ceremony_time",
    "referral_source",
    "additional_input",
    "notes",
    "password",
    "host_id",
];

/// Columns whose value must be non-empty for a row to be imported.
///
/// `ceremony_type` and `ceremony_time` must exist in the header but may be
/// blank in a row; blanks fall back to defaults.
pub const NON_EMPTY_COLUMNS: [&str; 6] =
    ["title", "bride", "groom", "contact", "venue", "ceremony_date"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_columns_are_known_columns() {
        for col in REQUIRED_COLUMNS {
            assert!(ALL_COLUMNS.contains(&col), "{col} missing from ALL_COLUMNS");
        }
    }

    #[test]
    fn non_empty_columns_are_required_columns() {
        for col in NON_EMPTY_COLUMNS {
            assert!(REQUIRED_COLUMNS.contains(&col));
        }
    }
}
