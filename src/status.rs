//! PEP status table and reconciliation.

use tracing::warn;

use crate::constants::UNKNOWN_VALUE;

const UNKNOWN_STATUSES: &[&str] = &[UNKNOWN_VALUE];

/// Expected full status names for a one-letter PEP status code.
///
/// An empty code (abbreviation shorter than two characters in the index
/// table) means Draft or Active. Unrecognized codes degrade to the `Unknown`
/// sentinel set, never a failure.
pub fn expected_statuses(code: &str) -> &'static [&'static str] {
    match code {
        "A" => &["Active", "Accepted"],
        "D" => &["Deferred"],
        "F" => &["Final"],
        "P" => &["Provisional"],
        "R" => &["Rejected"],
        "S" => &["Superseded"],
        "W" => &["Withdrawn"],
        "" => &["Draft", "Active"],
        other => {
            warn!("Unrecognized PEP status code {:?}", other);
            UNKNOWN_STATUSES
        }
    }
}

/// Check the status observed on a PEP page against the statuses its index
/// entry implies. A mismatch is a soft failure: one warning, no abort, and
/// the caller leaves the PEP out of the tally.
pub fn reconcile<'a>(observed: &'a str, expected: &[&str], url: &str) -> Option<&'a str> {
    if expected.contains(&observed) {
        Some(observed)
    } else {
        warn!(
            "Mismatched statuses:\nURL: {}\nStatus on page: {}\nExpected statuses: {:?}",
            url, observed, expected
        );
        None
    }
}
