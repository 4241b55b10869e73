//! Workflow Status Order
//!
//! Fixed left-to-right ordering of known workflow statuses.

/// Catch-all column for statuses outside the known list.
pub const OTHER_STATUS: &str = "Other Status";

/// Known statuses in board order. `Other Status` is always last.
pub const STATUS_ORDER: &[&str] = &[
    "Reopened",
    "Hold",
    "New",
    "Requirement Gathering",
    "Design",
    "Design Review",
    "Design Completed",
    "Ready for TC Preparation",
    "Test Case Preparation",
    "Test Case Review",
    "Test Case Completed",
    "Technical Document Review",
    "In Progress",
    "Coding",
    "Unit Testing",
    "White Box Testing",
    "Coding Review",
    "Devbox Testing",
    "Ready for QA",
    "System Testing",
    "Closed",
    "Release",
    OTHER_STATUS,
];

/// Sort key for a status.
///
/// Known statuses map to `2 * index`; unknown statuses map to one less than
/// `Other Status`, so they sort after every known status but before the
/// catch-all bucket.
pub fn status_rank(status: &str) -> u32 {
    match STATUS_ORDER.iter().position(|s| *s == status) {
        Some(index) => (index as u32) * 2,
        None => other_rank() - 1,
    }
}

fn other_rank() -> u32 {
    ((STATUS_ORDER.len() - 1) as u32) * 2
}

/// Whether the status appears in the fixed order (including `Other Status`).
pub fn is_known_status(status: &str) -> bool {
    STATUS_ORDER.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ranks_strictly_increase() {
        let ranks: Vec<u32> = STATUS_ORDER.iter().map(|s| status_rank(s)).collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unknown_sorts_immediately_before_other() {
        let unknown = status_rank("Awaiting Vendor");
        assert_eq!(unknown + 1, status_rank(OTHER_STATUS));
        assert!(unknown > status_rank("Release"));
    }

    #[test]
    fn test_is_known_status() {
        assert!(is_known_status("Coding"));
        assert!(is_known_status(OTHER_STATUS));
        assert!(!is_known_status("coding"));
    }
}
