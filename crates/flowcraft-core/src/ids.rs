//! Sequential human-readable identifier generation.
//!
//! Identifiers look like `TSK-001` / `SPR-042`: a fixed prefix, a dash,
//! and a zero-padded number. The next id is one past the largest numeric
//! suffix among the existing ids for that prefix.
//!
//! Suffixes are parsed leniently: an existing `TSK-0007` still counts as
//! 7 and yields `TSK-008`, and ids whose suffix does not parse as an
//! integer (say `TSK-abc`) are skipped entirely. If external data ever
//! carries such ids the generator can produce a collision; that is an
//! accepted limitation, not something this module papers over.

/// Prefix for issue identifiers.
pub const ISSUE_PREFIX: &str = "TSK";

/// Prefix for sprint identifiers.
pub const SPRINT_PREFIX: &str = "SPR";

/// Minimum width of the numeric suffix when formatting.
const ID_WIDTH: usize = 3;

/// Produce the next identifier for the given prefix.
#[must_use]
pub fn next_id<'a, I>(existing: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('-')))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    let next = max.saturating_add(1);
    format!("{prefix}-{next:0width$}", width = ID_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_on_empty_collection() {
        assert_eq!(next_id(std::iter::empty::<&str>(), ISSUE_PREFIX), "TSK-001");
        assert_eq!(next_id(std::iter::empty::<&str>(), SPRINT_PREFIX), "SPR-001");
    }

    #[test]
    fn increments_past_the_maximum() {
        let existing = ["TSK-001", "TSK-003", "TSK-002"];
        assert_eq!(next_id(existing, ISSUE_PREFIX), "TSK-004");
    }

    #[test]
    fn ignores_other_prefixes() {
        let existing = ["SPR-009", "TSK-001"];
        assert_eq!(next_id(existing, ISSUE_PREFIX), "TSK-002");
        assert_eq!(next_id(existing, SPRINT_PREFIX), "SPR-010");
    }

    #[test]
    fn wide_suffixes_parse_but_output_stays_three_digits() {
        assert_eq!(next_id(["TSK-0007"], ISSUE_PREFIX), "TSK-008");
    }

    #[test]
    fn unparseable_suffixes_are_skipped() {
        let existing = ["TSK-abc", "TSK-2"];
        assert_eq!(next_id(existing, ISSUE_PREFIX), "TSK-003");
    }

    #[test]
    fn grows_beyond_three_digits() {
        assert_eq!(next_id(["TSK-999"], ISSUE_PREFIX), "TSK-1000");
    }
}
