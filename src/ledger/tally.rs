//! Vote counting over ledger entries

use std::collections::BTreeMap;

use crate::ledger::entry::Entry;

/// Count votes per choice id across all payloads; genesis contributes nothing
pub fn tally_entries(entries: &[Entry]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for payload in entries.iter().flat_map(|entry| entry.payloads()) {
        *counts.entry(payload.choice_id.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::{create_genesis_entry, Submission};
    use chrono::Utc;

    #[test]
    fn test_tally_groups_by_choice() {
        let genesis = create_genesis_entry(Utc::now());
        let first = Entry::new(
            1,
            Utc::now(),
            vec![Submission::new("v1", "Alice", "c1")],
            genesis.hash().to_string(),
        );
        let second = Entry::new(
            2,
            Utc::now(),
            vec![Submission::new("v2", "Bob", "c1")],
            first.hash().to_string(),
        );
        let third = Entry::new(
            3,
            Utc::now(),
            vec![Submission::new("v3", "Carol", "c3")],
            second.hash().to_string(),
        );

        let counts = tally_entries(&[genesis, first, second, third]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["c1"], 2);
        assert_eq!(counts["c3"], 1);
    }

    #[test]
    fn test_genesis_only_is_empty() {
        assert!(tally_entries(&[create_genesis_entry(Utc::now())]).is_empty());
    }
}
