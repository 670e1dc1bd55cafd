//! Free-text filtering of grouped accounts
//!
//! Filtering operates on a copy of the canonical groups and never mutates
//! them. Matching is case-insensitive substring: a group whose name matches
//! is kept whole; otherwise its accounts are narrowed by display name and
//! the group is dropped once empty.

use crate::core::types::{Account, AccountGroup};

/// Narrows `groups` to those matching `search`.
///
/// A blank search (empty or whitespace-only) returns the full group list
/// unchanged. The result is always a subset of `groups`, original order
/// preserved.
pub fn filter_groups(groups: &[AccountGroup], search: &str) -> Vec<AccountGroup> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return groups.to_vec();
    }

    groups
        .iter()
        .filter_map(|group| {
            if group.name.to_lowercase().contains(&needle) {
                return Some(group.clone());
            }
            let accounts: Vec<Account> = group
                .accounts
                .iter()
                .filter(|account| account.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            if accounts.is_empty() {
                None
            } else {
                Some(AccountGroup {
                    name: group.name.clone(),
                    accounts,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            username: name.to_string(),
            has_secret: true,
        }
    }

    fn groups() -> Vec<AccountGroup> {
        vec![
            AccountGroup {
                name: "Normal accounts".to_string(),
                accounts: vec![account("1", "root"), account("2", "administrator")],
            },
            AccountGroup {
                name: "Special accounts".to_string(),
                accounts: vec![account("3", "@INPUT")],
            },
        ]
    }

    #[test]
    fn test_blank_search_returns_full_list() {
        let all = groups();
        assert_eq!(filter_groups(&all, ""), all);
        assert_eq!(filter_groups(&all, "   "), all);
    }

    #[test]
    fn test_group_name_match_keeps_group_whole() {
        let all = groups();
        let filtered = filter_groups(&all, "special");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Special accounts");
        assert_eq!(filtered[0].accounts.len(), 1);
    }

    #[test]
    fn test_account_name_match_narrows_and_drops_empty_groups() {
        let all = groups();
        let filtered = filter_groups(&all, "ROOT");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Normal accounts");
        assert_eq!(filtered[0].accounts.len(), 1);
        assert_eq!(filtered[0].accounts[0].name, "root");
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(filter_groups(&groups(), "nothing-here").is_empty());
    }

    #[test]
    fn test_filtering_does_not_mutate_input() {
        let all = groups();
        let before = all.clone();
        let _ = filter_groups(&all, "root");
        assert_eq!(all, before);
    }

    #[test]
    fn test_result_is_subset_preserving_order() {
        let all = groups();
        let filtered = filter_groups(&all, "a");
        let names: Vec<&str> = filtered.iter().map(|g| g.name.as_str()).collect();
        let mut last_index = 0;
        for name in names {
            let index = all.iter().position(|g| g.name == name).unwrap();
            assert!(index >= last_index);
            last_index = index;
        }
    }
}
