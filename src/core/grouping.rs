//! Account grouping - partitions an asset's accounts for display
//!
//! Accounts are bucketed into up to three ordered groups: "Last login"
//! (the remembered account for this asset), "Normal accounts" and
//! "Special accounts" (`@`-prefixed usernames). Grouping is a pure
//! computation; applying the default selection it suggests is a separate,
//! explicit step taken by the view-model.

use crate::core::types::{Account, AccountGroup};
use crate::i18n::Translator;

/// Result of grouping: the ordered display groups plus the account that
/// should be selected by default, if any.
#[derive(Debug, Clone)]
pub struct Grouped {
    pub groups: Vec<AccountGroup>,
    pub default_selection: Option<Account>,
}

/// Accounts whose username is a concrete login name (no `@` prefix),
/// in original order.
pub fn normal_accounts(accounts: &[Account]) -> Vec<Account> {
    accounts
        .iter()
        .filter(|account| !account.is_special())
        .cloned()
        .collect()
}

/// Accounts whose username starts with the `@` sentinel prefix,
/// in original order.
pub fn special_accounts(accounts: &[Account]) -> Vec<Account> {
    accounts
        .iter()
        .filter(|account| account.is_special())
        .cloned()
        .collect()
}

/// Partitions `accounts` into display groups.
///
/// Group order is fixed: "Last login" (singleton, only when `preferred_id`
/// matches an account in the list), then "Normal accounts", then
/// "Special accounts". The preferred account appears only in "Last login";
/// empty groups are omitted. No account lands in more than one group.
///
/// Default selection: the preferred account, else the first normal
/// account, else the first special account, else none.
///
/// # Arguments
/// * `accounts` - Full account list for the asset, caller order preserved
/// * `preferred_id` - Account id remembered from the last login, if any
/// * `translator` - Supplies the localized group names
pub fn group_accounts(
    accounts: &[Account],
    preferred_id: Option<&str>,
    translator: &dyn Translator,
) -> Grouped {
    let preferred = preferred_id
        .and_then(|id| accounts.iter().find(|account| account.id == id))
        .cloned();

    let mut groups = Vec::new();
    let mut default_selection = preferred.clone();

    if let Some(account) = &preferred {
        groups.push(AccountGroup {
            name: translator.translate("Last login"),
            accounts: vec![account.clone()],
        });
    }

    let not_preferred = |account: &Account| {
        preferred
            .as_ref()
            .map_or(true, |p| !p.same_identity(account))
    };

    let normal: Vec<Account> = normal_accounts(accounts)
        .into_iter()
        .filter(|account| not_preferred(account))
        .collect();
    if !normal.is_empty() {
        if default_selection.is_none() {
            default_selection = Some(normal[0].clone());
        }
        groups.push(AccountGroup {
            name: translator.translate("Normal accounts"),
            accounts: normal,
        });
    }

    let special: Vec<Account> = special_accounts(accounts)
        .into_iter()
        .filter(|account| not_preferred(account))
        .collect();
    if !special.is_empty() {
        if default_selection.is_none() {
            default_selection = Some(special[0].clone());
        }
        groups.push(AccountGroup {
            name: translator.translate("Special accounts"),
            accounts: special,
        });
    }

    Grouped {
        groups,
        default_selection,
    }
}
