//! Account selector view-model
//!
//! Owns the state of the "pick an account" form of a connect dialog:
//! grouped accounts, the free-text filter, the current selection, the
//! manually entered credential and the remember-auth hook. The host
//! renders this state, forwards user input through the setter methods,
//! and calls [`SelectAccountView::settle`] after each render pass to run
//! the deferred focus/validation steps that must wait for the view to
//! finish updating.
//!
//! Single-threaded by design: state is shared through `Rc<RefCell<_>>`
//! and all event delivery is synchronous on the caller's stack.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info};

use crate::adapters::AuthStore;
use crate::core::filter::filter_groups;
use crate::core::grouping::group_accounts;
use crate::core::reactive::{CancellationToken, EventEmitter, ReplaySubject};
use crate::core::types::{
    Account, AccountGroup, Asset, AuthInfo, DOMAIN_LOGIN_USERNAME, MANUAL_INPUT_USERNAME,
};
use crate::i18n::Translator;

/// Shared submit trigger owned by the host dialog. The selector subscribes
/// to it during initialization; the carried flag is ignored, every
/// emission counts as a submit.
pub type SubmitSignal = Rc<ReplaySubject<bool>>;

/// Delay class for applying the initial selection, letting the host's
/// first render finish before validation arms.
pub const INITIAL_SELECTION_DELAY_MS: u64 = 100;

/// Delay class for moving input focus after a selection change.
pub const FOCUS_DELAY_MS: u64 = 10;

/// Input field the host should focus after a settle pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Username,
    Secret,
}

/// Deferred work queued for the next settle pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    ApplyInitialSelection,
    MoveFocus,
}

impl PendingAction {
    fn delay_ms(self) -> u64 {
        match self {
            PendingAction::ApplyInitialSelection => INITIAL_SELECTION_DELAY_MS,
            PendingAction::MoveFocus => FOCUS_DELAY_MS,
        }
    }
}

/// Inputs supplied by the host dialog when it opens
pub struct SelectorInputs {
    pub asset: Asset,
    pub accounts: Vec<Account>,
    /// Initial manual credential record; overwritten as selections change
    pub manual_auth: AuthInfo,
    /// The dialog's submit trigger
    pub submit: SubmitSignal,
}

struct SelectorState {
    asset: Asset,
    accounts: Vec<Account>,
    manual_auth: AuthInfo,
    submit: SubmitSignal,
    store: Rc<dyn AuthStore>,
    translator: Rc<dyn Translator>,

    grouped_accounts: Vec<AccountGroup>,
    filtered_groups: Rc<ReplaySubject<Vec<AccountGroup>>>,
    selected: Option<Account>,
    selection_required: bool,
    local_auth_items: Vec<AuthInfo>,
    autocomplete_options: Vec<AuthInfo>,
    manual_auth_init: bool,
    search_text: String,
    username_placeholder: String,
    remember_auth: bool,
    remember_auth_disabled: bool,
    hide_secret: bool,

    pending: Vec<PendingAction>,
    on_select: Rc<EventEmitter<Account>>,
    on_focus: Rc<EventEmitter<FocusTarget>>,
    token: CancellationToken,
    initialized: bool,
    disposed: bool,
}

impl SelectorState {
    // Runs on the host's submit trigger. State borrow is released before
    // the store call.
    fn handle_submit(state: &Rc<RefCell<SelectorState>>) {
        let save = {
            let s = state.borrow();
            if s.disposed || !s.remember_auth {
                return;
            }
            match &s.selected {
                Some(account) => (
                    s.asset.id.clone(),
                    account.id.clone(),
                    s.manual_auth.clone(),
                    Rc::clone(&s.store),
                ),
                None => return,
            }
        };
        let (asset_id, account_id, auth, store) = save;
        debug!(
            asset_id = %asset_id,
            account_id = %account_id,
            username = %auth.username,
            "remember-auth set, saving manual credential"
        );
        if let Err(e) = store.save_auth(&asset_id, &account_id, &auth) {
            error!(error = %e, "failed to save credential to local auth store");
        }
    }
}

/// The account selector component
///
/// Lifecycle: [`new`](Self::new) when the dialog opens, one
/// [`initialize`](Self::initialize), user interaction through the setters,
/// [`settle`](Self::settle) after each render pass,
/// [`dispose`](Self::dispose) when the dialog closes. After dispose every
/// subscription is cancelled and no further event is delivered.
pub struct SelectAccountView {
    state: Rc<RefCell<SelectorState>>,
}

impl SelectAccountView {
    pub fn new(
        inputs: SelectorInputs,
        store: Rc<dyn AuthStore>,
        translator: Rc<dyn Translator>,
    ) -> Self {
        let username_placeholder = translator.translate("Username");
        Self {
            state: Rc::new(RefCell::new(SelectorState {
                asset: inputs.asset,
                accounts: inputs.accounts,
                manual_auth: inputs.manual_auth,
                submit: inputs.submit,
                store,
                translator,
                grouped_accounts: Vec::new(),
                filtered_groups: Rc::new(ReplaySubject::new()),
                selected: None,
                selection_required: false,
                local_auth_items: Vec::new(),
                autocomplete_options: Vec::new(),
                manual_auth_init: false,
                search_text: String::new(),
                username_placeholder,
                remember_auth: false,
                remember_auth_disabled: false,
                hide_secret: true,
                pending: Vec::new(),
                on_select: Rc::new(EventEmitter::new()),
                on_focus: Rc::new(EventEmitter::new()),
                token: CancellationToken::new(),
                initialized: false,
                disposed: false,
            })),
        }
    }

    /// Populates the component from its inputs.
    ///
    /// Groups the accounts (once; later changes to the account list do not
    /// regroup), publishes the unfiltered groups, pre-fills the manual
    /// username from the default selection, subscribes to the submit
    /// trigger, and queues the deferred initial selection for the next
    /// settle pass.
    pub fn initialize(&self) {
        let published = {
            let mut s = self.state.borrow_mut();
            if s.disposed || s.initialized {
                return;
            }
            s.initialized = true;

            let preferred = s.store.preferred_account_id(&s.asset.id);
            let grouped = group_accounts(&s.accounts, preferred.as_deref(), s.translator.as_ref());
            s.grouped_accounts = grouped.groups;
            s.selected = grouped.default_selection;
            if let Some(selected) = &s.selected {
                s.manual_auth.username = if selected.is_special() {
                    String::new()
                } else {
                    selected.username.clone()
                };
            }
            s.pending.push(PendingAction::ApplyInitialSelection);
            info!(
                asset_id = %s.asset.id,
                account_count = s.accounts.len(),
                group_count = s.grouped_accounts.len(),
                "account selector initialized"
            );
            (Rc::clone(&s.filtered_groups), s.grouped_accounts.clone())
        };
        let (filtered, groups) = published;
        filtered.next(groups);

        let (token, submit) = {
            let s = self.state.borrow();
            (s.token.clone(), Rc::clone(&s.submit))
        };
        let weak = Rc::downgrade(&self.state);
        submit.subscribe(&token, move |_| {
            if let Some(state) = weak.upgrade() {
                SelectorState::handle_submit(&state);
            }
        });
    }

    /// Tears the component down: cancels the shared token, drops every
    /// subscriber and discards pending deferred work. Idempotent.
    pub fn dispose(&self) {
        let emitters = {
            let mut s = self.state.borrow_mut();
            if s.disposed {
                return;
            }
            s.disposed = true;
            s.token.cancel();
            s.pending.clear();
            (
                Rc::clone(&s.on_select),
                Rc::clone(&s.on_focus),
                Rc::clone(&s.filtered_groups),
            )
        };
        let (on_select, on_focus, filtered) = emitters;
        on_select.clear_subscribers();
        on_focus.clear_subscribers();
        filtered.clear_subscribers();
    }

    /// Runs the deferred actions queued up to this point. Actions queued
    /// while settling (the focus move scheduled by a selection change) run
    /// on the next settle pass.
    pub fn settle(&self) {
        let actions = {
            let mut s = self.state.borrow_mut();
            if s.disposed {
                return;
            }
            std::mem::take(&mut s.pending)
        };
        for action in actions {
            match action {
                PendingAction::ApplyInitialSelection => {
                    let selection = {
                        let mut s = self.state.borrow_mut();
                        if s.disposed {
                            return;
                        }
                        s.selection_required = true;
                        s.selected.clone()
                    };
                    if let Some(account) = selection {
                        self.select_account(account);
                    }
                }
                PendingAction::MoveFocus => {
                    let target = {
                        let s = self.state.borrow();
                        if s.disposed {
                            return;
                        }
                        let target = if s.manual_auth.username.is_empty() {
                            FocusTarget::Username
                        } else {
                            FocusTarget::Secret
                        };
                        (Rc::clone(&s.on_focus), target)
                    };
                    let (on_focus, target) = target;
                    on_focus.emit(&target);
                }
            }
        }
    }

    /// Suggested delay before the host's next settle pass, from the
    /// longest-waiting pending action. `None` when nothing is queued.
    pub fn next_settle_delay_ms(&self) -> Option<u64> {
        let s = self.state.borrow();
        s.pending.iter().map(|action| action.delay_ms()).max()
    }

    /// Selects `account` (user pick or programmatic re-assignment).
    ///
    /// Emits the selection-changed event, then reconciles the manual
    /// credential: sentinel and missing-secret clearing, cached credential
    /// overwrite, username defaulting, placeholder recomputation, and a
    /// deferred focus move.
    pub fn select_account(&self, account: Account) {
        let on_select = {
            let mut s = self.state.borrow_mut();
            if s.disposed {
                return;
            }
            s.selected = Some(account.clone());
            Rc::clone(&s.on_select)
        };
        on_select.emit(&account);
        self.reconcile_manual_auth();
    }

    fn reconcile_manual_auth(&self) {
        let lookup = {
            let mut s = self.state.borrow_mut();
            if s.disposed {
                return;
            }
            let selected = match s.selected.clone() {
                Some(selected) => selected,
                None => return,
            };
            if selected.username == MANUAL_INPUT_USERNAME {
                s.manual_auth.username.clear();
            }
            if !selected.has_secret {
                s.manual_auth.secret.clear();
            }
            (s.asset.id.clone(), selected, Rc::clone(&s.store))
        };
        let (asset_id, selected, store) = lookup;
        let items = store.local_auth(&asset_id, &selected.username);

        let mut s = self.state.borrow_mut();
        if s.disposed {
            return;
        }
        if let Some(first) = items.first() {
            s.manual_auth = first.clone();
        }
        s.local_auth_items = items;
        // Sentinel usernames are never concrete login names, so they are
        // not used as the manual default.
        if s.manual_auth.username.is_empty()
            && !selected.username.is_empty()
            && !selected.is_special()
        {
            s.manual_auth.username = selected.username.clone();
        }
        s.username_placeholder = if selected.username == DOMAIN_LOGIN_USERNAME {
            s.translator.translate("Username@Domain")
        } else {
            s.translator.translate("Username")
        };
        s.pending.push(PendingAction::MoveFocus);
        debug!(
            account_id = %selected.id,
            username = %selected.username,
            "selection changed, manual auth reconciled"
        );
    }

    /// Updates the free-text search and republishes the filtered groups.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let publish = {
            let mut s = self.state.borrow_mut();
            if s.disposed {
                return;
            }
            s.search_text = text.into();
            if !s.initialized {
                return;
            }
            let filtered = filter_groups(&s.grouped_accounts, &s.search_text);
            (Rc::clone(&s.filtered_groups), filtered)
        };
        let (subject, filtered) = publish;
        subject.next(filtered);
    }

    /// Updates the manual username and recomputes the autocomplete
    /// options from the cached credentials for this asset. An exact
    /// (case-insensitive) username match merges that entry into the
    /// manual credential.
    pub fn set_manual_username(&self, value: impl Into<String>) {
        let mut s = self.state.borrow_mut();
        if s.disposed {
            return;
        }
        s.manual_auth.username = value.into();
        let needle = s.manual_auth.username.to_lowercase();

        let mut exact: Option<AuthInfo> = None;
        let mut options = Vec::new();
        for item in &s.local_auth_items {
            let item_username = item.username.to_lowercase();
            if item_username == needle {
                exact = Some(item.clone());
            }
            if item_username.contains(&needle) {
                options.push(item.clone());
            }
        }
        if let Some(auth) = exact {
            s.manual_auth = auth;
        }
        s.autocomplete_options = options;
    }

    pub fn set_manual_secret(&self, value: impl Into<String>) {
        let mut s = self.state.borrow_mut();
        if s.disposed {
            return;
        }
        s.manual_auth.secret = value.into();
    }

    /// First focus of the username input resets the autocomplete options
    /// to the full cached set. Subsequent focuses are no-ops.
    pub fn on_username_focus(&self) {
        let mut s = self.state.borrow_mut();
        if s.disposed || s.manual_auth_init {
            return;
        }
        s.manual_auth_init = true;
        s.autocomplete_options = s.local_auth_items.clone();
    }

    /// Sets the remember-auth flag; ignored while the host has disabled
    /// the control.
    pub fn set_remember_auth(&self, remember: bool) {
        let mut s = self.state.borrow_mut();
        if s.disposed || s.remember_auth_disabled {
            return;
        }
        s.remember_auth = remember;
    }

    pub fn set_remember_auth_disabled(&self, disabled: bool) {
        let mut s = self.state.borrow_mut();
        if s.disposed {
            return;
        }
        s.remember_auth_disabled = disabled;
    }

    pub fn toggle_secret_visibility(&self) {
        let mut s = self.state.borrow_mut();
        if s.disposed {
            return;
        }
        s.hide_secret = !s.hide_secret;
    }

    // --- subscriptions -------------------------------------------------

    /// Registers a selection-changed callback under the component token.
    pub fn subscribe_selection(&self, callback: impl FnMut(&Account) + 'static) {
        let registration = {
            let s = self.state.borrow();
            if s.disposed {
                return;
            }
            (Rc::clone(&s.on_select), s.token.clone())
        };
        let (emitter, token) = registration;
        emitter.subscribe(&token, callback);
    }

    /// Registers a focus-request callback under the component token.
    pub fn subscribe_focus(&self, callback: impl FnMut(&FocusTarget) + 'static) {
        let registration = {
            let s = self.state.borrow();
            if s.disposed {
                return;
            }
            (Rc::clone(&s.on_focus), s.token.clone())
        };
        let (emitter, token) = registration;
        emitter.subscribe(&token, callback);
    }

    /// Registers a filtered-groups callback under the component token;
    /// the latest published value is replayed immediately.
    pub fn subscribe_filtered_groups(&self, callback: impl FnMut(&Vec<AccountGroup>) + 'static) {
        let registration = {
            let s = self.state.borrow();
            if s.disposed {
                return;
            }
            (Rc::clone(&s.filtered_groups), s.token.clone())
        };
        let (subject, token) = registration;
        subject.subscribe(&token, callback);
    }

    // --- view state accessors ------------------------------------------

    pub fn selected_account(&self) -> Option<Account> {
        self.state.borrow().selected.clone()
    }

    pub fn grouped_accounts(&self) -> Vec<AccountGroup> {
        self.state.borrow().grouped_accounts.clone()
    }

    /// Latest published filtered view, full group list when unfiltered.
    pub fn filtered_groups(&self) -> Vec<AccountGroup> {
        self.state
            .borrow()
            .filtered_groups
            .latest()
            .unwrap_or_default()
    }

    pub fn manual_auth(&self) -> AuthInfo {
        self.state.borrow().manual_auth.clone()
    }

    pub fn username_placeholder(&self) -> String {
        self.state.borrow().username_placeholder.clone()
    }

    pub fn autocomplete_options(&self) -> Vec<AuthInfo> {
        self.state.borrow().autocomplete_options.clone()
    }

    pub fn search_text(&self) -> String {
        self.state.borrow().search_text.clone()
    }

    pub fn remember_auth(&self) -> bool {
        self.state.borrow().remember_auth
    }

    pub fn remember_auth_disabled(&self) -> bool {
        self.state.borrow().remember_auth_disabled
    }

    pub fn hide_secret(&self) -> bool {
        self.state.borrow().hide_secret
    }

    /// False only once the initial settle has armed required-selection
    /// validation and nothing is selected; the host blocks submission on it.
    pub fn selection_valid(&self) -> bool {
        let s = self.state.borrow();
        !s.selection_required || s.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryAuthStore;
    use crate::i18n::Catalog;

    fn asset() -> Asset {
        Asset {
            id: "asset-1".to_string(),
            name: "db01".to_string(),
            address: "10.0.0.8".to_string(),
        }
    }

    fn account(id: &str, username: &str) -> Account {
        Account {
            id: id.to_string(),
            name: username.to_string(),
            username: username.to_string(),
            has_secret: true,
        }
    }

    struct Fixture {
        view: SelectAccountView,
        store: Rc<MemoryAuthStore>,
        submit: SubmitSignal,
    }

    fn fixture(accounts: Vec<Account>, store: Rc<MemoryAuthStore>) -> Fixture {
        let submit: SubmitSignal = Rc::new(ReplaySubject::new());
        let view = SelectAccountView::new(
            SelectorInputs {
                asset: asset(),
                accounts,
                manual_auth: AuthInfo::default(),
                submit: Rc::clone(&submit),
            },
            Rc::clone(&store) as Rc<dyn AuthStore>,
            Catalog::shared(),
        );
        Fixture { view, store, submit }
    }

    fn selection_log(view: &SelectAccountView) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        view.subscribe_selection(move |account: &Account| {
            sink.borrow_mut().push(account.id.clone());
        });
        log
    }

    #[test]
    fn test_initialize_publishes_groups_and_prefills_username() {
        let f = fixture(
            vec![account("1", "root"), account("2", "@INPUT")],
            Rc::new(MemoryAuthStore::new()),
        );
        f.view.initialize();

        let groups = f.view.filtered_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Normal accounts");
        // Default selection is the first normal account and its concrete
        // username pre-fills the manual credential.
        assert_eq!(f.view.selected_account().unwrap().id, "1");
        assert_eq!(f.view.manual_auth().username, "root");
    }

    #[test]
    fn test_initialize_with_special_default_leaves_username_empty() {
        let f = fixture(
            vec![account("1", "@INPUT")],
            Rc::new(MemoryAuthStore::new()),
        );
        f.view.initialize();
        assert_eq!(f.view.selected_account().unwrap().id, "1");
        assert_eq!(f.view.manual_auth().username, "");
    }

    #[test]
    fn test_preferred_account_becomes_initial_selection() {
        let store = Rc::new(MemoryAuthStore::new());
        store.seed_preferred("asset-1", "2");
        let f = fixture(
            vec![account("1", "root"), account("2", "rdp")],
            store,
        );
        f.view.initialize();

        assert_eq!(f.view.selected_account().unwrap().id, "2");
        let groups = f.view.filtered_groups();
        assert_eq!(groups[0].name, "Last login");
        assert_eq!(groups[0].accounts[0].id, "2");
    }

    #[test]
    fn test_initial_selection_is_applied_on_settle_with_delays() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        let log = selection_log(&f.view);

        assert!(f.view.selection_valid(), "validation not armed before settle");
        assert_eq!(
            f.view.next_settle_delay_ms(),
            Some(INITIAL_SELECTION_DELAY_MS)
        );

        f.view.settle();
        assert_eq!(*log.borrow(), vec!["1".to_string()]);
        assert!(f.view.selection_valid());

        // The focus move was queued while settling and runs next pass
        assert_eq!(f.view.next_settle_delay_ms(), Some(FOCUS_DELAY_MS));
        let focus = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&focus);
        f.view.subscribe_focus(move |target| sink.borrow_mut().push(*target));
        f.view.settle();
        assert_eq!(*focus.borrow(), vec![FocusTarget::Secret]);
    }

    #[test]
    fn test_empty_account_list_blocks_submission() {
        let f = fixture(Vec::new(), Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        let log = selection_log(&f.view);

        f.view.settle();
        assert!(log.borrow().is_empty());
        assert!(f.view.selected_account().is_none());
        assert!(!f.view.selection_valid());
    }

    #[test]
    fn test_selecting_account_without_secret_clears_manual_secret() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        f.view.set_manual_secret("typed-by-hand");

        let mut no_secret = account("2", "guest");
        no_secret.has_secret = false;
        f.view.select_account(no_secret);

        assert_eq!(f.view.manual_auth().secret, "");
    }

    #[test]
    fn test_selecting_manual_input_account_clears_username() {
        let f = fixture(
            vec![account("1", "root"), account("2", "@INPUT")],
            Rc::new(MemoryAuthStore::new()),
        );
        f.view.initialize();
        assert_eq!(f.view.manual_auth().username, "root");

        f.view.select_account(account("2", "@INPUT"));
        assert_eq!(f.view.manual_auth().username, "");
    }

    #[test]
    fn test_placeholder_is_domain_qualified_for_rdp_username() {
        let f = fixture(
            vec![account("1", "root"), account("2", "rdp")],
            Rc::new(MemoryAuthStore::new()),
        );
        f.view.initialize();
        assert_eq!(f.view.username_placeholder(), "Username");

        f.view.select_account(account("2", "rdp"));
        assert_eq!(f.view.username_placeholder(), "Username@Domain");

        f.view.select_account(account("1", "root"));
        assert_eq!(f.view.username_placeholder(), "Username");
    }

    #[test]
    fn test_cached_credential_overwrites_manual_auth_on_selection() {
        let store = Rc::new(MemoryAuthStore::new());
        store.seed_auth("asset-1", "acc-9", "root", "cached-secret");
        let f = fixture(vec![account("1", "root")], store);
        f.view.initialize();
        f.view.set_manual_secret("typed");

        f.view.select_account(account("1", "root"));
        let auth = f.view.manual_auth();
        assert_eq!(auth.username, "root");
        assert_eq!(auth.secret, "cached-secret");
    }

    #[test]
    fn test_focus_goes_to_username_when_manual_username_empty() {
        let f = fixture(vec![account("1", "@INPUT")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        let focus = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&focus);
        f.view.subscribe_focus(move |target| sink.borrow_mut().push(*target));

        f.view.settle(); // applies initial selection
        f.view.settle(); // runs the queued focus move
        assert_eq!(*focus.borrow(), vec![FocusTarget::Username]);
    }

    #[test]
    fn test_search_filters_published_groups_and_blank_restores() {
        let f = fixture(
            vec![account("1", "root"), account("2", "administrator")],
            Rc::new(MemoryAuthStore::new()),
        );
        f.view.initialize();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        f.view.subscribe_filtered_groups(move |groups: &Vec<AccountGroup>| {
            sink.borrow_mut().push(groups.clone());
        });
        // Replay delivers the unfiltered list on subscribe
        assert_eq!(seen.borrow().len(), 1);

        f.view.set_search_text("admin");
        {
            let log = seen.borrow();
            let latest = log.last().unwrap();
            assert_eq!(latest.len(), 1);
            assert_eq!(latest[0].accounts[0].name, "administrator");
        }

        f.view.set_search_text("");
        let log = seen.borrow();
        assert_eq!(*log.last().unwrap(), f.view.grouped_accounts());
    }

    #[test]
    fn test_username_autocomplete_filters_and_merges_exact_match() {
        let store = Rc::new(MemoryAuthStore::new());
        store.seed_auth("asset-1", "acc-1", "root", "root-secret");
        store.seed_auth("asset-1", "acc-2", "rooter", "other-secret");
        let f = fixture(vec![account("1", "root")], store);
        f.view.initialize();
        f.view.settle(); // selection loads the cached entries for "root"

        f.view.on_username_focus();
        f.view.set_manual_username("ROOT");

        let options = f.view.autocomplete_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].username, "root");
        // Exact match merged the cached secret in
        assert_eq!(f.view.manual_auth().secret, "root-secret");
        assert_eq!(f.view.manual_auth().username, "root");
    }

    #[test]
    fn test_first_username_focus_resets_options_once() {
        let store = Rc::new(MemoryAuthStore::new());
        store.seed_auth("asset-1", "acc-1", "root", "s");
        let f = fixture(vec![account("1", "root")], store);
        f.view.initialize();
        f.view.settle();

        f.view.set_manual_username("zzz");
        assert!(f.view.autocomplete_options().is_empty());

        f.view.on_username_focus();
        assert_eq!(f.view.autocomplete_options().len(), 1);

        f.view.set_manual_username("zzz");
        f.view.on_username_focus();
        assert!(f.view.autocomplete_options().is_empty());
    }

    #[test]
    fn test_submit_with_remember_persists_exactly_once() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        f.view.settle();
        f.view.set_manual_secret("hunter2");
        f.view.set_remember_auth(true);

        f.submit.next(true);
        assert_eq!(f.store.save_count(), 1);
        let saved = f.store.local_auth("asset-1", "1");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].username, "root");
        assert_eq!(saved[0].secret, "hunter2");
        assert_eq!(f.store.preferred_account_id("asset-1").unwrap(), "1");
    }

    #[test]
    fn test_submit_without_remember_never_persists() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        f.view.settle();

        f.submit.next(true);
        assert_eq!(f.store.save_count(), 0);
    }

    #[test]
    fn test_remember_flag_ignored_while_disabled() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        f.view.set_remember_auth_disabled(true);
        f.view.set_remember_auth(true);
        assert!(!f.view.remember_auth());
    }

    #[test]
    fn test_dispose_silences_all_outputs() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        f.view.initialize();
        f.view.settle();
        let log = selection_log(&f.view);
        f.view.set_remember_auth(true);

        f.view.dispose();

        // The submit stream still emits, but the remember hook is dead
        f.submit.next(true);
        assert_eq!(f.store.save_count(), 0);

        // Selection changes no longer happen nor notify
        let before = log.borrow().len();
        f.view.select_account(account("1", "root"));
        f.view.settle();
        assert_eq!(log.borrow().len(), before);
        f.view.dispose(); // idempotent
    }

    #[test]
    fn test_secret_visibility_toggle() {
        let f = fixture(vec![account("1", "root")], Rc::new(MemoryAuthStore::new()));
        assert!(f.view.hide_secret());
        f.view.toggle_secret_visibility();
        assert!(!f.view.hide_secret());
    }
}
