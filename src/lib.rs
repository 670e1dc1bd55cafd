//! Account selection view-model for connection dialogs
//!
//! When a user connects to a remote asset they first pick the account to
//! authenticate with. This crate implements that form as a headless,
//! UI-framework-free component: it groups the asset's accounts, filters
//! them by free-text search, tracks the current selection and a manually
//! entered credential, autocompletes the manual username from a local
//! credential cache, and optionally remembers the credential on submit.
//! The host dialog renders the state, forwards input through the setter
//! methods, and drains deferred focus/validation work with
//! [`SelectAccountView::settle`] after each render pass.
//!
//! ```
//! use std::rc::Rc;
//!
//! use account_select::{
//!     Account, Asset, AuthInfo, Catalog, MemoryAuthStore, ReplaySubject, SelectAccountView,
//!     SelectorInputs,
//! };
//!
//! let submit = Rc::new(ReplaySubject::new());
//! let view = SelectAccountView::new(
//!     SelectorInputs {
//!         asset: Asset {
//!             id: "asset-1".into(),
//!             name: "db01".into(),
//!             address: "10.0.0.8".into(),
//!         },
//!         accounts: vec![Account {
//!             id: "1".into(),
//!             name: "root".into(),
//!             username: "root".into(),
//!             has_secret: true,
//!         }],
//!         manual_auth: AuthInfo::default(),
//!         submit: Rc::clone(&submit),
//!     },
//!     Rc::new(MemoryAuthStore::new()),
//!     Catalog::shared(),
//! );
//! view.subscribe_selection(|account| println!("selected {}", account.name));
//! view.initialize();
//! view.settle();
//! assert!(view.selected_account().is_some());
//! ```

pub mod adapters;
pub mod core;
pub mod errors;
pub mod i18n;
pub mod infra;

pub use crate::adapters::{AuthStore, JsonFileAuthStore, MemoryAuthStore};
pub use crate::core::reactive::{CancellationToken, EventEmitter, ReplaySubject};
pub use crate::core::selector::{
    FocusTarget, SelectAccountView, SelectorInputs, SubmitSignal, FOCUS_DELAY_MS,
    INITIAL_SELECTION_DELAY_MS,
};
pub use crate::core::types::{
    Account, AccountGroup, Asset, AuthInfo, DOMAIN_LOGIN_USERNAME, MANUAL_INPUT_USERNAME,
    SPECIAL_PREFIX,
};
pub use crate::errors::AppError;
pub use crate::i18n::{Catalog, Translator};
