//! MockTail client core
//!
//! Session tokens, auth state, the route table and the route guard. Nothing
//! here touches the network or the DOM; the http and frontend crates plug in
//! storage and navigation through [`KeyValueStorage`] and [`Navigator`].

pub mod access_tokens;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod storage;
pub mod theme;

pub use access_tokens::{AccessTokenAction, AccessTokenList, ProjectAccessToken};
pub use auth::{AuthAction, AuthState, AuthStatus, AuthStore, AuthorizedUser, Subscription};
pub use config::{AuthConfig, StorageKeys};
pub use error::{CoreError, CoreResult};
pub use guard::{GuardDecision, authorize, authorize_path};
pub use navigation::{Navigator, force_login};
pub use routes::{Breadcrumb, CrumbLabel, Page, RouteMatch, RouteTable, interpolate_path, paths};
pub use session::{AccessToken, Session, TokenGrant, TokenStore};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use theme::Theme;
