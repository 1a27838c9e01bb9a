//! Client-side session configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Tokens expiring within this window are refreshed before a request is sent
    pub const REFRESH_LOOKAHEAD_SECS: i64 = 30;

    /// The proactive refresh timer fires this long before expiry
    pub const PROACTIVE_REFRESH_MARGIN_SECS: i64 = 5;

    /// Status polling interval in milliseconds while authorized
    pub const STATUS_POLL_INTERVAL_MS: u32 = 60_000; // 1 minute

    /// Longest delay browser timers accept (`i32::MAX` ms); longer ones fire at once
    pub const MAX_TIMER_DELAY_MS: u32 = 2_147_483_647;

    /// Token type assumed when the server omits one
    pub const DEFAULT_TOKEN_TYPE: &'static str = "Bearer";
}

/// Keys used for persisted client state
pub struct StorageKeys;

impl StorageKeys {
    pub const ACCESS_TOKEN: &'static str = "accessToken";
    pub const REFRESH_TOKEN: &'static str = "refreshToken";
    pub const TOKEN_TYPE: &'static str = "tokenType";
    /// Absolute expiry in milliseconds since the Unix epoch
    pub const TOKEN_EXPIRY: &'static str = "tokenExpiry";
    pub const AUTHORIZED_USER_ID: &'static str = "authorizedUserId";
    pub const THEME: &'static str = "theme";

    /// Every key owned by the session; cleared together
    pub const SESSION: [&'static str; 5] = [
        Self::ACCESS_TOKEN,
        Self::REFRESH_TOKEN,
        Self::TOKEN_TYPE,
        Self::TOKEN_EXPIRY,
        Self::AUTHORIZED_USER_ID,
    ];
}
