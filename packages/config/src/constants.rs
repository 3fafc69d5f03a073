// ABOUTME: Environment variable name constants and their default values
// ABOUTME: Centralized definitions of every setting the access gate reads

// Validation Endpoint
pub const ACCESSGATE_ENDPOINT: &str = "ACCESSGATE_ENDPOINT";
pub const ACCESSGATE_TRANSPORT: &str = "ACCESSGATE_TRANSPORT";
pub const ACCESSGATE_DISPATCH_ACTION: &str = "ACCESSGATE_DISPATCH_ACTION";
pub const ACCESSGATE_ENVELOPE: &str = "ACCESSGATE_ENVELOPE";
pub const ACCESSGATE_REQUEST_TIMEOUT_SECS: &str = "ACCESSGATE_REQUEST_TIMEOUT_SECS";

// Token Shape
pub const ACCESSGATE_TOKEN_PARAM: &str = "ACCESSGATE_TOKEN_PARAM";
pub const ACCESSGATE_TOKEN_PREFIX: &str = "ACCESSGATE_TOKEN_PREFIX";

// Presentation
pub const ACCESSGATE_WARNING_DAYS: &str = "ACCESSGATE_WARNING_DAYS";
pub const ACCESSGATE_PURCHASE_URL: &str = "ACCESSGATE_PURCHASE_URL";
pub const ACCESSGATE_EXTEND_URL: &str = "ACCESSGATE_EXTEND_URL";

// Page Contract
pub const ACCESSGATE_LOADING_ID: &str = "ACCESSGATE_LOADING_ID";
pub const ACCESSGATE_CONTENT_ID: &str = "ACCESSGATE_CONTENT_ID";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_ENDPOINT: &str = "https://www.myfairclaim.com/wp-json/mfc/v1/validate-token";
pub const DEFAULT_TRANSPORT: &str = "get-query";
pub const DEFAULT_DISPATCH_ACTION: &str = "mfc_validate_token";
pub const DEFAULT_ENVELOPE: &str = "auto";
pub const DEFAULT_TOKEN_PARAM: &str = "token";
pub const DEFAULT_TOKEN_PREFIX: &str = "MFC_";
pub const DEFAULT_WARNING_DAYS: i64 = 30;
pub const DEFAULT_PURCHASE_URL: &str = "https://www.myfairclaim.com/pricing";
pub const DEFAULT_EXTEND_URL: &str = "https://www.myfairclaim.com/extend-access";
pub const DEFAULT_LOADING_ID: &str = "loading-screen";
pub const DEFAULT_CONTENT_ID: &str = "tool-content";
