/// Number of lowercase hex characters that follow the token prefix
pub const TOKEN_HEX_LEN: usize = 64;

/// Shown when the page URL carries no token at all
pub const MISSING_TOKEN_MESSAGE: &str =
    "No access token provided. Please use the link from your confirmation email.";

/// Shown when the token fails the local shape check
pub const MALFORMED_TOKEN_MESSAGE: &str = "Invalid token format.";

/// Shown for every transport-level failure; never carries error detail
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Unable to verify access. Please contact support at 877-503-3247.";

/// Fallback for rejections that arrive without a server message
pub const REJECTED_TOKEN_MESSAGE: &str = "Invalid or revoked access token.";

/// Reason discriminator the validation endpoint uses for lapsed tokens
pub const EXPIRED_REASON: &str = "expired";
