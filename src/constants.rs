#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Number of results requested per listing page.
pub const RESULTS_PER_PAGE: usize = 50;

/// Listing endpoint, without the query string.
pub const RESULTS_ENDPOINT: &str = "/results/api/v1/evaluations/";

/// Placeholder the portal renders instead of a score for ungraded results.
pub const NO_GRADE_SENTINEL: &str = "—";

/// Graphic type forced onto results whose score was the no-grade placeholder.
pub const NO_GRADE_GRAPHIC_TYPE: &str = "percentage";

/// Numeric value substituted for the no-grade placeholder.
pub const NO_GRADE_VALUE: i64 = -1;

/// Environment variable holding the portal base URL.
pub const ENV_URL: &str = "SMARTSCHOOL_URL";

/// Environment variable holding the raw `Cookie` header of a logged-in
/// session.
pub const ENV_COOKIE: &str = "SMARTSCHOOL_COOKIE";

/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "SMARTSCHOOL_USER_AGENT";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SMARTSCHOOL_TIMEOUT_SECS";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Returns the listing path for the given 1-based page number.
pub fn results_page_path(page_nr: usize) -> String {
    format!("{RESULTS_ENDPOINT}?pageNumber={page_nr}&itemsOnPage={RESULTS_PER_PAGE}")
}

/// Returns the detail path for a single result, with the identifier
/// percent-encoded into one path segment.
pub fn result_detail_path(result_id: &str) -> String {
    format!("{RESULTS_ENDPOINT}{}", urlencoding::encode(result_id))
}
