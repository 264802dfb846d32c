//! Per-request correlation IDs

use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Every completion call gets one; it is attached to each log line of that
/// call, including retry attempts.
///
/// # Examples
///
/// ```
/// use nutripsych::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert_eq!(request_id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
