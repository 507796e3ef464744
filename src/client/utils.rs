//! Status code helpers.

/// Check if status code is in the 2xx success range
pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Check if status code indicates access denied
pub fn is_access_denied_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}
