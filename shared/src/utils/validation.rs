//! Common validation utilities

/// Return the trimmed value if it is present and not blank
pub fn required_trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
