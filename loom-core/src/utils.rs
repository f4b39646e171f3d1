//! Shared string utilities.

/// Turn an arbitrary name into a C99 extended identifier.
///
/// Every character that is not ASCII alphanumeric or `_` becomes `_`, and a
/// leading digit is prefixed with `_` (e.g., "My-App 2" -> "My_App_2",
/// "3D" -> "_3D").
pub fn to_c99_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}
