use std::str::FromStr;

/// Reads `name` and parses it, falling back to `default` when the variable is
/// missing or malformed.
pub(crate) fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "Ignoring malformed value");
            default
        }),
        Err(_) => default,
    }
}

pub(crate) fn string_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn flag_or(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v != "false" && v != "0" && v != "no"
        })
        .unwrap_or(default)
}
