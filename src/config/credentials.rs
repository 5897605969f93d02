use tracing::debug;

const REDACTED: &str = "[REDACTED]";
const MIN_SECRET_LEN: usize = 4;

/// `$NAME` reads the shared secret from the environment; anything else is
/// taken literally. An unset variable leaves the reference as written.
pub fn resolve_credential(value: &str) -> String {
    resolve_with(value, |name| std::env::var(name).ok())
}

fn resolve_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let Some(name) = value.strip_prefix('$').filter(|n| !n.is_empty()) else {
        return value.to_string();
    };
    match lookup(name) {
        Some(resolved) => {
            debug!(var = %name, "API key taken from environment");
            resolved
        }
        None => {
            debug!(var = %name, "API key variable unset, keeping reference");
            value.to_string()
        }
    }
}

/// Scrub provider keys out of text bound for logs or results. Each known
/// secret is masked, as is the value of any `key=` query parameter.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = secrets
        .iter()
        .filter(|s| s.len() >= MIN_SECRET_LEN)
        .fold(text.to_string(), |acc, secret| acc.replace(secret, REDACTED));

    let mut from = 0;
    while let Some(pos) = result[from..].find("key=") {
        let start = from + pos + "key=".len();
        let end = result[start..]
            .find(|c: char| c == '&' || c == ' ' || c == ')' || c == '"')
            .map_or(result.len(), |i| start + i);
        if end > start && result[start..end] != *REDACTED {
            result.replace_range(start..end, REDACTED);
            from = start + REDACTED.len();
        } else {
            from = end;
        }
    }
    result
}
