//! Input normalisation shared by the domain services.

/// Trim `value`, returning `None` when nothing is left.
#[must_use]
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then_some(trimmed)
}

/// Normalise an email address (trimmed, lowercased) and check its basic shape.
///
/// Accepts `local@domain.tld` where neither part is empty, there is exactly one
/// `@`, no whitespace, and the domain contains a dot that is not at either end.
#[must_use]
pub fn normalise_email(value: &str) -> Option<String> {
    let email = non_blank(value)?.to_lowercase();

    if email.chars().any(char::is_whitespace) {
        return None;
    }

    let (local, domain) = email.split_once('@')?;

    if local.is_empty() || domain.contains('@') {
        return None;
    }

    let (host, tld) = domain.rsplit_once('.')?;

    if host.is_empty() || tld.is_empty() {
        return None;
    }

    Some(email)
}
