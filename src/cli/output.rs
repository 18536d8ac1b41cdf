//! CLI output formatting utilities

/// Safely truncate a string at a character boundary (not a byte boundary),
/// preventing panics on multi-byte UTF-8 content.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print the transcript separator line
pub fn print_separator() {
    println!("{}", "=".repeat(60));
}

/// Mask a service endpoint for display (scheme + host only, path and query
/// dropped since hosted-service URLs can embed identifiers)
#[must_use]
pub fn mask_endpoint(endpoint: &str) -> String {
    if endpoint.is_empty() {
        return "(not set)".to_string();
    }
    if let Ok(parsed) = url::Url::parse(endpoint) {
        if let Some(host) = parsed.host_str() {
            return format!("{}://{}", parsed.scheme(), host);
        }
    }
    "***invalid***".to_string()
}

/// Mask a credential for display, keeping only a short prefix
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}
