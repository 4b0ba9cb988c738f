const MAX_VISIBLE_CHARS: usize = 100;

/// Prepares message or transcript text for logging: trims, truncates and
/// strips credential-bearing query parameters from embedded URLs. Clinical
/// text is multilingual, so truncation counts characters, not bytes.
pub fn sanitize_text(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let sanitized = if total_chars > MAX_VISIBLE_CHARS {
        format!(
            "{}... ({} chars total)",
            trimmed.chars().take(MAX_VISIBLE_CHARS).collect::<String>(),
            total_chars
        )
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("X-Amz-Signature=", "X-Amz-Signature=[REDACTED]"),
        ("X-Amz-Credential=", "X-Amz-Credential=[REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("key=", "key=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        let mut redacted = String::with_capacity(result.len());
        let mut rest = result.as_str();
        while let Some(idx) = rest.find(pattern) {
            let value_start = idx + pattern.len();
            let value_end = rest[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(rest.len());
            redacted.push_str(&rest[..idx]);
            redacted.push_str(replacement);
            rest = &rest[value_end..];
        }
        redacted.push_str(rest);
        result = redacted;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_text_when_sanitized_then_marker_returned() {
        assert_eq!(sanitize_text("   "), "[EMPTY]");
    }

    #[test]
    fn given_long_multibyte_text_when_sanitized_then_truncated_on_char_boundary() {
        let text = "я".repeat(150);
        let sanitized = sanitize_text(&text);
        assert!(sanitized.contains("(150 chars total)"));
    }

    #[test]
    fn given_two_presigned_urls_when_sanitized_then_both_signatures_redacted() {
        let text = "a?X-Amz-Signature=aaa1 b?X-Amz-Signature=bbb2";
        let sanitized = sanitize_text(text);
        assert!(!sanitized.contains("aaa1"));
        assert!(!sanitized.contains("bbb2"));
        assert_eq!(sanitized.matches("[REDACTED]").count(), 2);
    }

    #[test]
    fn given_presigned_url_when_sanitized_then_signature_redacted() {
        let text = "https://bucket.example/audio.webm?X-Amz-Signature=abc123&x=1";
        let sanitized = sanitize_text(text);
        assert!(sanitized.contains("X-Amz-Signature=[REDACTED]"));
        assert!(!sanitized.contains("abc123"));
    }
}
