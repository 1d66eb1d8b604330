//! HTML escaping

/// Escape the five HTML-sensitive characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_sensitive_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_entities_are_escaped_again() {
        // An already-escaped entity gets escaped again
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_html("GET /api/users"), "GET /api/users");
    }
}
