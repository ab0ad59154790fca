//! Minimal HTML rendering for the browser surface
//!
//! Page markup is deliberately plain; all dynamic text goes through [`escape`].

use crate::flash::Flash;

/// Escape text for use in element content and quoted attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap `body` (already-escaped markup) in the shared page layout
pub fn page(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.level.as_str(),
                escape(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title} | Records</title>
</head>
<body>
{flash_html}
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

/// Static page for failures the browser cannot recover from in place
pub fn error_page(title: &str, detail: &str) -> String {
    page(
        title,
        None,
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to records</a></p>",
            escape(title),
            escape(detail)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>&'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;&amp;&#x27;"
        );
        assert_eq!(escape("Alice"), "Alice");
    }

    #[test]
    fn test_page_renders_flash() {
        let flash = Flash::success("Record <added>");
        let html = page("Listing", Some(&flash), "<p>ok</p>");
        assert!(html.contains(r#"class="flash flash-success""#));
        assert!(html.contains("Record &lt;added&gt;"));
        assert!(html.contains("<p>ok</p>"));
        assert!(html.contains("<title>Listing | Records</title>"));
    }

    #[test]
    fn test_error_page() {
        let html = error_page("Forbidden", "You do not have access to this page.");
        assert!(html.contains("<h1>Forbidden</h1>"));
        assert!(!html.contains("flash"));
    }
}
