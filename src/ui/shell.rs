//! Page shell and small HTML helpers shared by every page.

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render advisor text: escaped, `**bold**` spans as `<strong>`, newlines kept
/// by the `.message-body` style.
pub fn format_reply(text: &str) -> String {
    let escaped = escape(text);
    let mut parts = escaped.split("**");
    let mut out = String::with_capacity(escaped.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }

    let rest: Vec<&str> = parts.collect();
    // An unpaired trailing marker is left as literal text.
    let paired = rest.len() - rest.len() % 2;
    for (i, part) in rest.iter().enumerate() {
        if i >= paired {
            out.push_str("**");
            out.push_str(part);
        } else if i % 2 == 0 {
            out.push_str("<strong>");
            out.push_str(part);
        } else {
            out.push_str("</strong>");
            out.push_str(part);
        }
    }
    out
}

/// Horizontal progress bar.
pub fn progress_bar(percent: u8) -> String {
    let pct = percent.min(100);
    format!(
        r#"<div class="progress" role="progressbar" aria-valuenow="{pct}" aria-valuemin="0" aria-valuemax="100"><div class="progress-fill" style="width: {pct}%"></div></div>"#
    )
}

/// Percent-encode a value for a query string.
pub fn query_value(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Full HTML document around `content`.
pub fn html_shell(title: &str, content: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="CareerWise AI: personalized career guidance">
    <title>{title} - CareerWise AI</title>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
{content}
</body>
</html>"#
    )
}

/// Top bar used by the public pages.
pub fn site_header() -> &'static str {
    r##"<header class="site-header">
    <div class="container header-row">
        <a href="/" class="brand"><span class="brand-mark">CW</span> CareerWise AI</a>
        <nav class="site-nav">
            <a href="/#user-types">Who It's For</a>
            <a href="/#how-it-works">How It Works</a>
            <a href="/#features">Features</a>
            <a href="/#testimonials">Testimonials</a>
            <a href="/#about">About</a>
            <a href="/dashboard">Dashboard</a>
        </nav>
        <a href="/onboarding" class="btn btn-primary">Get Started</a>
    </div>
</header>"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_format_reply_bold() {
        assert_eq!(
            format_reply("**Next Steps**: act <now>"),
            "<strong>Next Steps</strong>: act &lt;now&gt;"
        );
    }

    #[test]
    fn test_format_reply_unpaired_marker() {
        assert_eq!(format_reply("a **b** c **d"), "a <strong>b</strong> c **d");
        assert_eq!(format_reply("plain"), "plain");
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert!(progress_bar(150).contains("width: 100%"));
    }

    #[test]
    fn test_query_value() {
        assert_eq!(
            query_value("What career should I pursue?"),
            "What+career+should+I+pursue%3F"
        );
    }
}
