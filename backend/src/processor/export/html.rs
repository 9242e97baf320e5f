//! Static HTML rendering: each non-blank line wrapped in a paragraph, fixed
//! serif styling matching the document preview.

pub fn render(text: &str, title: &str) -> Vec<u8> {
    let body: String = text
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                "<p><br></p>".to_string()
            } else {
                // Collapse internal whitespace runs the way the preview does.
                let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
                format!("<p>{}</p>", escape_html(&collapsed))
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{}</title>
    <style>
        body {{ font-family: 'Times New Roman', serif; font-size: 12pt; line-height: 1.5; }}
        p {{ margin: 0 0 10pt 0; }}
    </style>
</head>
<body>
{}
</body>
</html>"#,
        escape_html(title),
        body
    )
    .into_bytes()
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_become_paragraphs() {
        let html = String::from_utf8(render("first\n\nsecond", "doc.html")).unwrap();
        assert!(html.contains("<p>first</p>"));
        assert!(html.contains("<p><br></p>"));
        assert!(html.contains("<p>second</p>"));
    }

    #[test]
    fn content_is_escaped() {
        let html = String::from_utf8(render("a < b & c", "doc.html")).unwrap();
        assert!(html.contains("<p>a &lt; b &amp; c</p>"));
    }
}
