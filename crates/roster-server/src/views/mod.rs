//! Server-rendered HTML pages

pub mod form;
pub mod listing;

pub use form::{FormAction, FormPage};
pub use listing::{Flash, ListingPage};

use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: .5rem; text-align: left; }
form.inline { display: inline; }
label { display: block; margin-top: .75rem; }
.flash { padding: .75rem; border-radius: 4px; margin-bottom: 1rem; }
.success { background: #e6f4ea; }
.warning { background: #fff4e5; }
.error { background: #fdecea; }
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Wrap a page body in the shared document shell.
pub fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - Employee Directory</title>\n<style>{}</style>\n</head>\n<body>\n\
         <header><a href=\"/\">Employee Directory</a></header>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    );
    html
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<h1>{}</h1>\n<p class=\"flash error\">{}</p>\n<p><a href=\"/\">Back to the directory</a></p>\n",
            escape(title),
            escape(message)
        ),
    )
}
