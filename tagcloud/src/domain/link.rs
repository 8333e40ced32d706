// tagcloud/src/domain/link.rs
use std::sync::OnceLock;

use regex::Regex;

/// Schemes a rendered href may carry
pub const ALLOWED_PROTOCOLS: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "gopher", "nntp", "feed", "telnet",
];

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^a-zA-Z0-9\-~+_.?#=!&;,/:%@$|*'()\[\]\x{80}-\x{10FFFF}]")
            .expect("static regex")
    })
}

fn line_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)%0[ad]").expect("static regex"))
}

fn php_script() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[a-z0-9-]+?\.php").expect("static regex"))
}

/// Sanitize a URL for use inside an href attribute.
///
/// Strips characters that cannot appear in a URL, drops links with a scheme
/// outside [`ALLOWED_PROTOCOLS`] (returns an empty string), prefixes bare
/// host names with `http://` and entity-encodes `&` and `'`.
pub fn clean_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    let url = disallowed_chars().replace_all(url, "");
    let url = line_breaks().replace_all(&url, "").into_owned();

    let url = if !url.contains(':')
        && !url.starts_with('/')
        && !url.starts_with('#')
        && !php_script().is_match(&url)
    {
        format!("http://{}", url)
    } else {
        url
    };

    if let Some(scheme) = scheme_of(&url) {
        if !ALLOWED_PROTOCOLS.contains(&scheme.to_lowercase().as_str()) {
            return String::new();
        }
    }

    url.replace("&#038;", "&")
        .replace("&amp;", "&")
        .replace('&', "&#038;")
        .replace('\'', "&#039;")
}

// A scheme is whatever precedes the first ':' if no '/', '?' or '#' comes first.
fn scheme_of(url: &str) -> Option<&str> {
    let colon = url.find(':')?;
    let head = &url[..colon];
    if head.is_empty() || head.contains(['/', '?', '#']) {
        None
    } else {
        Some(head)
    }
}
