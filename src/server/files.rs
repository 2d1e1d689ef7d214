//! Mapping request paths onto the served directory, and directory listings.

use std::path::{Path, PathBuf};

/// Files served in place of a directory listing, in order of preference.
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Map a URL path onto `root`.
///
/// The path is percent-decoded and split on `/`. Empty, `.` and `..`
/// segments are dropped, so the result never leaves `root`.
pub fn translate_path(root: &Path, url_path: &str) -> PathBuf {
    let path = url_path.split(['?', '#']).next().unwrap_or("");
    let decoded = percent_decode(path);
    let mut out = root.to_path_buf();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        // Backslashes and drive prefixes would escape the root on Windows.
        if segment.contains('\\') || (cfg!(windows) && segment.contains(':')) {
            continue;
        }
        out.push(segment);
    }
    out
}

/// Decode `%XX` escapes. Malformed escapes are kept as-is; invalid UTF-8 is
/// replaced.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a single path segment for use in an `href`.
pub fn percent_encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for &b in segment.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~' | b'/') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Render an HTML listing for the directory at `url_path`.
///
/// Entries are sorted case-insensitively; directories get a trailing `/`.
pub fn render_listing(url_path: &str, mut entries: Vec<ListingEntry>) -> String {
    entries.sort_by_key(|e| e.name.to_lowercase());
    let title = html_escape(&format!("Directory listing for {}", percent_decode(url_path)));

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in &entries {
        let display = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            percent_encode_segment(&display),
            html_escape(&display)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_plain_path() {
        let p = translate_path(Path::new("/srv"), "/assets/sounds/beep.wav");
        assert_eq!(p, Path::new("/srv/assets/sounds/beep.wav"));
    }

    #[test]
    fn translate_drops_traversal() {
        let root = Path::new("/srv");
        assert_eq!(translate_path(root, "/../../etc/passwd"), Path::new("/srv/etc/passwd"));
        assert_eq!(translate_path(root, "/a/./b/../c"), Path::new("/srv/a/b/c"));
        assert_eq!(translate_path(root, "/%2e%2e/secret"), Path::new("/srv/secret"));
        assert_eq!(translate_path(root, "/..%2F..%2Fsecret"), Path::new("/srv/secret"));
    }

    #[test]
    fn translate_ignores_query_and_fragment() {
        let root = Path::new("/srv");
        assert_eq!(translate_path(root, "/a.mp3?v=2"), Path::new("/srv/a.mp3"));
        assert_eq!(translate_path(root, "/a.mp3#t=1"), Path::new("/srv/a.mp3"));
    }

    #[test]
    fn translate_root_is_root() {
        assert_eq!(translate_path(Path::new("/srv"), "/"), Path::new("/srv"));
        assert_eq!(translate_path(Path::new("/srv"), ""), Path::new("/srv"));
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("power%20on.wav"), "power on.wav");
        assert_eq!(percent_decode("%E2%9C%93"), "\u{2713}");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
    }

    #[test]
    fn percent_encoding_segments() {
        assert_eq!(percent_encode_segment("power-on_real.wav"), "power-on_real.wav");
        assert_eq!(percent_encode_segment("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode_segment("sounds/"), "sounds/");
    }

    #[test]
    fn escapes_html() {
        assert_eq!(html_escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }

    #[test]
    fn listing_sorts_and_marks_dirs() {
        let html = render_listing(
            "/assets/",
            vec![
                ListingEntry { name: "sounds".into(), is_dir: true },
                ListingEntry { name: "Beep.wav".into(), is_dir: false },
                ListingEntry { name: "a<b>.txt".into(), is_dir: false },
            ],
        );
        assert!(html.contains("<title>Directory listing for /assets/</title>"));
        let a = html.find("a%3Cb%3E.txt").unwrap();
        let beep = html.find("Beep.wav").unwrap();
        let sounds = html.find("href=\"sounds/\"").unwrap();
        assert!(a < beep && beep < sounds);
        assert!(html.contains("a&lt;b&gt;.txt"));
    }
}
