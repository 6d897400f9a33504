//! MIME type inference for file parts.

use std::path::Path;

/// Fallback for bytes nothing else could identify.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Looks up the fixed extension table. Case-insensitive.
pub fn from_extension(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "json" => "application/json",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(mime)
}

/// Returns the media type of a `Content-Type` header if it is specific
/// enough to trust, dropping any parameters.
pub fn from_content_type(header: &str) -> Option<String> {
    let essence = header.split(';').next()?.trim().to_ascii_lowercase();
    if essence.is_empty() || !essence.contains('/') || essence == OCTET_STREAM {
        return None;
    }
    Some(essence)
}

/// Identifies well-known formats by their leading bytes.
pub fn sniff(data: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"ID3", "audio/mpeg"),
    ];

    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| data.starts_with(sig)) {
        return Some(*mime);
    }

    if data.len() >= 12 && &data[..4] == b"RIFF" {
        match &data[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/wav"),
            _ => {}
        }
    }
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return Some("video/mp4");
    }

    if let Some(mime) = sniff_markup(data) {
        return Some(mime);
    }
    looks_like_text(data).then_some("text/plain")
}

/// Tags that mark a document as HTML when they open it.
const HTML_TAGS: &[&[u8]] = &[
    b"<!doctype html",
    b"<html",
    b"<head",
    b"<script",
    b"<iframe",
    b"<h1",
    b"<div",
    b"<font",
    b"<table",
    b"<a",
    b"<style",
    b"<title",
    b"<b",
    b"<body",
    b"<br",
    b"<p",
    b"<!--",
];

fn sniff_markup(data: &[u8]) -> Option<&'static str> {
    let start = data.iter().position(|b| !b.is_ascii_whitespace())?;
    let data = &data[start..];
    if data.starts_with(b"<?xml") {
        return Some("text/xml");
    }
    HTML_TAGS
        .iter()
        .any(|tag| opens_with_tag(data, tag))
        .then_some("text/html")
}

/// Case-insensitive tag match; the tag must end in a space or `>`.
fn opens_with_tag(data: &[u8], tag: &[u8]) -> bool {
    data.len() > tag.len()
        && data[..tag.len()].eq_ignore_ascii_case(tag)
        && matches!(data[tag.len()], b' ' | b'>')
}

fn looks_like_text(data: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(data) else {
        return false;
    };
    !text.is_empty()
        && !text
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c'))
}

/// Resolves the MIME type of a local file.
///
/// Order: extension table, `mime_guess`, content sniffing, octet-stream.
pub fn for_local_file(path: &str, data: &[u8]) -> String {
    if let Some(mime) = from_extension(path) {
        return mime.to_string();
    }
    guess_from_content(path, data)
}

/// Resolves the MIME type of a fetched URL.
///
/// Order: extension table on the URL path, the server's `Content-Type`,
/// `mime_guess`, content sniffing, octet-stream.
pub fn for_remote_file(url_path: &str, content_type: Option<&str>, data: &[u8]) -> String {
    if let Some(mime) = from_extension(url_path) {
        return mime.to_string();
    }
    if let Some(mime) = content_type.and_then(from_content_type) {
        return mime;
    }
    guess_from_content(url_path, data)
}

fn guess_from_content(path: &str, data: &[u8]) -> String {
    if let Some(mime) = mime_guess::from_path(path).first() {
        if mime.essence_str() != OCTET_STREAM {
            return mime.essence_str().to_string();
        }
    }
    sniff(data).unwrap_or(OCTET_STREAM).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(from_extension("photo.JPG"), Some("image/jpeg"));
        assert_eq!(from_extension("a/b/c.jpeg"), Some("image/jpeg"));
        assert_eq!(from_extension("clip.mp4"), Some("video/mp4"));
        assert_eq!(from_extension("song.mp3"), Some("audio/mpeg"));
        assert_eq!(from_extension("doc.heif"), Some("image/heif"));
        assert_eq!(from_extension("README"), None);
        assert_eq!(from_extension("archive.zip"), None);
    }

    #[test]
    fn test_extension_wins_over_content() {
        assert_eq!(for_local_file("fake.png", b"%PDF-1.7"), "image/png");
    }

    #[test]
    fn test_content_type_header() {
        assert_eq!(
            from_content_type("text/html; charset=UTF-8").as_deref(),
            Some("text/html")
        );
        assert_eq!(from_content_type("application/octet-stream"), None);
        assert_eq!(from_content_type("garbage"), None);
        assert_eq!(from_content_type(""), None);
    }

    #[test]
    fn test_remote_precedence() {
        assert_eq!(
            for_remote_file("/img.png", Some("image/jpeg"), b""),
            "image/png"
        );
        assert_eq!(
            for_remote_file("/download", Some("image/jpeg"), b""),
            "image/jpeg"
        );
        assert_eq!(
            for_remote_file("/download", Some("application/octet-stream"), b"%PDF-1.4"),
            "application/pdf"
        );
        assert_eq!(for_remote_file("/download", None, &[0, 1, 2, 3]), OCTET_STREAM);
    }

    #[test]
    fn test_mime_guess_fallback() {
        assert_eq!(for_local_file("page.html", b""), "text/html");
    }

    #[test]
    fn test_sniff_signatures() {
        assert_eq!(sniff(b"\x89PNG\r\n\x1a\nrest"), Some("image/png"));
        assert_eq!(sniff(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff(b"RIFF\0\0\0\0WAVEfmt "), Some("audio/wav"));
        assert_eq!(sniff(b"\0\0\0\x18ftypmp42"), Some("video/mp4"));
        assert_eq!(sniff(b"hello world\n"), Some("text/plain"));
        assert_eq!(sniff(&[0xde, 0xad, 0xbe, 0xef]), None);
        assert_eq!(sniff(b""), None);
    }

    #[test]
    fn test_sniff_markup() {
        assert_eq!(sniff(b"<!DOCTYPE html>\n<html></html>"), Some("text/html"));
        assert_eq!(sniff(b"\n  <HTML lang=\"en\">"), Some("text/html"));
        assert_eq!(sniff(b"<p>short note</p>"), Some("text/html"));
        assert_eq!(sniff(b"<!-- generated -->"), Some("text/html"));
        assert_eq!(sniff(b"<?xml version=\"1.0\"?><feed/>"), Some("text/xml"));
        assert_eq!(sniff(b"<pre>not listed</pre>"), Some("text/plain"));
        assert_eq!(sniff(b"{\"json\": true}"), Some("text/plain"));
    }

    #[test]
    fn test_local_html_without_extension() {
        assert_eq!(
            for_local_file("index", b"<html><body>hi</body></html>"),
            "text/html"
        );
    }
}
