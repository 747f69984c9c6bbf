//! Parse HTTP status and header lines.

/// Status code from a status line such as `HTTP/1.1 200 OK` or `HTTP/2 404`.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("HTTP/")?;
    let mut parts = rest.split_whitespace();
    let _version = parts.next()?;
    parts.next()?.parse::<u32>().ok()
}

/// `Content-Length` from header lines. A present but malformed value yields `None`.
pub(crate) fn parse_content_length(lines: &[String]) -> Option<u64> {
    let mut content_length = None;
    for line in lines {
        let line = line.trim();
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<u64>().ok();
            }
        }
    }
    content_length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK"), Some(200));
        assert_eq!(parse_status_line("HTTP/2 404"), Some(404));
        assert_eq!(parse_status_line("HTTP/1.0 503 Service Unavailable"), Some(503));
        assert_eq!(parse_status_line("Content-Length: 5"), None);
        assert_eq!(parse_status_line("HTTP/1.1 abc"), None);
    }

    #[test]
    fn content_length_present() {
        let lines = ["Content-Type: application/octet-stream".to_string(), "content-length: 12345".to_string()];
        assert_eq!(parse_content_length(&lines), Some(12345));
    }

    #[test]
    fn content_length_missing_or_invalid() {
        assert_eq!(parse_content_length(&["Transfer-Encoding: chunked".to_string()]), None);
        assert_eq!(parse_content_length(&["Content-Length: -1".to_string()]), None);
        assert_eq!(parse_content_length(&["Content-Length: ten".to_string()]), None);
    }
}
