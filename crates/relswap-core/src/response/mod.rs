//! Capture of the final HTTP response head and a bounded diagnostic body.
//!
//! libcurl hands every header line of every hop (redirects included) to the
//! header callback. A status line starts a fresh head, so once the transfer is
//! done only the last response remains.

mod parse;

pub(crate) use parse::{parse_content_length, parse_status_line};

/// Upper bound on the error body kept for diagnostics.
pub const DIAGNOSTIC_BODY_LIMIT: usize = 64 * 1024;

/// Status and header lines of the most recent response seen on a transfer.
#[derive(Debug, Clone, Default)]
pub struct ResponseHead {
    /// Status from the last status line, if one was seen.
    pub status: Option<u32>,
    /// Raw header lines (without the status line), trimmed.
    pub lines: Vec<String>,
}

impl ResponseHead {
    /// Feed one raw header line from the curl header callback.
    pub fn push_raw(&mut self, data: &[u8]) {
        let line = String::from_utf8_lossy(data);
        let line = line.trim_end();
        if let Some(code) = parse_status_line(line) {
            self.status = Some(code);
            self.lines.clear();
            return;
        }
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// `Content-Length` of the final response, if present and a valid non-negative integer.
    pub fn content_length(&self) -> Option<u64> {
        parse_content_length(&self.lines)
    }

    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

/// Error body collected from a non-success response, truncated at [`DIAGNOSTIC_BODY_LIMIT`].
#[derive(Debug, Default)]
pub struct DiagnosticBody(Vec<u8>);

impl DiagnosticBody {
    pub fn push(&mut self, data: &[u8]) {
        let room = DIAGNOSTIC_BODY_LIMIT.saturating_sub(self.0.len());
        self.0.extend_from_slice(&data[..data.len().min(room)]);
    }

    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(head: &mut ResponseHead, lines: &[&str]) {
        for l in lines {
            head.push_raw(format!("{l}\r\n").as_bytes());
        }
    }

    #[test]
    fn redirect_hop_is_discarded() {
        let mut head = ResponseHead::default();
        feed(
            &mut head,
            &[
                "HTTP/1.1 302 Found",
                "Location: https://objects.example.com/tool",
                "Content-Length: 0",
                "",
                "HTTP/1.1 200 OK",
                "Content-Length: 4096",
                "",
            ],
        );
        assert_eq!(head.status, Some(200));
        assert!(head.is_success());
        assert_eq!(head.content_length(), Some(4096));
        assert!(head.header("location").is_none());
    }

    #[test]
    fn non_success_status() {
        let mut head = ResponseHead::default();
        feed(&mut head, &["HTTP/2 404", "content-type: application/json"]);
        assert_eq!(head.status, Some(404));
        assert!(!head.is_success());
        assert_eq!(head.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn no_status_is_not_success() {
        assert!(!ResponseHead::default().is_success());
    }

    #[test]
    fn diagnostic_body_is_capped() {
        let mut body = DiagnosticBody::default();
        body.push(&vec![b'a'; DIAGNOSTIC_BODY_LIMIT - 10]);
        body.push(&[b'b'; 100]);
        body.push(b"more");
        let s = body.into_string();
        assert_eq!(s.len(), DIAGNOSTIC_BODY_LIMIT);
        assert!(s.ends_with("bbbbbbbbbb"));
    }
}
