//! Line extraction from an accumulating byte buffer (§4.1).

/// Extracts every complete line from the front of `buf`, stripping a
/// trailing '\r' before the '\n' and discarding empty lines. Whatever
/// remains after the last '\n' (a partial line) is left in `buf` for
/// the next read.
pub fn extract_lines(buf: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;

    while let Some(rel_nl) = buf[start..].iter().position(|&b| b == b'\n') {
        let nl = start + rel_nl;
        let mut end = nl;
        if end > start && buf[end - 1] == b'\r' {
            end -= 1;
        }
        if end > start {
            lines.push(String::from_utf8_lossy(&buf[start..end]).into_owned());
        }
        start = nl + 1;
    }

    buf.drain(0..start);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_crlf_lines() {
        let mut buf = b"NICK alice\r\nUSER a 0 * :A\r\n".to_vec();
        let lines = extract_lines(&mut buf);
        assert_eq!(lines, vec!["NICK alice", "USER a 0 * :A"]);
        assert!(buf.is_empty());
    }

    #[test]
    fn tolerates_bare_lf() {
        let mut buf = b"PING\n".to_vec();
        let lines = extract_lines(&mut buf);
        assert_eq!(lines, vec!["PING"]);
    }

    #[test]
    fn retains_partial_trailing_line() {
        let mut buf = b"JOIN #room\r\nPAR".to_vec();
        let lines = extract_lines(&mut buf);
        assert_eq!(lines, vec!["JOIN #room"]);
        assert_eq!(buf, b"PAR");
    }

    #[test]
    fn discards_empty_lines() {
        let mut buf = b"\r\n\r\nNICK bob\r\n".to_vec();
        let lines = extract_lines(&mut buf);
        assert_eq!(lines, vec!["NICK bob"]);
    }
}
