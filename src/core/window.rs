//! Leading/trailing line windows for `head` and `tail`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Head,
    Tail,
}

/// Splits raw file content into lines.
///
/// Lines end at `\n`, and a `\r` right before it is dropped. An unterminated
/// last line still counts; a trailing `\n` does not add an empty line. No
/// decoding happens, so any byte content is accepted.
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    if content.is_empty() {
        return Vec::new();
    }

    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

/// The `size`-line window of `lines` for `mode`, clamped to what exists.
pub fn select<'a, T>(lines: &'a [T], size: usize, mode: WindowMode) -> &'a [T] {
    let len = lines.len();
    match mode {
        WindowMode::Head => &lines[..size.min(len)],
        WindowMode::Tail => &lines[len.saturating_sub(size)..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> String {
        (1..=count).map(|i| format!("line{}\n", i)).collect()
    }

    #[test]
    fn test_split_counts_unterminated_last_line() {
        assert_eq!(split_lines(b"a\nb"), vec![&b"a"[..], &b"b"[..]]);
        assert_eq!(split_lines(b"a\nb\n"), vec![&b"a"[..], &b"b"[..]]);
    }

    #[test]
    fn test_split_edge_cases() {
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![&b""[..]]);
        assert_eq!(split_lines(b"\n\n"), vec![&b""[..], &b""[..]]);
        assert_eq!(split_lines(b"x\r\ny\r\n"), vec![&b"x"[..], &b"y"[..]]);
    }

    #[test]
    fn test_split_keeps_invalid_utf8() {
        let lines = split_lines(b"\xff\xfe\nok");
        assert_eq!(lines, vec![&b"\xff\xfe"[..], &b"ok"[..]]);
    }

    #[test]
    fn test_head_and_tail_of_long_file() {
        let content = numbered(25);
        let lines = split_lines(content.as_bytes());
        assert_eq!(lines.len(), 25);

        let head = select(&lines, 10, WindowMode::Head);
        assert_eq!(head.len(), 10);
        assert_eq!(head[0], b"line1");
        assert_eq!(head[9], b"line10");

        let tail = select(&lines, 10, WindowMode::Tail);
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0], b"line16");
        assert_eq!(tail[9], b"line25");
    }

    #[test]
    fn test_short_file_windows_are_identical() {
        for count in 0..=10 {
            let content = numbered(count);
            let lines = split_lines(content.as_bytes());
            let head = select(&lines, 10, WindowMode::Head);
            let tail = select(&lines, 10, WindowMode::Tail);
            assert_eq!(head, tail);
            assert_eq!(head, &lines[..]);
        }
    }

    #[test]
    fn test_zero_sized_window() {
        let lines = split_lines(b"a\nb\n");
        assert!(select(&lines, 0, WindowMode::Head).is_empty());
        assert!(select(&lines, 0, WindowMode::Tail).is_empty());
    }
}
