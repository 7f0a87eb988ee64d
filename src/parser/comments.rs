/// Text of a single comment, borrowed from the file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan<'a> {
    /// Comment text with the marker removed
    pub text: &'a str,
    /// 0-based line where the span starts
    pub line: usize,
    /// Byte offset of `text` within the file content
    pub start: usize,
}

/// Extract comment spans from `content`.
///
/// An empty marker yields the whole content as a single span (prose files).
/// Otherwise every line containing `marker` yields the rest of that line after
/// its first occurrence. The match is purely lexical: a marker inside a string
/// literal still starts a comment, and block comments are not tracked.
pub fn extract_comments<'a>(content: &'a str, marker: &'a str) -> Comments<'a> {
    Comments {
        content,
        marker,
        pos: 0,
        line: 0,
        done: false,
    }
}

#[derive(Debug, Clone)]
pub struct Comments<'a> {
    content: &'a str,
    marker: &'a str,
    pos: usize,
    line: usize,
    done: bool,
}

impl<'a> Iterator for Comments<'a> {
    type Item = CommentSpan<'a>;

    fn next(&mut self) -> Option<CommentSpan<'a>> {
        if self.done {
            return None;
        }

        if self.marker.is_empty() {
            self.done = true;
            return Some(CommentSpan {
                text: self.content,
                line: 0,
                start: 0,
            });
        }

        while self.pos < self.content.len() {
            let line_start = self.pos;
            let rest = &self.content[line_start..];
            let (line, advance) = match rest.find('\n') {
                Some(idx) => (&rest[..idx], idx + 1),
                None => (rest, rest.len()),
            };
            let line = line.strip_suffix('\r').unwrap_or(line);
            let line_num = self.line;

            self.pos += advance;
            self.line += 1;

            if let Some(idx) = line.find(self.marker) {
                let text = &line[idx + self.marker.len()..];
                if !text.is_empty() {
                    return Some(CommentSpan {
                        text,
                        line: line_num,
                        start: line_start + idx + self.marker.len(),
                    });
                }
            }
        }

        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_comments() {
        let content = "x = 1  # first note\nprint(x)\n# second note\n";
        let spans: Vec<_> = extract_comments(content, "#").collect();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, " first note");
        assert_eq!(spans[0].line, 0);
        assert_eq!(spans[1].text, " second note");
        assert_eq!(spans[1].line, 2);
        assert_eq!(&content[spans[1].start..spans[1].start + spans[1].text.len()], " second note");
    }

    #[test]
    fn test_last_line_without_newline() {
        let spans: Vec<_> = extract_comments("# This is a smple bug", "#").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, " This is a smple bug");
    }

    #[test]
    fn test_multi_char_marker_and_crlf() {
        let content = "int x; // trailing words\r\nint y;\r\n";
        let spans: Vec<_> = extract_comments(content, "//").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, " trailing words");
    }

    #[test]
    fn test_first_marker_wins() {
        let spans: Vec<_> = extract_comments("// outer // inner", "//").collect();
        assert_eq!(spans[0].text, " outer // inner");
    }

    #[test]
    fn test_marker_inside_string_is_a_comment() {
        let spans: Vec<_> = extract_comments("url = \"http://host/path\"\n", "//").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "host/path\"");
    }

    #[test]
    fn test_bare_marker_yields_nothing() {
        assert_eq!(extract_comments("#\ncode\n", "#").count(), 0);
    }

    #[test]
    fn test_empty_marker_is_whole_file() {
        let content = "Title\n=====\n\nSome prose.\n";
        let spans: Vec<_> = extract_comments(content, "").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, content);
        assert_eq!(spans[0].start, 0);
    }
}
