/// A checkable word pulled out of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// 0-based line within the tokenized text
    pub line: usize,
    /// Byte offset within the tokenized text
    pub offset: usize,
}

/// Split `text` into word tokens.
///
/// Words are runs of alphanumeric characters. An apostrophe or hyphen is kept
/// only when it joins two alphabetic runs (`don't`, `well-known`). Runs that
/// contain digits or are shorter than two characters are dropped.
///
/// The returned iterator is lazy; clone it to walk the same text again.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        pos: 0,
        line: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let mut start = None;
            for (i, ch) in self.text[self.pos..].char_indices() {
                if ch.is_alphanumeric() {
                    start = Some(self.pos + i);
                    break;
                }
                if ch == '\n' {
                    self.line += 1;
                }
            }

            let Some(start) = start else {
                self.pos = self.text.len();
                return None;
            };

            let end = word_end(self.text, start);
            self.pos = end;

            let candidate = &self.text[start..end];
            if is_checkable(candidate) {
                return Some(Token {
                    text: candidate,
                    line: self.line,
                    offset: start,
                });
            }
        }
    }
}

fn is_joiner(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}' | '-')
}

fn word_end(text: &str, start: usize) -> usize {
    let mut chars = text[start..].char_indices().peekable();
    let mut prev_alpha = false;
    let mut end = start;

    while let Some((i, ch)) = chars.next() {
        if ch.is_alphanumeric() {
            prev_alpha = ch.is_alphabetic();
            end = start + i + ch.len_utf8();
        } else if is_joiner(ch)
            && prev_alpha
            && chars.peek().is_some_and(|&(_, next)| next.is_alphabetic())
        {
            prev_alpha = false;
        } else {
            break;
        }
    }

    end
}

fn is_checkable(word: &str) -> bool {
    word.chars().count() >= 2 && !word.chars().any(char::is_numeric)
}
