use serde::{Deserialize, Serialize};

/// A page to be written to the wiki.
///
/// `prefix` is the page's path relative to the repository root, with or
/// without the `.md` extension.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub prefix: String,
    pub body: String,
}

impl Page {
    pub fn new<P: Into<String>, B: Into<String>>(prefix: P, body: B) -> Page {
        Page {
            prefix: prefix.into(),
            body: body.into(),
        }
    }
}

/// A single line matched by `Store::grep`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub page: String,
    pub line_number: String,
    pub content: String,
}

/// Parse one line of `git grep -n -z` output.
///
/// With `-z` git ends the path with a NUL instead of a colon, so a path that
/// itself contains colons is never split. The line number runs up to the
/// next separator, which is a NUL in current git and `:` in older releases;
/// everything after it is the matched content. Returns `None` if the line
/// does not have all three fields or the line number is not numeric.
pub(crate) fn parse_grep_line(line: &str) -> Option<SearchResult> {
    let (page, rest) = split_once(line, '\0')?;
    if page.is_empty() {
        return None;
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (line_number, rest) = rest.split_at(digits);
    let content = rest
        .strip_prefix('\0')
        .or_else(|| rest.strip_prefix(':'))?;

    Some(SearchResult {
        page: page.to_string(),
        line_number: line_number.to_string(),
        content: content.to_string(),
    })
}

fn split_once(s: &str, sep: char) -> Option<(&str, &str)> {
    let at = s.find(sep)?;
    Some((&s[..at], &s[at + sep.len_utf8()..]))
}
