//! Identifier extraction from profile hyperlinks
//!
//! Profile pages link collaborators and papers with hrefs such as
//! `author_page.cfm?id=81100552573&coll=DL&dl=ACM` or `citation.cfm?id=999`.
//! The id is recovered positionally: the text after the first `id=` up to the
//! first `&` in the href. The two rules differ only in how they treat an href
//! with no `&` at all:
//!
//! | href                     | colleague rule | paper rule  |
//! |--------------------------|----------------|-------------|
//! | no `id=`                 | skip           | skip        |
//! | `...id=X&...`            | `X`            | `X`         |
//! | `...id=X` (no `&`)       | skip           | `X`         |
//! | `a&b?id=X...` (`&` first)| skip           | skip        |
//! | href attribute missing   | skip           | skip        |
//!
//! A skip is not an error; the anchor is simply left out.

const ID_MARKER: &str = "id=";

/// An `(id, name)` pair read from one anchor, both trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub id: String,
    pub name: String,
}

impl ExtractedLink {
    fn new(raw_id: &str, text: &str) -> Self {
        Self {
            id: raw_id.trim().to_string(),
            name: text.trim().to_string(),
        }
    }
}

/// Colleague rule: the id must be terminated by `&`
pub fn colleague_link(href: Option<&str>, text: &str) -> Option<ExtractedLink> {
    let href = href?;
    let start = href.find(ID_MARKER)?;
    let end = href.find('&')?;

    if end < start {
        return None;
    }

    Some(ExtractedLink::new(&href[start + ID_MARKER.len()..end], text))
}

/// Paper rule: without a `&` the id runs to the end of the href
pub fn paper_link(href: Option<&str>, text: &str) -> Option<ExtractedLink> {
    let href = href?;
    let start = href.find(ID_MARKER)?;
    let end = match href.find('&') {
        Some(end) if end < start => return None,
        Some(end) => end,
        None => href.len(),
    };

    Some(ExtractedLink::new(&href[start + ID_MARKER.len()..end], text))
}
