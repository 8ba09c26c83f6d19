use std::borrow::Cow;

use log::debug;

use crate::{error::Result, name::format_name, record::Citation, render::generate_citation};

/// Sort key for a works-cited entry: the reordered first author, else the title.
pub fn author_or_title(citation: &Citation) -> String {
    match citation.first_author() {
        Some(author) => format_name(author),
        None => citation.title().to_string(),
    }
}

/// Assemble a works-cited page.
///
/// A lone record is rendered as-is. Otherwise entries are sorted by [`author_or_title`], an entry
/// whose first author repeats the previous entry's prints "---" instead, and lines are joined
/// with `\n`. The caller's records are never modified.
pub fn generate_citations(citations: &[Citation]) -> Result<String> {
    if let [only] = citations {
        return generate_citation(only);
    }

    let mut sorted: Vec<&Citation> = citations.iter().collect();
    sorted.sort_by_cached_key(|c| author_or_title(c));

    let mut lines = Vec::with_capacity(sorted.len());
    let mut prev_author: Option<&str> = None;
    for citation in sorted {
        let author = citation.first_author();
        let entry = match author {
            Some(a) if prev_author == Some(a) => {
                debug!("repeated author {a:?}, substituting placeholder");
                Cow::Owned(citation.with_author_placeholder())
            }
            _ => {
                prev_author = author;
                Cow::Borrowed(citation)
            }
        };
        lines.push(generate_citation(&entry)?);
    }

    Ok(lines.join("\n"))
}
