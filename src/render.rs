use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    date::{mla_date, parse_iso_date, today},
    error::Result,
    name::format_name,
    record::{Book, Citation, Webpage},
};

const BLOCK_SEPARATOR: &str = ". ";

/// Surround `text` with `mark` on both sides, e.g. `*Title*`.
fn wrap(text: &str, mark: &str) -> String {
    format!("{mark}{text}{mark}")
}

/// Render a book entry.
///
/// Only the first author is reordered. A second author is printed as given, and three or more
/// collapse to "et al".
pub fn generate_book_citation(book: &Book) -> String {
    let mut blocks = Vec::with_capacity(3);

    if let Some(first) = book.authors.first() {
        let first = format_name(first);
        let mut names = match book.authors.as_slice() {
            [_] => first,
            [_, second] => format!("{first}, and {second}"),
            _ => format!("{first}, et al"),
        };
        if names.ends_with('.') {
            names.pop();
        }
        blocks.push(names);
    }

    blocks.push(wrap(&book.title, "*"));

    let mut publication = format!("{}, {}", book.publisher, book.publication_year);
    if let Some(city) = book.city.as_deref().filter(|c| !c.is_empty()) {
        publication = format!("{city}, {publication}");
    }
    blocks.push(publication);

    blocks.join(BLOCK_SEPARATOR)
}

/// Render a webpage entry, taking today's date as the access date when none is recorded.
pub fn generate_webpage_citation(page: &Webpage) -> Result<String> {
    render_webpage(page, today())
}

/// [`generate_webpage_citation`] with an explicit "today".
pub fn render_webpage(page: &Webpage, today: NaiveDate) -> Result<String> {
    let mut blocks = Vec::with_capacity(3);

    if let Some(author) = page.author.as_deref().filter(|a| !a.is_empty()) {
        blocks.push(format_name(author));
    }

    let title = wrap(&format!("{}.", page.title), "\"");
    let website = wrap(&page.website, "*");
    match page.publication_date.as_deref().filter(|d| !d.is_empty()) {
        Some(published) => {
            let published = mla_date(parse_iso_date(published)?);
            blocks.push(format!("{title} {website}, {published}, {}", page.url));
        }
        None => blocks.push(format!("{title} {website}, {}", page.url)),
    }

    let accessed = match page.accessed_date.as_deref().filter(|d| !d.is_empty()) {
        Some(accessed) => parse_iso_date(accessed)?,
        None => today,
    };
    blocks.push(format!("Accessed {}", mla_date(accessed)));

    Ok(blocks.join(BLOCK_SEPARATOR))
}

/// Render any citation record.
pub fn generate_citation(citation: &Citation) -> Result<String> {
    match citation {
        Citation::Book(book) => Ok(generate_book_citation(book)),
        Citation::Webpage(page) => generate_webpage_citation(page),
    }
}

/// Render a keyed record whose `type` key picks the renderer.
pub fn generate_citation_value(record: Value) -> Result<String> {
    generate_citation(&Citation::try_from(record)?)
}
