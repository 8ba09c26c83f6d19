//! MLA works-cited entries for books and webpages, with optional metadata scraping for pages.

pub mod bibliography;
pub mod date;
pub mod error;
pub mod name;
pub mod record;
pub mod render;
pub mod scrape;

pub use bibliography::generate_citations;
pub use date::{mla_date, parse_iso_date, parse_loose_date};
pub use error::{Error, Result};
pub use name::format_name;
pub use record::{Book, Citation, REPEATED_AUTHOR, Webpage, Works};
pub use render::{
    generate_book_citation, generate_citation, generate_citation_value, generate_webpage_citation,
};
pub use scrape::{ScrapeConfig, auto_cite_webpage, get_data_from_webpage};
