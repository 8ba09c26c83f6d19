use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Marker printed in place of an author repeated from the previous works-cited entry.
pub const REPEATED_AUTHOR: &str = "---";

/// A book, cited as "Last, First. *Title*. City, Publisher, Year".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Display names, "First Last" order.
    #[serde(default)]
    pub authors: Vec<String>,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub city: Option<String>,
    pub publisher: String,
    pub publication_year: i32,
}

/// A single page of a website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webpage {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub author: Option<String>,
    pub title: String,
    pub website: String,
    pub url: String,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub publication_date: Option<String>,
    /// `YYYY-MM-DD`; the render date is used when absent.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub accessed_date: Option<String>,
}

/// Any citation record, discriminated by its `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Citation {
    Book(Book),
    Webpage(Webpage),
}

impl Citation {
    /// Who the entry is sorted and grouped under, if anyone.
    pub fn first_author(&self) -> Option<&str> {
        let author = match self {
            Citation::Book(b) => b.authors.first().map(String::as_str),
            Citation::Webpage(w) => w.author.as_deref(),
        };
        author.filter(|a| !a.is_empty())
    }

    pub fn title(&self) -> &str {
        match self {
            Citation::Book(b) => &b.title,
            Citation::Webpage(w) => &w.title,
        }
    }

    /// A copy for rendering with the author replaced by [`REPEATED_AUTHOR`].
    pub fn with_author_placeholder(&self) -> Citation {
        match self {
            Citation::Book(b) => Citation::Book(Book {
                authors: vec![REPEATED_AUTHOR.to_string()],
                ..b.clone()
            }),
            Citation::Webpage(w) => Citation::Webpage(Webpage {
                author: Some(REPEATED_AUTHOR.to_string()),
                ..w.clone()
            }),
        }
    }
}

impl TryFrom<Value> for Citation {
    type Error = Error;

    /// Remove the `type` key from a keyed record and read the rest as that kind.
    fn try_from(mut value: Value) -> Result<Self, Self::Error> {
        let kind = value
            .as_object_mut()
            .and_then(|obj| obj.remove("type"))
            .ok_or(Error::MissingType)?;

        match kind.as_str() {
            Some("book") => serde_json::from_value(value)
                .map(Citation::Book)
                .map_err(|source| Error::Record { kind: "book", source }),
            Some("webpage") => serde_json::from_value(value)
                .map(Citation::Webpage)
                .map_err(|source| Error::Record {
                    kind: "webpage",
                    source,
                }),
            Some(other) => Err(Error::UnknownType(other.to_string())),
            None => Err(Error::UnknownType(kind.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Citation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Citation::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl From<Book> for Citation {
    fn from(b: Book) -> Self {
        Citation::Book(b)
    }
}

impl From<Webpage> for Citation {
    fn from(w: Webpage) -> Self {
        Citation::Webpage(w)
    }
}

/// The contents of a citations file: one record, or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Works {
    Many(Vec<Citation>),
    One(Citation),
}

impl TryFrom<Value> for Works {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(Citation::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Works::Many),
            other => Citation::try_from(other).map(Works::One),
        }
    }
}

impl<'de> Deserialize<'de> for Works {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Works::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl Works {
    pub fn into_vec(self) -> Vec<Citation> {
        match self {
            Works::Many(v) => v,
            Works::One(c) => vec![c],
        }
    }
}

/// Treat `null`, missing and `""` alike.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}
