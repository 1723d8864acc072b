use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A book as the server stores it: just a title and an author.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Book {
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// Server-assigned identity of a library entry.
///
/// The server emits a serial integer, but the id travels through the page as
/// text (hidden inputs, URL segments), so it is always held as a string.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => BookId(s),
            Raw::Number(n) => BookId(n.to_string()),
        })
    }
}

/// A reading-status bucket ("now", "next", "done", ...).
///
/// The set of valid statuses belongs to the server and the page template,
/// so this stays an open string rather than an enum.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element id of the page section that lists this status.
    pub fn section_id(&self) -> String {
        format!("{}-section", self.0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A book plus its server identity and status, as returned by `GET /book`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub book_id: BookId,
    pub book: Book,
    pub status: Status,
}

/// The user's whole collection, grouped by status.
///
/// Entry order inside each status is whatever the server sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Library {
    pub shelves: BTreeMap<Status, Vec<BookEntry>>,
}

impl Library {
    /// Entries filed under `status`, empty if the server sent none.
    pub fn entries(&self, status: &Status) -> &[BookEntry] {
        self.shelves.get(status).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of entries across all statuses.
    pub fn len(&self) -> usize {
        self.shelves.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body of `POST /book`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub book: Book,
    pub status: Status,
}

/// One operation of a `PATCH /book/{id}` body.
///
/// Serializes as `{"op": "book", "value": {...}}` / `{"op": "status", "value": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "op", content = "value", rename_all = "lowercase")]
pub enum Patch {
    Book(Book),
    Status(Status),
}

impl Patch {
    /// The fixed two-step update the server expects: book first, then status.
    pub fn update(book: Book, status: Status) -> Vec<Patch> {
        vec![Patch::Book(book), Patch::Status(status)]
    }
}

/// Reply of `PATCH /book/{id}`: one result per applied operation.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct UpdateReply {
    #[serde(default)]
    pub updated: Vec<serde_json::Value>,
}

/// Error payload the server sends with 4xx responses.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub error: String,
}
