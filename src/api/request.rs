//! Requests as plain data.
//!
//! The reducer decides *what* to send by returning a [`Request`]; the adapter
//! decides *when* by handing it to [`perform`] on a background task.

use std::fmt;

use log::debug;

use super::client::{ApiError, BookApi};
use super::types::{BookId, Library, NewBook, Patch};

/// Which kind of exchange is in flight. Used to match completions to requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update(BookId),
    Delete(BookId),
}

impl Operation {
    /// True for everything except a list refresh.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::List)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "refresh"),
            Operation::Create => write!(f, "add"),
            Operation::Update(id) => write!(f, "update of book {id}"),
            Operation::Delete(id) => write!(f, "delete of book {id}"),
        }
    }
}

/// A fully built API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    List,
    Create(NewBook),
    Update { id: BookId, patches: Vec<Patch> },
    Delete(BookId),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::List => Operation::List,
            Request::Create(_) => Operation::Create,
            Request::Update { id, .. } => Operation::Update(id.clone()),
            Request::Delete(id) => Operation::Delete(id.clone()),
        }
    }
}

/// What a successful exchange produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Listed(Library),
    Done,
}

/// Runs one request against the API.
pub async fn perform(api: &dyn BookApi, request: &Request) -> Result<Reply, ApiError> {
    debug!("Performing {}", request.operation());
    match request {
        Request::List => api.list().await.map(Reply::Listed),
        Request::Create(book) => api.create(book).await.map(|_| Reply::Done),
        Request::Update { id, patches } => api.update(id, patches).await.map(|_| Reply::Done),
        Request::Delete(id) => api.delete(id).await.map(|_| Reply::Done),
    }
}
