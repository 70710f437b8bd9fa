use serde_json::{Map, Value};

use super::pagination::{MINIMAL_PAGE_LIMIT, PageRequest};

/// Operations whose responses may carry `errors` next to usable `data`.
///
/// The hub-scoped collection listing reports errors for hubs the caller has
/// no admin access to while still returning partial data.
const ERROR_TOLERANT_OPERATIONS: &[&str] =
    &["GetPropertyDefinitionCollectionsByHub"];

/// A static GraphQL document and the operation name it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDocument {
    pub name: &'static str,
    pub text: &'static str,
}

impl QueryDocument {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    pub fn tolerates_errors(&self) -> bool {
        ERROR_TOLERANT_OPERATIONS.contains(&self.name)
    }
}

/// The query variants of one paginated resource.
///
/// `after` declares `$cursor: String!`; `minimal`, when present, declares
/// `$limit: Int!`. Resources without a minimal variant fall back to `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedDocument {
    pub first: QueryDocument,
    pub after: QueryDocument,
    pub minimal: Option<QueryDocument>,
}

impl PagedDocument {
    pub fn select(&self, request: &PageRequest) -> QueryDocument {
        match request {
            PageRequest::First => self.first,
            PageRequest::After(_) => self.after,
            PageRequest::Minimal => self.minimal.unwrap_or(self.first),
        }
    }

    /// `base` plus the variables the selected document declares.
    pub fn variables(
        &self,
        base: &Map<String, Value>,
        request: &PageRequest,
    ) -> Value {
        let mut variables = base.clone();
        match request {
            PageRequest::First => {}
            PageRequest::After(cursor) => {
                variables.insert("cursor".into(), Value::String(cursor.clone()));
            }
            PageRequest::Minimal if self.minimal.is_some() => {
                variables.insert("limit".into(), Value::from(MINIMAL_PAGE_LIMIT));
            }
            PageRequest::Minimal => {}
        }
        Value::Object(variables)
    }
}
