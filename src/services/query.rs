//! GraphQL operations, request bodies and response normalization
//!
//! The four members operations share one result shape. `Operation` owns
//! everything that differs between them (document, variable layout and
//! response field), so callers handle a single loading/error/data path.

use crate::error::FetchError;
use crate::model::{Connection, FilterCriteria, MemberPage, SearchMode, SearchSpec};
use serde::Deserialize;
use serde_json::{json, Map, Value};

macro_rules! connection_selection {
    () => {
        "{
      edges {
        node {
          id
          firstName
          lastName
          emailAddress
          mobileNumber
          dateCreated
          lastActive
          status
          verificationStatus
          domain
        }
        cursor
      }
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      totalCount
    }"
    };
}

const GET_MEMBERS: &str = concat!(
    "query GetMembers($input: MembersInput!) {\n    members(input: $input) ",
    connection_selection!(),
    "\n}"
);

const GET_MEMBERS_BY_NAME: &str = concat!(
    "query GetMembersByName($search: String!, $first: Int, $after: String, $filter: MembersFilterInput) {\n",
    "    membersByName(search: $search, first: $first, after: $after, filter: $filter) ",
    connection_selection!(),
    "\n}"
);

const GET_MEMBERS_BY_EMAIL: &str = concat!(
    "query GetMembersByEmail($search: String!, $first: Int, $after: String, $filter: MembersFilterInput) {\n",
    "    membersByEmailAddress(search: $search, first: $first, after: $after, filter: $filter) ",
    connection_selection!(),
    "\n}"
);

const GET_MEMBERS_BY_MOBILE: &str = concat!(
    "query GetMembersByMobile($search: String!, $first: Int, $after: String, $filter: MembersFilterInput) {\n",
    "    membersByMobileNumber(search: $search, first: $first, after: $after, filter: $filter) ",
    connection_selection!(),
    "\n}"
);

// ═══════════════════════════════════════════════════════════════════════════════
// Operations
// ═══════════════════════════════════════════════════════════════════════════════

/// One of the four members queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    ByName,
    ByEmail,
    ByMobile,
}

impl Operation {
    pub fn document(&self) -> &'static str {
        match self {
            Operation::List => GET_MEMBERS,
            Operation::ByName => GET_MEMBERS_BY_NAME,
            Operation::ByEmail => GET_MEMBERS_BY_EMAIL,
            Operation::ByMobile => GET_MEMBERS_BY_MOBILE,
        }
    }

    /// Field of `data` holding the connection
    pub fn response_field(&self) -> &'static str {
        match self {
            Operation::List => "members",
            Operation::ByName => "membersByName",
            Operation::ByEmail => "membersByEmailAddress",
            Operation::ByMobile => "membersByMobileNumber",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "GetMembers",
            Operation::ByName => "GetMembersByName",
            Operation::ByEmail => "GetMembersByEmail",
            Operation::ByMobile => "GetMembersByMobile",
        }
    }

    pub fn is_search(&self) -> bool {
        !matches!(self, Operation::List)
    }
}

/// Pick the operation for the active search
pub fn select_operation(search: &SearchSpec) -> Operation {
    if !search.is_active() {
        return Operation::List;
    }
    match search.mode {
        SearchMode::None => Operation::List,
        SearchMode::Name => Operation::ByName,
        SearchMode::Email => Operation::ByEmail,
        SearchMode::Mobile => Operation::ByMobile,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════════════════════════

/// A fully resolved members query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub operation: Operation,
    /// Search term; only sent by search operations
    pub search: Option<String>,
    pub first: usize,
    pub after: Option<String>,
    pub filter: FilterCriteria,
}

impl QueryRequest {
    /// Build the request for the current search, filters and page
    pub fn new(
        search: &SearchSpec,
        filter: &FilterCriteria,
        first: usize,
        after: Option<String>,
    ) -> Self {
        let operation = select_operation(search);
        Self {
            operation,
            search: operation.is_search().then(|| search.term.clone()),
            first,
            after,
            filter: filter.clone(),
        }
    }

    /// Plain list of the first `first` members, unfiltered
    pub fn list(first: usize) -> Self {
        Self {
            operation: Operation::List,
            search: None,
            first,
            after: None,
            filter: FilterCriteria::default(),
        }
    }

    /// Variables in the layout the operation declares
    pub fn variables(&self) -> Value {
        let mut vars = Map::new();
        vars.insert("first".to_string(), json!(self.first));
        if let Some(after) = &self.after {
            vars.insert("after".to_string(), json!(after));
        }
        let filter = serde_json::to_value(&self.filter).unwrap_or_else(|_| json!({}));
        vars.insert("filter".to_string(), filter);

        if self.operation.is_search() {
            vars.insert(
                "search".to_string(),
                json!(self.search.as_deref().unwrap_or_default()),
            );
            Value::Object(vars)
        } else {
            json!({ "input": Value::Object(vars) })
        }
    }

    /// `{"query", "variables"}` POST body
    pub fn to_body(&self) -> Value {
        json!({
            "query": self.operation.document(),
            "variables": self.variables(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════════════════════════

/// One entry of the response `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

/// Response envelope `{data?, errors?}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// The envelope's errors as a `FetchError`, if any
    pub fn error(&self) -> Option<FetchError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(FetchError::Graphql(
                self.errors.iter().map(|e| e.message.clone()).collect(),
            ))
        }
    }
}

/// Flatten the operation's connection into a [`MemberPage`]
///
/// Missing data or a null field is an empty page; a field that does not
/// decode as a connection is `Malformed`.
pub fn normalize(operation: Operation, data: Option<&Value>) -> Result<MemberPage, FetchError> {
    let field = match data.and_then(|d| d.get(operation.response_field())) {
        None | Some(Value::Null) => return Ok(MemberPage::empty()),
        Some(field) => field,
    };

    let connection = Connection::deserialize(field).map_err(|e| {
        FetchError::Malformed(format!("{}: {}", operation.response_field(), e))
    })?;

    Ok(MemberPage::from_connection(connection))
}

/// Anything that can answer a [`QueryRequest`]
pub trait MemberSource: Send + Sync {
    fn execute(&self, request: &QueryRequest) -> Result<GraphqlResponse, FetchError>;
}
