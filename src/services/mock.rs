//! In-memory member source used when no API is configured

use super::query::{GraphqlResponse, MemberSource, Operation, QueryRequest};
use crate::error::FetchError;
use crate::model::{Connection, Member, MemberStatus, VerificationStatus};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn member(
    id: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    created: &str,
    last_active: &str,
    status: MemberStatus,
    verification_status: VerificationStatus,
    domain: &str,
) -> Member {
    Member {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email_address: format!("{}@example.com", email),
        mobile_number: format!("+44 7300 0000{:0>2}", id),
        date_created: ts(created),
        last_active: ts(last_active),
        status,
        verification_status,
        domain: domain.to_string(),
    }
}

/// The fixed twelve-member dataset
pub fn mock_members() -> Vec<Member> {
    use MemberStatus::*;
    use VerificationStatus::*;

    vec![
        member("1", "Browni", "ex23", "browni23", "2024-01-12T10:00:00Z", "2024-01-19T08:35:00Z", Active, Verified, "tastingnotes.app"),
        member("2", "Uvie", "", "uvie", "2024-01-04T09:00:00Z", "2024-01-18T12:15:00Z", Active, Pending, "tastingnotes.app"),
        member("3", "Derek", "", "derek", "2024-01-22T14:00:00Z", "2024-01-25T10:44:00Z", Inactive, Unverified, "moonlodge.app"),
        member("4", "Aden", "", "aden", "2024-01-08T11:20:00Z", "2024-01-17T16:17:00Z", Active, Verified, "kayakshop.net"),
        member("5", "Ailson", "", "ailson", "2024-01-02T08:10:00Z", "2024-01-13T07:22:00Z", Active, Pending, "kayakshop.net"),
        member("6", "Ruben", "", "ruben", "2024-01-14T10:40:00Z", "2024-01-21T09:41:00Z", Suspended, Unverified, "moonlodge.app"),
        member("7", "Owen", "", "owen", "2024-01-06T12:00:00Z", "2024-01-19T13:11:00Z", Inactive, Unverified, "alphacorp.io"),
        member("8", "Dustin", "", "dustin", "2024-01-09T10:10:00Z", "2024-01-20T10:10:00Z", Inactive, Unverified, "alphacorp.io"),
        member("9", "browni", "ex23", "browni23b", "2024-01-18T09:00:00Z", "2024-01-24T18:00:00Z", Inactive, Unverified, "tastingnotes.app"),
        member("10", "Philip", "", "philip", "2024-01-20T09:33:00Z", "2024-01-23T12:45:00Z", Active, Verified, "kayakshop.net"),
        member("11", "Jane", "Smith", "jane.smith", "2024-01-10T00:00:00Z", "2024-01-19T00:00:00Z", Active, Pending, "example.com"),
        member("12", "John", "Doe", "john.doe", "2024-01-15T00:00:00Z", "2024-01-20T00:00:00Z", Active, Verified, "example.com"),
    ]
}

/// Does `member` match the search term for `operation`
fn matches_search(operation: Operation, term: &str, member: &Member) -> bool {
    match operation {
        Operation::List => true,
        Operation::ByName => {
            let term = term.to_lowercase();
            member.first_name.to_lowercase().contains(&term)
                || member.last_name.to_lowercase().contains(&term)
                || member.full_name().to_lowercase().contains(&term)
        }
        Operation::ByEmail => member
            .email_address
            .to_lowercase()
            .contains(&term.to_lowercase()),
        Operation::ByMobile => member.mobile_number.contains(term),
    }
}

/// Filters the fixed dataset; never paginates, never fails
#[derive(Debug, Clone)]
pub struct MockDataSource {
    members: Vec<Member>,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::with_members(mock_members())
    }

    pub fn with_members(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members matching the request's search and filters, in dataset order
    pub fn query(&self, request: &QueryRequest) -> Vec<Member> {
        let term = request.search.as_deref().unwrap_or_default().trim();
        self.members
            .iter()
            .filter(|m| term.is_empty() || matches_search(request.operation, term, m))
            .filter(|m| request.filter.matches(m))
            .cloned()
            .collect()
    }

    /// The `data` object a server would have returned
    pub fn data_for(&self, request: &QueryRequest) -> Value {
        let connection = Connection::single_page(self.query(request));
        let connection = serde_json::to_value(connection).unwrap_or(Value::Null);
        let mut data = Map::new();
        data.insert(request.operation.response_field().to_string(), connection);
        Value::Object(data)
    }
}

impl MemberSource for MockDataSource {
    fn execute(&self, request: &QueryRequest) -> Result<GraphqlResponse, FetchError> {
        Ok(GraphqlResponse::from_data(self.data_for(request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateRange, FilterCriteria, SearchMode, SearchSpec};
    use crate::services::query::normalize;
    use chrono::NaiveDate;

    fn ids(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.id.as_str()).collect()
    }

    fn request(search: SearchSpec, filter: FilterCriteria) -> QueryRequest {
        QueryRequest::new(&search, &filter, 20, None)
    }

    #[test]
    fn test_dataset_shape() {
        let members = mock_members();
        assert_eq!(members.len(), 12);
        assert_eq!(members[0].mobile_number, "+44 7300 000001");
        assert_eq!(members[11].mobile_number, "+44 7300 000012");
        assert_eq!(members[8].full_name(), "browni ex23");
    }

    #[test]
    fn test_status_filter_yields_only_that_status() {
        let source = MockDataSource::new();
        let filter = FilterCriteria {
            status: Some(MemberStatus::Active),
            ..Default::default()
        };

        let result = source.query(&request(SearchSpec::none(), filter));

        assert_eq!(result.len(), 7);
        assert!(result.iter().all(|m| m.status == MemberStatus::Active));
    }

    #[test]
    fn test_domain_filter() {
        let source = MockDataSource::new();
        let filter = FilterCriteria {
            domain: Some("kayakshop.net".to_string()),
            ..Default::default()
        };

        let result = source.query(&request(SearchSpec::none(), filter));
        assert_eq!(ids(&result), vec!["4", "5", "10"]);
    }

    #[test]
    fn test_name_search_is_case_insensitive_and_combines_with_filter() {
        let source = MockDataSource::new();
        let search = SearchSpec::new(SearchMode::Name, "brow");

        let result = source.query(&request(search.clone(), FilterCriteria::default()));
        assert_eq!(ids(&result), vec!["1", "9"]);

        let filter = FilterCriteria {
            status: Some(MemberStatus::Inactive),
            ..Default::default()
        };
        let result = source.query(&request(search, filter));
        assert_eq!(ids(&result), vec!["9"]);
    }

    #[test]
    fn test_email_and_mobile_search() {
        let source = MockDataSource::new();

        let by_email = source.query(&request(
            SearchSpec::new(SearchMode::Email, "JANE.SMITH"),
            FilterCriteria::default(),
        ));
        assert_eq!(ids(&by_email), vec!["11"]);

        let by_mobile = source.query(&request(
            SearchSpec::new(SearchMode::Mobile, "000012"),
            FilterCriteria::default(),
        ));
        assert_eq!(ids(&by_mobile), vec!["12"]);
    }

    #[test]
    fn test_created_range_is_inclusive() {
        let source = MockDataSource::new();
        let filter = FilterCriteria {
            date_time_created: DateRange::from_datetimes(
                NaiveDate::from_ymd_opt(2024, 1, 10).and_then(|d| DateRange::day_bound(d, false)),
                NaiveDate::from_ymd_opt(2024, 1, 15).and_then(|d| DateRange::day_bound(d, true)),
            ),
            ..Default::default()
        };

        let result = source.query(&request(SearchSpec::none(), filter));
        assert_eq!(ids(&result), vec!["1", "6", "11", "12"]);
    }

    #[test]
    fn test_search_term_filter_spans_fields() {
        let source = MockDataSource::new();
        let filter = FilterCriteria {
            search_term: Some("DOE".to_string()),
            ..Default::default()
        };

        let result = source.query(&request(SearchSpec::none(), filter));
        assert_eq!(ids(&result), vec!["12"]);
    }

    #[test]
    fn test_execute_returns_single_page_under_operation_field() {
        let source = MockDataSource::new();
        let request = request(SearchSpec::new(SearchMode::Name, "brow"), FilterCriteria::default());

        let response = source.execute(&request).unwrap();
        let page = normalize(request.operation, response.data.as_ref()).unwrap();

        assert_eq!(page.total_count, 2);
        assert!(!page.has_next_page());
        assert_eq!(page.end_cursor(), None);
    }
}
