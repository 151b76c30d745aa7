//! Listing search queries

use roster_types::Employee;

/// What the listing page asks the store for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Every employee, newest id first
    All,
    /// Exact id match
    ById(i32),
    /// Case-insensitive substring match on email
    EmailContains(String),
    /// A numeric query too large to be an id; matches nothing
    NoMatch,
}

impl SearchQuery {
    /// Interpret the optional `q` parameter.
    ///
    /// Blank means everything, ASCII digits mean an id lookup and anything
    /// else is an email fragment.
    pub fn parse(q: Option<&str>) -> Self {
        let q = match q.map(str::trim) {
            Some(q) if !q.is_empty() => q,
            _ => return SearchQuery::All,
        };

        if q.bytes().all(|b| b.is_ascii_digit()) {
            return match q.parse::<i32>() {
                Ok(id) => SearchQuery::ById(id),
                Err(_) => SearchQuery::NoMatch,
            };
        }

        SearchQuery::EmailContains(q.to_string())
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            SearchQuery::All => true,
            SearchQuery::ById(id) => employee.id == *id,
            SearchQuery::EmailContains(needle) => employee
                .email
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            SearchQuery::NoMatch => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_types::Department;

    fn employee(id: i32, email: &str) -> Employee {
        Employee {
            id,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: email.to_string(),
            department: Department::Sales,
            salary: 1.0,
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_blank_query_lists_everything() {
        assert_eq!(SearchQuery::parse(None), SearchQuery::All);
        assert_eq!(SearchQuery::parse(Some("")), SearchQuery::All);
        assert_eq!(SearchQuery::parse(Some("   ")), SearchQuery::All);
    }

    #[test]
    fn test_digits_are_an_id_lookup() {
        assert_eq!(SearchQuery::parse(Some("42")), SearchQuery::ById(42));
        assert_eq!(SearchQuery::parse(Some("007")), SearchQuery::ById(7));
        assert_eq!(
            SearchQuery::parse(Some("99999999999999999999")),
            SearchQuery::NoMatch
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(SearchQuery::parse(Some(" 1 ")), SearchQuery::ById(1));
        assert_eq!(
            SearchQuery::parse(Some("\tann@x.com ")),
            SearchQuery::EmailContains("ann@x.com".to_string())
        );
    }

    #[test]
    fn test_anything_else_searches_email() {
        assert_eq!(
            SearchQuery::parse(Some("-5")),
            SearchQuery::EmailContains("-5".to_string())
        );
        assert_eq!(
            SearchQuery::parse(Some("Ann@")),
            SearchQuery::EmailContains("Ann@".to_string())
        );
    }

    #[test]
    fn test_email_match_ignores_case() {
        let query = SearchQuery::parse(Some("ANN@X"));
        assert!(query.matches(&employee(1, "ann@x.com")));
        assert!(!query.matches(&employee(2, "bob@x.com")));
    }

    #[test]
    fn test_id_match_is_exact() {
        let query = SearchQuery::parse(Some("1"));
        assert!(query.matches(&employee(1, "a@x.com")));
        assert!(!query.matches(&employee(11, "b@x.com")));
        assert!(!SearchQuery::NoMatch.matches(&employee(1, "a@x.com")));
    }
}
