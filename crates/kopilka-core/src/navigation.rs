//! Route table and navigation targets
//!
//! Five views addressed by path:
//! - `/`: overview
//! - `/categories`: category list
//! - `/categories/:categoryId`: transactions of one category
//! - `/transactions/new?category=<id>`: create form, optionally pre-filled
//! - `/transactions/:transactionId`: transaction detail and edit

use serde::Serialize;

/// A view of the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    Home,
    Categories,
    CategoryTransactions { category_id: String },
    NewTransaction { category: Option<String> },
    TransactionDetail { transaction_id: String },
}

fn decode(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| decode(&v.replace('+', " ")))
        .filter(|v| !v.is_empty())
}

impl Route {
    /// Resolve a request path and optional query string to a view
    pub fn parse(path: &str, query: Option<&str>) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["categories"] => Some(Route::Categories),
            ["categories", id] if !id.is_empty() => Some(Route::CategoryTransactions {
                category_id: decode(id)?,
            }),
            ["transactions", "new"] => Some(Route::NewTransaction {
                category: query.and_then(|q| query_param(q, "category")),
            }),
            ["transactions", id] if !id.is_empty() => Some(Route::TransactionDetail {
                transaction_id: decode(id)?,
            }),
            _ => None,
        }
    }

    /// Path (and query) addressing this view
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Categories => "/categories".to_string(),
            Route::CategoryTransactions { category_id } => {
                format!("/categories/{}", urlencoding::encode(category_id))
            }
            Route::NewTransaction { category: None } => "/transactions/new".to_string(),
            Route::NewTransaction { category: Some(id) } => {
                format!("/transactions/new?category={}", urlencoding::encode(id))
            }
            Route::TransactionDetail { transaction_id } => {
                format!("/transactions/{}", urlencoding::encode(transaction_id))
            }
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Where the UI goes after a form action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    /// Open another view
    To { route: Route },
    /// Return to the previous view
    Back,
    /// Stay on the current view in read-only mode
    ReadOnly,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Navigation::To { route }
    }

    pub fn home() -> Self {
        Navigation::to(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_table() {
        assert_eq!(Route::parse("/", None), Some(Route::Home));
        assert_eq!(Route::parse("/categories", None), Some(Route::Categories));
        assert_eq!(Route::parse("/categories/", None), Some(Route::Categories));
        assert_eq!(
            Route::parse("/categories/3", None),
            Some(Route::CategoryTransactions { category_id: "3".to_string() })
        );
        assert_eq!(
            Route::parse("/transactions/new", None),
            Some(Route::NewTransaction { category: None })
        );
        assert_eq!(
            Route::parse("/transactions/17", None),
            Some(Route::TransactionDetail { transaction_id: "17".to_string() })
        );
        assert_eq!(Route::parse("/reports", None), None);
        assert_eq!(Route::parse("/categories/3/extra", None), None);
    }

    #[test]
    fn test_new_transaction_category_query() {
        assert_eq!(
            Route::parse("/transactions/new", Some("category=3")),
            Some(Route::NewTransaction { category: Some("3".to_string()) })
        );
        assert_eq!(
            Route::parse("/transactions/new", Some("foo=1&category=")),
            Some(Route::NewTransaction { category: None })
        );
    }

    #[test]
    fn test_paths_round_trip() {
        let routes = vec![
            Route::Home,
            Route::Categories,
            Route::CategoryTransactions { category_id: "1738000000000".to_string() },
            Route::NewTransaction { category: None },
            Route::NewTransaction { category: Some("3".to_string()) },
            Route::TransactionDetail { transaction_id: "a b".to_string() },
        ];
        for route in routes {
            let path = route.path();
            let (p, q) = match path.split_once('?') {
                Some((p, q)) => (p.to_string(), Some(q.to_string())),
                None => (path.clone(), None),
            };
            assert_eq!(Route::parse(&p, q.as_deref()), Some(route));
        }
    }

    #[test]
    fn test_new_transaction_path_carries_category() {
        let route = Route::NewTransaction { category: Some("3".to_string()) };
        assert_eq!(route.path(), "/transactions/new?category=3");
        assert_eq!(Navigation::home(), Navigation::To { route: Route::Home });
    }
}
