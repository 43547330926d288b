use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 15;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown sort direction '{0}', expected 'asc' or 'desc'")]
pub struct UnknownSortDirection(String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(UnknownSortDirection(s.to_string()))
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Search request exactly as a caller sent it. Nothing here is trusted;
/// converting into [`SearchParams`] normalizes every field.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchParamsInput<F> {
    #[serde(default)]
    pub page: Option<Value>,
    #[serde(default)]
    pub per_page: Option<Value>,
    #[serde(default)]
    pub sort: Option<Value>,
    #[serde(default)]
    pub sort_dir: Option<Value>,
    #[serde(default = "Option::default")]
    pub filter: Option<F>,
}

impl<F> Default for SearchParamsInput<F> {
    fn default() -> Self {
        Self {
            page: None,
            per_page: None,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

/// Validated search request: page, page size, optional sort and optional filter.
///
/// `sort_dir` only has meaning when a sort field is present, so it is resolved
/// lazily by [`SearchParams::sort_dir`]. That keeps the builder methods
/// independent of the order they are called in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams<F> {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<F>,
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

impl<F> SearchParams<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = if page == 0 { DEFAULT_PAGE } else { page };
        self
    }

    pub fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page
        };
        self
    }

    /// An empty field name clears the sort.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        let sort = sort.into();
        self.sort = if sort.is_empty() { None } else { Some(sort) };
        self
    }

    pub fn with_sort_dir(mut self, sort_dir: SortDirection) -> Self {
        self.sort_dir = Some(sort_dir);
        self
    }

    pub fn with_filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// `None` without a sort field, otherwise the requested direction or `Desc`.
    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .map(|_| self.sort_dir.unwrap_or(SortDirection::Desc))
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }
}

impl<F> From<SearchParamsInput<F>> for SearchParams<F> {
    fn from(input: SearchParamsInput<F>) -> Self {
        Self {
            page: positive_or(input.page.as_ref(), DEFAULT_PAGE),
            per_page: positive_or(input.per_page.as_ref(), DEFAULT_PER_PAGE),
            sort: sort_field(input.sort),
            sort_dir: direction(input.sort_dir.as_ref()),
            filter: input.filter,
        }
    }
}

/// Only a non-empty string names a sort field.
fn sort_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Anything other than a recognised direction string reads as `Desc`.
fn direction(value: Option<&Value>) -> Option<SortDirection> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(d)) => Some(d.parse().unwrap_or(SortDirection::Desc)),
        Some(_) => Some(SortDirection::Desc),
    }
}

/// Accepts positive integers given as JSON numbers or numeric strings.
fn positive_or(value: Option<&Value>, default: u64) -> u64 {
    let candidate = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(integral_positive)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(integral_positive),
        _ => None,
    };

    match candidate {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

fn integral_positive(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}
