use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An author as listed on a paper.
///
/// Names are always "First Middle Last"; first and middle names may be
/// abbreviated to "F. M.".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub affiliation: String,
}

/// Metadata of a single paper returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub url: String,
    pub doi: String,
    /// `None` when the feed timestamp was missing or unparseable.
    pub updated: Option<DateTime<Utc>>,
    pub published: Option<DateTime<Utc>>,
    pub title: String,
    pub summary: String,
    pub categories: Vec<String>,
    pub journal: String,
    pub authors: Vec<Author>,
    /// Typically the number of pages and figures, and the document format.
    pub comment: String,
    /// Number of pages, 0 if the comment does not say.
    pub pages: u64,
}

impl Paper {
    /// The arXiv identifier of the paper, derived from its URL.
    ///
    /// New-style identifiers (no archive path) get an `arXiv:` prefix, old-style
    /// ones such as `math/0309136` are returned as is. Returns an empty string
    /// when the URL is not an abstract link.
    pub fn id(&self) -> String {
        const MARKER: &str = "/abs/";
        let Some(pos) = self.url.find(MARKER) else {
            return String::new();
        };
        let id = &self.url[pos + MARKER.len()..];
        if id.contains('/') {
            id.to_string()
        } else {
            format!("arXiv:{}", id)
        }
    }
}

/// Collapse every run of ASCII whitespace to a single space and trim the ends.
///
/// Non-breaking and other Unicode spaces are kept as they are.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c'))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page count announced in a comment such as "12 pages, 3 figures".
///
/// The last "page"/"pages" token preceded by an integer wins.
pub(crate) fn pages_from_comment(comment: &str) -> Option<u64> {
    let fields: Vec<&str> = comment.split_whitespace().collect();
    let mut pages = None;
    for (i, field) in fields.iter().enumerate().skip(1) {
        let word = field.trim_matches(',').to_lowercase();
        if word == "pages" || word == "page" {
            let count = fields[i - 1];
            if !count.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(n) = count.parse::<u64>() {
                pages = Some(n);
            }
        }
    }
    pages
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// A search request.
///
/// `max` must satisfy `0 < max <= 30000`; the service rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// `search_query` expression, see the arXiv API user manual for its syntax.
    pub query: Option<String>,
    /// Explicit arXiv identifiers to look up.
    pub id_list: Option<Vec<String>>,
    /// Index of the first result.
    pub start: u32,
    /// Maximum number of results.
    pub max: u32,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl Query {
    /// Search all fields for `search`.
    pub fn new(search: &str, start: u32, max: u32) -> Self {
        Self {
            query: Some(format!("all:{}", search)),
            start,
            max,
            ..Self::default()
        }
    }

    /// Look up papers by identifier.
    pub fn by_ids<I, S>(ids: I, start: u32, max: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id_list: Some(ids.into_iter().map(Into::into).collect()),
            start,
            max,
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = Some(sort_order);
        self
    }
}
