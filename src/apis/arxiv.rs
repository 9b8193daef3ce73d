use std::io::BufRead;

use super::{HttpTransport, Transport};
use crate::config::Config;
use crate::error::SearchError;
use crate::feed;
use crate::models::{Paper, Query};
use crate::query::query_params;

pub struct ArxivClient<T = HttpTransport> {
    transport: T,
}

impl ArxivClient {
    /// Client configured from the environment, see [`Config::from_env`].
    pub fn new() -> Result<Self, SearchError> {
        Self::with_config(&Config::from_env())
    }

    pub fn with_config(config: &Config) -> Result<Self, SearchError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }
}

impl<T: Transport> ArxivClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Run a search and decode every returned paper.
    ///
    /// Fails with [`SearchError::Api`] when the service rejects the query.
    pub async fn search(&self, query: &Query) -> Result<Vec<Paper>, SearchError> {
        let params = query_params(query);
        tracing::debug!(?params, "arxiv search");
        let body = self.transport.get(&params).await?;
        let papers = parse_feed(body.as_slice())?;
        tracing::debug!(count = papers.len(), "arxiv search decoded");
        Ok(papers)
    }
}

/// Search with a client configured from the environment.
pub async fn search(query: &Query) -> Result<Vec<Paper>, SearchError> {
    ArxivClient::new()?.search(query).await
}

/// Decode a search response body.
///
/// The service reports a malformed query as an entry titled "Error" whose
/// summary holds the message; that entry becomes [`SearchError::Api`].
pub fn parse_feed<R: BufRead>(source: R) -> Result<Vec<Paper>, SearchError> {
    let mut papers = Vec::new();
    for paper in feed::entries(source) {
        let paper = paper?;
        if paper.title.eq_ignore_ascii_case("error") {
            return Err(SearchError::Api(paper.summary));
        }
        papers.push(paper);
    }
    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const SAMPLE_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <link href="http://arxiv.org/api/query?search_query%3Dall%3Aelectron" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:electron&amp;id_list=&amp;start=0&amp;max_results=1</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <updated>2023-01-16T00:00:00-05:00</updated>
  <opensearch:totalResults>1</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>
  <opensearch:itemsPerPage>1</opensearch:itemsPerPage>
  <entry>
    <id>http://arxiv.org/abs/math/0309136v1</id>
    <updated>2003-09-08T15:47:48Z</updated>
    <published>2003-09-08T15:47:48Z</published>
    <title>Electron  thermal
      conductivity</title>
    <summary>  We study the
  electron.
    </summary>
    <author>
      <name>A. B. Author</name>
      <arxiv:affiliation xmlns:arxiv="http://arxiv.org/schemas/atom">Somewhere U.</arxiv:affiliation>
    </author>
    <arxiv:doi xmlns:arxiv="http://arxiv.org/schemas/atom">10.1000/j.x.2003</arxiv:doi>
    <link title="doi" href="http://dx.doi.org/10.1000/j.x.2003" rel="related"/>
    <arxiv:comment xmlns:arxiv="http://arxiv.org/schemas/atom">7 pages, 2 figures</arxiv:comment>
    <arxiv:journal_ref xmlns:arxiv="http://arxiv.org/schemas/atom">J. Math. 1 (2003)</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/math/0309136v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/math/0309136v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="math.AP" scheme="http://arxiv.org/schemas/atom"/>
    <category term="math.AP" scheme="http://arxiv.org/schemas/atom"/>
    <category term="math-ph" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

    const ERROR_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=&amp;id_list=&amp;start=0&amp;max_results=0</title>
  <entry>
    <id>http://arxiv.org/api/errors#max_results_must_be_positive</id>
    <title>Error</title>
    <summary>malformed query</summary>
    <updated>2023-01-16T00:00:00-05:00</updated>
    <author><name>arXiv api core</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_sample_feed() {
        let papers = parse_feed(SAMPLE_ATOM.as_bytes()).unwrap();
        assert_eq!(papers.len(), 1);
        let p = &papers[0];
        assert_eq!(p.url, "http://arxiv.org/abs/math/0309136v1");
        assert_eq!(p.id(), "math/0309136v1");
        assert_eq!(p.title, "Electron thermal conductivity");
        assert_eq!(p.summary, "We study the electron.");
        assert_eq!(p.doi, "10.1000/j.x.2003");
        assert_eq!(p.journal, "J. Math. 1 (2003)");
        assert_eq!(p.comment, "7 pages, 2 figures");
        assert_eq!(p.pages, 7);
        assert_eq!(p.categories, vec!["math.AP", "math-ph"]);
        assert_eq!(p.authors.len(), 1);
        assert_eq!(p.authors[0].name, "A. B. Author");
        assert_eq!(p.authors[0].affiliation, "Somewhere U.");
        assert_eq!(
            p.published.map(|t| t.to_rfc3339()),
            Some("2003-09-08T15:47:48+00:00".to_string())
        );
        assert_eq!(p.updated, p.published);
    }

    #[test]
    fn test_error_entry_becomes_api_error() {
        let err = parse_feed(ERROR_ATOM.as_bytes()).unwrap_err();
        assert!(matches!(err, SearchError::Api(_)));
        assert_eq!(err.api_message(), Some("malformed query"));
        assert_eq!(err.to_string(), "malformed query");
    }

    #[test]
    fn test_error_title_matched_case_insensitively() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry><title>Real paper</title></entry>
  <entry><title>eRRoR</title><summary>bad  id</summary></entry>
</feed>"#;
        let err = parse_feed(xml.as_bytes()).unwrap_err();
        assert_eq!(err.api_message(), Some("bad id"));
    }

    #[test]
    fn test_invalid_markup_is_decode_error() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><title>x</summary></entry></feed>"#;
        let err = parse_feed(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
        assert!(err.to_string().starts_with("failed to parse search results"));
        assert_eq!(err.api_message(), None);
    }

    #[test]
    fn test_truncated_body_is_decode_error() {
        let truncated = &SAMPLE_ATOM[..SAMPLE_ATOM.len() / 2];
        assert!(matches!(
            parse_feed(truncated.as_bytes()),
            Err(SearchError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_feed() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>ArXiv Query</title></feed>"#;
        assert!(parse_feed(xml.as_bytes()).unwrap().is_empty());
    }

    struct CannedTransport {
        body: &'static str,
        seen: Mutex<Vec<(&'static str, String)>>,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<u8>, SearchError> {
            self.seen.lock().unwrap().extend_from_slice(params);
            Ok(self.body.as_bytes().to_vec())
        }
    }

    fn canned(body: &'static str) -> ArxivClient<CannedTransport> {
        ArxivClient::with_transport(CannedTransport {
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_search_sends_query_params() {
        let client = canned(SAMPLE_ATOM);
        let papers = client.search(&Query::new("electron", 0, 1)).await.unwrap();
        assert_eq!(papers.len(), 1);

        let seen = client.transport.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ("search_query", "all:electron".to_string()),
                ("start", "0".to_string()),
                ("max_results", "1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_reports_api_error() {
        let client = canned(ERROR_ATOM);
        let err = client.search(&Query::default()).await.unwrap_err();
        assert_eq!(err.api_message(), Some("malformed query"));
    }
}
