use std::io::BufRead;

use chrono::{DateTime, Utc};

use super::scanner::{Token, TokenScanner};
use super::Field;
use crate::error::DecodeError;
use crate::models::{normalize_whitespace, pages_from_comment, Author, Paper};

/// Read the rest of an `<entry>` element, positioned just after its start tag.
///
/// Elements that are not recognized are stepped over one token at a time.
pub(crate) fn parse_paper<R: BufRead>(
    scanner: &mut TokenScanner<R>,
) -> Result<Paper, DecodeError> {
    let mut paper = Paper::default();
    loop {
        let (name, attributes) = match scanner.next_token()? {
            Token::Start { name, attributes } => (name, attributes),
            Token::End(name) if name.local == "entry" => return Ok(paper),
            Token::Eof => return Ok(paper),
            _ => continue,
        };

        let Some(field) = Field::classify(&name) else {
            tracing::trace!(element = %name.local, "skipping unrecognized element");
            continue;
        };

        match field {
            Field::Id => paper.url = read_leaf(scanner)?,
            Field::Title => paper.title = normalize_whitespace(&read_leaf(scanner)?),
            Field::Summary => paper.summary = normalize_whitespace(&read_leaf(scanner)?),
            Field::Updated => {
                if let Some(ts) = parse_timestamp(&read_leaf(scanner)?) {
                    paper.updated = Some(ts);
                }
            }
            Field::Published => {
                if let Some(ts) = parse_timestamp(&read_leaf(scanner)?) {
                    paper.published = Some(ts);
                }
            }
            Field::Author => paper.authors.push(parse_author(scanner)?),
            Field::Category => {
                let term = attributes.into_iter().find(|(key, _)| key == "term");
                if let Some((_, term)) = term {
                    paper.categories.push(term);
                }
                expect_end(scanner)?;
            }
            Field::Doi => paper.doi = read_leaf(scanner)?,
            Field::JournalRef => paper.journal = read_leaf(scanner)?,
            Field::Comment => {
                paper.comment = read_leaf(scanner)?;
                if let Some(pages) = pages_from_comment(&paper.comment) {
                    paper.pages = pages;
                }
            }
        }
    }
}

/// Read the rest of an `<author>` block.
fn parse_author<R: BufRead>(scanner: &mut TokenScanner<R>) -> Result<Author, DecodeError> {
    let mut author = Author::default();
    loop {
        match scanner.next_token()? {
            Token::Start { name, .. } => match name.local.as_str() {
                "name" => author.name = read_leaf(scanner)?,
                "affiliation" => author.affiliation = read_leaf(scanner)?,
                _ => {}
            },
            Token::End(name) if name.local == "author" => return Ok(author),
            Token::Eof => return Ok(author),
            _ => {}
        }
    }
}

/// Text content of a leaf element whose start tag was just consumed.
/// An element with no text yields an empty string.
fn read_leaf<R: BufRead>(scanner: &mut TokenScanner<R>) -> Result<String, DecodeError> {
    match scanner.next_token()? {
        Token::Text(text) => {
            expect_end(scanner)?;
            Ok(text)
        }
        Token::End(_) => Ok(String::new()),
        other => Err(DecodeError::ExpectedEnd(other.describe())),
    }
}

fn expect_end<R: BufRead>(scanner: &mut TokenScanner<R>) -> Result<(), DecodeError> {
    match scanner.next_token()? {
        Token::End(_) => Ok(()),
        other => Err(DecodeError::ExpectedEnd(other.describe())),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
