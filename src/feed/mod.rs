//! Streaming decoder for the Atom feeds returned by the arXiv API.

mod entry;
pub mod scanner;

use std::io::BufRead;
use std::iter::FusedIterator;

use crate::error::DecodeError;
use crate::models::Paper;
use scanner::{QName, Token, TokenScanner};

pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const ARXIV_NS: &str = "http://arxiv.org/schemas/atom";

/// Entry children the record parser extracts a value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Updated,
    Published,
    Author,
    Category,
    Doi,
    JournalRef,
    Comment,
}

impl Field {
    fn classify(name: &QName) -> Option<Self> {
        let field = match (name.namespace.as_deref()?, name.local.as_str()) {
            (ATOM_NS, "id") => Field::Id,
            (ATOM_NS, "title") => Field::Title,
            (ATOM_NS, "summary") => Field::Summary,
            (ATOM_NS, "updated") => Field::Updated,
            (ATOM_NS, "published") => Field::Published,
            (ATOM_NS, "author") => Field::Author,
            (ATOM_NS, "category") => Field::Category,
            (ARXIV_NS, "doi") => Field::Doi,
            (ARXIV_NS, "journal_ref") => Field::JournalRef,
            (ARXIV_NS, "comment") => Field::Comment,
            _ => return None,
        };
        Some(field)
    }
}

/// Lazily decoded entries of a feed, in document order.
///
/// Yields at most one error, after which the iterator is exhausted.
pub struct Entries<R> {
    scanner: TokenScanner<R>,
    done: bool,
}

/// Decode the `<entry>` elements of an Atom feed.
pub fn entries<R: BufRead>(source: R) -> Entries<R> {
    Entries {
        scanner: TokenScanner::new(source),
        done: false,
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<Paper, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let result = match self.scanner.next_token() {
                Ok(Token::Start { name, .. }) if name.is(ATOM_NS, "entry") => {
                    entry::parse_paper(&mut self.scanner)
                }
                Ok(Token::Eof) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => continue,
                Err(e) => Err(e),
            };
            self.done = result.is_err();
            return Some(result);
        }
    }
}

impl<R: BufRead> FusedIterator for Entries<R> {}
