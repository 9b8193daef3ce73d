use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::DecodeError;

/// Namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start tag with its attributes, keyed by local name.
    Start {
        name: QName,
        attributes: Vec<(String, String)>,
    },
    End(QName),
    Text(String),
    Eof,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Start { name, .. } => format!("start of <{}>", name.local),
            Token::End(name) => format!("end of <{}>", name.local),
            Token::Text(_) => "text".to_string(),
            Token::Eof => "end of document".to_string(),
        }
    }
}

/// Pull-based token stream over an XML document.
///
/// Self-closing tags are reported as a start tag followed by an end tag.
/// Declarations, comments and processing instructions are dropped. Reaching
/// the end of input with elements still open is an error.
pub struct TokenScanner<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    depth: usize,
}

impl<R: BufRead> TokenScanner<R> {
    pub fn new(source: R) -> Self {
        let mut reader = NsReader::from_reader(source);
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            depth: 0,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, DecodeError> {
        loop {
            self.buf.clear();
            let (ns, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
            let token = match event {
                Event::Start(e) => {
                    let mut attributes = Vec::new();
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        let key = lossy(attr.key.local_name().as_ref());
                        attributes.push((key, attr.unescape_value()?.into_owned()));
                    }
                    self.depth += 1;
                    Token::Start {
                        name: QName {
                            namespace: namespace_of(&ns),
                            local: lossy(e.local_name().as_ref()),
                        },
                        attributes,
                    }
                }
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    Token::End(QName {
                        namespace: namespace_of(&ns),
                        local: lossy(e.local_name().as_ref()),
                    })
                }
                Event::Text(e) => Token::Text(e.unescape()?.into_owned()),
                Event::CData(e) => Token::Text(lossy(&e)),
                Event::Eof if self.depth > 0 => return Err(DecodeError::UnexpectedEof),
                Event::Eof => Token::Eof,
                _ => continue,
            };
            return Ok(token);
        }
    }
}

fn namespace_of(ns: &ResolveResult) -> Option<String> {
    match ns {
        ResolveResult::Bound(ns) => Some(lossy(ns.as_ref())),
        _ => None,
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
