//! A small CSS selector engine for the in-memory page.
//!
//! Browsers resolve selectors natively, so this module exists only for
//! [`MemoryPage`](super::MemoryPage). It supports the subset the site
//! behaviors need:
//!
//! | Syntax | Example |
//! |---|---|
//! | Type / universal | `form`, `img`, `*` |
//! | Class | `.gallery-item` |
//! | Id | `#contact` |
//! | Attribute presence | `[data-filter]` |
//! | Attribute equality | `[name="email"]` |
//! | Attribute prefix | `a[href^="#"]` |
//! | Descendant combinator | `.lightbox img` |
//!
//! Child/sibling combinators, selector lists and pseudo-classes are rejected
//! with a [`SelectorError`] rather than silently mis-matched.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,
    #[error("unsupported character {found:?} at offset {offset} in selector {selector:?}")]
    Unsupported {
        selector: String,
        offset: usize,
        found: char,
    },
    #[error("unterminated attribute selector in {0:?}")]
    Unterminated(String),
}

/// Read access to an element, as needed for matching.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

impl AttrMatch {
    fn matches(&self, value: Option<&str>) -> bool {
        match (&self.op, value) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(expected), Some(v)) => v == expected,
            (AttrOp::Prefix(prefix), Some(v)) => v.starts_with(prefix.as_str()),
        }
    }
}

/// One compound selector: everything between two descendant combinators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches<E: Matchable + ?Sized>(&self, element: &E) -> bool {
        let tag_ok = match &self.tag {
            Some(tag) => tag == "*" || tag.eq_ignore_ascii_case(element.tag()),
            None => true,
        };
        let id_ok = match &self.id {
            Some(id) => element.id() == Some(id.as_str()),
            None => true,
        };
        if !(tag_ok && id_ok) {
            return false;
        }
        self.classes.iter().all(|c| element.has_class(c))
            && self
                .attributes
                .iter()
                .all(|a| a.matches(element.attribute(&a.name)))
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    /// Left to right, each one a descendant of the previous.
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }
        let compounds = Parser::new(trimmed).parse()?;
        Ok(Self {
            source: trimmed.to_string(),
            compounds,
        })
    }

    /// Test `element` against the selector.
    ///
    /// `ancestors` yields the element's ancestors nearest first. Descendant
    /// combinators are matched greedily right to left, which is exact when
    /// no other combinator is present.
    pub fn matches<'a, E>(&self, element: &E, ancestors: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: Matchable + ?Sized + 'a,
    {
        let Some((subject, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }
        let mut pending = rest.iter().rev().peekable();
        for ancestor in ancestors {
            match pending.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    pending.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        pending.peek().is_none()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'s> {
    source: &'s str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn unsupported(&self) -> SelectorError {
        let (offset, found) = self
            .chars
            .get(self.pos)
            .copied()
            .unwrap_or((self.source.len(), ' '));
        SelectorError::Unsupported {
            selector: self.source.to_string(),
            offset,
            found,
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if out.is_empty() {
            return Err(self.unsupported());
        }
        Ok(out)
    }

    fn parse(mut self) -> Result<Vec<Compound>, SelectorError> {
        let mut compounds = Vec::new();
        let mut current = Compound::default();
        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.skip_whitespace();
                    if !current.is_empty() {
                        compounds.push(std::mem::take(&mut current));
                    }
                }
                '.' => {
                    self.bump();
                    current.classes.push(self.ident()?);
                }
                '#' => {
                    self.bump();
                    current.id = Some(self.ident()?);
                }
                '[' => {
                    self.bump();
                    current.attributes.push(self.attribute()?);
                }
                '*' if current.is_empty() => {
                    self.bump();
                    current.tag = Some("*".to_string());
                }
                c if c.is_alphabetic() && current.is_empty() => {
                    current.tag = Some(self.ident()?.to_ascii_lowercase());
                }
                _ => return Err(self.unsupported()),
            }
        }
        if !current.is_empty() {
            compounds.push(current);
        }
        if compounds.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(compounds)
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttrMatch {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => {
                self.bump();
                AttrOp::Equals(self.attribute_value()?)
            }
            Some('^') => {
                self.bump();
                if self.bump() != Some('=') {
                    self.pos -= 1;
                    return Err(self.unsupported());
                }
                AttrOp::Prefix(self.attribute_value()?)
            }
            Some(_) => return Err(self.unsupported()),
            None => return Err(SelectorError::Unterminated(self.source.to_string())),
        };
        self.skip_whitespace();
        match self.bump() {
            Some(']') => Ok(AttrMatch { name, op }),
            Some(_) => {
                self.pos -= 1;
                Err(self.unsupported())
            }
            None => Err(SelectorError::Unterminated(self.source.to_string())),
        }
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let mut out = String::new();
                loop {
                    match self.bump() {
                        Some(c) if c == quote => return Ok(out),
                        Some(c) => out.push(c),
                        None => return Err(SelectorError::Unterminated(self.source.to_string())),
                    }
                }
            }
            Some(_) => self.ident(),
            None => Err(SelectorError::Unterminated(self.source.to_string())),
        }
    }
}
