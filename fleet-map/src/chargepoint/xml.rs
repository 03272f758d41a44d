//! Minimal namespace-agnostic element tree over `quick-xml`.
//!
//! ChargePoint responses are small (one page or one station) and their
//! namespace prefixes vary between API versions, so we build a tiny tree
//! keyed on local names and query it by path.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::ParseError;

/// An XML element with its local name, text content and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Local name, without any namespace prefix.
    pub name: String,
    /// Concatenated, trimmed text content directly inside this element.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn named(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Self::default()
        }
    }

    /// Parse a whole document and return its root element.
    pub fn parse(bytes: &[u8]) -> Result<Element, ParseError> {
        let xml = std::str::from_utf8(bytes)?;
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(Element::named(e.local_name().as_ref())),
                Event::Empty(e) => {
                    attach(&mut stack, &mut root, Element::named(e.local_name().as_ref()))?;
                }
                Event::End(e) => {
                    let element = stack.pop().ok_or_else(|| {
                        ParseError::Unbalanced(
                            String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                        )
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(t) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(c.as_ref()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::Unbalanced(open.name));
        }
        root.ok_or_else(|| ParseError::Unbalanced("<no root element>".to_string()))
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a `/`-separated path of direct children, e.g. `"Geo/Lat"`.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .try_fold(self, |element, segment| element.child(segment))
    }

    /// Text of the element at `path`, if it exists.
    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).map(|e| e.text.as_str())
    }

    /// This element and all its descendants with the given local name,
    /// in document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            if element.name == name {
                found.push(element);
            }
            pending.extend(element.children.iter().rev());
        }
        found
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ParseError::Unbalanced(element.name)),
    }
    Ok(())
}
