use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub parent: Option<ElementId>,
    /// Whitespace-collapsed text of the element and its descendants.
    pub text: String,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Reads a `data-*` attribute by its camelCase dataset key.
    pub fn dataset(&self, key: &str) -> Option<&str> {
        self.attr(&dataset_attr(key))
    }
}

/// A rendered page, reduced to the elements the console behaviours need.
///
/// Elements are stored in document order; a parent always precedes its
/// children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDocument {
    pub location: String,
    pub title: String,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("unsupported selector: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Present,
    Equals(String),
}

/// Attribute selector: `[name]` or `[name="value"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    name: String,
    matcher: AttrMatch,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let unsupported = || SelectorError::Unsupported(raw.to_string());
        let inner = raw
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(unsupported)?;

        let (name, matcher) = match inner.split_once('=') {
            None => (inner, AttrMatch::Present),
            Some((lhs, rhs)) => {
                let value = unquote(rhs.trim()).ok_or_else(unsupported)?;
                (lhs, AttrMatch::Equals(value))
            }
        };

        let name = name.trim();
        let invalid =
            |c: char| c.is_whitespace() || matches!(c, '[' | ']' | '^' | '*' | '~' | '|' | '$');
        if name.is_empty() || name.contains(invalid) {
            return Err(unsupported());
        }

        Ok(Self {
            name: name.to_ascii_lowercase(),
            matcher,
        })
    }

    pub fn matches(&self, element: &Element) -> bool {
        match (element.attr(&self.name), &self.matcher) {
            (None, _) => false,
            (Some(_), AttrMatch::Present) => true,
            (Some(v), AttrMatch::Equals(want)) => v == want,
        }
    }
}

fn unquote(s: &str) -> Option<String> {
    let quoted = s
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    match quoted {
        Some(v) => Some(v.to_string()),
        None if !s.is_empty() && !s.contains(['"', '\'']) => Some(s.to_string()),
        None => None,
    }
}

/// `taskId` -> `data-task-id`
pub fn dataset_attr(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 8);
    out.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl PageDocument {
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.ids().find(|&id| selector.matches(&self.elements[id.0]))
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.ids()
            .filter(|&id| selector.matches(&self.elements[id.0]))
            .collect()
    }

    /// Descendants of `root` (excluding `root`) matching `selector`.
    pub fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.ids()
            .skip(root.0 + 1)
            .filter(|&id| self.is_descendant(id, root) && selector.matches(&self.elements[id.0]))
            .collect()
    }

    /// Nearest inclusive ancestor of `id` matching `selector`.
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(cur) = current {
            let element = self.get(cur)?;
            if selector.matches(element) {
                return Some(cur);
            }
            current = element.parent;
        }
        None
    }

    pub fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.get(id).and_then(|e| e.parent);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.get(cur).and_then(|e| e.parent);
        }
        false
    }

    pub fn dataset(&self, id: ElementId, key: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.dataset(key))
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.get(id).map_or("", |e| e.text.as_str())
    }
}

/// Builder used by the HTML extractor and by tests.
#[derive(Debug, Default)]
pub struct PageBuilder {
    doc: PageDocument,
    stack: Vec<ElementId>,
}

impl PageBuilder {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            doc: PageDocument {
                location: location.into(),
                ..Default::default()
            },
            stack: Vec::new(),
        }
    }

    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> ElementId {
        let id = self.push(tag, attrs);
        self.stack.push(id);
        id
    }

    /// Adds an element with no children.
    pub fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> ElementId {
        let id = self.push(tag, attrs);
        self.stack.push(id);
        self.text(text);
        self.stack.pop();
        id
    }

    pub fn push_owned(&mut self, tag: String, attrs: BTreeMap<String, String>) -> ElementId {
        let id = ElementId(self.doc.elements.len());
        self.doc.elements.push(Element {
            tag,
            attrs,
            parent: self.stack.last().copied(),
            text: String::new(),
        });
        id
    }

    pub fn enter(&mut self, id: ElementId) {
        self.stack.push(id);
    }

    pub fn close(&mut self) {
        self.stack.pop();
    }

    /// Closes open elements up to and including the innermost `tag`.
    /// Unknown end tags are ignored.
    pub fn close_tag(&mut self, tag: &str) {
        if let Some(pos) = self
            .stack
            .iter()
            .rposition(|id| self.doc.elements[id.0].tag.eq_ignore_ascii_case(tag))
        {
            self.stack.truncate(pos);
        }
    }

    pub fn text(&mut self, text: &str) {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return;
        }
        let chunk = words.join(" ");
        for id in &self.stack {
            let target = &mut self.doc.elements[id.0].text;
            if !target.is_empty() {
                target.push(' ');
            }
            target.push_str(&chunk);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.doc.title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    pub fn finish(self) -> PageDocument {
        self.doc
    }

    fn push(&mut self, tag: &str, attrs: &[(&str, &str)]) -> ElementId {
        let attrs = attrs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.push_owned(tag.to_string(), attrs)
    }
}
