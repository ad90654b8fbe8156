//! Minimal tolerant HTML tree for saved gradebook pages.
//!
//! Unknown or unbalanced markup is absorbed rather than rejected: stray end
//! tags are ignored and rows/cells close implicitly. Only input that cannot
//! be tokenized at all (an unterminated tag, comment or raw-text block, or no
//! elements whatsoever) is an error.

use thiserror::Error;

pub type NodeId = usize;

const ROOT: NodeId = 0;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "title", "textarea"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HtmlError {
    #[error("unterminated tag at byte {0}")]
    UnterminatedTag(usize),
    #[error("unterminated comment at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated <{name}> block at byte {offset}")]
    UnterminatedRawText { name: String, offset: usize },
    #[error("document contains no elements")]
    NoElements,
}

#[derive(Debug)]
enum NodeData {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn parse(input: &str) -> Result<Self, HtmlError> {
        let mut doc = Document {
            nodes: vec![Node {
                data: NodeData::Element {
                    name: "#document".to_string(),
                    attrs: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        };
        let mut stack: Vec<NodeId> = vec![ROOT];
        let mut pos = 0;

        while pos < input.len() {
            let top = *stack.last().unwrap_or(&ROOT);
            let Some(rel) = input[pos..].find('<') else {
                doc.push_text(top, &input[pos..]);
                break;
            };
            let lt = pos + rel;
            if lt > pos {
                doc.push_text(top, &input[pos..lt]);
            }
            let rest = &input[lt..];

            if rest.starts_with("<!--") {
                let end = rest[4..]
                    .find("-->")
                    .ok_or(HtmlError::UnterminatedComment(lt))?;
                pos = lt + 4 + end + 3;
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                let end = rest.find('>').ok_or(HtmlError::UnterminatedTag(lt))?;
                pos = lt + end + 1;
                continue;
            }
            if let Some(after) = rest.strip_prefix("</") {
                let end = after.find('>').ok_or(HtmlError::UnterminatedTag(lt))?;
                let name = after[..end].trim().to_ascii_lowercase();
                close_element(&doc, &mut stack, &name);
                pos = lt + 2 + end + 1;
                continue;
            }
            if !rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                doc.push_text(top, "<");
                pos = lt + 1;
                continue;
            }

            let end = find_tag_end(rest).ok_or(HtmlError::UnterminatedTag(lt))?;
            let inner = &rest[1..end];
            let self_closing = inner.ends_with('/');
            let (name, attrs) = parse_start_tag(inner.trim_end_matches('/'));
            pos = lt + end + 1;

            close_implied(&doc, &mut stack, &name);
            let parent = *stack.last().unwrap_or(&ROOT);
            let id = doc.push_element(parent, name.clone(), attrs);

            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let closing = format!("</{name}");
                let lower = input[pos..].to_ascii_lowercase();
                let body_len = lower
                    .find(&closing)
                    .ok_or_else(|| HtmlError::UnterminatedRawText {
                        name: name.clone(),
                        offset: lt,
                    })?;
                let body = &input[pos..pos + body_len];
                if name == "title" || name == "textarea" {
                    doc.push_text(id, body);
                }
                let after = pos + body_len;
                let close_end = input[after..]
                    .find('>')
                    .ok_or(HtmlError::UnterminatedTag(after))?;
                pos = after + close_end + 1;
                continue;
            }

            if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                stack.push(id);
            }
        }

        if !doc.nodes.iter().skip(1).any(Node::is_element) {
            return Err(HtmlError::NoElements);
        }
        Ok(doc)
    }

    pub fn root(&self) -> ElementRef<'_> {
        ElementRef { doc: self, id: ROOT }
    }

    /// Text of the first `<title>` element.
    pub fn title(&self) -> Option<String> {
        self.root().select_first("title", &[]).map(|t| t.text())
    }

    fn push_text(&mut self, parent: NodeId, raw: &str) {
        if raw.is_empty() {
            return;
        }
        self.push(parent, NodeData::Text(decode_entities(raw)));
    }

    fn push_element(&mut self, parent: NodeId, name: String, attrs: Vec<(String, String)>) -> NodeId {
        self.push(parent, NodeData::Element { name, attrs })
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn name(&self, id: NodeId) -> &str {
        match &self.nodes[id].data {
            NodeData::Element { name, .. } => name,
            NodeData::Text(_) => "",
        }
    }
}

impl Node {
    fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn name(&self) -> &'a str {
        self.doc.name(self.id)
    }

    pub fn attr(&self, key: &str) -> Option<&'a str> {
        match &self.doc.nodes[self.id].data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            NodeData::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|token| token == class))
    }

    pub fn has_classes(&self, classes: &[&str]) -> bool {
        classes.iter().all(|c| self.has_class(c))
    }

    /// Descendant text, whitespace collapsed and trimmed.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(self.id, &mut raw);
        normalize_ws(&raw)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in &self.doc.nodes[id].children {
            match &self.doc.nodes[child].data {
                NodeData::Text(t) => out.push_str(t),
                NodeData::Element { .. } => self.collect_text(child, out),
            }
        }
    }

    pub fn next_element_sibling(&self) -> Option<ElementRef<'a>> {
        let parent = self.doc.nodes[self.id].parent?;
        let siblings = &self.doc.nodes[parent].children;
        let idx = siblings.iter().position(|&c| c == self.id)?;
        siblings[idx + 1..]
            .iter()
            .find(|&&c| self.doc.nodes[c].is_element())
            .map(|&id| ElementRef { doc: self.doc, id })
    }

    /// First descendant (document order) named `tag` carrying every class in
    /// `classes`. An empty `tag` matches any element.
    pub fn select_first(&self, tag: &str, classes: &[&str]) -> Option<ElementRef<'a>> {
        self.descendants().find(|e| e.is(tag, classes))
    }

    pub fn select_all(&self, tag: &str, classes: &[&str]) -> Vec<ElementRef<'a>> {
        self.descendants().filter(|e| e.is(tag, classes)).collect()
    }

    fn is(&self, tag: &str, classes: &[&str]) -> bool {
        (tag.is_empty() || self.name() == tag) && self.has_classes(classes)
    }

    fn descendants(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        let mut pending: Vec<NodeId> = doc.nodes[self.id].children.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            while let Some(id) = pending.pop() {
                let node = &doc.nodes[id];
                if !node.is_element() {
                    continue;
                }
                pending.extend(node.children.iter().rev().copied());
                return Some(ElementRef { doc, id });
            }
            None
        })
    }
}

fn close_element(doc: &Document, stack: &mut Vec<NodeId>, name: &str) {
    if let Some(idx) = stack.iter().rposition(|&id| id != ROOT && doc.name(id) == name) {
        stack.truncate(idx);
    }
}

/// Opening a row or cell while a sibling is still open closes the sibling.
fn close_implied(doc: &Document, stack: &mut Vec<NodeId>, name: &str) {
    let (targets, boundary): (&[&str], &[&str]) = match name {
        "tr" => (&["tr"], &["table", "tbody", "thead", "tfoot"]),
        "td" | "th" => (&["td", "th"], &["tr", "table"]),
        "tbody" | "thead" | "tfoot" => (&["tbody", "thead", "tfoot"], &["table"]),
        "li" => (&["li"], &["ul", "ol"]),
        "option" => (&["option"], &["select", "datalist"]),
        _ => return,
    };
    for idx in (1..stack.len()).rev() {
        let open = doc.name(stack[idx]);
        if boundary.contains(&open) {
            return;
        }
        if targets.contains(&open) {
            stack.truncate(idx);
            return;
        }
    }
}

/// Byte index of the `>` closing the tag that starts `s`, skipping quoted values.
fn find_tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in s.as_bytes().iter().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }
    None
}

fn parse_start_tag(inner: &str) -> (String, Vec<(String, String)>) {
    let bytes = inner.as_bytes();
    let name_end = bytes
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let name = inner[..name_end].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut i = name_end;
    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let key_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let key = inner[key_start..i].to_ascii_lowercase();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            attrs.push((key, String::new()));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let value = match bytes.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let start = i + 1;
                let len = bytes[start..].iter().position(|&b| b == q).unwrap_or(bytes.len() - start);
                i = (start + len + 1).min(bytes.len());
                &inner[start..start + len]
            }
            _ => {
                let start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &inner[start..i]
            }
        };
        attrs.push((key, decode_entities(value)));
    }
    (name, attrs)
}

pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
