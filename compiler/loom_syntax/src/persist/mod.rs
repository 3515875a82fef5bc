//! Compact binary form of a core tree.
//!
//! The tree is flattened into serde types and written with `bincode`. Every
//! string (token text, trivia text, annotation kinds and data) is stored once
//! in a text table and referenced by index. Widths and offsets are not
//! stored: they follow from the texts when the tree is rebuilt.
//!
//! Elements are written in postorder as one flat list. A node record follows
//! its children and says how many of the preceding elements it takes, so
//! neither side recurses however deep the tree is.

use loom_diagnostic::Diagnostic;
use loom_ir::SyntaxKind;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxAnnotation};

const MAGIC: [u8; 4] = *b"LOOM";
const FORMAT_VERSION: u16 = 1;

/// Failure to encode or decode a persisted tree.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("malformed tree data: {0}")]
    Codec(#[from] bincode::Error),
    #[error("not a persisted syntax tree")]
    BadMagic,
    #[error("unsupported format version {found} (expected {FORMAT_VERSION})")]
    UnsupportedVersion { found: u16 },
    #[error("text index {index} is out of range for a table of {len} entries")]
    TextIndex { index: u32, len: usize },
    #[error("{kind:?} cannot appear as a {role}")]
    KindMismatch { kind: SyntaxKind, role: &'static str },
    #[error("elements do not form a single tree")]
    Shape,
}

#[derive(Serialize, Deserialize)]
struct PersistedTree {
    magic: [u8; 4],
    version: u16,
    texts: Vec<String>,
    elements: Vec<PersistedElement>,
}

#[derive(Serialize, Deserialize)]
struct PersistedNode {
    kind: SyntaxKind,
    children: u32,
    diagnostics: Vec<Diagnostic>,
    annotations: Vec<PersistedAnnotation>,
}

#[derive(Serialize, Deserialize)]
enum PersistedElement {
    Node(PersistedNode),
    Token(PersistedToken),
}

#[derive(Serialize, Deserialize)]
struct PersistedToken {
    kind: SyntaxKind,
    missing: bool,
    text: u32,
    leading: Vec<(SyntaxKind, u32)>,
    trailing: Vec<(SyntaxKind, u32)>,
    diagnostics: Vec<Diagnostic>,
    annotations: Vec<PersistedAnnotation>,
}

#[derive(Serialize, Deserialize)]
struct PersistedAnnotation {
    id: u64,
    kind: u32,
    data: Option<u32>,
}

/// Serialize a core tree.
pub fn encode(root: &GreenNode) -> Result<Vec<u8>, PersistError> {
    let mut writer = Writer::default();
    let elements = writer.elements(root);
    let tree = PersistedTree {
        magic: MAGIC,
        version: FORMAT_VERSION,
        texts: writer.texts.into_iter().map(str::to_owned).collect(),
        elements,
    };
    let bytes = bincode::serialize(&tree)?;
    tracing::debug!(bytes = bytes.len(), texts = tree.texts.len(), "encoded tree");
    Ok(bytes)
}

/// Rebuild a core tree written by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<GreenNode, PersistError> {
    let tree: PersistedTree = bincode::deserialize(bytes)?;
    if tree.magic != MAGIC {
        return Err(PersistError::BadMagic);
    }
    if tree.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: tree.version,
        });
    }
    let reader = Reader { texts: &tree.texts };
    reader.tree(tree.elements)
}

/// Text interner for encoding.
#[derive(Default)]
struct Writer<'a> {
    texts: Vec<&'a str>,
    index: FxHashMap<&'a str, u32>,
}

impl<'a> Writer<'a> {
    fn intern(&mut self, text: &'a str) -> u32 {
        if let Some(&index) = self.index.get(text) {
            return index;
        }
        let index = self.texts.len() as u32;
        self.texts.push(text);
        self.index.insert(text, index);
        index
    }

    /// Postorder records of the subtree under `root`.
    fn elements(&mut self, root: &'a GreenNode) -> Vec<PersistedElement> {
        let mut out = Vec::new();
        let mut stack = vec![(root, root.children().iter())];
        while let Some((node, children)) = stack.last_mut() {
            let node: &'a GreenNode = *node;
            match children.next() {
                Some(child) => match &child.element {
                    GreenElement::Node(child) => stack.push((child, child.children().iter())),
                    GreenElement::Token(token) => {
                        let token = self.token(token);
                        out.push(PersistedElement::Token(token));
                    }
                },
                None => {
                    stack.pop();
                    let node = self.node(node);
                    out.push(PersistedElement::Node(node));
                }
            }
        }
        out
    }

    fn node(&mut self, node: &'a GreenNode) -> PersistedNode {
        PersistedNode {
            kind: node.kind(),
            children: node.children().len() as u32,
            diagnostics: node.diagnostics().to_vec(),
            annotations: self.annotations(node.annotations()),
        }
    }

    fn token(&mut self, token: &'a GreenToken) -> PersistedToken {
        PersistedToken {
            kind: token.kind(),
            missing: token.is_missing(),
            text: self.intern(token.text()),
            leading: self.trivia(token.leading_trivia()),
            trailing: self.trivia(token.trailing_trivia()),
            diagnostics: token.diagnostics().to_vec(),
            annotations: self.annotations(token.annotations()),
        }
    }

    fn trivia(&mut self, trivia: &'a [GreenTrivia]) -> Vec<(SyntaxKind, u32)> {
        trivia
            .iter()
            .map(|piece| (piece.kind(), self.intern(piece.text())))
            .collect()
    }

    fn annotations(&mut self, annotations: &'a [SyntaxAnnotation]) -> Vec<PersistedAnnotation> {
        annotations
            .iter()
            .map(|a| PersistedAnnotation {
                id: a.id(),
                kind: self.intern(a.kind()),
                data: a.data().map(|data| self.intern(data)),
            })
            .collect()
    }
}

struct Reader<'a> {
    texts: &'a [String],
}

impl Reader<'_> {
    fn text(&self, index: u32) -> Result<&str, PersistError> {
        self.texts
            .get(index as usize)
            .map(String::as_str)
            .ok_or(PersistError::TextIndex {
                index,
                len: self.texts.len(),
            })
    }

    /// Rebuild the tree from postorder records.
    fn tree(&self, elements: Vec<PersistedElement>) -> Result<GreenNode, PersistError> {
        let mut stack: Vec<GreenElement> = Vec::new();
        for element in elements {
            let green = match element {
                PersistedElement::Token(token) => self.token(token)?.into(),
                PersistedElement::Node(node) => {
                    let first = stack
                        .len()
                        .checked_sub(node.children as usize)
                        .ok_or(PersistError::Shape)?;
                    let children = stack.split_off(first);
                    self.node(node, children)?.into()
                }
            };
            stack.push(green);
        }
        match (stack.pop(), stack.is_empty()) {
            (Some(GreenElement::Node(root)), true) => Ok(root),
            _ => Err(PersistError::Shape),
        }
    }

    fn node(
        &self,
        node: PersistedNode,
        children: Vec<GreenElement>,
    ) -> Result<GreenNode, PersistError> {
        if !node.kind.is_node() {
            return Err(PersistError::KindMismatch {
                kind: node.kind,
                role: "node",
            });
        }
        let mut green = GreenNode::new(node.kind, children);
        if !node.diagnostics.is_empty() {
            green = green.with_diagnostics(node.diagnostics);
        }
        if !node.annotations.is_empty() {
            green = green.with_annotations(self.annotations(&node.annotations)?);
        }
        Ok(green)
    }

    fn token(&self, token: PersistedToken) -> Result<GreenToken, PersistError> {
        if !token.kind.is_token() {
            return Err(PersistError::KindMismatch {
                kind: token.kind,
                role: "token",
            });
        }
        let mut green = if token.missing {
            GreenToken::missing(token.kind)
        } else {
            GreenToken::with_trivia(
                token.kind,
                self.text(token.text)?,
                self.trivia(&token.leading)?,
                self.trivia(&token.trailing)?,
            )
        };
        if !token.diagnostics.is_empty() {
            green = green.with_diagnostics(token.diagnostics);
        }
        if !token.annotations.is_empty() {
            green = green.with_annotations(self.annotations(&token.annotations)?);
        }
        Ok(green)
    }

    fn trivia(&self, pieces: &[(SyntaxKind, u32)]) -> Result<Vec<GreenTrivia>, PersistError> {
        pieces
            .iter()
            .map(|&(kind, index)| {
                if !kind.is_trivia() {
                    return Err(PersistError::KindMismatch {
                        kind,
                        role: "trivia",
                    });
                }
                Ok(GreenTrivia::new(kind, self.text(index)?))
            })
            .collect()
    }

    fn annotations(
        &self,
        annotations: &[PersistedAnnotation],
    ) -> Result<Vec<SyntaxAnnotation>, PersistError> {
        annotations
            .iter()
            .map(|a| {
                let data = a.data.map(|index| self.text(index)).transpose()?;
                Ok(SyntaxAnnotation::from_parts(a.id, self.text(a.kind)?, data))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
