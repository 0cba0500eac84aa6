//! SGF syntax parsing along the main line of the first game tree
//!
//! Only the first variation at each branch is kept. Later variations are
//! still parsed so that syntax errors anywhere in the record are reported.

use crate::io::error::{Result, parse_error};

/// A single SGF property such as `B[dd]` or `AB[aa][bb]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property identifier in upper case
    pub ident: String,
    /// Raw values with escapes resolved
    pub values: Vec<String>,
    /// Byte offset of the identifier in the source text
    pub offset: usize,
}

/// A node of the main line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SgfNode {
    /// Properties in source order
    pub properties: Vec<Property>,
}

impl SgfNode {
    /// First property with the given identifier
    pub fn property(&self, ident: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.ident == ident)
    }
}

/// Parse the main line of the first game tree in `source`
///
/// Text before the first `(` is ignored, as is anything after the first
/// game tree closes.
///
/// # Errors
///
/// Returns a parse error describing the first syntax problem found
pub fn parse_main_line(source: &[u8]) -> Result<Vec<SgfNode>> {
    let mut parser = Parser { source, pos: 0 };
    let start = source
        .iter()
        .position(|&b| b == b'(')
        .ok_or_else(|| parse_error(0, &"no game tree found"))?;
    parser.pos = start;

    let mut line = Vec::new();
    parser.game_tree(&mut line)?;
    Ok(line)
}

/// A game tree whose closing `)` has not been reached yet
struct OpenTree {
    open: usize,
    nodes: usize,
    followed_variation: bool,
    main_line: bool,
}

impl OpenTree {
    const fn new(open: usize, main_line: bool) -> Self {
        Self {
            open,
            nodes: 0,
            followed_variation: false,
            main_line,
        }
    }
}

struct Parser<'a> {
    source: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    // GameTree = "(" Sequence { GameTree } ")"; open trees live on an explicit stack
    fn game_tree(&mut self, line: &mut Vec<SgfNode>) -> Result<()> {
        let open = self.pos;
        if self.bump() != Some(b'(') {
            return Err(parse_error(open, &"expected '('"));
        }

        let mut trees = vec![OpenTree::new(open, true)];
        while let Some(tree) = trees.last_mut() {
            self.skip_whitespace();
            match self.peek() {
                Some(b';') if !tree.followed_variation => {
                    self.pos += 1;
                    let node = self.node()?;
                    if tree.main_line {
                        line.push(node);
                    }
                    tree.nodes += 1;
                }
                Some(b';') => {
                    return Err(parse_error(self.pos, &"node after variation"));
                }
                Some(b'(') if tree.nodes == 0 => {
                    return Err(parse_error(self.pos, &"variation before any node"));
                }
                Some(b'(') => {
                    // Only the first variation of a main-line tree continues the main line
                    let main_line = tree.main_line && !tree.followed_variation;
                    tree.followed_variation = true;
                    trees.push(OpenTree::new(self.pos, main_line));
                    self.pos += 1;
                }
                Some(b')') if tree.nodes == 0 => {
                    return Err(parse_error(tree.open, &"game tree has no nodes"));
                }
                Some(b')') => {
                    self.pos += 1;
                    trees.pop();
                }
                Some(other) => {
                    return Err(parse_error(
                        self.pos,
                        &format!("unexpected character '{}'", char::from(other)),
                    ));
                }
                None => return Err(parse_error(tree.open, &"unterminated game tree")),
            }
        }

        Ok(())
    }

    fn node(&mut self) -> Result<SgfNode> {
        let mut node = SgfNode::default();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b) if b.is_ascii_alphabetic() => node.properties.push(self.property()?),
                _ => return Ok(node),
            }
        }
    }

    fn property(&mut self) -> Result<Property> {
        let offset = self.pos;
        let mut ident = String::new();
        while let Some(b) = self.peek().filter(u8::is_ascii_alphabetic) {
            // FF[3] identifiers may carry lower-case letters that are not significant
            if b.is_ascii_uppercase() {
                ident.push(char::from(b));
            }
            self.pos += 1;
        }
        if ident.is_empty() {
            return Err(parse_error(offset, &"property identifier has no upper-case letters"));
        }

        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'[') {
                break;
            }
            values.push(self.value()?);
        }
        if values.is_empty() {
            return Err(parse_error(
                offset,
                &format!("property '{ident}' has no value"),
            ));
        }

        Ok(Property {
            ident,
            values,
            offset,
        })
    }

    fn value(&mut self) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut raw = Vec::new();
        loop {
            match self.bump() {
                Some(b']') => break,
                Some(b'\\') => match self.bump() {
                    // Escaped newline is a soft line break and disappears
                    Some(b'\n') => {
                        if self.peek() == Some(b'\r') {
                            self.pos += 1;
                        }
                    }
                    Some(b'\r') => {
                        if self.peek() == Some(b'\n') {
                            self.pos += 1;
                        }
                    }
                    Some(escaped) => raw.push(escaped),
                    None => return Err(parse_error(open, &"unterminated property value")),
                },
                Some(b) => raw.push(b),
                None => return Err(parse_error(open, &"unterminated property value")),
            }
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}
