//! Host-side model of the linked-list and binary-tree literals.
//!
//! Decoding follows the deserializers emitted into the harness, so a token
//! accepted here is one the generated code can rebuild.

use crate::error::{Result, SynthError};

/// A `[1, 2, 3]` singly-linked list literal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedListLiteral {
    pub values: Vec<i32>,
}

impl LinkedListLiteral {
    /// Strip the brackets, split on commas and read the values in order
    pub fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| SynthError::invalid_literal("list", literal, "expected `[...]`"))?;

        if inner.trim().is_empty() {
            return Ok(Self::default());
        }

        let values = inner
            .split(',')
            .map(|value| {
                value.trim().parse::<i32>().map_err(|err| {
                    SynthError::invalid_literal("list", literal, format!("`{}`: {err}", value.trim()))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { values })
    }

    /// Same layout as the emitted `serializeListNode`
    #[must_use]
    pub fn render(&self) -> String {
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        format!("[{}]", values.join(", "))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Node of an arena-backed binary tree; children are arena indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i32,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Binary tree decoded from a `{1 2 x 3}` level-order literal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
    root: Option<usize>,
}

impl BinaryTree {
    /// Breadth-first decode: each dequeued node takes the next two tokens as
    /// its left and right children, `placeholder` marking an absent child
    pub fn parse_level_order(literal: &str, placeholder: &str) -> Result<Self> {
        let trimmed = literal.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| SynthError::invalid_literal("tree", literal, "expected `{...}`"))?;

        let tokens: Vec<&str> = inner.split_whitespace().collect();
        let Some((&first, rest)) = tokens.split_first() else {
            return Ok(Self::default());
        };

        let parse_value = |token: &str| {
            token.parse::<i32>().map_err(|err| {
                SynthError::invalid_literal("tree", literal, format!("`{token}`: {err}"))
            })
        };

        let mut tree = Self::default();
        if first == placeholder {
            return Err(SynthError::invalid_literal(
                "tree",
                literal,
                "root cannot be a placeholder",
            ));
        }
        tree.root = Some(tree.push(parse_value(first)?));

        let mut cursor = rest.iter().copied();
        let mut queue_pos = 0;
        while queue_pos < tree.nodes.len() {
            let parent = queue_pos;
            queue_pos += 1;

            for is_left in [true, false] {
                let Some(token) = cursor.next() else {
                    return Ok(tree);
                };
                if token == placeholder {
                    continue;
                }
                let child = tree.push(parse_value(token)?);
                if is_left {
                    tree.nodes[parent].left = Some(child);
                } else {
                    tree.nodes[parent].right = Some(child);
                }
            }
        }

        if cursor.next().is_some() {
            return Err(SynthError::invalid_literal(
                "tree",
                literal,
                "more tokens than open child slots",
            ));
        }
        Ok(tree)
    }

    /// Level-order encoding with trailing placeholders trimmed
    #[must_use]
    pub fn render_level_order(&self, placeholder: &str) -> String {
        let Some(root) = self.root else {
            return "{}".to_string();
        };

        let mut tokens = vec![self.nodes[root].value.to_string()];
        let mut queue = std::collections::VecDeque::from([root]);
        while let Some(idx) = queue.pop_front() {
            let node = self.nodes[idx];
            for child in [node.left, node.right] {
                match child {
                    Some(child) => {
                        tokens.push(self.nodes[child].value.to_string());
                        queue.push_back(child);
                    }
                    None => tokens.push(placeholder.to_string()),
                }
            }
        }

        while tokens.last().is_some_and(|token| token == placeholder) {
            tokens.pop();
        }
        format!("{{{}}}", tokens.join(" "))
    }

    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.map(|idx| &self.nodes[idx])
    }

    #[must_use]
    pub fn node(&self, idx: usize) -> Option<&TreeNode> {
        self.nodes.get(idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, value: i32) -> usize {
        self.nodes.push(TreeNode {
            value,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }
}
