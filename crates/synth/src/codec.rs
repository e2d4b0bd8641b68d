//! Type-directed conversion of payload text into source literals.

use crate::diagnostics::Diagnostics;
use crate::error::SynthWarning;
use crate::structure::{BinaryTree, LinkedListLiteral};
use crate::types::{PrimitiveKind, TypeDescriptor};

/// Split an actual-value payload into one raw token per parameter.
///
/// Commas and spaces separate tokens only outside quotes and outside `[]`/`{}`
/// nesting; the two nesting depths are tracked independently.
#[must_use]
pub fn split_parameters(input: &str) -> Vec<String> {
    let mut parameters = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut brace_depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for c in input.trim().chars() {
        if c == '"' && !escaped {
            in_quotes = !in_quotes;
            current.push(c);
        } else if (c == ',' || c == ' ') && !in_quotes && bracket_depth == 0 && brace_depth == 0
        {
            if !current.is_empty() {
                parameters.push(current.trim().to_string());
                current.clear();
            }
        } else {
            current.push(c);
            match c {
                '[' => bracket_depth += 1,
                ']' => bracket_depth = bracket_depth.saturating_sub(1),
                '{' => brace_depth += 1,
                '}' => brace_depth = brace_depth.saturating_sub(1),
                _ => {}
            }
        }
        escaped = c == '\\' && !escaped;
    }

    if !current.is_empty() {
        parameters.push(current.trim().to_string());
    }

    parameters
}

/// Builds argument literals for the method under test
#[derive(Debug, Clone)]
pub struct ParameterCodec {
    tree_placeholder: String,
}

impl Default for ParameterCodec {
    fn default() -> Self {
        Self::new("x")
    }
}

impl ParameterCodec {
    #[must_use]
    pub fn new(tree_placeholder: impl Into<String>) -> Self {
        Self {
            tree_placeholder: tree_placeholder.into(),
        }
    }

    /// One literal per (token, declared type) pair; surplus tokens or types are ignored
    pub fn encode(
        &self,
        raw: &str,
        param_types: &[TypeDescriptor],
        diagnostics: &mut Diagnostics,
    ) -> Vec<String> {
        split_parameters(raw)
            .iter()
            .zip(param_types)
            .enumerate()
            .map(|(position, (token, ty))| self.encode_one(position, token, ty, diagnostics))
            .collect()
    }

    fn encode_one(
        &self,
        position: usize,
        token: &str,
        ty: &TypeDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> String {
        match ty {
            TypeDescriptor::Text => quote(unquote(token)),
            TypeDescriptor::Primitive(PrimitiveKind::Char) => char_literal(token),
            TypeDescriptor::Primitive(_) => token.to_string(),
            TypeDescriptor::LinkedListRef => {
                if let Err(err) = LinkedListLiteral::parse(token) {
                    diagnostics.record(malformed(position, ty, token, err.to_string()));
                }
                format!("deserializeListNode(\"{token}\")")
            }
            TypeDescriptor::TreeRef => {
                if let Err(err) = BinaryTree::parse_level_order(token, &self.tree_placeholder) {
                    diagnostics.record(malformed(position, ty, token, err.to_string()));
                }
                format!("deserializeTreeNode(\"{token}\")")
            }
            TypeDescriptor::Array(element) => {
                self.encode_array(position, token, ty, element, diagnostics)
            }
            TypeDescriptor::Void | TypeDescriptor::Other(_) => {
                diagnostics.record(SynthWarning::UnsupportedParameterType {
                    position,
                    type_name: ty.to_string(),
                    token: token.to_string(),
                });
                token.to_string()
            }
        }
    }

    fn encode_array(
        &self,
        position: usize,
        token: &str,
        ty: &TypeDescriptor,
        element: &TypeDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let supported = match element {
            TypeDescriptor::Text => true,
            TypeDescriptor::Primitive(kind) => *kind != PrimitiveKind::Char,
            _ => false,
        };
        if !supported {
            diagnostics.record(SynthWarning::UnsupportedParameterType {
                position,
                type_name: ty.to_string(),
                token: token.to_string(),
            });
            return token.to_string();
        }

        let Some(inner) = strip_brackets(token) else {
            diagnostics.record(malformed(
                position,
                ty,
                token,
                "expected a bracketed list".to_string(),
            ));
            return token.to_string();
        };

        match element {
            TypeDescriptor::Text => text_array(inner),
            _ => format!("new {element}[]{{{}}}", inner.trim()),
        }
    }
}

/// Builds the expected-result literal for the method's return type
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultCodec;

impl ResultCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Warning for return types whose expected values are passed through blind
    #[must_use]
    pub fn check_return_type(return_type: &TypeDescriptor) -> Option<SynthWarning> {
        match return_type {
            TypeDescriptor::Primitive(_) | TypeDescriptor::Text | TypeDescriptor::Array(_) => None,
            _ => Some(SynthWarning::UnsupportedReturnType {
                type_name: return_type.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn encode(&self, expected: &str, return_type: &TypeDescriptor) -> String {
        match return_type {
            TypeDescriptor::Array(element) if **element == TypeDescriptor::Text => {
                text_array(&expected.replace(['[', ']'], ""))
            }
            TypeDescriptor::Text => quote(expected),
            _ => expected.to_string(),
        }
    }
}

/// `new String[]{"a", "b"}` over a comma list; empty input gives an empty array
fn text_array(inner: &str) -> String {
    if inner.trim().is_empty() {
        return "new String[]{}".to_string();
    }
    let elements: Vec<String> = inner
        .split(',')
        .map(|element| quote(unquote(element.trim())))
        .collect();
    format!("new String[]{{{}}}", elements.join(", "))
}

fn strip_brackets(token: &str) -> Option<&str> {
    token.strip_prefix('[')?.strip_suffix(']')
}

fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(token)
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn char_literal(token: &str) -> String {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c == '\\' || c == '\'' => format!("'\\{c}'"),
        (Some(c), None) => format!("'{c}'"),
        _ => token.to_string(),
    }
}

fn malformed(position: usize, ty: &TypeDescriptor, token: &str, reason: String) -> SynthWarning {
    SynthWarning::MalformedArgument {
        position,
        type_name: ty.to_string(),
        token: token.to_string(),
        reason,
    }
}
