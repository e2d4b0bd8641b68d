use crate::error::{Result, SynthError};
use crate::types::{MethodSignature, TypeDescriptor};
use regex::Regex;
use std::sync::OnceLock;

/// Access qualifier, return type token, identifier, parameter list
const HEADER_PATTERN: &str = r"(public|protected|private)\s+([^\s]+)\s+(\w+)\s*\(([^)]*)\)";

/// A whole trimmed line holding a method header, optionally ending in `{`
const HEADER_LINE_PATTERN: &str =
    r"^(public|protected|private)\s+[^\s]+\s+\w+\s*\([^)]*\)\s*\{?$";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("valid method header pattern"))
}

fn header_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADER_LINE_PATTERN).expect("valid header line pattern"))
}

/// True when a trimmed line has the shape of a method header
pub(crate) fn is_header_line(trimmed: &str) -> bool {
    header_line_regex().is_match(trimmed)
}

/// Recovers the signature of the first method declared in normalized text
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureExtractor;

impl SignatureExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Locate the first method header and decompose it
    pub fn extract(&self, normalized: &str) -> Result<MethodSignature> {
        let captures = header_regex().captures(normalized).ok_or_else(|| {
            SynthError::malformed_signature("no method header found in source")
        })?;

        log::debug!("Detected method signature: {}", &captures[0]);

        let return_type = TypeDescriptor::classify(&captures[2]);
        let name = captures[3].to_string();
        let param_types = Self::parse_params(&captures[4])?;

        let signature = MethodSignature::new(name, return_type, param_types);
        log::debug!("Parsed signature: {signature}");
        Ok(signature)
    }

    /// Split a parameter list into declared types.
    ///
    /// Commas are split without tracking `<>`/`[]` nesting, so a type such as
    /// `Map<String, Integer>` is cut in two.
    fn parse_params(params: &str) -> Result<Vec<TypeDescriptor>> {
        let params = params.trim();
        if params.is_empty() {
            return Ok(Vec::new());
        }

        params
            .split(',')
            .map(|param| {
                let param = param.trim();
                let tokens: Vec<&str> = param.split_whitespace().collect();
                match tokens.split_last() {
                    Some((_name, type_tokens)) if !type_tokens.is_empty() => {
                        Ok(TypeDescriptor::classify(&type_tokens.join(" ")))
                    }
                    _ => Err(SynthError::malformed_signature(format!(
                        "invalid parameter format: `{param}`"
                    ))),
                }
            })
            .collect()
    }
}
