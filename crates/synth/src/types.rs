use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Primitive value kinds of the source dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Int,
    Long,
    Short,
    Byte,
    Float,
    Double,
    Boolean,
    Char,
}

impl PrimitiveKind {
    /// Parse a primitive keyword
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "short" => Some(Self::Short),
            "byte" => Some(Self::Byte),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "boolean" => Some(Self::Boolean),
            "char" => Some(Self::Char),
            _ => None,
        }
    }

    /// Source keyword
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Char => "char",
        }
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Int | Self::Long | Self::Short | Self::Byte)
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Zero value literal
    #[must_use]
    pub const fn default_literal(self) -> &'static str {
        match self {
            Self::Int | Self::Long | Self::Short | Self::Byte => "0",
            Self::Float | Self::Double => "0.0",
            Self::Boolean => "false",
            Self::Char => "'\\0'",
        }
    }
}

/// Classification of a declared type.
///
/// Computed once from the raw type text and shared by the normalizer (default
/// values), the parameter codec (argument literals) and the result codec
/// (expected literal and comparison strategy).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Void,
    Primitive(PrimitiveKind),
    Array(Box<TypeDescriptor>),
    Text,
    LinkedListRef,
    TreeRef,
    Other(String),
}

impl TypeDescriptor {
    /// Classify raw type text such as `int`, `String[]` or `final TreeNode`
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let mut name = raw.trim();
        while let Some(rest) = name.strip_prefix("final ") {
            name = rest.trim_start();
        }

        if let Some(element) = name.strip_suffix("[]") {
            return Self::Array(Box::new(Self::classify(element)));
        }

        if let Some(kind) = PrimitiveKind::from_keyword(name) {
            return Self::Primitive(kind);
        }

        match name {
            "void" => Self::Void,
            "String" => Self::Text,
            "ListNode" => Self::LinkedListRef,
            "TreeNode" => Self::TreeRef,
            _ => Self::Other(name.to_string()),
        }
    }

    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Innermost non-array type and the number of array dimensions around it
    #[must_use]
    pub fn array_base(&self) -> (&Self, usize) {
        let mut current = self;
        let mut dims = 0;
        while let Self::Array(element) = current {
            current = element;
            dims += 1;
        }
        (current, dims)
    }

    /// Literal carrying the zero/empty/null value of this type, `None` for void
    #[must_use]
    pub fn default_value(&self) -> Option<String> {
        match self {
            Self::Void => None,
            Self::Primitive(kind) => Some(kind.default_literal().to_string()),
            Self::Array(_) => {
                let (base, dims) = self.array_base();
                Some(format!("new {base}[0]{}", "[]".repeat(dims - 1)))
            }
            Self::Text | Self::LinkedListRef | Self::TreeRef | Self::Other(_) => {
                Some("null".to_string())
            }
        }
    }

    /// Full `return ...;` statement, `None` for void
    #[must_use]
    pub fn default_return(&self) -> Option<String> {
        self.default_value().map(|value| format!("return {value};"))
    }

    /// Equality check used when comparing a result of this type
    #[must_use]
    pub const fn comparison_strategy(&self) -> ComparisonStrategy {
        match self {
            Self::Array(_) => ComparisonStrategy::ElementwiseArrayEquals,
            Self::Text => ComparisonStrategy::TextEquals,
            _ => ComparisonStrategy::ValueEquals,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(kind) => f.write_str(kind.as_str()),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Text => f.write_str("String"),
            Self::LinkedListRef => f.write_str("ListNode"),
            Self::TreeRef => f.write_str("TreeNode"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Name, return type and ordered parameter types of the method under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: TypeDescriptor,
    /// Positional, in declaration order
    pub param_types: Vec<TypeDescriptor>,
}

impl MethodSignature {
    #[must_use]
    pub const fn new(
        name: String,
        return_type: TypeDescriptor,
        param_types: Vec<TypeDescriptor>,
    ) -> Self {
        Self {
            name,
            return_type,
            param_types,
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (idx, param) in self.param_types.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

/// A failing report row with its extracted payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Index of the row in the source table
    pub index: usize,
    pub status: String,
    pub expected_payload: String,
    pub actual_payload: String,
}

/// Equality check applied to the method result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStrategy {
    ElementwiseArrayEquals,
    TextEquals,
    ValueEquals,
}

impl ComparisonStrategy {
    /// Comparison expression for `actual` against `expected`
    #[must_use]
    pub fn render(self, actual: &str, expected: &str) -> String {
        match self {
            Self::ElementwiseArrayEquals => format!("Arrays.equals({actual}, {expected})"),
            Self::TextEquals => format!("{actual}.equals({expected})"),
            Self::ValueEquals => format!("{actual} == {expected}"),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ElementwiseArrayEquals => "elementwise_array_equals",
            Self::TextEquals => "text_equals",
            Self::ValueEquals => "value_equals",
        }
    }
}

/// One generated assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// Report row the case came from
    pub source_row: usize,
    pub argument_literals: Vec<String>,
    pub expected_literal: String,
    pub comparison: ComparisonStrategy,
}

impl TestCase {
    /// Comparison expression invoking `method_name` with this case's arguments
    #[must_use]
    pub fn comparison_expression(&self, method_name: &str) -> String {
        let call = format!("{method_name}({})", self.argument_literals.join(", "));
        self.comparison.render(&call, &self.expected_literal)
    }
}

/// The emitted harness source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub class_name: String,
    pub case_count: usize,
    pub text: String,
}

impl GeneratedArtifact {
    /// Suggested file name, `<class_name>.java`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }

    /// Write the artifact in one pass; the handle is closed on every path
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let wrap = |source: std::io::Error| SynthError::ArtifactWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = std::fs::File::create(path).map_err(wrap)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(self.text.as_bytes()).map_err(wrap)?;
        writer.flush().map_err(wrap)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_scalars() {
        assert_eq!(TypeDescriptor::classify("void"), TypeDescriptor::Void);
        assert_eq!(
            TypeDescriptor::classify("int"),
            TypeDescriptor::Primitive(PrimitiveKind::Int)
        );
        assert_eq!(TypeDescriptor::classify(" String "), TypeDescriptor::Text);
        assert_eq!(TypeDescriptor::classify("ListNode"), TypeDescriptor::LinkedListRef);
        assert_eq!(TypeDescriptor::classify("final TreeNode"), TypeDescriptor::TreeRef);
        assert_eq!(
            TypeDescriptor::classify("Map<String, Integer>"),
            TypeDescriptor::Other("Map<String, Integer>".to_string())
        );
    }

    #[test]
    fn test_classify_arrays() {
        assert_eq!(
            TypeDescriptor::classify("String[]"),
            TypeDescriptor::Array(Box::new(TypeDescriptor::Text))
        );
        let nested = TypeDescriptor::classify("int[][]");
        assert_eq!(
            nested.array_base(),
            (&TypeDescriptor::Primitive(PrimitiveKind::Int), 2)
        );
        assert_eq!(nested.to_string(), "int[][]");
    }

    #[test]
    fn test_default_values() {
        let cases = [
            ("int", Some("return 0;")),
            ("long", Some("return 0;")),
            ("short", Some("return 0;")),
            ("byte", Some("return 0;")),
            ("float", Some("return 0.0;")),
            ("double", Some("return 0.0;")),
            ("boolean", Some("return false;")),
            ("char", Some("return '\\0';")),
            ("String", Some("return null;")),
            ("TreeNode", Some("return null;")),
            ("Widget", Some("return null;")),
            ("int[]", Some("return new int[0];")),
            ("String[]", Some("return new String[0];")),
            ("double[][]", Some("return new double[0][];")),
            ("void", None),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                TypeDescriptor::classify(raw).default_return().as_deref(),
                expected,
                "default return for {raw}"
            );
        }
    }

    #[test]
    fn test_comparison_strategy() {
        assert_eq!(
            TypeDescriptor::classify("String[]").comparison_strategy(),
            ComparisonStrategy::ElementwiseArrayEquals
        );
        assert_eq!(
            TypeDescriptor::classify("String").comparison_strategy(),
            ComparisonStrategy::TextEquals
        );
        assert_eq!(
            TypeDescriptor::classify("long").comparison_strategy(),
            ComparisonStrategy::ValueEquals
        );
    }

    #[test]
    fn test_comparison_expression() {
        let case = TestCase {
            source_row: 1,
            argument_literals: vec!["\"abc\"".to_string(), "new int[]{1,2,3}".to_string()],
            expected_literal: "3".to_string(),
            comparison: ComparisonStrategy::ValueEquals,
        };
        assert_eq!(
            case.comparison_expression("count"),
            "count(\"abc\", new int[]{1,2,3}) == 3"
        );
    }

    #[test]
    fn test_signature_display() {
        let signature = MethodSignature::new(
            "merge".to_string(),
            TypeDescriptor::classify("int[]"),
            vec![TypeDescriptor::Text, TypeDescriptor::LinkedListRef],
        );
        assert_eq!(signature.to_string(), "int[] merge(String, ListNode)");
        assert_eq!(signature.arity(), 2);
    }

    #[test]
    fn test_artifact_write_to() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = GeneratedArtifact {
            class_name: "GeneratedTest".to_string(),
            case_count: 0,
            text: "public class GeneratedTest {}\n".to_string(),
        };
        let path = dir.path().join(artifact.file_name());
        artifact.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), artifact.text);

        let missing = dir.path().join("missing").join("GeneratedTest.java");
        let err = artifact.write_to(&missing).unwrap_err();
        assert!(matches!(err, SynthError::ArtifactWrite { .. }));
    }
}
