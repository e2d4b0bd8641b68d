use crate::config::SynthConfig;
use crate::types::{GeneratedArtifact, TestCase};

const IMPORTS: &str = "import java.util.ArrayList;\nimport java.util.Arrays;\nimport java.util.List;\n\n";

const PLACEHOLDER_MARK: &str = "@PLACEHOLDER@";

const TREE_NODE_SUPPORT: &str = r#"    static class TreeNode {
        int val;
        TreeNode left;
        TreeNode right;
        TreeNode(int x) { val = x; }
    }

    public static TreeNode deserializeTreeNode(String data) {
        String body = data.trim();
        if (body.length() < 2) return null;
        body = body.substring(1, body.length() - 1).trim();
        if (body.isEmpty()) return null;
        String[] vals = body.split("\\s+");
        TreeNode root = new TreeNode(Integer.parseInt(vals[0]));
        List<TreeNode> queue = new ArrayList<>();
        queue.add(root);
        int index = 1;
        for (int i = 0; i < queue.size() && index < vals.length; i++) {
            TreeNode node = queue.get(i);
            if (index < vals.length && !vals[index].equals("@PLACEHOLDER@")) {
                node.left = new TreeNode(Integer.parseInt(vals[index]));
                queue.add(node.left);
            }
            index++;
            if (index < vals.length && !vals[index].equals("@PLACEHOLDER@")) {
                node.right = new TreeNode(Integer.parseInt(vals[index]));
                queue.add(node.right);
            }
            index++;
        }
        return root;
    }

"#;

const LIST_NODE_SUPPORT: &str = r#"    static class ListNode {
        int val;
        ListNode next;
        ListNode(int x) { val = x; }
    }

    public static ListNode deserializeListNode(String data) {
        data = data.trim();
        data = data.substring(1, data.length() - 1);
        if (data.trim().isEmpty()) return null;
        String[] values = data.split(",");
        ListNode dummy = new ListNode(0);
        ListNode current = dummy;
        for (String val : values) {
            current.next = new ListNode(Integer.parseInt(val.trim()));
            current = current.next;
        }
        return dummy.next;
    }

    public static String serializeListNode(ListNode node) {
        StringBuilder sb = new StringBuilder();
        sb.append("[");
        while (node != null) {
            sb.append(node.val);
            if (node.next != null) sb.append(", ");
            node = node.next;
        }
        sb.append("]");
        return sb.toString();
    }

"#;

/// Composes the support types, the driver and one assertion block per case
#[derive(Debug, Clone)]
pub struct HarnessEmitter {
    class_name: String,
    runner_name: String,
    tree_placeholder: String,
}

impl Default for HarnessEmitter {
    fn default() -> Self {
        Self::from_config(&SynthConfig::default())
    }
}

impl HarnessEmitter {
    #[must_use]
    pub fn from_config(config: &SynthConfig) -> Self {
        Self {
            class_name: config.class_name.clone(),
            runner_name: config.runner_name.clone(),
            tree_placeholder: config.tree_placeholder.clone(),
        }
    }

    /// Render the full harness; identical inputs give identical text
    #[must_use]
    pub fn emit(&self, method_name: &str, cases: &[TestCase]) -> GeneratedArtifact {
        let mut out = String::with_capacity(4096 + cases.len() * 160);

        out.push_str(IMPORTS);
        out.push_str(&format!("public class {} {{\n\n", self.class_name));
        out.push_str(&TREE_NODE_SUPPORT.replace(PLACEHOLDER_MARK, &self.tree_placeholder));
        out.push_str(LIST_NODE_SUPPORT);

        out.push_str("    public static void main(String[] args) {\n");
        out.push_str(&format!("        {}();\n", self.runner_name));
        out.push_str("    }\n\n");

        out.push_str(&format!("    private static void {}() {{\n", self.runner_name));
        out.push_str("        boolean pass;\n\n");
        for case in cases {
            Self::push_case(&mut out, method_name, case);
        }
        out.push_str("    }\n\n");
        out.push_str("}\n");

        GeneratedArtifact {
            class_name: self.class_name.clone(),
            case_count: cases.len(),
            text: out,
        }
    }

    fn push_case(out: &mut String, method_name: &str, case: &TestCase) {
        out.push_str(&format!("        // report row {}\n", case.source_row));
        out.push_str(&format!(
            "        pass = {};\n",
            case.comparison_expression(method_name)
        ));
        out.push_str("        System.out.println(\"Pass: \" + pass);\n\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComparisonStrategy;
    use pretty_assertions::assert_eq;

    fn case(row: usize, args: &[&str], expected: &str, comparison: ComparisonStrategy) -> TestCase {
        TestCase {
            source_row: row,
            argument_literals: args.iter().map(|a| (*a).to_string()).collect(),
            expected_literal: expected.to_string(),
            comparison,
        }
    }

    #[test]
    fn test_emits_one_block_per_case() {
        let cases = vec![
            case(1, &["1", "2"], "3", ComparisonStrategy::ValueEquals),
            case(4, &["5", "6"], "11", ComparisonStrategy::ValueEquals),
        ];
        let artifact = HarnessEmitter::default().emit("sum", &cases);

        assert_eq!(artifact.case_count, 2);
        assert_eq!(artifact.file_name(), "GeneratedTest.java");
        assert!(artifact.text.contains(
            "        // report row 1\n        pass = sum(1, 2) == 3;\n        System.out.println(\"Pass: \" + pass);\n"
        ));
        assert!(artifact.text.contains("        pass = sum(5, 6) == 11;\n"));
        assert_eq!(artifact.text.matches("System.out.println").count(), 2);
    }

    #[test]
    fn test_comparison_forms() {
        let cases = vec![
            case(
                0,
                &["\"abc\""],
                "new String[]{\"a\"}",
                ComparisonStrategy::ElementwiseArrayEquals,
            ),
            case(1, &["\"abc\""], "\"cba\"", ComparisonStrategy::TextEquals),
        ];
        let text = HarnessEmitter::default().emit("f", &cases).text;
        assert!(text.contains("pass = Arrays.equals(f(\"abc\"), new String[]{\"a\"});"));
        assert!(text.contains("pass = f(\"abc\").equals(\"cba\");"));
    }

    #[test]
    fn test_skeleton_layout() {
        let text = HarnessEmitter::default().emit("f", &[]).text;
        assert!(text.starts_with("import java.util.ArrayList;\nimport java.util.Arrays;\nimport java.util.List;\n\npublic class GeneratedTest {\n\n    static class TreeNode {"));
        assert!(text.contains("    public static void main(String[] args) {\n        runAllTests();\n    }\n"));
        assert!(text.contains("    private static void runAllTests() {\n        boolean pass;\n\n    }\n"));
        assert!(text.ends_with("    }\n\n}\n"));
        assert_eq!(text.matches('{').count(), text.matches('}').count());
    }

    #[test]
    fn test_config_names_flow_through() {
        let config = SynthConfig {
            class_name: "SumTest".to_string(),
            runner_name: "runCases".to_string(),
            tree_placeholder: "#".to_string(),
            ..Default::default()
        };
        let artifact = HarnessEmitter::from_config(&config).emit("sum", &[]);
        assert_eq!(artifact.file_name(), "SumTest.java");
        assert!(artifact.text.contains("public class SumTest {"));
        assert!(artifact.text.contains("        runCases();\n"));
        assert!(artifact.text.contains("!vals[index].equals(\"#\")"));
        assert!(!artifact.text.contains(PLACEHOLDER_MARK));
    }

    #[test]
    fn test_deterministic() {
        let cases = vec![case(2, &["[1]"], "1", ComparisonStrategy::ValueEquals)];
        let emitter = HarnessEmitter::default();
        assert_eq!(emitter.emit("g", &cases), emitter.emit("g", &cases));
    }
}
