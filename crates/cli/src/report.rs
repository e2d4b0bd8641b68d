use regress_synth::{MethodSignature, SynthWarning};
use serde::Serialize;
use std::path::Path;

/// `generate --json` summary
#[derive(Debug, Serialize)]
pub struct GenerateSummary<'a> {
    pub output: String,
    pub cases: usize,
    pub warnings: &'a [SynthWarning],
}

/// `signature --json` body
#[derive(Debug, Serialize)]
pub struct SignatureOutput {
    pub name: String,
    pub return_type: String,
    pub param_types: Vec<String>,
}

impl From<&MethodSignature> for SignatureOutput {
    fn from(signature: &MethodSignature) -> Self {
        Self {
            name: signature.name.clone(),
            return_type: signature.return_type.to_string(),
            param_types: signature
                .param_types
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

pub fn render_generate_summary(
    signature: &MethodSignature,
    output: &Path,
    cases: usize,
    warnings: &[SynthWarning],
) -> String {
    let mut text = String::new();
    text.push_str(&format!("Method: {signature}\n"));
    text.push_str(&format!(
        "Generated {cases} test case(s) -> {}",
        output.display()
    ));
    if !warnings.is_empty() {
        text.push_str(&format!("\n{} warning(s):", warnings.len()));
        for warning in warnings {
            text.push_str(&format!("\n  - {warning}"));
        }
    }
    text
}
