use crate::error::SynthWarning;

/// Collects recovered warnings for the caller and mirrors each one to the log
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<SynthWarning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, warning: SynthWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn warnings(&self) -> &[SynthWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn into_warnings(self) -> Vec<SynthWarning> {
        self.warnings
    }
}
