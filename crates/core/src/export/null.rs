use crate::export::{ChantArtifact, ChantExporter, ExportError, ExportReport};

#[derive(Clone, Copy, Debug, Default)]
pub struct NullExporter;

impl NullExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ChantExporter for NullExporter {
    fn export(&self, _artifact: &ChantArtifact) -> Result<ExportReport, ExportError> {
        Ok(ExportReport::default())
    }
}
