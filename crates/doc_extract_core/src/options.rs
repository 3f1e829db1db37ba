//! Caller-supplied parse options (the C6 entry point).

use doc_extract_models::DocumentType;

use crate::config::ParserConfig;

/// Both fields are optional; when omitted they are derived from the text.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// A caller-asserted document type hint. The assembler's classifier
    /// still runs and its result feeds the confidence engine's doc-type
    /// sub-score, but the hint wins for `Record.metadata.document_type`
    /// when present.
    pub document_type: Option<DocumentType>,
    /// A caller-asserted BCP-47 language tag. Falls back to
    /// `detect_language` when absent.
    pub language: Option<String>,
    /// Tunable thresholds; `None` uses [`ParserConfig::default`].
    pub config: Option<ParserConfig>,
}

impl ParseOptions {
    #[must_use]
    pub fn config(&self) -> ParserConfig {
        self.config.unwrap_or_default()
    }
}
