//! Template registry and auto-detection
//!
//! This module holds the known template parsers, exposes lookup by template
//! name, and auto-detects the template type from a sheet's column signature
//! when the caller does not specify one.
//!
//! Detection is deliberately strict: partner layouts are visually similar,
//! so a template is only selected when every one of its expected columns is
//! present verbatim. Any partial match fails with an error naming the best
//! candidate and its missing columns so a human can pick manually.

use tracing::{debug, warn};

use super::template_parser::{ColumnMapping, TemplateParser};
use crate::app::models::{TabularData, TemplateType};
use crate::constants::DETECTION_REQUIRED_SCORE;
use crate::{Error, Result};

/// Registry of known partner template parsers
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    parsers: Vec<TemplateParser>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Create a registry with every built-in template registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for template_type in TemplateType::all() {
            registry.register(TemplateParser::new(template_type));
        }
        registry
    }

    /// Register a parser, replacing any existing parser for the same template
    pub fn register(&mut self, parser: TemplateParser) {
        if let Some(existing) = self
            .parsers
            .iter_mut()
            .find(|registered| registered.template_type() == parser.template_type())
        {
            warn!(
                "Replacing registered parser for template '{}'",
                parser.template_type()
            );
            *existing = parser;
        } else {
            self.parsers.push(parser);
        }
    }

    /// Look up a parser by template name
    pub fn get(&self, template_name: &str) -> Result<&TemplateParser> {
        let template_type: TemplateType = template_name.parse()?;
        self.parsers
            .iter()
            .find(|parser| parser.template_type() == template_type)
            .ok_or_else(|| Error::template_not_found(template_name))
    }

    /// Template types currently registered, in registration order
    pub fn template_types(&self) -> Vec<TemplateType> {
        self.parsers
            .iter()
            .map(|parser| parser.template_type())
            .collect()
    }

    /// Registered parsers, in registration order
    pub fn parsers(&self) -> &[TemplateParser] {
        &self.parsers
    }

    /// Detect the template type from the input's column signature
    ///
    /// Scores every registered parser as the percentage of its expected
    /// columns present in the sheet and selects the highest. Requires an
    /// exact 100% match; otherwise fails with [`Error::TemplateDetection`]
    /// naming the best candidate and its gap.
    pub fn auto_detect(&self, table: &TabularData) -> Result<&TemplateParser> {
        if self.parsers.is_empty() {
            return Err(Error::configuration(
                "template registry has no parsers registered",
            ));
        }

        let mapping = ColumnMapping::analyze(&table.headers);

        let mut best: Option<(&TemplateParser, f64)> = None;
        for parser in &self.parsers {
            let expected = parser.expected_columns();
            let matched = expected
                .iter()
                .filter(|column| mapping.has_column(column))
                .count();
            let score = matched as f64 / expected.len() as f64 * 100.0;

            debug!(
                "Template '{}' matched {}/{} columns ({:.0}%)",
                parser.template_type(),
                matched,
                expected.len(),
                score
            );

            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((parser, score)),
            }
        }

        let (candidate, score) = best.expect("registry checked non-empty above");

        if score >= DETECTION_REQUIRED_SCORE {
            debug!(
                "Auto-detected template '{}' at {:.0}%",
                candidate.template_type(),
                score
            );
            Ok(candidate)
        } else {
            let missing = mapping.missing_columns(candidate.expected_columns());
            Err(Error::template_detection(
                candidate.template_type().display_name(),
                score,
                missing,
            ))
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
