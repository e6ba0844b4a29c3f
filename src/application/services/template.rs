//! CSV template export
//!
//! Turns a confirmed field list into a header-only CSV template: one row of
//! field labels, optionally followed by a row of field keys.

use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::FieldDetail;
use crate::infrastructure::traits::FileSystem;

/// Formatting options for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub delimiter: char,
    /// Emit a second row with field keys
    pub include_keys: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_keys: false,
        }
    }
}

impl TemplateOptions {
    /// Options from a configured delimiter string, which must be one character.
    pub fn from_delimiter(delimiter: &str, include_keys: bool) -> ApplicationResult<Self> {
        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '"' && c != '\n' && c != '\r' => Ok(Self {
                delimiter: c,
                include_keys,
            }),
            _ => Err(ApplicationError::Config {
                message: format!("delimiter must be a single character, got {delimiter:?}"),
            }),
        }
    }
}

/// Builds and writes CSV templates.
pub struct TemplateService {
    fs: Arc<dyn FileSystem>,
}

impl TemplateService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Render the template text, terminated by a newline.
    ///
    /// An empty field list renders as an empty string.
    pub fn render(&self, fields: &[FieldDetail], options: &TemplateOptions) -> String {
        if fields.is_empty() {
            return String::new();
        }
        let sep = options.delimiter.to_string();
        let mut out = fields
            .iter()
            .map(|f| quote_cell(&f.label, options.delimiter))
            .join(&sep);
        out.push('\n');
        if options.include_keys {
            out.push_str(
                &fields
                    .iter()
                    .map(|f| quote_cell(&f.payload.key, options.delimiter))
                    .join(&sep),
            );
            out.push('\n');
        }
        out
    }

    #[instrument(level = "debug", skip(self, fields, options), fields(count = fields.len()))]
    pub fn write(
        &self,
        fields: &[FieldDetail],
        options: &TemplateOptions,
        path: &Path,
    ) -> ApplicationResult<()> {
        let content = self.render(fields, options);
        self.fs
            .ensure_parent(path)
            .with_path_context("create template directory", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write template", path)?;
        debug!("template written: {}", path.display());
        Ok(())
    }
}

/// Quote a cell if it contains the delimiter, a quote or a line break.
fn quote_cell(value: &str, delimiter: char) -> String {
    if value.contains(delimiter) || value.contains(['"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
