//! Path template compilation.
//!
//! # Responsibilities
//! - Compile a `/literal/:capture` template into an anchored regex
//! - Record capture names in declaration order
//! - Match request paths and decode captured segments
//!
//! # Design Decisions
//! - Templates are trusted startup input; compilation errors abort startup
//! - Literal segments are regex-escaped so `/file.txt` matches only itself
//! - A capture matches exactly one non-slash segment
//! - Captured values are percent-decoded; undecodable values pass through raw

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

/// Error raised while compiling a path template.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("duplicate capture name `:{name}` in template `{template}`")]
    DuplicateCapture { template: String, name: String },

    #[error("template `{template}` did not compile: {source}")]
    Compile {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled path template: anchored regex plus ordered capture names.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    keys: Vec<String>,
}

impl PathPattern {
    /// Compile a template such as `/crm/fans/:id`.
    ///
    /// Segments beginning with `:` become captures matching one non-slash
    /// segment; every other segment is embedded as escaped literal text.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let mut keys: Vec<String> = Vec::new();
        let mut pattern = String::from("^");

        for (i, segment) in template.split('/').enumerate() {
            if i > 0 {
                pattern.push('/');
            }
            if let Some(name) = segment.strip_prefix(':') {
                if keys.iter().any(|k| k == name) {
                    return Err(PatternError::DuplicateCapture {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                keys.push(name.to_string());
                pattern.push_str("([^/]+)");
            } else {
                pattern.push_str(&regex::escape(segment));
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|source| PatternError::Compile {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            keys,
        })
    }

    /// The original template text, for logging.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match a request path, returning decoded captures on success.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let mut params = HashMap::with_capacity(self.keys.len());
        for (i, key) in self.keys.iter().enumerate() {
            let raw = caps.get(i + 1).map(|m| m.as_str()).unwrap_or_default();
            let value = urlencoding::decode(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            params.insert(key.clone(), value);
        }
        Some(params)
    }
}
