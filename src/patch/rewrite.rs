//! Line-level rewriting of a single YAML key.
//!
//! Not a YAML parser: a line qualifies when it is optional indentation,
//! the key, a colon, then anything. Everything else passes through
//! byte-for-byte, line endings included.

use crate::error::Result;
use crate::version::ReleaseVersion;
use regex::Regex;

/// Rewrites every `<field>: ...` line to `<field>: v<version>`.
#[derive(Debug)]
pub struct FieldRewriter {
    field: String,
    value: String,
    pattern: Regex,
}

impl FieldRewriter {
    pub fn new(field: &str, version: &ReleaseVersion) -> Result<Self> {
        let pattern = Regex::new(&format!(r"^([ \t]*){}:.*$", regex::escape(field)))?;

        Ok(Self {
            field: field.to_string(),
            value: version.tag(),
            pattern,
        })
    }

    /// Returns the rewritten content, or `None` if no line changed.
    ///
    /// A line already holding the target value is not a change.
    pub fn rewrite(&self, content: &str) -> Option<String> {
        let mut output = String::with_capacity(content.len() + 16);
        let mut changed = false;

        for line in content.split_inclusive('\n') {
            let (body, ending) = split_line_ending(line);

            match self.pattern.captures(body) {
                Some(caps) => {
                    let indent = caps.get(1).map_or("", |m| m.as_str());
                    let replaced = format!("{}{}: {}", indent, self.field, self.value);
                    if replaced != body {
                        changed = true;
                    }
                    output.push_str(&replaced);
                }
                None => output.push_str(body),
            }

            output.push_str(ending);
        }

        changed.then_some(output)
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
