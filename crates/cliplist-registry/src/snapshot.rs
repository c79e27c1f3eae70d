use thiserror::Error;

use crate::ident::Identifier;

pub const DEFAULT_INDENT: &str = "    ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("registry wrapper is malformed: {0}")]
    MalformedWrapper(&'static str),
    #[error("cannot interpret registry entry {0:?}")]
    InconsistentStyle(String),
}

/// Formatting observed between entries, reused when new entries are
/// written so the file keeps its existing look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStyle {
    pub indent: String,
    pub trailing_comma: bool,
}

impl Default for EntryStyle {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            trailing_comma: true,
        }
    }
}

/// Parse result for the backing registry file: the ordered entries plus
/// the literal text around them, enough to re-serialize losslessly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    header: String,
    footer: String,
    entries: Vec<Identifier>,
    style: EntryStyle,
}

impl RegistrySnapshot {
    /// Parses the backing file content. Never touches the filesystem.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let open = content
            .find('{')
            .ok_or(ParseError::MalformedWrapper("missing opening brace"))?;
        let close = content
            .rfind('}')
            .ok_or(ParseError::MalformedWrapper("missing closing brace"))?;
        if close < open {
            return Err(ParseError::MalformedWrapper(
                "closing brace precedes opening brace",
            ));
        }

        let interior = &content[open + 1..close];
        let mut entries = Vec::new();
        for raw in interior.split([',', '\n']) {
            let token = raw.trim();
            if token.is_empty() {
                continue;
            }
            let entry = Identifier::new(token)
                .map_err(|_| ParseError::InconsistentStyle(token.to_string()))?;
            entries.push(entry);
        }

        let style = detect_style(interior, entries.len());
        Ok(Self {
            header: content[..=open].to_string(),
            footer: content[close..].to_string(),
            entries,
            style,
        })
    }

    /// A fresh, empty registry declaring `type_name`.
    pub fn empty(type_name: &str) -> Self {
        Self {
            header: format!("public enum {type_name}\n{{"),
            footer: "}\n".to_string(),
            entries: Vec::new(),
            style: EntryStyle::default(),
        }
    }

    pub fn entries(&self) -> &[Identifier] {
        &self.entries
    }

    pub fn style(&self) -> &EntryStyle {
        &self.style
    }

    pub fn contains(&self, name: &Identifier) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    pub(crate) fn push(&mut self, name: Identifier) {
        self.entries.push(name);
    }

    /// Removes the first entry equal to `name`, preserving the order of
    /// the rest. Returns whether anything was removed.
    pub(crate) fn remove_first(&mut self, name: &Identifier) -> bool {
        match self.entries.iter().position(|entry| entry == name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Serializes the snapshot back into file content. The header and
    /// footer are reproduced byte-for-byte; the entry list is rendered
    /// in the detected style, one entry per line. A list with mixed
    /// per-entry indentation is therefore normalized to that single
    /// style on the first write.
    pub fn render(&self) -> String {
        let mut out =
            String::with_capacity(self.header.len() + self.footer.len() + self.entries.len() * 16);
        out.push_str(&self.header);
        out.push('\n');
        for (index, entry) in self.entries.iter().enumerate() {
            out.push_str(&self.style.indent);
            out.push_str(entry.as_str());
            if index + 1 < self.entries.len() || self.style.trailing_comma {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&self.footer);
        out
    }
}

/// Adopts the indentation of the most recent entry line and whether the
/// list ends in a comma. An empty list gets the documented default.
fn detect_style(interior: &str, entry_count: usize) -> EntryStyle {
    if entry_count == 0 {
        return EntryStyle::default();
    }
    let indent = interior
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line[..line.len() - line.trim_start().len()].to_string())
        .filter(|indent| !indent.is_empty())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string());
    EntryStyle {
        indent,
        trailing_comma: interior.trim_end().ends_with(','),
    }
}
