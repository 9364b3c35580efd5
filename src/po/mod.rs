//! Gettext PO import and export
//!
//! A PO file carries one language (its `Language:` header). Each message's
//! `msgid` is a term name and its `msgstr` the term's value in that language.

mod grammar;
pub mod lexer;

use std::fmt;
use std::path::Path;

use tracing::info;

pub use grammar::parse_entries;

use crate::config::Config;
use crate::error::PoError;
use crate::lang;
use lexer::escape;

/// A single PO entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoMessage {
    pub context: Option<String>,
    pub id: String,
    pub plural: Option<String>,
    /// One value for plain messages, one per plural form otherwise
    pub translations: Vec<String>,
}

impl PoMessage {
    /// Create a plain message
    pub fn new(id: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            context: None,
            id: id.into(),
            plural: None,
            translations: vec![translation.into()],
        }
    }

    /// The singular translation, if non-empty
    pub fn translation(&self) -> Option<&str> {
        self.translations
            .first()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    fn is_header(&self) -> bool {
        self.id.is_empty() && self.context.is_none()
    }
}

/// A parsed PO file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoFile {
    /// Value of the `Language:` header
    pub language: Option<String>,
    /// Entries other than the header
    pub messages: Vec<PoMessage>,
}

impl PoFile {
    /// Create an empty PO file for a language
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            messages: Vec::new(),
        }
    }

    /// Load a PO file from disk
    pub fn from_file(path: &Path) -> Result<Self, PoError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse PO source
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PoError> {
        let mut language = None;
        let mut messages = Vec::new();

        for entry in parse_entries(content)? {
            if entry.is_header() {
                language = header_field(entry.translations.first().map(String::as_str).unwrap_or(""), "Language");
            } else {
                messages.push(entry);
            }
        }

        Ok(Self { language, messages })
    }

    /// Write the PO file to disk
    pub fn save(&self, path: &Path) -> Result<(), PoError> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

/// Find `Name: value` in a PO header block
fn header_field(header: &str, name: &str) -> Option<String> {
    header.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == name)
            .then(|| value.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

fn write_field(f: &mut fmt::Formatter<'_>, keyword: &str, value: &str) -> fmt::Result {
    writeln!(f, "{} \"{}\"", keyword, escape(value))
}

impl fmt::Display for PoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "msgid \"\"")?;
        writeln!(f, "msgstr \"\"")?;
        if let Some(language) = &self.language {
            writeln!(f, "\"Language: {}\\n\"", escape(language))?;
        }
        writeln!(f, "\"MIME-Version: 1.0\\n\"")?;
        writeln!(f, "\"Content-Type: text/plain; charset=UTF-8\\n\"")?;
        writeln!(f, "\"Content-Transfer-Encoding: 8bit\\n\"")?;

        for message in &self.messages {
            writeln!(f)?;
            if let Some(context) = &message.context {
                write_field(f, "msgctxt", context)?;
            }
            write_field(f, "msgid", &message.id)?;
            match &message.plural {
                Some(plural) => {
                    write_field(f, "msgid_plural", plural)?;
                    for (i, translation) in message.translations.iter().enumerate() {
                        write_field(f, &format!("msgstr[{}]", i), translation)?;
                    }
                }
                None => {
                    let translation = message.translations.first().map(String::as_str).unwrap_or("");
                    write_field(f, "msgstr", translation)?;
                }
            }
        }
        Ok(())
    }
}

/// Import the translations of a PO file into the configuration
///
/// Every message with a non-empty translation becomes a term value in the
/// file's language, and the language is added to the configured languages.
/// Returns the number of imported values.
pub fn import_po(config: &mut Config, po: &PoFile) -> Result<usize, PoError> {
    let language = po
        .language
        .as_deref()
        .map(lang::sanitize)
        .filter(|l| !l.is_empty())
        .ok_or(PoError::MissingLanguage)?;

    let mut imported = 0;
    for message in &po.messages {
        if message.id.is_empty() {
            continue;
        }
        if let Some(translation) = message.translation() {
            config.terms_mut().set_value(&message.id, &language, translation);
            imported += 1;
        }
    }

    config.add_language(&language);
    info!(language = %language, imported, "imported PO translations");
    Ok(imported)
}

/// Export every term of the configuration as a PO file for one language
///
/// Terms without a value in that language are written with an empty
/// `msgstr`, which gettext tools treat as untranslated.
pub fn export_po(config: &Config, language: &str) -> PoFile {
    let language = lang::sanitize(language);
    let messages = config
        .terms()
        .iter()
        .map(|(name, term)| PoMessage::new(name, term.get(&language).cloned().unwrap_or_default()))
        .collect();

    PoFile {
        language: Some(language),
        messages,
    }
}
