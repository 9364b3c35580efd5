//! Frala - build-time term substitution and fragment inclusion for static sites
//!
//! Documents contain inline directives that are replaced by a localized term
//! or by the parsed content of another file:
//!
//! ```text
//! <html dir="{{ type=term src=frala.Direction }}">
//!   {{ type=fragment src=partials/header.html }}
//!   <h1>{{ type=term src=greeting }}</h1>
//! ```
//!
//! # Example
//!
//! ```rust
//! use frala::{Config, Engine, MemorySource};
//!
//! let config = Config::new()
//!     .with_languages(["en", "fi"])
//!     .with_term("greeting", "en", "Hello")
//!     .with_term("greeting", "fi", "Hei");
//!
//! let source = MemorySource::new()
//!     .with_file("index.html", "<h1>{{ type=term src=greeting }}</h1>\n");
//! let engine = Engine::with_source(&config, source);
//!
//! assert_eq!(engine.parse_in("index.html", "fi").unwrap(), "<h1>Hei</h1>\n");
//! ```

pub mod config;
pub mod directive;
pub mod engine;
pub mod error;
pub mod lang;
pub mod lint;
pub mod po;
pub mod terms;

pub use config::Config;
pub use directive::{decode, Directive, DirectiveKind};
pub use engine::{
    Builtin, DocumentSource, Engine, FsSource, MemorySource, ParseContext, ParsedDocument,
};
pub use error::{ConfigError, DirectiveError, ParseError, PoError};
pub use lang::Direction;
pub use lint::Finding;
pub use po::{export_po, import_po, PoFile, PoMessage};
pub use terms::{Term, TermStore};

use std::path::Path;

/// Parse a single file from disk in the default language
///
/// This is the main entry point for the library.
///
/// # Example
///
/// ```rust,no_run
/// use frala::{parse_file, Config};
///
/// let config = Config::from_file("frala.toml".as_ref()).unwrap();
/// let html = parse_file("site/index.html", &config).unwrap();
/// println!("{}", html);
/// ```
pub fn parse_file(path: impl AsRef<Path>, config: &Config) -> Result<String, ParseError> {
    Engine::new(config).parse(path)
}
