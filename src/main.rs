//! Frala CLI
//!
//! Usage:
//!   frala [OPTIONS] <COMMAND>
//!
//! Commands:
//!   parse  Parse documents and write the results to a target directory
//!   check  Report directives that fail to resolve
//!   po     Import or export gettext PO files
//!   term   Inspect or edit terms
//!   lang   Inspect or edit configured languages

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use frala::config::CONFIG_FILE;
use frala::{export_po, import_po, Config, Engine, ParsedDocument, PoFile};

#[derive(Parser)]
#[command(name = "frala")]
#[command(about = "Build-time term substitution and fragment inclusion for static sites")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse documents and write the results to a target directory
    Parse {
        /// Documents to parse
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Language to parse in (defaults to the configured default language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Parse once per configured language into <target-dir>/<lang>/
        #[arg(short, long, conflicts_with = "lang")]
        all_languages: bool,

        /// Directory to write parsed documents to
        #[arg(short, long, default_value = ".")]
        target_dir: PathBuf,
    },

    /// Report directives that fail to resolve
    Check {
        /// Documents to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Language to check (defaults to the configured default language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Check every configured language
        #[arg(short, long, conflicts_with = "lang")]
        all_languages: bool,
    },

    /// Import or export gettext PO files
    Po {
        #[command(subcommand)]
        action: PoAction,
    },

    /// Inspect or edit terms
    Term {
        #[command(subcommand)]
        action: TermAction,
    },

    /// Inspect or edit configured languages
    Lang {
        #[command(subcommand)]
        action: LangAction,
    },
}

#[derive(Subcommand)]
enum PoAction {
    /// Import translations from a PO file into the configuration
    Import { file: PathBuf },
    /// Export terms of one language to a PO file
    Export {
        file: PathBuf,
        /// Language to export (defaults to the configured default language)
        #[arg(short, long)]
        lang: Option<String>,
    },
}

#[derive(Subcommand)]
enum TermAction {
    /// Print one translation, or every translation of a term
    Get { name: String, lang: Option<String> },
    /// Set the value of a term in one language
    Set {
        name: String,
        lang: String,
        value: String,
    },
    /// Delete a term, or only one of its translations
    Delete { name: String, lang: Option<String> },
}

#[derive(Subcommand)]
enum LangAction {
    /// List configured languages
    List,
    /// Add a language
    Add { lang: String },
    /// Remove a language (translations are kept)
    Remove { lang: String },
    /// Set the default language
    Default { lang: String },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(&cli.config);

    let ok = match cli.command {
        Command::Parse {
            files,
            lang,
            all_languages,
            target_dir,
        } => parse_files(&config, &files, lang, all_languages, &target_dir),
        Command::Check {
            files,
            lang,
            all_languages,
        } => check_files(&config, &files, lang, all_languages),
        Command::Po { action } => run_po(&mut config, &cli.config, action),
        Command::Term { action } => run_term(&mut config, &cli.config, action),
        Command::Lang { action } => run_lang(&mut config, &cli.config, action),
    };

    if !ok {
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let directive = if verbose { "frala=debug" } else { "frala=info" };
    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A missing configuration file means defaults; a broken one is fatal
fn load_config(path: &Path) -> Config {
    if !path.exists() {
        info!(path = %path.display(), "no configuration file, using defaults");
        return Config::default();
    }
    match Config::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn save_config(config: &Config, path: &Path) -> bool {
    match config.save(path) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error saving configuration '{}': {}", path.display(), e);
            false
        }
    }
}

fn languages_for(config: &Config, lang: Option<String>, all_languages: bool) -> Vec<String> {
    if all_languages {
        config.target_languages()
    } else {
        vec![lang.unwrap_or_else(|| config.default_language().to_string())]
    }
}

fn parse_files(
    config: &Config,
    files: &[PathBuf],
    lang: Option<String>,
    all_languages: bool,
    target_dir: &Path,
) -> bool {
    let engine = Engine::new(config);
    let mut ok = true;
    let mut written = HashSet::new();

    for language in languages_for(config, lang, all_languages) {
        let dir = if all_languages {
            target_dir.join(&language)
        } else {
            target_dir.to_path_buf()
        };

        for parsed in engine.multi_parse(files, &language) {
            ok &= write_parsed(&parsed, &dir, &mut written);
        }
    }
    ok
}

/// Write one parsed document into `dir` under its file name
///
/// Two documents of one run that map to the same output file are an error;
/// the first one written is kept.
fn write_parsed(parsed: &ParsedDocument, dir: &Path, written: &mut HashSet<PathBuf>) -> bool {
    let content = match &parsed.result {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    };

    let Some(name) = parsed.path.file_name() else {
        eprintln!("Error: '{}' has no file name", parsed.path.display());
        return false;
    };

    if content.is_empty() {
        warn!(file = %parsed.path.display(), "no content produced, skipping");
        return true;
    }

    let output = dir.join(name);
    if !written.insert(output.clone()) {
        eprintln!(
            "Error: '{}' would overwrite '{}' written earlier in this run",
            parsed.path.display(),
            output.display()
        );
        return false;
    }

    let result = fs::create_dir_all(dir).and_then(|()| fs::write(&output, content));
    match result {
        Ok(()) => {
            info!(file = %output.display(), "wrote parsed document");
            true
        }
        Err(e) => {
            eprintln!("Error writing '{}': {}", output.display(), e);
            false
        }
    }
}

fn check_files(config: &Config, files: &[PathBuf], lang: Option<String>, all_languages: bool) -> bool {
    let engine = Engine::new(config);
    let mut ok = true;

    for language in languages_for(config, lang, all_languages) {
        for file in files {
            let findings = match engine.check(file, &language) {
                Ok(findings) => findings,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ok = false;
                    continue;
                }
            };

            for finding in &findings {
                ok = false;
                // Spans refer to the lossily decoded text the engine parsed
                match fs::read(&finding.file) {
                    Ok(bytes) => eprint!(
                        "{}",
                        finding.report_colored(&String::from_utf8_lossy(&bytes))
                    ),
                    Err(_) => eprintln!("{}", finding),
                }
            }
            info!(
                file = %file.display(),
                language = %language,
                problems = findings.len(),
                "checked document"
            );
        }
    }
    ok
}

fn run_po(config: &mut Config, config_path: &Path, action: PoAction) -> bool {
    match action {
        PoAction::Import { file } => {
            let imported = PoFile::from_file(&file).and_then(|po| import_po(config, &po));
            match imported {
                Ok(count) => {
                    println!("Imported {} translations from {}", count, file.display());
                    save_config(config, config_path)
                }
                Err(e) => {
                    eprintln!("Error importing '{}': {}", file.display(), e);
                    false
                }
            }
        }
        PoAction::Export { file, lang } => {
            let language = lang.unwrap_or_else(|| config.default_language().to_string());
            match export_po(config, &language).save(&file) {
                Ok(()) => {
                    info!(file = %file.display(), language = %language, "exported PO file");
                    true
                }
                Err(e) => {
                    eprintln!("Error exporting '{}': {}", file.display(), e);
                    false
                }
            }
        }
    }
}

fn run_term(config: &mut Config, config_path: &Path, action: TermAction) -> bool {
    match action {
        TermAction::Get { name, lang: Some(lang) } => match config.terms().value(&name, &lang) {
            Some(value) => {
                println!("{}", value);
                true
            }
            None => {
                eprintln!("Term {} is not translated into {}", name, lang);
                false
            }
        },
        TermAction::Get { name, lang: None } => match config.terms().get(&name) {
            Some(term) => {
                for (lang, value) in term {
                    println!("{}: {}", lang, value);
                }
                true
            }
            None => {
                eprintln!("Term {} does not exist", name);
                false
            }
        },
        TermAction::Set { name, lang, value } => {
            if config.terms_mut().ensure_term(&name).is_none() {
                eprintln!("Error: term name cannot be empty");
                return false;
            }
            config.terms_mut().set_value(&name, &lang, value);
            save_config(config, config_path)
        }
        TermAction::Delete { name, lang } => {
            let removed = match &lang {
                Some(lang) => config.terms_mut().delete_value(&name, lang).is_some(),
                None => config.terms_mut().delete_term(&name).is_some(),
            };
            if !removed {
                eprintln!("Nothing to delete for term {}", name);
                return false;
            }
            save_config(config, config_path)
        }
    }
}

fn run_lang(config: &mut Config, config_path: &Path, action: LangAction) -> bool {
    match action {
        LangAction::List => {
            for language in config.languages() {
                let marker = if language == config.default_language() { " (default)" } else { "" };
                println!("{}{}", language, marker);
            }
            true
        }
        LangAction::Add { lang } => {
            if !config.add_language(&lang) {
                eprintln!("Language {} is already configured", lang);
            }
            save_config(config, config_path)
        }
        LangAction::Remove { lang } => {
            if !config.remove_language(&lang) {
                eprintln!("Language {} is not configured", lang);
                return false;
            }
            save_config(config, config_path)
        }
        LangAction::Default { lang } => {
            config.set_default_language(&lang);
            println!("Default language: {} ({})", config.default_language(), config.direction());
            save_config(config, config_path)
        }
    }
}
