pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod discover;
pub mod error;
pub mod parser;
pub mod report;

pub use checker::dictionary::{Dictionary, DictionaryStore, FstDictionary};
pub use checker::exclusions::ExclusionSet;
pub use checker::tokenizer::{tokenize, Token};
pub use checker::{check_text, find_typos, fix_typos, ScanState, TypoEngine};
pub use config::Config;
pub use error::{Result, TypoError};
pub use parser::extract_comments;
pub use report::{AppliedFix, ScanReport, SkippedFile, TypoEntry, TypoRecord};
