use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::fs;
use std::path::Path;

use crate::error::BankError;

static BANK_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/banks");

pub const DEFAULT_BANK: &str = "node_basics";

/// An immutable question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}

impl QuestionAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A named, non-empty list of questions.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    pub name: String,
    pub entries: Vec<QuestionAnswer>,
}

impl QuestionBank {
    /// Load one of the banks compiled into the binary.
    pub fn builtin(name: &str) -> Result<Self, BankError> {
        let file = BANK_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| BankError::UnknownBank(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| BankError::UnknownBank(name.to_string()))?;
        Self::parse(contents)
    }

    /// Load a bank from a json file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, BankError> {
        let bank: QuestionBank = from_str(contents)?;
        if bank.entries.is_empty() {
            return Err(BankError::Empty(bank.name));
        }
        Ok(bank)
    }

    /// Names of the banks compiled into the binary, sorted.
    pub fn builtin_names() -> Vec<String> {
        let mut names: Vec<String> = BANK_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
