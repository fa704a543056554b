use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::TwigError;
use anyhow::Context;
use std::path::{Path, PathBuf};

const REF_PREFIX: &str = "refs/heads/";

/// Content of a symbolic ref file, e.g. `refs/heads/master`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn try_parse(content: &str) -> Option<Self> {
        content
            .trim()
            .strip_prefix("ref: ")
            .map(|target| SymRefName(target.to_string()))
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

impl From<&BranchName> for SymRefName {
    fn from(branch_name: &BranchName) -> Self {
        SymRefName(format!("{REF_PREFIX}{branch_name}"))
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ref: {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TwigError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(TwigError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn try_parse_sym_ref_name(sym_ref_name: &SymRefName) -> anyhow::Result<Self> {
        match sym_ref_name.0.strip_prefix(REF_PREFIX) {
            Some(name) => Self::try_parse(name),
            None => anyhow::bail!(
                "symbolic ref must start with '{}', got '{}'",
                REF_PREFIX,
                sym_ref_name.0
            ),
        }
    }

    pub fn to_path(&self) -> PathBuf {
        Path::new(&self.0).to_path_buf()
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
