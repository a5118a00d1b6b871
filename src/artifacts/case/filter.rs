use crate::errors::BaselineError;
use glob::Pattern;
use regex::Regex;
use std::str::FromStr;

/// Decides which case names run.
///
/// A plain string is a glob; a leading `!` negates the glob that follows it.
#[derive(Debug, Clone)]
pub enum CaseFilter {
    Glob(Pattern),
    NotGlob(Pattern),
    Regex(Regex),
}

impl CaseFilter {
    pub fn parse(filter: &str) -> Result<Self, BaselineError> {
        let (negated, glob) = match filter.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, filter),
        };

        let pattern = Pattern::new(glob).map_err(|e| BaselineError::InvalidFilter {
            filter: filter.to_string(),
            reason: e.to_string(),
        })?;

        Ok(if negated {
            CaseFilter::NotGlob(pattern)
        } else {
            CaseFilter::Glob(pattern)
        })
    }

    pub fn regex(regex: &str) -> Result<Self, BaselineError> {
        Regex::new(regex)
            .map(CaseFilter::Regex)
            .map_err(|e| BaselineError::InvalidFilter {
                filter: regex.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            CaseFilter::Glob(pattern) => pattern.matches(name),
            CaseFilter::NotGlob(pattern) => !pattern.matches(name),
            CaseFilter::Regex(regex) => regex.is_match(name),
        }
    }
}

impl From<Regex> for CaseFilter {
    fn from(regex: Regex) -> Self {
        CaseFilter::Regex(regex)
    }
}

impl FromStr for CaseFilter {
    type Err = BaselineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseFilter::parse(s)
    }
}
