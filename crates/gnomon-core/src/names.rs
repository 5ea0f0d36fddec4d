//! Point-name codes
//!
//! Scene scripts refer to points by short names, usually single letters, and
//! to pairs of points by concatenating them: `"AB"` is the pair `(A, B)`.
//! Builders take name lists the same way: `"ABCD"` names four points.

use crate::{Error, Result};
use std::fmt;

/// An ordered pair of point names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamePair {
    pub first: String,
    pub second: String,
}

impl NamePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Parse a two-character code such as `"AB"`
    pub fn parse(code: &str, operation: &'static str) -> Result<Self> {
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => Ok(Self::new(a, b)),
            _ => Err(Error::invalid(
                operation,
                format!(
                    "expected a two-character name pair, got '{}' ({} characters)",
                    code,
                    code.chars().count()
                ),
            )),
        }
    }

    /// The same pair read the other way round
    pub fn reversed(&self) -> Self {
        Self::new(self.second.clone(), self.first.clone())
    }

    /// Concatenated form, `"AB"` for `(A, B)`
    pub fn code(&self) -> String {
        format!("{}{}", self.first, self.second)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

impl fmt::Display for NamePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Anything that can name a pair of points
pub trait IntoNamePair {
    fn into_name_pair(self, operation: &'static str) -> Result<NamePair>;
}

impl IntoNamePair for NamePair {
    fn into_name_pair(self, _operation: &'static str) -> Result<NamePair> {
        Ok(self)
    }
}

impl IntoNamePair for &NamePair {
    fn into_name_pair(self, _operation: &'static str) -> Result<NamePair> {
        Ok(self.clone())
    }
}

impl IntoNamePair for &str {
    fn into_name_pair(self, operation: &'static str) -> Result<NamePair> {
        NamePair::parse(self, operation)
    }
}

impl IntoNamePair for &String {
    fn into_name_pair(self, operation: &'static str) -> Result<NamePair> {
        NamePair::parse(self, operation)
    }
}

impl IntoNamePair for String {
    fn into_name_pair(self, operation: &'static str) -> Result<NamePair> {
        NamePair::parse(&self, operation)
    }
}

impl IntoNamePair for (&str, &str) {
    fn into_name_pair(self, _operation: &'static str) -> Result<NamePair> {
        Ok(NamePair::new(self.0, self.1))
    }
}

impl IntoNamePair for [&str; 2] {
    fn into_name_pair(self, _operation: &'static str) -> Result<NamePair> {
        Ok(NamePair::new(self[0], self[1]))
    }
}

/// Anything that can name an ordered list of points.
///
/// A string is read one character per name; collections name one point per
/// element.
pub trait IntoNameList {
    fn into_name_list(self) -> Vec<String>;
}

impl IntoNameList for &str {
    fn into_name_list(self) -> Vec<String> {
        self.chars().map(String::from).collect()
    }
}

impl IntoNameList for String {
    fn into_name_list(self) -> Vec<String> {
        self.as_str().into_name_list()
    }
}

impl IntoNameList for Vec<String> {
    fn into_name_list(self) -> Vec<String> {
        self
    }
}

impl IntoNameList for Vec<&str> {
    fn into_name_list(self) -> Vec<String> {
        self.into_iter().map(String::from).collect()
    }
}

impl IntoNameList for &[&str] {
    fn into_name_list(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl<const N: usize> IntoNameList for [&str; N] {
    fn into_name_list(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

/// Collect exactly `N` names or fail with `InvalidOperand`
pub(crate) fn exact_names<const N: usize>(
    names: impl IntoNameList,
    operation: &'static str,
) -> Result<[String; N]> {
    let names = names.into_name_list();
    let count = names.len();
    names.try_into().map_err(|_| {
        Error::invalid(
            operation,
            format!("expected {} point names, got {}", N, count),
        )
    })
}
