use std::str::FromStr;

use img_src_lister_utils::regex;
use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// One comma-separated entry of a `srcset` attribute.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Candidate {
    pub raw: String,
    pub url: String,
    pub descriptor: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Descriptor {
    Width(u32),
    Density(u32),
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum SrcsetError {
    #[error("Descriptor must be `<integer>w` or `<integer>x`: {0:?}")]
    InvalidDescriptor(String),
    #[error("Descriptor value out of range: {0:?}")]
    OutOfRange(String),
}

impl FromStr for Descriptor {
    type Err = SrcsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = regex!(r"^(\d+)([wx])$")
            .captures(s)
            .ok_or_else(|| SrcsetError::InvalidDescriptor(s.to_owned()))?;
        let value = captures[1]
            .parse()
            .map_err(|_| SrcsetError::OutOfRange(s.to_owned()))?;
        Ok(match &captures[2] {
            "w" => Descriptor::Width(value),
            _ => Descriptor::Density(value),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    MissingOrInvalidDescriptor,
    ContainsSpace,
    ContainsComma,
}

/// Splits `srcset` on commas.
///
/// The text after the last space of an entry is its descriptor.
/// A URL containing an unencoded comma ends up split in two,
/// and the front half is usually flagged by [`Candidate::issues`].
pub fn parse(srcset: &str) -> Vec<Candidate> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.rsplit_once(' ') {
            Some((url, descriptor)) => Candidate {
                raw: part.to_owned(),
                url: url.trim().to_owned(),
                descriptor: Some(descriptor.trim().to_owned()),
            },
            None => Candidate {
                raw: part.to_owned(),
                url: part.to_owned(),
                descriptor: None,
            },
        })
        .collect()
}

impl Candidate {
    pub fn parsed_descriptor(&self) -> Option<Result<Descriptor, SrcsetError>> {
        self.descriptor.as_deref().map(str::parse)
    }

    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = vec![];
        let descriptor_ok = self
            .descriptor
            .as_deref()
            .is_some_and(|d| regex!(r"^(\d+w|\d+x)$").is_match(d));
        if !descriptor_ok {
            issues.push(Issue::MissingOrInvalidDescriptor);
        }
        if self.url.contains(' ') {
            issues.push(Issue::ContainsSpace);
        }
        if self.url.contains(',') {
            issues.push(Issue::ContainsComma);
        }
        issues
    }
}

pub fn src_is_malformed(src: &str) -> bool {
    src.contains(' ') || src.contains(',')
}
