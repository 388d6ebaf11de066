use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReleaseVersion {
    components: Vec<u32>,
    pre: Option<String>,
    raw: String,
}

impl ReleaseVersion {
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    pub fn major(&self) -> u32 {
        self.components.first().copied().unwrap_or(0)
    }

    pub fn minor(&self) -> u32 {
        self.components.get(1).copied().unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre.is_some()
    }
}

impl FromStr for ReleaseVersion {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let raw = input.trim().to_ascii_lowercase();
        if raw.is_empty() {
            return Err(anyhow!("version must not be empty"));
        }

        let split_at = raw
            .find(|ch: char| ch.is_ascii_alphabetic())
            .unwrap_or(raw.len());
        let (numeric, suffix) = raw.split_at(split_at);
        let numeric = numeric.strip_suffix(['.', '-']).unwrap_or(numeric);
        if numeric.is_empty() {
            return Err(anyhow!("version must start with a number: '{input}'"));
        }

        let mut components = Vec::new();
        for part in numeric.split('.') {
            let value = part
                .parse::<u32>()
                .map_err(|_| anyhow!("invalid version component '{part}' in '{input}'"))?;
            components.push(value);
        }

        let suffix = suffix.trim_start_matches(['.', '-']);
        let pre = if suffix.is_empty() {
            None
        } else {
            if !suffix.chars().all(|ch| ch.is_ascii_alphanumeric()) {
                return Err(anyhow!("invalid pre-release tag '{suffix}' in '{input}'"));
            }
            Some(suffix.to_string())
        };

        Ok(Self {
            components,
            pre,
            raw,
        })
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.components.len().max(other.components.len());
        for index in 0..width {
            let left = self.components.get(index).copied().unwrap_or(0);
            let right = other.components.get(index).copied().unwrap_or(0);
            match left.cmp(&right) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }

        // a final release sorts after its own pre-releases
        match (&self.pre, &other.pre) {
            (None, None) => {}
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(left), Some(right)) => {
                match pre_release_key(left).cmp(&pre_release_key(right)) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                }
            }
        }

        self.raw.cmp(&other.raw)
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ReleaseVersion> for String {
    fn from(value: ReleaseVersion) -> Self {
        value.raw
    }
}

fn pre_release_key(tag: &str) -> (&str, u32) {
    let split_at = tag
        .find(|ch: char| ch.is_ascii_digit())
        .unwrap_or(tag.len());
    let (stage, number) = tag.split_at(split_at);
    (stage, number.parse().unwrap_or(0))
}
