use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::rules::normalize_breed;

const DEFAULT_BLOCKED_BREEDS: &[&str] = &[
    "rottweiler",
    "rottie",
    "mastiff",
    "english mastiff",
    "bull mastiff",
    "neapolitan mastiff",
    "tibetan mastiff",
    "cane corso",
    "presa canario",
    "dogo argentino",
    "fila brasileiro",
    "tosa inu",
    "wolf hybrid",
    "wolfdog",
];

const DEFAULT_MEET_GREET_BREEDS: &[&str] = &[
    "pit bull",
    "pitbull",
    "pit mix",
    "american pit bull terrier",
    "doberman",
    "doberman pinscher",
    "german shepherd",
    "akita",
    "chow chow",
];

const DEFAULT_LARGE_DOG_WEIGHT_LBS: f64 = 41.0;

/// Breed keyword lists and the large-dog threshold that define boarding policy.
///
/// Keywords are matched as substrings of the normalized breed, so they are
/// stored lower-cased and trimmed. Deserializing goes through `new`, so a
/// decoded table holds the same invariant as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRuleTables")]
pub struct RuleTables {
    blocked_breed_keywords: Vec<String>,
    meet_greet_breed_keywords: Vec<String>,
    large_dog_weight_threshold_lbs: f64,
}

impl RuleTables {
    pub fn new<B, M>(
        blocked: B,
        meet_greet: M,
        large_dog_weight_threshold_lbs: f64,
    ) -> Result<Self, RuleTableError>
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        let tables = Self {
            blocked_breed_keywords: blocked
                .into_iter()
                .map(|keyword| normalize_breed(keyword.as_ref()))
                .collect(),
            meet_greet_breed_keywords: meet_greet
                .into_iter()
                .map(|keyword| normalize_breed(keyword.as_ref()))
                .collect(),
            large_dog_weight_threshold_lbs,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Read a JSON rule file shaped like the serialized form of this type.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RuleTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            RuleTableError::Parse { source, .. } => RuleTableError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, RuleTableError> {
        let parsed: RawRuleTables =
            serde_json::from_str(raw).map_err(|source| RuleTableError::Parse {
                path: None,
                source,
            })?;
        Self::try_from(parsed)
    }

    pub fn validate(&self) -> Result<(), RuleTableError> {
        if self.blocked_breed_keywords.iter().any(String::is_empty) {
            return Err(RuleTableError::EmptyKeyword {
                table: RuleTableKind::Blocked,
            });
        }
        if self.meet_greet_breed_keywords.iter().any(String::is_empty) {
            return Err(RuleTableError::EmptyKeyword {
                table: RuleTableKind::MeetGreet,
            });
        }
        let threshold = self.large_dog_weight_threshold_lbs;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(RuleTableError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    pub fn blocked_breed_keywords(&self) -> &[String] {
        &self.blocked_breed_keywords
    }

    pub fn meet_greet_breed_keywords(&self) -> &[String] {
        &self.meet_greet_breed_keywords
    }

    pub fn large_dog_weight_threshold_lbs(&self) -> f64 {
        self.large_dog_weight_threshold_lbs
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            blocked_breed_keywords: DEFAULT_BLOCKED_BREEDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            meet_greet_breed_keywords: DEFAULT_MEET_GREET_BREEDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            large_dog_weight_threshold_lbs: DEFAULT_LARGE_DOG_WEIGHT_LBS,
        }
    }
}

/// Wire shape of a rule file before keywords are normalized and checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRuleTables {
    blocked_breed_keywords: Vec<String>,
    meet_greet_breed_keywords: Vec<String>,
    large_dog_weight_threshold_lbs: f64,
}

impl TryFrom<RawRuleTables> for RuleTables {
    type Error = RuleTableError;

    fn try_from(raw: RawRuleTables) -> Result<Self, Self::Error> {
        Self::new(
            raw.blocked_breed_keywords,
            raw.meet_greet_breed_keywords,
            raw.large_dog_weight_threshold_lbs,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTableKind {
    Blocked,
    MeetGreet,
}

/// Raised when a rule table source cannot become a usable policy.
#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("unable to read rule tables from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule tables are not valid JSON ({path:?}): {source}")]
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    #[error("{table:?} breed table contains an empty keyword, which would match every breed")]
    EmptyKeyword { table: RuleTableKind },
    #[error("large dog weight threshold must be a positive number of pounds, found {0}")]
    InvalidThreshold(f64),
}
