use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The three collections of the blog database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Authors,
    Posts,
    Comments,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Authors, Self::Posts, Self::Comments];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authors => "authors",
            Self::Posts => "posts",
            Self::Comments => "comments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCollection { name: s.into() })
    }
}
