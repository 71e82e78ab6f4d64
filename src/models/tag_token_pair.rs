use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTokenPair {
    pub tag: String,
    pub token: String,
}

impl TagTokenPair {
    pub fn new(tag: &str, token: &str) -> Self {
        Self {
            tag: tag.to_string(),
            token: token.to_string(),
        }
    }

    /// Wire form used by the batch tag endpoints: `[tag, token]`.
    pub fn as_pair(&self) -> [&str; 2] {
        [&self.tag, &self.token]
    }
}
