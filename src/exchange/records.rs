use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ID_LEN: usize = 13;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gift {
    pub id: String,
    pub description: String,
}

impl Gift {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Gift {
            id: id.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub santa_id: String,
    pub recipient_id: String,
    pub gift_id: String,
}

/// An assignment with ids resolved to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub santa: String,
    pub recipient: String,
    pub gift: String,
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} (gift: {})", self.santa, self.recipient, self.gift)
    }
}

/// Random base-36 identifier.
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
