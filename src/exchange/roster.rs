use crate::assignment::{AssignmentBuilder, AssignmentError};
use crate::exchange::records::{new_id, Assignment, Gift, Pairing, Participant};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const UNKNOWN_PARTICIPANT: &str = "Unknown";
pub const UNKNOWN_GIFT: &str = "Unknown gift";

const DEFAULT_GIFTS: [(&str, &str); 8] = [
    ("1", "Holographic AI Assistant"),
    ("2", "Neural Interface Headset"),
    ("3", "Quantum Computing Watch"),
    ("4", "Teleportation Keychain"),
    ("5", "Anti-Gravity Hover Shoes"),
    ("6", "Time Dilation Clock"),
    ("7", "Universal Translator Earbuds"),
    ("8", "Molecular Food Synthesizer"),
];

pub fn default_gifts() -> Vec<Gift> {
    DEFAULT_GIFTS
        .iter()
        .map(|&(id, description)| Gift::new(id, description))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("name already exists: {0}")]
    DuplicateName(String),
    #[error("gift already exists: {0}")]
    DuplicateGift(String),
    #[error("no participant with id {0}")]
    UnknownParticipant(String),
    #[error("no gift with id {0}")]
    UnknownGift(String),
}

/// Participants, gift ideas and the current drawing.
///
/// The assignment set is derived data: it is replaced as a whole by
/// [`Exchange::generate`] and discarded whenever a participant is added or
/// removed. Renames keep it, since assignments refer to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    #[serde(default)]
    participants: Vec<Participant>,
    #[serde(default = "default_gifts")]
    gifts: Vec<Gift>,
    #[serde(default)]
    assignments: Vec<Assignment>,
}

impl Default for Exchange {
    fn default() -> Self {
        Exchange {
            participants: Vec::new(),
            gifts: default_gifts(),
            assignments: Vec::new(),
        }
    }
}

impl Exchange {
    pub fn new(participants: Vec<Participant>, gifts: Vec<Gift>) -> Self {
        Exchange {
            participants,
            gifts,
            assignments: Vec::new(),
        }
    }

    /// Reassembles stored state without checking that assignments still
    /// match the participant list.
    pub fn from_parts(
        participants: Vec<Participant>,
        gifts: Vec<Gift>,
        assignments: Vec<Assignment>,
    ) -> Self {
        Exchange {
            participants,
            gifts,
            assignments,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn add_participant<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        rng: &mut R,
    ) -> Result<&Participant, RosterError> {
        let name = trimmed(name).ok_or(RosterError::EmptyName)?;
        if self.participants.iter().any(|p| same_text(&p.name, name)) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }

        let id = self.fresh_id(rng);
        info!(%id, participant = name, "added participant");
        self.participants.push(Participant::new(id, name));
        self.discard_assignments();
        Ok(&self.participants[self.participants.len() - 1])
    }

    pub fn rename_participant(&mut self, id: &str, name: &str) -> Result<(), RosterError> {
        let name = trimmed(name).ok_or(RosterError::EmptyName)?;
        if self
            .participants
            .iter()
            .any(|p| p.id != id && same_text(&p.name, name))
        {
            return Err(RosterError::DuplicateName(name.to_string()));
        }

        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RosterError::UnknownParticipant(id.to_string()))?;
        participant.name = name.to_string();
        info!(id, participant = name, "renamed participant");
        Ok(())
    }

    /// Removes the participant and discards the current drawing, which may
    /// reference them.
    pub fn remove_participant(&mut self, id: &str) -> Result<Participant, RosterError> {
        let position = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RosterError::UnknownParticipant(id.to_string()))?;
        let removed = self.participants.remove(position);
        self.discard_assignments();
        Ok(removed)
    }

    pub fn add_gift<R: Rng + ?Sized>(
        &mut self,
        description: &str,
        rng: &mut R,
    ) -> Result<&Gift, RosterError> {
        let description = trimmed(description).ok_or(RosterError::EmptyDescription)?;
        if self
            .gifts
            .iter()
            .any(|g| same_text(&g.description, description))
        {
            return Err(RosterError::DuplicateGift(description.to_string()));
        }

        let id = self.fresh_id(rng);
        info!(%id, description, "added gift");
        self.gifts.push(Gift::new(id, description));
        Ok(&self.gifts[self.gifts.len() - 1])
    }

    pub fn edit_gift(&mut self, id: &str, description: &str) -> Result<(), RosterError> {
        let description = trimmed(description).ok_or(RosterError::EmptyDescription)?;
        if self
            .gifts
            .iter()
            .any(|g| g.id != id && same_text(&g.description, description))
        {
            return Err(RosterError::DuplicateGift(description.to_string()));
        }

        let gift = self
            .gifts
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| RosterError::UnknownGift(id.to_string()))?;
        gift.description = description.to_string();
        info!(id, description, "edited gift");
        Ok(())
    }

    /// Assignments that suggested this gift keep the dangling id.
    pub fn remove_gift(&mut self, id: &str) -> Result<Gift, RosterError> {
        let position = self
            .gifts
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| RosterError::UnknownGift(id.to_string()))?;
        Ok(self.gifts.remove(position))
    }

    pub fn can_generate(&self) -> bool {
        crate::assignment::builder::check_preconditions(&self.participants, &self.gifts).is_ok()
    }

    /// Replaces the drawing. On error the previous drawing is kept.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        builder: &AssignmentBuilder,
        rng: &mut R,
    ) -> Result<&[Assignment], AssignmentError> {
        let assignments = builder.generate(&self.participants, &self.gifts, rng)?;
        self.assignments = assignments;
        Ok(&self.assignments)
    }

    pub fn participant_name(&self, id: &str) -> &str {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map_or(UNKNOWN_PARTICIPANT, |p| p.name.as_str())
    }

    pub fn gift_description(&self, id: &str) -> &str {
        self.gifts
            .iter()
            .find(|g| g.id == id)
            .map_or(UNKNOWN_GIFT, |g| g.description.as_str())
    }

    pub fn pairings(&self) -> Vec<Pairing> {
        self.assignments
            .iter()
            .map(|assignment| Pairing {
                santa: self.participant_name(&assignment.santa_id).to_string(),
                recipient: self.participant_name(&assignment.recipient_id).to_string(),
                gift: self.gift_description(&assignment.gift_id).to_string(),
            })
            .collect()
    }

    /// Drops participants and assignments and restores the default gifts.
    pub fn clear(&mut self) {
        debug!("clearing exchange");
        *self = Exchange::default();
    }

    fn discard_assignments(&mut self) {
        if !self.assignments.is_empty() {
            info!(
                discarded = self.assignments.len(),
                "participants changed, discarding assignments"
            );
            self.assignments.clear();
        }
    }

    fn fresh_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        loop {
            let id = new_id(rng);
            let taken = self.participants.iter().any(|p| p.id == id)
                || self.gifts.iter().any(|g| g.id == id);
            if !taken {
                return id;
            }
        }
    }
}

fn trimmed(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
