pub mod records;
pub mod roster;

pub use records::{new_id, Assignment, Gift, Pairing, Participant};
pub use roster::{default_gifts, Exchange, RosterError};
