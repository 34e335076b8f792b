pub mod assignment;
pub mod config;
pub mod exchange;
pub mod utils;

pub use assignment::{
	generate_assignments,
	AssignmentBuilder,
	AssignmentError,
	Derangement,
	DerangementSource,
	Deranger,
};
pub use config::{ConfigError, SantaConfig};
pub use exchange::{Assignment, Exchange, Gift, Pairing, Participant, RosterError};
pub use utils::storage::StorageError;
