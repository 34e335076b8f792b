pub mod builder;
pub mod derangement;
pub mod error;

pub use builder::{generate_assignments, AssignmentBuilder};
pub use derangement::{Derangement, DerangementSource, Deranger, DEFAULT_MAX_ATTEMPTS};
pub use error::AssignmentError;
