use crate::assignment::derangement::Deranger;
use crate::assignment::error::AssignmentError;
use crate::exchange::records::{Assignment, Gift, Participant};
use rand::Rng;
use tracing::debug;

pub const MIN_PARTICIPANTS: usize = 2;
pub const MIN_GIFTS: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentBuilder {
    deranger: Deranger,
}

impl AssignmentBuilder {
    pub fn new(deranger: Deranger) -> Self {
        AssignmentBuilder { deranger }
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        AssignmentBuilder::new(Deranger::new(max_attempts))
    }

    pub fn deranger(&self) -> &Deranger {
        &self.deranger
    }

    /// Pairs every participant with a recipient other than themselves and a
    /// gift suggestion.
    ///
    /// Output order follows `participants`. Gifts are drawn uniformly with
    /// replacement, so the same gift may be suggested more than once.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        gifts: &[Gift],
        rng: &mut R,
    ) -> Result<Vec<Assignment>, AssignmentError> {
        check_preconditions(participants, gifts)?;

        let derangement = self.deranger.derange_indices(participants.len(), rng);
        let assignments: Vec<Assignment> = participants
            .iter()
            .zip(derangement.indices())
            .map(|(santa, &recipient)| Assignment {
                santa_id: santa.id.clone(),
                recipient_id: participants[recipient].id.clone(),
                gift_id: gifts[pick_index(gifts.len(), rng)].id.clone(),
            })
            .collect();

        debug!(
            participants = participants.len(),
            gifts = gifts.len(),
            fallback = derangement.is_fallback(),
            "generated assignments"
        );
        Ok(assignments)
    }
}

/// Uniform index into `0..len` from one `[0, 1)` float draw.
fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    let index = (rng.random::<f64>() * len as f64) as usize;
    index.min(len - 1)
}

/// Participant count is checked first so a caller with neither enough
/// participants nor any gifts always sees the same error.
pub fn check_preconditions(
    participants: &[Participant],
    gifts: &[Gift],
) -> Result<(), AssignmentError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(AssignmentError::InsufficientParticipants {
            found: participants.len(),
        });
    }
    if gifts.len() < MIN_GIFTS {
        return Err(AssignmentError::InsufficientGifts);
    }
    Ok(())
}

pub fn generate_assignments<R: Rng + ?Sized>(
    participants: &[Participant],
    gifts: &[Gift],
    rng: &mut R,
) -> Result<Vec<Assignment>, AssignmentError> {
    AssignmentBuilder::default().generate(participants, gifts, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Replays a fixed list of 64-bit outputs.
    struct ScriptedRng {
        values: Vec<u64>,
        cursor: usize,
    }

    impl ScriptedRng {
        fn new(values: Vec<u64>) -> Self {
            ScriptedRng { values, cursor: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    fn trio() -> Vec<Participant> {
        vec![
            Participant::new("1", "A"),
            Participant::new("2", "B"),
            Participant::new("3", "C"),
        ]
    }

    #[test]
    fn single_gift_is_suggested_to_everyone() {
        let mut rng = StdRng::seed_from_u64(6);
        let gifts = vec![Gift::new("g1", "X")];
        let assignments = generate_assignments(&trio(), &gifts, &mut rng).unwrap();

        assert_eq!(assignments.len(), 3);
        let mut recipients: Vec<_> = assignments.iter().map(|a| a.recipient_id.as_str()).collect();
        recipients.sort_unstable();
        assert_eq!(recipients, vec!["1", "2", "3"]);
        for assignment in &assignments {
            assert_eq!(assignment.gift_id, "g1");
            assert_ne!(assignment.santa_id, assignment.recipient_id);
        }
    }

    #[test]
    fn santas_follow_input_order() {
        let mut rng = StdRng::seed_from_u64(8);
        let gifts = vec![Gift::new("g1", "X"), Gift::new("g2", "Y")];
        let assignments = generate_assignments(&trio(), &gifts, &mut rng).unwrap();
        let santas: Vec<_> = assignments.iter().map(|a| a.santa_id.as_str()).collect();
        assert_eq!(santas, vec!["1", "2", "3"]);
    }

    #[test]
    fn participant_shortage_wins_over_gift_shortage() {
        let mut rng = StdRng::seed_from_u64(0);
        let one = vec![Participant::new("1", "A")];
        assert_eq!(
            generate_assignments(&one, &[], &mut rng),
            Err(AssignmentError::InsufficientParticipants { found: 1 })
        );
        assert_eq!(
            generate_assignments(&[], &[], &mut rng),
            Err(AssignmentError::InsufficientParticipants { found: 0 })
        );
    }

    #[test]
    fn missing_gifts_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_assignments(&trio(), &[], &mut rng),
            Err(AssignmentError::InsufficientGifts)
        );
    }

    #[test]
    fn rotation_fallback_still_produces_valid_assignments() {
        let mut rng = StdRng::seed_from_u64(21);
        let gifts = vec![Gift::new("g1", "X")];
        let assignments = AssignmentBuilder::with_max_attempts(0)
            .generate(&trio(), &gifts, &mut rng)
            .unwrap();
        let pairs: Vec<_> = assignments
            .iter()
            .map(|a| (a.santa_id.as_str(), a.recipient_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "2"), ("2", "3"), ("3", "1")]);
    }

    #[test]
    fn pick_index_covers_both_ends_of_the_range() {
        let mut low = ScriptedRng::new(vec![0]);
        assert_eq!(pick_index(8, &mut low), 0);
        let mut high = ScriptedRng::new(vec![u64::MAX]);
        assert_eq!(pick_index(8, &mut high), 7);
        let mut middle = ScriptedRng::new(vec![u64::MAX / 2]);
        assert_eq!(pick_index(3, &mut middle), 1);
    }

    #[test]
    fn scripted_source_gives_exact_assignments() {
        let gifts = vec![
            Gift::new("g1", "X"),
            Gift::new("g2", "Y"),
            Gift::new("g3", "Z"),
        ];
        let mut rng = ScriptedRng::new(vec![u64::MAX, 0, u64::MAX / 2]);
        let assignments = AssignmentBuilder::with_max_attempts(0)
            .generate(&trio(), &gifts, &mut rng)
            .unwrap();
        let triples: Vec<_> = assignments
            .iter()
            .map(|a| (a.santa_id.as_str(), a.recipient_id.as_str(), a.gift_id.as_str()))
            .collect();
        assert_eq!(
            triples,
            vec![("1", "2", "g3"), ("2", "3", "g1"), ("3", "1", "g2")]
        );
    }
}
