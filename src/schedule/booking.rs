use super::{
    availability::within_working_hours,
    error::ScheduleError,
    model::{Appointment, Chair},
    range::{overlaps, TimeRange},
};

/// A booking request for a chair. `replacing` names the appointment being
/// edited so it does not conflict with its own prior record.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub chair_id: i32,
    pub range: TimeRange,
    pub replacing: Option<String>,
}

impl Proposal {
    pub fn new(chair_id: i32, range: TimeRange) -> Self {
        Self {
            chair_id,
            range,
            replacing: None,
        }
    }

    pub fn replacing(mut self, appointment_id: impl Into<String>) -> Self {
        self.replacing = Some(appointment_id.into());
        self
    }

    fn is_replaced(&self, appointment: &Appointment) -> bool {
        self.replacing.as_deref() == Some(appointment.id.as_str())
    }
}

pub fn can_book(proposal: &Proposal, existing: &[Appointment]) -> Result<(), ScheduleError> {
    let conflict = existing
        .iter()
        .filter(|a| a.chair_id == proposal.chair_id)
        .filter(|a| !proposal.is_replaced(a))
        .find(|a| overlaps(a.range(), &proposal.range));

    match conflict {
        Some(a) => Err(ScheduleError::ChairConflict {
            chair_id: proposal.chair_id,
            appointment_id: a.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Working hours first, then conflicts.
pub fn validate_booking(
    chair: &Chair,
    proposal: &Proposal,
    existing: &[Appointment],
) -> Result<(), ScheduleError> {
    if chair.id != proposal.chair_id {
        return Err(ScheduleError::ChairMismatch {
            chair_id: chair.id,
            requested: proposal.chair_id,
        });
    }
    if !within_working_hours(chair, &proposal.range) {
        return Err(ScheduleError::OutOfWorkingHours {
            chair_id: proposal.chair_id,
        });
    }
    can_book(proposal, existing)
}

/// Bookings of the same artist overlapping `range` on any chair. Advisory.
pub fn artist_overlaps<'a>(
    artist_id: &str,
    range: &TimeRange,
    existing: &'a [Appointment],
    replacing: Option<&str>,
) -> Vec<&'a Appointment> {
    existing
        .iter()
        .filter(|a| a.artist_id == artist_id)
        .filter(|a| replacing != Some(a.id.as_str()))
        .filter(|a| a.range().overlaps(range))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::range::at;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeRange {
        TimeRange::new(at(day(), h1, m1), at(day(), h2, m2)).unwrap()
    }

    fn booking(id: &str, chair_id: i32, artist: &str, r: TimeRange) -> Appointment {
        Appointment::new(id, chair_id, artist, r, "Client").unwrap()
    }

    #[test]
    fn identical_range_conflicts_only_on_the_same_chair() {
        let existing = vec![booking("x", 1, "ana", range(12, 0, 13, 0))];
        assert_eq!(
            can_book(&Proposal::new(1, range(12, 0, 13, 0)), &existing),
            Err(ScheduleError::ChairConflict {
                chair_id: 1,
                appointment_id: "x".to_string()
            })
        );
        assert_eq!(can_book(&Proposal::new(2, range(12, 0, 13, 0)), &existing), Ok(()));
    }

    #[test]
    fn editing_does_not_conflict_with_itself() {
        let existing = vec![
            booking("x", 1, "ana", range(12, 0, 13, 0)),
            booking("y", 1, "ana", range(14, 0, 15, 0)),
        ];
        let unchanged = Proposal::new(1, range(12, 0, 13, 0)).replacing("x");
        assert_eq!(can_book(&unchanged, &existing), Ok(()));

        let moved = Proposal::new(1, range(13, 30, 14, 30)).replacing("x");
        assert!(matches!(
            can_book(&moved, &existing),
            Err(ScheduleError::ChairConflict { ref appointment_id, .. }) if appointment_id == "y"
        ));
    }

    #[test]
    fn chair_one_scenario() {
        let chair = Chair::new(1, "Chair 1", 10, 18).unwrap();
        let existing = vec![booking("x", 1, "ana", range(10, 0, 11, 0))];

        assert!(matches!(
            validate_booking(&chair, &Proposal::new(1, range(10, 30, 11, 30)), &existing),
            Err(ScheduleError::ChairConflict { .. })
        ));
        assert_eq!(
            validate_booking(&chair, &Proposal::new(1, range(11, 0, 12, 0)), &existing),
            Ok(())
        );
        assert_eq!(
            validate_booking(&chair, &Proposal::new(1, range(9, 0, 10, 0)), &existing),
            Err(ScheduleError::OutOfWorkingHours { chair_id: 1 })
        );
    }

    #[test]
    fn proposal_for_another_chair_is_rejected() {
        let chair = Chair::new(1, "Chair 1", 10, 18).unwrap();
        let err = validate_booking(&chair, &Proposal::new(2, range(11, 0, 12, 0)), &[]).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::ChairMismatch {
                chair_id: 1,
                requested: 2
            }
        );
        assert_eq!(err.kind(), "other");
    }

    #[test]
    fn artist_overlaps_span_chairs() {
        let existing = vec![
            booking("x", 1, "ana", range(12, 0, 13, 0)),
            booking("y", 2, "ben", range(12, 0, 13, 0)),
            booking("z", 3, "ana", range(13, 0, 14, 0)),
        ];
        let hits = artist_overlaps("ana", &range(12, 30, 13, 30), &existing, None);
        let ids: Vec<_> = hits.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "z"]);
        assert_eq!(
            artist_overlaps("ana", &range(12, 30, 13, 30), &existing, Some("x")).len(),
            1
        );
    }
}
