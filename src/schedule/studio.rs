use std::ops::Range;

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    model::{Appointment, Slot},
    range::TimeRange,
};

/// Chairs in the studio when treated as one interchangeable pool.
pub const STUDIO_CHAIRS: u32 = 4;

/// Hours shown by the whole-studio view, 10:00 to 21:00.
pub const STUDIO_OPEN_HOURS: Range<u32> = 10..22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    High,
    Low,
    None,
}

pub fn classify(available: u32) -> Availability {
    match available {
        0 => Availability::None,
        1 => Availability::Low,
        _ => Availability::High,
    }
}

fn overlapping(slot: &TimeRange, appointments: &[Appointment]) -> u32 {
    appointments
        .iter()
        .filter(|a| a.range().overlaps(slot))
        .count() as u32
}

/// Free chairs at `hour`, clamped to `[0, capacity]`. More overlapping
/// appointments than chairs means inconsistent data; it reads as zero.
pub fn available_count(
    day: NaiveDate,
    hour: u32,
    appointments: &[Appointment],
    capacity: u32,
) -> u32 {
    match TimeRange::hour_slot(day, hour) {
        Ok(slot) => capacity.saturating_sub(overlapping(&slot, appointments)),
        Err(_) => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudioSlot {
    #[serde(flatten)]
    pub slot: Slot,
    pub available: u32,
    pub availability: Availability,
}

pub fn studio_slots(
    day: NaiveDate,
    hours: Range<u32>,
    appointments: &[Appointment],
    capacity: u32,
) -> Vec<StudioSlot> {
    hours
        .filter_map(|hour| {
            let slot = TimeRange::hour_slot(day, hour).ok()?;
            let slot = Slot {
                hour,
                occupant_count: overlapping(&slot, appointments),
                capacity,
            };
            let available = slot.available();
            Some(StudioSlot {
                slot,
                available,
                availability: classify(available),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::range::at;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn booking(id: &str, chair_id: i32, h1: u32, m1: u32, h2: u32, m2: u32) -> Appointment {
        let range = TimeRange::new(at(day(), h1, m1), at(day(), h2, m2)).unwrap();
        Appointment::new(id, chair_id, "artist", range, "Client").unwrap()
    }

    #[test]
    fn three_busy_chairs_leave_one() {
        let appos = vec![
            booking("a", 1, 13, 30, 14, 30),
            booking("b", 2, 14, 0, 15, 0),
            booking("c", 3, 14, 45, 16, 0),
            booking("d", 4, 15, 0, 16, 0),
        ];
        let available = available_count(day(), 14, &appos, STUDIO_CHAIRS);
        assert_eq!(available, 1);
        assert_eq!(classify(available), Availability::Low);
        assert_eq!(available_count(day(), 15, &appos, STUDIO_CHAIRS), 1);
        assert_eq!(available_count(day(), 12, &appos, STUDIO_CHAIRS), 4);
    }

    #[test]
    fn count_is_clamped() {
        let appos: Vec<_> = (0..6)
            .map(|i| booking(&i.to_string(), i, 10, 0, 11, 0))
            .collect();
        assert_eq!(available_count(day(), 10, &appos, STUDIO_CHAIRS), 0);
        assert_eq!(available_count(day(), 40, &appos, STUDIO_CHAIRS), 0);
        for hour in 0..24 {
            assert!(available_count(day(), hour, &appos, STUDIO_CHAIRS) <= STUDIO_CHAIRS);
        }
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify(4), Availability::High);
        assert_eq!(classify(2), Availability::High);
        assert_eq!(classify(1), Availability::Low);
        assert_eq!(classify(0), Availability::None);
        assert_eq!(serde_json::to_string(&Availability::None).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Availability::High).unwrap(), "\"high\"");
    }

    #[test]
    fn open_hours_view() {
        let appos = vec![booking("a", 1, 10, 0, 12, 0)];
        let slots = studio_slots(day(), STUDIO_OPEN_HOURS, &appos, STUDIO_CHAIRS);
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[0].slot.hour, 10);
        assert_eq!(slots[0].available, 3);
        assert_eq!(slots[2].available, 4);
        assert_eq!(slots[11].slot.hour, 21);
    }
}
