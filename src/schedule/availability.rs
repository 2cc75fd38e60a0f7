use chrono::NaiveDate;

use super::{
    model::{Appointment, Chair, Slot},
    range::TimeRange,
};

pub const HOURS_PER_DAY: u32 = 24;

pub fn is_working_hour(chair: &Chair, hour: u32) -> bool {
    hour >= chair.work_start_hour() && hour < chair.work_end_hour()
}

/// Whether `range` fits inside `[day@work_start, day@work_end]` of its own day.
pub fn within_working_hours(chair: &Chair, range: &TimeRange) -> bool {
    let day = range.day();
    let window = match (
        day.and_hms_opt(chair.work_start_hour(), 0, 0),
        day.and_hms_opt(chair.work_end_hour(), 0, 0),
    ) {
        (Some(start), Some(end)) => TimeRange::new(start, end),
        _ => return false,
    };
    window.map_or(false, |window| window.contains(range))
}

fn chair_bookings<'a>(
    chair: &'a Chair,
    appointments: &'a [Appointment],
) -> impl Iterator<Item = &'a Appointment> + 'a {
    appointments.iter().filter(move |a| a.chair_id == chair.id)
}

/// A chair holds one appointment at a time, so any overlap occupies the hour.
pub fn is_hour_free(day: NaiveDate, chair: &Chair, hour: u32, appointments: &[Appointment]) -> bool {
    if !is_working_hour(chair, hour) {
        return false;
    }
    let slot = match TimeRange::hour_slot(day, hour) {
        Ok(slot) => slot,
        Err(_) => return false,
    };
    !chair_bookings(chair, appointments).any(|a| a.range().overlaps(&slot))
}

pub fn chair_slots(day: NaiveDate, chair: &Chair, appointments: &[Appointment]) -> Vec<Slot> {
    (0..HOURS_PER_DAY)
        .filter_map(|hour| {
            let slot = TimeRange::hour_slot(day, hour).ok()?;
            let occupant_count = chair_bookings(chair, appointments)
                .filter(|a| a.range().overlaps(&slot))
                .count() as u32;
            Some(Slot {
                hour,
                occupant_count,
                capacity: if is_working_hour(chair, hour) { 1 } else { 0 },
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
    fn hours_outside_the_window_are_never_free() {
        let chair = Chair::new(1, "Chair 1", 10, 18).unwrap();
        for hour in (0..10).chain(18..30) {
            assert!(!is_hour_free(day(), &chair, hour, &[]), "hour {}", hour);
        }
        for hour in 10..18 {
            assert!(is_hour_free(day(), &chair, hour, &[]));
        }
    }

    #[test]
    fn partial_overlap_occupies_the_hour() {
        let chair = Chair::new(1, "Chair 1", 10, 18).unwrap();
        let appos = vec![booking("a", 1, 12, 30, 13, 15), booking("b", 2, 15, 0, 16, 0)];
        assert!(is_hour_free(day(), &chair, 11, &appos));
        assert!(!is_hour_free(day(), &chair, 12, &appos));
        assert!(!is_hour_free(day(), &chair, 13, &appos));
        assert!(is_hour_free(day(), &chair, 14, &appos));
        // chair 2's booking does not count against chair 1
        assert!(is_hour_free(day(), &chair, 15, &appos));
    }

    #[test]
    fn slots_cover_the_day() {
        let chair = Chair::new(3, "Chair 3", 10, 18).unwrap();
        let appos = vec![booking("a", 3, 10, 0, 11, 0)];
        let slots = chair_slots(day(), &chair, &appos);
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[9].capacity, 0);
        assert_eq!(slots[10].occupant_count, 1);
        assert_eq!(slots[10].available(), 0);
        assert_eq!(slots[11].available(), 1);
        assert_eq!(slots[18].capacity, 0);
    }

    #[test]
    fn working_hour_window_bounds() {
        let chair = Chair::new(1, "Chair 1", 10, 18).unwrap();
        let inside = TimeRange::new(at(day(), 17, 0), at(day(), 18, 0)).unwrap();
        let early = TimeRange::new(at(day(), 9, 0), at(day(), 10, 0)).unwrap();
        let late = TimeRange::new(at(day(), 17, 30), at(day(), 18, 30)).unwrap();
        assert!(within_working_hours(&chair, &inside));
        assert!(!within_working_hours(&chair, &early));
        assert!(!within_working_hours(&chair, &late));
    }
}
