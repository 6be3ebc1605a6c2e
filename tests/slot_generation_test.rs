use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use vetclinic_backend::domain::models::schedule::{DayOfWeek, ScheduleEntry, TimeOfDay};
use vetclinic_backend::domain::models::slot::Occupation;
use vetclinic_backend::domain::services::availability::{
    generate_slots, has_availability, DEFAULT_SLOT_MINUTES,
};
use vetclinic_backend::domain::services::booking_flow::{
    check_slot, Selection, SelectionError, SlotRejection,
};

const TZ: Tz = chrono_tz::UTC;

// 2025-06-02 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn entry(
    day: DayOfWeek,
    active: bool,
    work: (&str, &str),
    brk: Option<(&str, &str)>,
) -> ScheduleEntry {
    ScheduleEntry {
        id: "entry-1".to_string(),
        vet_id: "vet-1".to_string(),
        day_of_week: day,
        active,
        work_start: work.0.to_string(),
        work_end: work.1.to_string(),
        break_start: brk.map(|b| b.0.to_string()),
        break_end: brk.map(|b| b.1.to_string()),
        created_at: Utc::now(),
    }
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
}

#[test]
fn worked_example_morning_schedule_with_break_and_booking() {
    let date = monday();
    let schedule = vec![entry(
        DayOfWeek::Monday,
        true,
        ("09:00", "12:00"),
        Some(("10:00", "10:30")),
    )];
    let occupations = vec![Occupation {
        start: at(date, 10, 30),
        end: at(date, 11, 0),
    }];
    let now = at(date, 8, 0);

    let slots = generate_slots(date, &schedule, &occupations, 30, now, TZ);

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![
            at(date, 9, 0),
            at(date, 9, 30),
            at(date, 10, 30),
            at(date, 11, 0),
            at(date, 11, 30),
        ]
    );
    assert!(slots.iter().all(|s| s.end - s.start == chrono::Duration::minutes(30)));
    assert!(slots.iter().all(|s| !s.is_past));

    let occupied: Vec<_> = slots.iter().filter(|s| s.is_occupied).map(|s| s.start).collect();
    assert_eq!(occupied, vec![at(date, 10, 30)]);
}

#[test]
fn unconfigured_or_inactive_weekday_yields_no_slots() {
    let date = monday();
    let now = at(date, 0, 0);

    let tuesday_only = vec![entry(DayOfWeek::Tuesday, true, ("09:00", "17:00"), None)];
    assert!(generate_slots(date, &tuesday_only, &[], 30, now, TZ).is_empty());

    let inactive_monday = vec![entry(DayOfWeek::Monday, false, ("09:00", "17:00"), None)];
    assert!(generate_slots(date, &inactive_monday, &[], 30, now, TZ).is_empty());

    assert!(generate_slots(date, &[], &[], 30, now, TZ).is_empty());
}

#[test]
fn availability_predicate_matches_generator_entry_lookup() {
    let date = monday();

    let active = vec![entry(DayOfWeek::Monday, true, ("09:00", "10:00"), None)];
    assert!(has_availability(date, &active));

    // An entry for the weekday exists but is inactive.
    let inactive = vec![entry(DayOfWeek::Monday, false, ("09:00", "10:00"), None)];
    assert!(!has_availability(date, &inactive));

    let other_day = vec![entry(DayOfWeek::Friday, true, ("09:00", "10:00"), None)];
    assert!(!has_availability(date, &other_day));
}

#[test]
fn slots_are_ascending_unique_and_exact_duration() {
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("09:00", "17:00"), None)];
    let now = at(date, 0, 0);

    let slots = generate_slots(date, &schedule, &[], 45, now, TZ);

    assert!(!slots.is_empty());
    for pair in slots.windows(2) {
        assert!(pair[0].start < pair[1].start);
    }
    for slot in &slots {
        assert_eq!(slot.end - slot.start, chrono::Duration::minutes(45));
        assert!(slot.end <= at(date, 17, 0));
    }
}

#[test]
fn only_slots_fully_inside_the_break_are_excluded() {
    let date = monday();
    let now = at(date, 0, 0);

    // 30-minute slots, one-hour break: 10:00 and 10:30 fall fully inside.
    let schedule = vec![entry(
        DayOfWeek::Monday,
        true,
        ("09:00", "12:00"),
        Some(("10:00", "11:00")),
    )];
    let starts: Vec<_> = generate_slots(date, &schedule, &[], 30, now, TZ)
        .iter()
        .map(|s| s.start)
        .collect();
    assert_eq!(
        starts,
        vec![at(date, 9, 0), at(date, 9, 30), at(date, 11, 0), at(date, 11, 30)]
    );
}

#[test]
fn break_straddling_slot_is_kept() {
    let date = monday();
    let now = at(date, 0, 0);

    // With 45-minute slots the 09:45 candidate runs into the break but is
    // not fully contained in it, so it stays bookable.
    let schedule = vec![entry(
        DayOfWeek::Monday,
        true,
        ("09:00", "12:00"),
        Some(("10:00", "10:30")),
    )];
    let starts: Vec<_> = generate_slots(date, &schedule, &[], 45, now, TZ)
        .iter()
        .map(|s| s.start)
        .collect();
    assert_eq!(
        starts,
        vec![at(date, 9, 0), at(date, 9, 45), at(date, 10, 30), at(date, 11, 15)]
    );
}

#[test]
fn occupation_overlap_is_open_interval() {
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("09:00", "11:00"), None)];
    let now = at(date, 0, 0);

    // Occupation exactly filling 09:30-10:00: the touching neighbors stay free.
    let occupations = vec![Occupation {
        start: at(date, 9, 30),
        end: at(date, 10, 0),
    }];
    let slots = generate_slots(date, &schedule, &occupations, 30, now, TZ);

    let flags: Vec<_> = slots.iter().map(|s| (s.start, s.is_occupied)).collect();
    assert_eq!(
        flags,
        vec![
            (at(date, 9, 0), false),
            (at(date, 9, 30), true),
            (at(date, 10, 0), false),
            (at(date, 10, 30), false),
        ]
    );

    // A partially overlapping occupation blocks both slots it touches.
    let overlapping = vec![Occupation {
        start: at(date, 9, 45),
        end: at(date, 10, 15),
    }];
    let slots = generate_slots(date, &schedule, &overlapping, 30, now, TZ);
    assert!(slots[1].is_occupied);
    assert!(slots[2].is_occupied);
    assert!(!slots[0].is_occupied);

    // Occupations on other days are overlap-tested too, and never match.
    let other_day = vec![Occupation {
        start: at(date - chrono::Duration::days(1), 9, 0),
        end: at(date - chrono::Duration::days(1), 12, 0),
    }];
    let slots = generate_slots(date, &schedule, &other_day, 30, now, TZ);
    assert!(slots.iter().all(|s| !s.is_occupied));
}

#[test]
fn now_equal_to_slot_start_marks_it_past() {
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("09:00", "11:00"), None)];
    let now = at(date, 9, 30);

    let slots = generate_slots(date, &schedule, &[], 30, now, TZ);

    let pasts: Vec<_> = slots.iter().map(|s| (s.start, s.is_past)).collect();
    assert_eq!(
        pasts,
        vec![
            (at(date, 9, 0), true),
            (at(date, 9, 30), true), // boundary is inclusive of now
            (at(date, 10, 0), false),
            (at(date, 10, 30), false),
        ]
    );
}

#[test]
fn identical_inputs_produce_identical_output() {
    let date = monday();
    let schedule = vec![entry(
        DayOfWeek::Monday,
        true,
        ("08:00", "14:00"),
        Some(("12:00", "13:00")),
    )];
    let occupations = vec![Occupation {
        start: at(date, 8, 30),
        end: at(date, 9, 0),
    }];
    let now = at(date, 10, 15);

    let first = generate_slots(date, &schedule, &occupations, 30, now, TZ);
    let second = generate_slots(date, &schedule, &occupations, 30, now, TZ);
    assert_eq!(first, second);
}

#[test]
fn non_positive_duration_falls_back_to_default() {
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("09:00", "11:00"), None)];
    let now = at(date, 0, 0);

    for bad_duration in [0, -15] {
        let slots = generate_slots(date, &schedule, &[], bad_duration, now, TZ);
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|s| {
            s.end - s.start == chrono::Duration::minutes(DEFAULT_SLOT_MINUTES)
        }));
    }
}

#[test]
fn malformed_times_degrade_to_midnight() {
    assert_eq!(TimeOfDay::parse("09:30"), TimeOfDay { hour: 9, minute: 30 });
    assert_eq!(TimeOfDay::parse("09:30:15"), TimeOfDay { hour: 9, minute: 30 });
    assert_eq!(TimeOfDay::parse("9"), TimeOfDay { hour: 9, minute: 0 });
    assert_eq!(TimeOfDay::parse("banana"), TimeOfDay { hour: 0, minute: 0 });
    assert_eq!(TimeOfDay::parse("25:99"), TimeOfDay { hour: 0, minute: 0 });
    assert_eq!(TimeOfDay::parse(""), TimeOfDay { hour: 0, minute: 0 });
    assert_eq!(TimeOfDay::parse("09:xx"), TimeOfDay { hour: 9, minute: 0 });

    // A garbled work_start degrades to 00:00 instead of aborting.
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("garbage", "02:00"), None)];
    let slots = generate_slots(date, &schedule, &[], 30, at(date, 0, 0), TZ);
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].start, at(date, 0, 0));
}

#[test]
fn selection_flow_transitions() {
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("09:00", "11:00"), None)];
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let now = at(date, 0, 0);

    let slots = generate_slots(date, &schedule, &[], 30, now, TZ);

    // Choosing before selecting a date is rejected.
    assert_eq!(
        Selection::default().choose_slot(&slots[0]),
        Err(SelectionError::NoDateSelected)
    );

    let selected = Selection::default()
        .select_date(date, &schedule, today)
        .unwrap();
    let chosen = selected.choose_slot(&slots[1]).unwrap();
    assert_eq!(chosen.chosen_start(), Some(at(date, 9, 30)));

    // Month navigation drops the whole selection.
    assert_eq!(chosen.clear(), Selection::NoDateSelected);

    // Days without availability or already past are not selectable.
    let friday = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
    assert_eq!(
        Selection::default().select_date(friday, &schedule, today),
        Err(SelectionError::DayNotBookable)
    );
    let last_monday = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
    assert_eq!(
        Selection::default().select_date(last_monday, &schedule, today),
        Err(SelectionError::DayNotBookable)
    );
}

#[test]
fn occupied_and_past_rejections_stay_distinct() {
    let date = monday();
    let schedule = vec![entry(DayOfWeek::Monday, true, ("09:00", "11:00"), None)];
    let occupations = vec![Occupation {
        start: at(date, 9, 0),
        end: at(date, 9, 30),
    }];
    let now = at(date, 9, 30);

    let slots = generate_slots(date, &schedule, &occupations, 30, now, TZ);

    assert_eq!(check_slot(&slots[0]), Err(SlotRejection::AlreadyBooked));
    assert_eq!(check_slot(&slots[1]), Err(SlotRejection::InPast));
    assert_eq!(check_slot(&slots[2]), Ok(()));
    assert_ne!(
        SlotRejection::AlreadyBooked.message(),
        SlotRejection::InPast.message()
    );
}
