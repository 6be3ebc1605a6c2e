use icalendar::{Calendar, Component, Event, EventLike};

use crate::domain::models::{appointment::Appointment, pet::Pet, vet::Veterinarian};

/// Generates an iCalendar (.ics) string for a booked appointment
pub fn generate_ics(vet: &Veterinarian, pet: &Pet, appointment: &Appointment) -> String {
    let mut calendar = Calendar::new();

    let summary = format!("Veterinary appointment: {}", pet.name);
    let description = match &appointment.reason {
        Some(reason) => format!("{} with {}", reason, vet.full_name),
        None => format!("Appointment with {}", vet.full_name),
    };

    let ical_event = Event::new()
        .summary(&summary)
        .description(&description)
        .starts(appointment.start_time)
        .ends(appointment.end_time)
        .uid(&appointment.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
