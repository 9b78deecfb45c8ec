//! End-to-end booking flow tests: seed a database, book through the
//! engine, and verify availability, reschedules, and persistence.

use chairside_core::booking::{BookingEngine, BookingRequest, SlotAvailability};
use chairside_core::{
    AppointmentStatus, BlockKind, BookingError, Client, Config, CoreError, SalonDb, Service,
    TimeBlock,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    // 2024-06-03 is a Monday
    Utc.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

struct Salon {
    db: SalonDb,
    engine: BookingEngine,
    service: Service,
    client: Client,
}

fn seed_salon(db: SalonDb) -> Salon {
    let engine = BookingEngine::from_config(&Config::default()).unwrap();

    let service = Service::new("Cut & finish", 60, 6500, "USD")
        .unwrap()
        .with_deposit_required(true);
    db.create_service(&service).unwrap();

    let client = Client::new("Dana", "+1 555 0101");
    db.create_client(&client).unwrap();

    Salon {
        db,
        engine,
        service,
        client,
    }
}

fn request(salon: &Salon, start: DateTime<Utc>) -> BookingRequest {
    BookingRequest {
        professional_id: "pro-1".to_string(),
        service_id: salon.service.id.clone(),
        client_id: salon.client.id.clone(),
        start_time: start,
        note: None,
    }
}

#[test]
fn full_day_booking_flow() {
    let salon = seed_salon(SalonDb::open_memory().unwrap());

    // Morning appointment and a lunch block
    let morning = salon.engine.book(&salon.db, &request(&salon, at(9, 0))).unwrap();
    assert_eq!(morning.deposit_minor, Some(1300));

    let lunch = TimeBlock::new("pro-1", BlockKind::Break, at(12, 0), at(13, 0), None).unwrap();
    salon.db.create_time_block(&lunch).unwrap();

    // 20 candidate slots; the 60-minute appointment covers two, the
    // lunch block covers two
    let statuses = salon
        .engine
        .availability(&salon.db, "pro-1", monday())
        .unwrap();
    assert_eq!(statuses.len(), 20);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| s.availability.is_free())
            .count(),
        16
    );

    // Double-booking the morning slot fails with the occupying id
    let err = salon
        .engine
        .book(&salon.db, &request(&salon, at(9, 30)))
        .unwrap_err();
    match err {
        CoreError::Booking(BookingError::SlotOccupied { appointment_id }) => {
            assert_eq!(appointment_id, morning.id)
        }
        other => panic!("expected SlotOccupied, got {other:?}"),
    }

    // Booking over lunch fails blocked
    let err = salon
        .engine
        .book(&salon.db, &request(&salon, at(12, 30)))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Booking(BookingError::SlotBlocked {
            kind: BlockKind::Break
        })
    ));

    // The adjacent 10:00 slot is free (appointment ends at 10:00)
    salon
        .engine
        .book(&salon.db, &request(&salon, at(10, 0)))
        .unwrap();
}

#[test]
fn reschedule_flow() {
    let salon = seed_salon(SalonDb::open_memory().unwrap());

    let first = salon.engine.book(&salon.db, &request(&salon, at(9, 0))).unwrap();
    let second = salon.engine.book(&salon.db, &request(&salon, at(11, 0))).unwrap();

    // Self-move is a no-op success
    salon.engine.reschedule(&salon.db, &first.id, at(9, 0)).unwrap();

    // Moving onto the other appointment fails
    let err = salon
        .engine
        .reschedule(&salon.db, &first.id, at(11, 0))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Booking(BookingError::SlotOccupied { .. })
    ));

    // Moving into the gap the first appointment vacates works, and the
    // vacated slot opens up
    salon.engine.reschedule(&salon.db, &first.id, at(14, 0)).unwrap();
    let statuses = salon
        .engine
        .availability(&salon.db, "pro-1", monday())
        .unwrap();
    let nine_oclock = statuses
        .iter()
        .find(|s| s.slot.start_time == at(9, 0))
        .unwrap();
    assert!(nine_oclock.availability.is_free());

    // Second appointment still holds its window
    let eleven = statuses
        .iter()
        .find(|s| s.slot.start_time == at(11, 0))
        .unwrap();
    assert_eq!(
        eleven.availability,
        SlotAvailability::Occupied {
            appointment_id: second.id.clone()
        }
    );
}

#[test]
fn cancellation_frees_the_window() {
    let salon = seed_salon(SalonDb::open_memory().unwrap());

    let appt = salon.engine.book(&salon.db, &request(&salon, at(9, 0))).unwrap();
    chairside_core::booking::set_appointment_status(
        &salon.db,
        &appt.id,
        AppointmentStatus::Cancelled,
    )
    .unwrap();

    // The record survives with its terminal status
    let loaded = salon.db.get_appointment(&appt.id).unwrap().unwrap();
    assert_eq!(loaded.status, AppointmentStatus::Cancelled);

    // And the slot is bookable again
    salon.engine.book(&salon.db, &request(&salon, at(9, 0))).unwrap();
}

#[test]
fn bookings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chairside.db");

    let appointment_id = {
        let salon = seed_salon(SalonDb::open_at(&path).unwrap());
        let appt = salon.engine.book(&salon.db, &request(&salon, at(9, 0))).unwrap();
        appt.id
    };

    let db = SalonDb::open_at(&path).unwrap();
    let loaded = db.get_appointment(&appointment_id).unwrap().unwrap();
    assert_eq!(loaded.status, AppointmentStatus::Confirmed);
    assert_eq!(loaded.start_time, at(9, 0));
    assert_eq!(loaded.end_time, at(10, 0));
}

#[test]
fn professionals_do_not_share_calendars() {
    let salon = seed_salon(SalonDb::open_memory().unwrap());

    salon.engine.book(&salon.db, &request(&salon, at(9, 0))).unwrap();

    let mut other = request(&salon, at(9, 0));
    other.professional_id = "pro-2".to_string();
    salon.engine.book(&salon.db, &other).unwrap();

    let statuses = salon
        .engine
        .availability(&salon.db, "pro-2", monday())
        .unwrap();
    let occupied = statuses
        .iter()
        .filter(|s| !s.availability.is_free())
        .count();
    // Only pro-2's own appointment shows up
    assert_eq!(occupied, 2);
}
