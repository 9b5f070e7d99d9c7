//! Demo data for local development.

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use hotel_database::entities::{
    EmployeeRole, LedgerCategory, NewBooking, NewDepartment, NewEmployee, NewHotel,
    NewInventoryItem, NewOrder, NewPayment, NewRoom, PaymentMethod, RoomType,
};
use hotel_operations::{LedgerEntryInput, Services};
use rand::seq::SliceRandom;
use rand::Rng;

const HOTELS: &[(&str, &str, &str)] = &[
    ("Harbour View", "1 Rua Augusta", "Lisbon"),
    ("Ribeira Lodge", "48 Cais da Ribeira", "Porto"),
];

const DEPARTMENTS: &[&str] = &["Front Desk", "Housekeeping", "Kitchen", "Maintenance", "Management"];

const STAFF: &[(&str, &str, &str, EmployeeRole)] = &[
    ("Helena", "Marques", "Management", EmployeeRole::Manager),
    ("Joana", "Reis", "Front Desk", EmployeeRole::Receptionist),
    ("Tiago", "Ferreira", "Front Desk", EmployeeRole::Receptionist),
    ("Rui", "Almeida", "Housekeeping", EmployeeRole::Housekeeping),
    ("Sofia", "Pinto", "Kitchen", EmployeeRole::Staff),
    ("Bruno", "Lopes", "Maintenance", EmployeeRole::Staff),
];

const STOCK: &[(&str, &str, &str, i64)] = &[
    ("Bath towels", "linen", "piece", 800),
    ("Bed sheets", "linen", "set", 2_500),
    ("Hand soap", "toiletries", "bottle", 150),
    ("Coffee beans", "kitchen", "kg", 1_800),
    ("Light bulbs", "maintenance", "piece", 300),
];

const GUESTS: &[&str] = &[
    "Ana Sousa", "Marta Lima", "Pedro Santos", "Ines Carvalho", "Miguel Rocha",
    "Beatriz Gomes", "Diogo Martins", "Carla Nunes",
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub hotels: usize,
    pub rooms: usize,
    pub employees: usize,
    pub items: usize,
    pub bookings: usize,
}

/// Populate the database through the domain services so every rule applies.
pub async fn seed<R: Rng>(services: &Services, rng: &mut R) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();
    let today = hotel_operations::today();

    for (index, (name, address, city)) in HOTELS.iter().enumerate() {
        let hotel = services
            .hotels
            .create(NewHotel {
                name: name.to_string(),
                address: address.to_string(),
                city: city.to_string(),
                phone: format!("+351 2{index}0 000 000"),
                email: format!("front{index}@{}.example", city.to_lowercase()),
                star_rating: rng.gen_range(3..=5),
                image_path: Some(format!("hotels/{}.jpg", index + 1)),
            })
            .await
            .with_context(|| format!("failed to create hotel {name}"))?;
        report.hotels += 1;

        for department in DEPARTMENTS {
            services
                .departments
                .create(NewDepartment {
                    hotel_id: hotel.id,
                    name: department.to_string(),
                    description: None,
                })
                .await
                .with_context(|| format!("failed to create department {department}"))?;
        }

        for (first, last, department, role) in STAFF {
            services
                .employees
                .create(NewEmployee {
                    hotel_id: hotel.id,
                    department_name: department.to_string(),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: format!(
                        "{}.{}@hotel{}.example",
                        first.to_lowercase(),
                        last.to_lowercase(),
                        hotel.id
                    ),
                    phone: None,
                    role: *role,
                    salary_cents: rng.gen_range(120_000..=320_000),
                    hired_on: today - Duration::days(rng.gen_range(30..=1_500)),
                })
                .await
                .with_context(|| format!("failed to hire {first} {last}"))?;
            report.employees += 1;
        }

        let mut rooms = Vec::new();
        for floor in 1..=2 {
            for number in 1..=4 {
                let room_type = *RoomType::ALL.choose(rng).unwrap_or(&RoomType::Double);
                let (rate_cents, capacity) = match room_type {
                    RoomType::Single => (8_000, 1),
                    RoomType::Double => (12_000, 2),
                    RoomType::Suite => (25_000, 4),
                    RoomType::Deluxe => (18_000, 3),
                };
                let room = services
                    .rooms
                    .create(NewRoom {
                        hotel_id: hotel.id,
                        room_number: format!("{floor}0{number}"),
                        room_type,
                        rate_cents,
                        capacity,
                        image_path: None,
                    })
                    .await
                    .context("failed to create room")?;
                rooms.push(room);
                report.rooms += 1;
            }
        }

        for (position, room) in rooms.iter().enumerate() {
            if position > 0 && rng.gen_bool(0.25) {
                continue;
            }
            let starts = if position == 0 { 0 } else { rng.gen_range(0..14) };
            let check_in = today + Duration::days(starts);
            let check_out = check_in + Duration::days(rng.gen_range(1..=4));
            let booking = book(services, rng, room.id, room.capacity, check_in, check_out).await?;
            report.bookings += 1;

            if rng.gen_bool(0.5) {
                services
                    .payments
                    .record_payment(NewPayment {
                        booking_id: booking,
                        amount_cents: room.rate_cents,
                        method: PaymentMethod::Card,
                        reference: Some("deposit".to_string()),
                    })
                    .await
                    .context("failed to record deposit")?;
            }
            if starts == 0 {
                services
                    .bookings
                    .check_in(booking)
                    .await
                    .context("failed to check in guest")?;
            }
        }

        for (item_name, category, unit, unit_cost_cents) in STOCK {
            let item = services
                .inventory
                .create_item(NewInventoryItem {
                    hotel_id: hotel.id,
                    name: item_name.to_string(),
                    category: category.to_string(),
                    unit: unit.to_string(),
                    quantity: rng.gen_range(0..=60),
                    reorder_level: 15,
                    unit_cost_cents: *unit_cost_cents,
                })
                .await
                .with_context(|| format!("failed to create item {item_name}"))?;
            report.items += 1;

            if item.quantity <= item.reorder_level {
                let order = services
                    .inventory
                    .place_order(NewOrder {
                        inventory_id: item.id,
                        quantity: 40,
                        unit_cost_cents: None,
                        supplier: Some("Iberia Supplies".to_string()),
                        note: None,
                    })
                    .await
                    .context("failed to place order")?;
                if rng.gen_bool(0.5) {
                    services
                        .inventory
                        .receive_order(order.id)
                        .await
                        .context("failed to receive order")?;
                }
            }
        }

        for (category, description, amount_cents) in [
            (LedgerCategory::Utility, "Electricity", rng.gen_range(90_000..=160_000)),
            (LedgerCategory::Utility, "Water", rng.gen_range(20_000..=40_000)),
            (LedgerCategory::Maintenance, "Lift inspection", 45_000),
        ] {
            services
                .ledger
                .record(LedgerEntryInput {
                    hotel_id: hotel.id,
                    category,
                    description: description.to_string(),
                    amount_cents,
                    recorded_on: Some(today),
                })
                .await
                .with_context(|| format!("failed to record {description}"))?;
        }
    }

    Ok(report)
}

async fn book<R: Rng>(
    services: &Services,
    rng: &mut R,
    room_id: i64,
    capacity: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> anyhow::Result<i64> {
    let guest = GUESTS.choose(rng).copied().unwrap_or("Walk-in Guest");
    let email = format!("{}@guests.example", guest.to_lowercase().replace(' ', "."));

    let booking = services
        .bookings
        .create(NewBooking {
            room_id,
            guest_name: guest.to_string(),
            guest_email: email,
            guest_phone: None,
            check_in,
            check_out,
            guests: rng.gen_range(1..=capacity),
        })
        .await
        .with_context(|| format!("failed to book room {room_id} for {guest}"))?;

    Ok(booking.id)
}
