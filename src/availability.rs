// src/availability.rs - Availability computation over pre-fetched inventory
//! The availability engine. A pure function over the record sets the data
//! source already fetched: it expands the stay window, drops rooms with any
//! booked night inside it, checks room sufficiency for the party, and groups
//! what survives by room type. No I/O, no shared state; safe to call
//! concurrently for independent requests.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::models::{Booking, GroupedRooms, Hotel, HotelAvailability, Room, SearchParams};

// ==================== SEARCH OUTCOME ====================

/// Result of one availability search. The three empty outcomes are distinct
/// on purpose: "nothing matched the destination" and "matched but nothing
/// was available" read differently to a guest.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The destination matched no hotels.
    NoHotels,
    /// Hotels matched, but none of them had occupiable rooms.
    NoRooms,
    /// Inventory existed, but no hotel survived availability filtering.
    NoAvailability,
    /// Qualifying hotels, in input order.
    Available(Vec<HotelAvailability>),
}

// ==================== STAY WINDOW ====================

/// Inclusive sequence of calendar dates from check-in through check-out.
/// A same-day stay yields one date; a reversed range yields nothing.
pub fn stay_window(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = check_in;
    while current <= check_out {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

// ==================== ENGINE ====================

pub fn search_availability(
    params: &SearchParams,
    hotels: &[Hotel],
    rooms: &[Room],
    bookings: &[Booking],
) -> SearchOutcome {
    if hotels.is_empty() {
        return SearchOutcome::NoHotels;
    }
    if rooms.is_empty() {
        return SearchOutcome::NoRooms;
    }

    let window = stay_window(params.check_in, params.check_out);
    let booked = booked_dates_by_room(bookings);

    let mut results = Vec::new();
    for hotel in hotels {
        if let Some(availability) = hotel_availability(params, hotel, rooms, &booked, &window) {
            results.push(availability);
        }
    }

    if results.is_empty() {
        SearchOutcome::NoAvailability
    } else {
        SearchOutcome::Available(results)
    }
}

fn booked_dates_by_room(bookings: &[Booking]) -> HashMap<i64, HashSet<NaiveDate>> {
    let mut map: HashMap<i64, HashSet<NaiveDate>> = HashMap::new();
    for booking in bookings {
        map.entry(booking.room_id)
            .or_default()
            .insert(booking.booked_for);
    }
    map
}

fn hotel_availability(
    params: &SearchParams,
    hotel: &Hotel,
    rooms: &[Room],
    booked: &HashMap<i64, HashSet<NaiveDate>>,
    window: &[NaiveDate],
) -> Option<HotelAvailability> {
    let available: Vec<&Room> = rooms
        .iter()
        .filter(|room| room.hotel_id == hotel.id)
        .filter(|room| is_free_for_window(room.id, booked, window))
        .collect();

    if available.is_empty() {
        return None;
    }

    // An explicit room count overrides the heuristic; otherwise a hotel that
    // cannot seat the party at all needs unbounded rooms and drops out here.
    let needed = match params.room_no {
        Some(n) => n,
        None => min_rooms_needed(&available, params.adults, params.children)?,
    };
    if available.len() < needed {
        return None;
    }

    // Second capacity pass: the combined capacity of every available room
    // must still cover the whole party.
    let max_adults: i64 = available.iter().map(|r| r.total_adult).sum();
    let max_children: i64 = available.iter().map(|r| r.total_child).sum();
    if max_adults < params.adults || max_children < params.children {
        return None;
    }

    let mut groups = GroupedRooms::default();
    for room in &available {
        groups.push_room((*room).clone());
    }

    // `available` is non-empty here, so the folds never see an empty set.
    let min_price = available.iter().map(|r| r.price).fold(f64::INFINITY, f64::min);
    let max_price = available
        .iter()
        .map(|r| r.price)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(HotelAvailability {
        hotel_id: hotel.id,
        hotel_name: hotel.name.clone(),
        image: hotel.image.clone(),
        total_available_rooms: available.len(),
        min_price,
        max_price,
        available_rooms: groups,
    })
}

/// Full-window exclusivity: one booked night anywhere in the stay window
/// disqualifies the room for the whole stay.
fn is_free_for_window(
    room_id: i64,
    booked: &HashMap<i64, HashSet<NaiveDate>>,
    window: &[NaiveDate],
) -> bool {
    match booked.get(&room_id) {
        Some(dates) => window.iter().all(|date| !dates.contains(date)),
        None => true,
    }
}

/// Greedy largest-capacity-first estimate of the rooms needed to seat the
/// party: assign the biggest remaining room until everyone is seated. A room
/// counts only when it absorbs at least one person. Returns `None` when the
/// party cannot be seated by all rooms together.
///
/// This is an approximation, not optimal bin packing; which hotels qualify
/// depends on this exact heuristic, so keep it as is.
pub fn min_rooms_needed(rooms: &[&Room], adults: i64, children: i64) -> Option<usize> {
    let mut ordered: Vec<&Room> = rooms.to_vec();
    ordered.sort_by(|a, b| b.total_capacity().cmp(&a.total_capacity()));

    let mut needed = 0;
    let mut remaining_adults = adults;
    let mut remaining_children = children;

    for room in ordered {
        if remaining_adults <= 0 && remaining_children <= 0 {
            break;
        }

        let adults_to_fit = room.total_adult.min(remaining_adults);
        let children_to_fit = room.total_child.min(remaining_children);

        remaining_adults -= adults_to_fit;
        remaining_children -= children_to_fit;

        if adults_to_fit > 0 || children_to_fit > 0 {
            needed += 1;
        }
    }

    if remaining_adults > 0 || remaining_children > 0 {
        None
    } else {
        Some(needed)
    }
}

// ==================== TESTS ====================
