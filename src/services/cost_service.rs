use serde::Serialize;

use crate::models::plan::CostBreakdown;
use crate::models::trip::{RoomType, TripRequest};

// Common Indian city pairs with approximate distances (km). Lookup is
// unordered, so estimates are symmetric in origin and destination.
const CITY_DISTANCES_KM: &[((&str, &str), f64)] = &[
    (("mumbai", "delhi"), 1400.0),
    (("mumbai", "bangalore"), 980.0),
    (("mumbai", "chennai"), 1330.0),
    (("mumbai", "kolkata"), 1870.0),
    (("mumbai", "hyderabad"), 710.0),
    (("mumbai", "pune"), 150.0),
    (("mumbai", "goa"), 590.0),
    (("mumbai", "jaipur"), 1150.0),
    (("delhi", "bangalore"), 2150.0),
    (("delhi", "chennai"), 2180.0),
    (("delhi", "kolkata"), 1530.0),
    (("delhi", "hyderabad"), 1550.0),
    (("delhi", "jaipur"), 280.0),
    (("delhi", "agra"), 230.0),
    (("delhi", "manali"), 530.0),
    (("delhi", "shimla"), 350.0),
    (("bangalore", "chennai"), 350.0),
    (("bangalore", "hyderabad"), 570.0),
    (("bangalore", "goa"), 560.0),
    (("bangalore", "mysore"), 150.0),
    (("kolkata", "chennai"), 1670.0),
    (("chennai", "hyderabad"), 630.0),
];

/// Routes outside the table get this distance instead of an error, so any
/// destination can still be planned.
pub const DEFAULT_ROUTE_DISTANCE_KM: f64 = 800.0;

/// Per-km fare, a mix of train and bus rates.
pub const FARE_PER_KM: f64 = 2.5;
/// Flat allowance for local transport at the destination, per person.
pub const LOCAL_TRANSPORT_BUFFER: f64 = 500.0;
/// Children travel at this fraction of the adult fare.
pub const CHILD_FARE_RATIO: f64 = 0.5;

/// AC rooms cost this much more than non-AC.
pub const AC_PREMIUM: f64 = 1.3;
/// A child counts as this fraction of an adult towards room capacity.
pub const CHILD_OCCUPANCY_RATIO: f64 = 0.5;
pub const ROOM_CAPACITY_ADULTS: f64 = 2.0;

const EXPENSIVE_CITIES: &[&str] = &["mumbai", "delhi", "bangalore", "goa", "chennai", "hyderabad"];
const MODERATE_CITIES: &[&str] = &["pune", "jaipur", "kolkata", "ahmedabad"];
pub const EXPENSIVE_CITY_MULTIPLIER: f64 = 1.4;
pub const MODERATE_CITY_MULTIPLIER: f64 = 1.2;

/// When fixed costs already eat the whole budget, this share of it is still
/// reserved for a minimal set of activities.
pub const OVER_BUDGET_ACTIVITY_SHARE: f64 = 0.2;
/// Fixed costs above this share of the budget trigger a warning.
pub const BUDGET_WARNING_THRESHOLD: f64 = 0.8;
pub const MIN_ACTIVITY_BUDGET: f64 = 500.0;

#[derive(Debug, Clone, Copy)]
pub struct Occupancy {
    pub adults: u32,
    pub children: u32,
}

/// The cost breakdown plus the derived reporting shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetAssessment {
    pub breakdown: CostBreakdown,
    pub remaining: f64,
    pub utilization: f64,
    pub budget_warning: Option<String>,
    pub budget_exceeded: bool,
}

fn city_matches(known: &str, input: &str) -> bool {
    !input.is_empty() && (input.contains(known) || known.contains(input))
}

fn route_distance_km(origin: &str, destination: &str) -> f64 {
    let origin = origin.trim().to_lowercase();
    let destination = destination.trim().to_lowercase();

    for ((a, b), distance) in CITY_DISTANCES_KM {
        if (city_matches(a, &origin) && city_matches(b, &destination))
            || (city_matches(b, &origin) && city_matches(a, &destination))
        {
            return *distance;
        }
    }

    DEFAULT_ROUTE_DISTANCE_KM
}

/// Round-trip fare for the whole party between two cities. Children pay
/// `CHILD_FARE_RATIO` of the adult fare.
pub fn estimate_travel_cost(origin: &str, destination: &str, adults: u32, children: u32) -> f64 {
    let per_adult =
        (route_distance_km(origin, destination) * FARE_PER_KM * 2.0 + LOCAL_TRANSPORT_BUFFER)
            .round();
    (per_adult * (adults as f64 + children as f64 * CHILD_FARE_RATIO)).round()
}

fn nightly_base_rate(rating: u8) -> f64 {
    match rating {
        2 => 800.0,
        3 => 1500.0,
        4 => 3500.0,
        5 => 8000.0,
        // Validation keeps ratings in range; anything else gets the standard rate.
        _ => 1500.0,
    }
}

pub fn rooms_needed(occupancy: Occupancy) -> u32 {
    let weighted = occupancy.adults as f64 + occupancy.children as f64 * CHILD_OCCUPANCY_RATIO;
    (weighted / ROOM_CAPACITY_ADULTS).ceil().max(1.0) as u32
}

/// Total hotel cost for the stay: nightly rate by star rating, AC premium,
/// multiplied by nights and rooms needed for the party.
pub fn estimate_hotel_cost(
    rating: u8,
    room_type: RoomType,
    nights: u32,
    occupancy: Occupancy,
) -> f64 {
    let mut rate = nightly_base_rate(rating);
    if room_type == RoomType::Ac {
        rate *= AC_PREMIUM;
    }
    (rate * nights as f64 * rooms_needed(occupancy) as f64).round()
}

pub fn city_price_multiplier(city: &str) -> f64 {
    let city = city.trim().to_lowercase();
    if EXPENSIVE_CITIES.iter().any(|c| city.contains(c)) {
        EXPENSIVE_CITY_MULTIPLIER
    } else if MODERATE_CITIES.iter().any(|c| city.contains(c)) {
        MODERATE_CITY_MULTIPLIER
    } else {
        1.0
    }
}

/// Compute the full cost breakdown for a request, before the AI is asked for
/// anything. The total is always the exact sum of the three parts; going
/// over budget produces a warning, never a rejection.
pub fn assess_budget(request: &TripRequest) -> BudgetAssessment {
    let travel_cost = match &request.origin_city {
        Some(origin) if !origin.trim().is_empty() => estimate_travel_cost(
            origin,
            &request.destination_city,
            request.adults,
            request.children,
        ),
        _ => 0.0,
    };

    let hotel_cost = if request.include_hotel {
        let occupancy = Occupancy {
            adults: request.adults,
            children: request.children,
        };
        (estimate_hotel_cost(
            request.hotel_rating,
            request.room_type,
            request.days,
            occupancy,
        ) * city_price_multiplier(&request.destination_city))
        .round()
    } else {
        0.0
    };

    let fixed_costs = travel_cost + hotel_cost;
    let mut budget_exceeded = false;
    let mut budget_warning = None;

    let mut activities_budget = if fixed_costs >= request.budget {
        budget_exceeded = true;
        budget_warning = Some(format!(
            "Travel (Rs. {:.0}) and hotel (Rs. {:.0}) costs alone exceed your budget of Rs. {:.0}. \
             Increase the budget or reduce the hotel rating or traveler count.",
            travel_cost, hotel_cost, request.budget
        ));
        request.budget * OVER_BUDGET_ACTIVITY_SHARE
    } else {
        if fixed_costs > request.budget * BUDGET_WARNING_THRESHOLD {
            budget_warning = Some(format!(
                "Travel and hotel costs use {:.0}% of your budget. Limited activities will be suggested.",
                fixed_costs / request.budget * 100.0
            ));
        }
        request.budget - fixed_costs
    };

    if activities_budget < MIN_ACTIVITY_BUDGET {
        activities_budget = MIN_ACTIVITY_BUDGET;
    }

    let total = travel_cost + hotel_cost + activities_budget;
    let remaining = request.budget - total;
    let utilization = ((total / request.budget * 100.0).min(100.0) * 10.0).round() / 10.0;

    if total > request.budget && budget_warning.is_none() {
        budget_exceeded = true;
        budget_warning = Some(format!(
            "Total cost exceeds the budget by Rs. {:.0}. Consider a lower hotel rating or a closer destination.",
            total - request.budget
        ));
    }

    BudgetAssessment {
        breakdown: CostBreakdown {
            travel_cost,
            hotel_cost,
            activities_budget,
            total,
        },
        remaining,
        utilization,
        budget_warning,
        budget_exceeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goa_request() -> TripRequest {
        TripRequest {
            budget: 50000.0,
            days: 3,
            destination_city: "Goa".to_string(),
            origin_city: Some("Mumbai".to_string()),
            adults: 2,
            children: 1,
            preferences: vec!["sightseeing".to_string()],
            include_hotel: true,
            hotel_rating: 4,
            room_type: RoomType::Ac,
        }
    }

    #[test]
    fn test_travel_cost_is_symmetric() {
        for (origin, destination) in [
            ("Mumbai", "Goa"),
            ("Delhi", "Jaipur"),
            ("Bangalore", "Chennai"),
            ("Nagpur", "Indore"), // unknown pair, falls back to the default distance
        ] {
            assert_eq!(
                estimate_travel_cost(origin, destination, 2, 1),
                estimate_travel_cost(destination, origin, 2, 1),
            );
        }
    }

    #[test]
    fn test_travel_cost_uses_known_distance() {
        // Mumbai-Goa is 590 km: 590 * 2.5 * 2 + 500 = 3450 per adult.
        assert_eq!(estimate_travel_cost("Mumbai", "Goa", 1, 0), 3450.0);
        assert_eq!(estimate_travel_cost("Mumbai", "Goa", 2, 1), 8625.0);
    }

    #[test]
    fn test_unknown_route_falls_back_to_default_distance() {
        let expected =
            (DEFAULT_ROUTE_DISTANCE_KM * FARE_PER_KM * 2.0 + LOCAL_TRANSPORT_BUFFER).round();
        assert_eq!(estimate_travel_cost("Nagpur", "Indore", 1, 0), expected);
    }

    #[test]
    fn test_children_pay_the_child_fare_ratio() {
        let adult_only = estimate_travel_cost("Mumbai", "Goa", 1, 0);
        let with_children = estimate_travel_cost("Mumbai", "Goa", 1, 2);
        assert_eq!(with_children, adult_only * (1.0 + 2.0 * CHILD_FARE_RATIO));
    }

    #[test]
    fn test_hotel_cost_monotonic_in_rating() {
        let occupancy = Occupancy {
            adults: 2,
            children: 0,
        };
        let mut previous = 0.0;
        for rating in 2..=5 {
            let cost = estimate_hotel_cost(rating, RoomType::NonAc, 3, occupancy);
            assert!(cost >= previous, "rating {} broke monotonicity", rating);
            previous = cost;
        }
    }

    #[test]
    fn test_hotel_cost_monotonic_in_nights() {
        let occupancy = Occupancy {
            adults: 2,
            children: 1,
        };
        let mut previous = 0.0;
        for nights in 1..=14 {
            let cost = estimate_hotel_cost(4, RoomType::Ac, nights, occupancy);
            assert!(cost >= previous, "night {} broke monotonicity", nights);
            previous = cost;
        }
    }

    #[test]
    fn test_ac_premium_applies() {
        let occupancy = Occupancy {
            adults: 2,
            children: 0,
        };
        let non_ac = estimate_hotel_cost(3, RoomType::NonAc, 2, occupancy);
        let ac = estimate_hotel_cost(3, RoomType::Ac, 2, occupancy);
        assert_eq!(ac, (non_ac * AC_PREMIUM).round());
    }

    #[test]
    fn test_rooms_needed_counts_children_fractionally() {
        assert_eq!(
            rooms_needed(Occupancy {
                adults: 2,
                children: 0
            }),
            1
        );
        assert_eq!(
            rooms_needed(Occupancy {
                adults: 2,
                children: 1
            }),
            2
        );
        assert_eq!(
            rooms_needed(Occupancy {
                adults: 4,
                children: 0
            }),
            2
        );
        // A single child still gets a room.
        assert_eq!(
            rooms_needed(Occupancy {
                adults: 0,
                children: 1
            }),
            1
        );
    }

    #[test]
    fn test_city_tiers() {
        assert_eq!(city_price_multiplier("Goa"), EXPENSIVE_CITY_MULTIPLIER);
        assert_eq!(city_price_multiplier("Jaipur"), MODERATE_CITY_MULTIPLIER);
        assert_eq!(city_price_multiplier("Shimla"), 1.0);
    }

    #[test]
    fn test_breakdown_total_is_exact_sum() {
        let assessment = assess_budget(&goa_request());
        let breakdown = &assessment.breakdown;
        assert_eq!(
            breakdown.total,
            breakdown.travel_cost + breakdown.hotel_cost + breakdown.activities_budget
        );
    }

    #[test]
    fn test_goa_example_has_positive_fixed_costs() {
        let assessment = assess_budget(&goa_request());
        assert!(assessment.breakdown.travel_cost > 0.0);
        assert!(assessment.breakdown.hotel_cost > 0.0);
        assert!(assessment.breakdown.activities_budget >= MIN_ACTIVITY_BUDGET);
        assert!(assessment.utilization <= 100.0);
    }

    #[test]
    fn test_no_origin_means_no_travel_cost() {
        let mut request = goa_request();
        request.origin_city = None;
        let assessment = assess_budget(&request);
        assert_eq!(assessment.breakdown.travel_cost, 0.0);

        request.origin_city = Some("  ".to_string());
        let assessment = assess_budget(&request);
        assert_eq!(assessment.breakdown.travel_cost, 0.0);
    }

    #[test]
    fn test_tiny_budget_is_reported_not_rejected() {
        let mut request = goa_request();
        request.budget = 5000.0;
        let assessment = assess_budget(&request);

        assert!(assessment.budget_exceeded);
        assert!(assessment.budget_warning.is_some());
        assert_eq!(
            assessment.breakdown.activities_budget,
            (request.budget * OVER_BUDGET_ACTIVITY_SHARE).max(MIN_ACTIVITY_BUDGET)
        );
        // Still the exact sum, even over budget.
        assert_eq!(
            assessment.breakdown.total,
            assessment.breakdown.travel_cost
                + assessment.breakdown.hotel_cost
                + assessment.breakdown.activities_budget
        );
    }

    #[test]
    fn test_warning_when_fixed_costs_dominate() {
        let mut request = goa_request();
        // Fixed costs for this trip are around Rs. 46845 against a 55000 budget,
        // above the warning threshold but under the budget itself.
        request.budget = 55000.0;
        let assessment = assess_budget(&request);
        assert!(!assessment.budget_exceeded);
        assert!(assessment.budget_warning.is_some());
    }
}
