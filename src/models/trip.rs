use serde::{Deserialize, Serialize};

pub const MIN_HOTEL_RATING: u8 = 2;
pub const MAX_HOTEL_RATING: u8 = 5;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    #[serde(rename = "ac")]
    Ac,
    #[serde(rename = "non_ac", alias = "non-ac")]
    NonAc,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRequest {
    pub budget: f64,
    pub days: u32,
    pub destination_city: String,
    #[serde(default)]
    pub origin_city: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default = "default_preferences")]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub include_hotel: bool,
    #[serde(default = "default_hotel_rating")]
    pub hotel_rating: u8,
    #[serde(default = "default_room_type")]
    pub room_type: RoomType,
}

fn default_adults() -> u32 {
    2
}

fn default_preferences() -> Vec<String> {
    vec![
        "sightseeing".to_string(),
        "food".to_string(),
        "cultural".to_string(),
    ]
}

fn default_hotel_rating() -> u8 {
    3
}

fn default_room_type() -> RoomType {
    RoomType::Ac
}

#[derive(Debug, Serialize, Clone)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl TripRequest {
    /// Check all fields before any external call is made. Every problem is
    /// reported, not just the first one.
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        if !self.budget.is_finite() || self.budget <= 0.0 {
            issues.push(ValidationIssue {
                field: "budget",
                message: "budget must be a positive amount".to_string(),
            });
        }

        if self.days < 1 {
            issues.push(ValidationIssue {
                field: "days",
                message: "trip must last at least one day".to_string(),
            });
        }

        if self.destination_city.trim().is_empty() {
            issues.push(ValidationIssue {
                field: "destination_city",
                message: "destination city is required".to_string(),
            });
        }

        if self.hotel_rating < MIN_HOTEL_RATING || self.hotel_rating > MAX_HOTEL_RATING {
            issues.push(ValidationIssue {
                field: "hotel_rating",
                message: format!(
                    "hotel rating must be between {} and {} stars",
                    MIN_HOTEL_RATING, MAX_HOTEL_RATING
                ),
            });
        }

        if self.include_hotel && self.adults + self.children == 0 {
            issues.push(ValidationIssue {
                field: "adults",
                message: "at least one traveler is required when booking a hotel".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub fn travelers(&self) -> u32 {
        self.adults + self.children
    }
}
