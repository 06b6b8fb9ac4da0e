use chrono::{DateTime, NaiveDate, Utc};
use escape_shared::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One bookable time instance of an experience, with its own price and
/// seat counters. Invariant: seats_available <= total_seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub seats_available: u32,
    pub total_seats: u32,
    pub price: i64,
}

impl Slot {
    pub fn new(starts_at: DateTime<Utc>, total_seats: u32, price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            starts_at,
            seats_available: total_seats,
            total_seats,
            price,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.seats_available == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Catalog entry for a bookable local experience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub host_name: String,
    pub host_avatar: String,
    pub image: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub categories: Vec<Category>,
    pub rating: f32,
    pub review_count: u32,
    pub reviews: Vec<Review>,
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_trending: bool,
}

impl Experience {
    pub fn slot(&self, slot_id: &Uuid) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == *slot_id)
    }

    /// Lowest slot price, shown as the "from" price
    pub fn min_price(&self) -> Option<i64> {
        self.slots.iter().map(|s| s.price).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_slot_starts_fully_available() {
        let slot = Slot::new(Utc::now() + Duration::days(2), 12, 1800);
        assert_eq!(slot.seats_available, slot.total_seats);
        assert!(!slot.is_sold_out());
    }

    #[test]
    fn min_price_across_slots() {
        let exp = Experience {
            id: Uuid::new_v4(),
            title: "Midnight Kayak".to_string(),
            description: String::new(),
            host_name: "Asha".to_string(),
            host_avatar: String::new(),
            image: String::new(),
            location: "Goa".to_string(),
            coordinates: Coordinates { lat: 15.3, lng: 74.1 },
            categories: vec![Category::Adventure],
            rating: 4.8,
            review_count: 0,
            reviews: vec![],
            slots: vec![
                Slot::new(Utc::now() + Duration::days(1), 8, 2200),
                Slot::new(Utc::now() + Duration::days(2), 8, 1800),
            ],
            is_popular: false,
            is_trending: false,
        };
        assert_eq!(exp.min_price(), Some(1800));
    }
}
