use crate::experience::{Experience, Slot};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Read-only in-memory catalog of experiences. Booking operations never
/// mutate it; seat movement is tracked separately by SlotInventory.
#[derive(Debug, Default)]
pub struct ExperienceCatalog {
    experiences: HashMap<Uuid, Experience>,
}

impl ExperienceCatalog {
    pub fn new() -> Self {
        Self {
            experiences: HashMap::new(),
        }
    }

    pub fn insert(&mut self, experience: Experience) {
        tracing::debug!(experience_id = %experience.id, title = %experience.title, "catalog entry added");
        self.experiences.insert(experience.id, experience);
    }

    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Experience> {
        self.experiences.get(id)
    }

    pub fn list(&self) -> Vec<&Experience> {
        self.experiences.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.experiences.values()
    }

    /// Resolve the experience owning a slot
    pub fn find_by_slot(&self, slot_id: &Uuid) -> Option<&Experience> {
        self.experiences
            .values()
            .find(|exp| exp.slots.iter().any(|s| s.id == *slot_id))
    }

    /// Resolve a slot together with its owning experience
    pub fn slot(&self, slot_id: &Uuid) -> Option<(&Experience, &Slot)> {
        self.experiences.values().find_map(|exp| {
            exp.slot(slot_id).map(|slot| (exp, slot))
        })
    }

    pub fn slot_start(&self, slot_id: &Uuid) -> Option<DateTime<Utc>> {
        self.slot(slot_id).map(|(_, slot)| slot.starts_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::Coordinates;
    use chrono::Duration;
    use escape_shared::Category;

    fn experience_with_slot() -> Experience {
        Experience {
            id: Uuid::new_v4(),
            title: "Clay Wheel Basics".to_string(),
            description: String::new(),
            host_name: "Mira".to_string(),
            host_avatar: String::new(),
            image: String::new(),
            location: "Pune".to_string(),
            coordinates: Coordinates { lat: 18.5, lng: 73.8 },
            categories: vec![Category::Workshop, Category::Art],
            rating: 4.6,
            review_count: 12,
            reviews: vec![],
            slots: vec![Slot::new(Utc::now() + Duration::days(3), 6, 950)],
            is_popular: true,
            is_trending: false,
        }
    }

    #[test]
    fn lookup_by_id_and_by_slot() {
        let mut catalog = ExperienceCatalog::new();
        let exp = experience_with_slot();
        let exp_id = exp.id;
        let slot_id = exp.slots[0].id;
        catalog.insert(exp);

        assert_eq!(catalog.get(&exp_id).unwrap().id, exp_id);
        assert_eq!(catalog.find_by_slot(&slot_id).unwrap().id, exp_id);

        let (owner, slot) = catalog.slot(&slot_id).unwrap();
        assert_eq!(owner.id, exp_id);
        assert_eq!(slot.price, 950);
    }

    #[test]
    fn unknown_slot_resolves_to_none() {
        let catalog = ExperienceCatalog::new();
        assert!(catalog.slot(&Uuid::new_v4()).is_none());
        assert!(catalog.slot_start(&Uuid::new_v4()).is_none());
    }
}
