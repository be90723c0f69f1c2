//! Seed data for the in-memory repository.
//!
//! [`SeedData`] is the full contents of the store. The built-in data set
//! describes a handful of Manchester groops; alternative data sets can be
//! loaded from JSON with [`SeedData::from_json`].

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Announcement, Groop, GroopId, GroopMember, GroopMessage, Result};

/// Everything held by the in-memory repository.
///
/// # JSON Format
///
/// ```json
/// {
///   "groops": [{ "id": "...", "name": "...", "category": "...", "location": "...",
///                "member_count": 12, "is_joined": true }],
///   "announcements": [],
///   "messages": [],
///   "members": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub groops: Vec<Groop>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub messages: Vec<GroopMessage>,
    #[serde(default)]
    pub members: Vec<GroopMember>,
}

impl SeedData {
    /// Parses seed data from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`GroopError::Serialization`](crate::domain::GroopError::Serialization)
    /// if the document does not match the seed format.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        tracing::debug!(
            groops = data.groops.len(),
            announcements = data.announcements.len(),
            messages = data.messages.len(),
            members = data.members.len(),
            "parsed seed data"
        );
        Ok(data)
    }

    /// Serializes the seed data as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The built-in data set: six Manchester groops, three of them joined.
    ///
    /// Timestamps are relative to the moment of the call.
    #[must_use]
    pub fn manchester() -> Self {
        let groop = |id: u128, name: &str, category: &str, location: &str, members: u32, joined: bool| Groop {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            member_count: members,
            is_joined: joined,
        };

        let runners = groop(0xA111_1111_1111_1111_1111_1111_1111_1111, "Northern Runners MCR", "Fitness", "Manchester City Centre", 64, true);
        let readers = groop(0xB222_2222_2222_2222_2222_2222_2222_2222, "Ancoats Book Circle", "Books", "Ancoats, Manchester", 37, true);
        let games = groop(0xC333_3333_3333_3333_3333_3333_3333_3333, "Chorlton Board Game Nights", "Games", "Chorlton-cum-Hardy", 29, false);
        let creatives = groop(0xD444_4444_4444_4444_4444_4444_4444_4444, "Salford Quays Creatives", "Arts", "Salford Quays", 25, false);
        let hikers = groop(0xE555_5555_5555_5555_5555_5555_5555_5555, "Peak District Weekend Hikers", "Outdoors", "Stockport", 41, false);
        let campfield = groop(0xF666_6666_6666_6666_6666_6666_6666_6666, "Campfield Co-Working Circle", "Co-Working", "Campfield, Manchester", 52, true);

        let now = Utc::now();
        let announcement = |groop_id: GroopId, title: &str, body: &str, age: i64| Announcement {
            id: Uuid::new_v4(),
            groop_id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: now - Duration::seconds(age),
        };
        let message = |groop_id: GroopId, sender: &str, body: &str, age: i64, mine: bool| GroopMessage {
            id: Uuid::new_v4(),
            groop_id,
            sender_name: sender.to_string(),
            body: body.to_string(),
            created_at: now - Duration::seconds(age),
            is_from_current_user: mine,
        };
        let member = |groop_id: GroopId, name: &str, job: &str, status: &str, host: bool| GroopMember {
            id: Uuid::new_v4(),
            groop_id,
            name: name.to_string(),
            job_title: job.to_string(),
            status: status.to_string(),
            is_host: host,
        };

        let announcements = vec![
            announcement(runners.id, "Canal Loop Session", "Meet by Castlefield Bowl at 7:00 AM for the 6K loop.", 10_000),
            announcement(readers.id, "Next Read Confirmed", "This month we picked The Bees by Laline Paull.", 20_000),
            announcement(runners.id, "Heaton Park Warmup", "Sunday pace groups start at 8:30 AM near the lake cafe.", 4_000),
            announcement(campfield.id, "Campfield Launch Session", "Friday cowork and introductions from 9:30 AM at Campfield.", 2_500),
        ];

        let messages = vec![
            message(runners.id, "Maya", "Anyone up for a canal loop before work?", 7_000, false),
            message(runners.id, "Taylor", "Yes, I can do 7:00 AM from Castlefield.", 6_700, true),
            message(readers.id, "Sam", "Shall we meet at Ancoats Coffee Co this Thursday?", 8_500, false),
            message(campfield.id, "Priya", "Anyone working from Campfield tomorrow afternoon?", 4_200, false),
            message(campfield.id, "Taylor", "Yes, I am there from 1 PM. Happy to pair on product strategy.", 3_900, true),
        ];

        let members = vec![
            member(runners.id, "Alberto Hernandez", "Running Coach", "Host", true),
            member(runners.id, "Maya Khan", "UX Designer", "Ready for Sunday pace group", false),
            member(runners.id, "Liam Parker", "iOS Engineer", "Can do 6K this week", false),
            member(runners.id, "Aisha Malik", "Marketing Lead", "Joining from Salford", false),
            member(runners.id, "Tom Wright", "Data Analyst", "Trail run planned", false),
            member(runners.id, "Nia Roberts", "Product Manager", "New to the groop", false),
            member(readers.id, "Andre Lorico", "Community Host", "Host", true),
            member(readers.id, "Jenica Chong", "Frontend Engineer", "I am in!", false),
            member(readers.id, "Elton Lin", "Researcher", "Loved chapter three", false),
            member(readers.id, "Anthony Wu", "Growth Consultant", "Will be there Thursday", false),
            member(campfield.id, "Sarah O'Connell", "Startup Founder", "Host", true),
            member(campfield.id, "Yusuf Ali", "iOS Developer", "Open to pair coding", false),
            member(campfield.id, "Emily Hart", "Product Designer", "Happy to review portfolios", false),
            member(campfield.id, "Ben Carter", "Data Scientist", "Exploring AI side projects", false),
            member(campfield.id, "Harriet Jones", "Marketing Strategist", "Looking for collaborators", false),
        ];

        Self {
            groops: vec![runners, readers, games, creatives, hikers, campfield],
            announcements,
            messages,
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn manchester_has_one_host_per_groop_with_members() {
        let seed = SeedData::manchester();
        let mut hosts: HashMap<GroopId, usize> = HashMap::new();
        for member in seed.members.iter().filter(|m| m.is_host) {
            *hosts.entry(member.groop_id).or_default() += 1;
        }
        assert_eq!(hosts.len(), 3);
        assert!(hosts.values().all(|&count| count == 1));
    }

    #[test]
    fn seed_survives_json() {
        let seed = SeedData::manchester();
        let json = seed.to_json().unwrap();
        assert_eq!(SeedData::from_json(&json).unwrap(), seed);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = SeedData::from_json(r#"{ "groops": [] }"#).unwrap();
        assert!(seed.messages.is_empty());
        assert!(SeedData::from_json("not json").is_err());
    }
}
