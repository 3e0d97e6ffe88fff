use chrono::NaiveDate;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// A generated trip plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    /// Identifier assigned by the backend. Absent on locally built values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive number of days between `start_date` and `end_date`.
    #[serde(default)]
    pub total_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Cover image, the first photo found for any of the activities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Activities grouped by day label. Recent-itinerary listings omit it.
    #[serde(default)]
    pub activities: DayActivities,
}

/// A single activity, like visiting a place at a specific time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub name: String,
    /// Free text such as "morning" or "evening".
    #[serde(default)]
    pub time_of_day: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub place_details: PlaceDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<PlaceImage>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_string: Option<String>,
}

/// Photo of a place in several sizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaceImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

/// The activities of one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: String,
    pub activities: Vec<Activity>,
}

/// Day label to activities mapping that keeps the order in which the days
/// were received. On the wire it is a JSON object; the keys are never sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayActivities(Vec<DayPlan>);

impl DayActivities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a day, or replace the activities of an existing day in place.
    pub fn insert(&mut self, day: impl Into<String>, activities: Vec<Activity>) {
        let day = day.into();
        match self.0.iter_mut().find(|plan| plan.day == day) {
            Some(plan) => plan.activities = activities,
            None => self.0.push(DayPlan { day, activities }),
        }
    }

    #[must_use]
    pub fn get(&self, day: &str) -> Option<&[Activity]> {
        self.0
            .iter()
            .find(|plan| plan.day == day)
            .map(|plan| plan.activities.as_slice())
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|plan| plan.day.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayPlan> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a DayActivities {
    type Item = &'a DayPlan;
    type IntoIter = std::slice::Iter<'a, DayPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Activity>)> for DayActivities {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Activity>)>>(iter: I) -> Self {
        let mut activities = Self::new();
        for (day, items) in iter {
            activities.insert(day, items);
        }
        activities
    }
}

impl Serialize for DayActivities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for plan in &self.0 {
            map.serialize_entry(&plan.day, &plan.activities)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DayActivities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayActivitiesVisitor;

        impl<'de> Visitor<'de> for DayActivitiesVisitor {
            type Value = DayActivities;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping day labels to activity lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut activities = DayActivities::new();
                while let Some((day, items)) = access.next_entry::<String, Vec<Activity>>()? {
                    activities.insert(day, items);
                }
                Ok(activities)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(DayActivities::new())
            }
        }

        deserializer.deserialize_any(DayActivitiesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITINERARY: &str = r##"{
        "id": 7,
        "name": "Kyoto Itinerary for 3 days",
        "start_date": "2024-01-01",
        "end_date": "2024-01-03",
        "total_days": 3,
        "destination": "Kyoto, Japan",
        "activities": {
            "2": [{
                "name": "Fushimi Inari",
                "time_of_day": "morning",
                "duration": "3 hours",
                "description": "Torii gate trail",
                "place_details": {"city": "Kyoto", "state": "Kyoto Prefecture"}
            }],
            "1": [{
                "name": "Kinkaku-ji",
                "time_of_day": "afternoon",
                "duration": "2 hours",
                "description": "Golden pavilion",
                "place_details": {"city": "Kyoto", "ranking": "#3 of 1,000"},
                "images": [{"thumbnail": "https://img.example/t.jpg", "original": "https://img.example/o.jpg"}]
            }],
            "10": []
        }
    }"##;

    #[test]
    fn activities_keep_document_order() {
        let itinerary: Itinerary = serde_json::from_str(ITINERARY).expect("valid itinerary");

        let days: Vec<&str> = itinerary.activities.days().collect();
        assert_eq!(days, vec!["2", "1", "10"]);

        let encoded = serde_json::to_string(&itinerary).expect("encodes");
        let first = encoded.find("\"2\"").expect("day 2 present");
        let second = encoded.find("\"1\"").expect("day 1 present");
        let third = encoded.find("\"10\"").expect("day 10 present");
        assert!(first < second && second < third);

        let decoded: Itinerary = serde_json::from_str(&encoded).expect("decodes");
        assert_eq!(decoded, itinerary);
    }

    #[test]
    fn nested_place_details_and_images_are_decoded() {
        let itinerary: Itinerary = serde_json::from_str(ITINERARY).expect("valid itinerary");
        let day_one = itinerary.activities.get("1").expect("day 1");

        assert_eq!(day_one[0].place_details.ranking.as_deref(), Some("#3 of 1,000"));
        assert_eq!(
            day_one[0]
                .images
                .as_ref()
                .and_then(|images| images[0].original.as_deref()),
            Some("https://img.example/o.jpg")
        );
        assert_eq!(itinerary.activities.get("10"), Some(&[][..]));
    }

    #[test]
    fn listing_entries_without_activities_decode() {
        let itinerary: Itinerary = serde_json::from_str(
            r#"{"id": 1, "name": "Oslo", "start_date": "2024-05-01", "end_date": "2024-05-02", "activities": null}"#,
        )
        .expect("valid listing entry");

        assert!(itinerary.activities.is_empty());
        assert_eq!(itinerary.total_days, 0);
    }

    #[test]
    fn insert_replaces_existing_day_in_place() {
        let mut activities: DayActivities = vec![("a", vec![]), ("b", vec![])].into_iter().collect();
        activities.insert(
            "a",
            vec![Activity {
                name: "Museum".into(),
                time_of_day: "noon".into(),
                duration: "1 hour".into(),
                description: String::new(),
                place_details: PlaceDetails::default(),
                images: None,
            }],
        );

        assert_eq!(activities.days().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(activities.get("a").map(<[Activity]>::len), Some(1));
    }
}
