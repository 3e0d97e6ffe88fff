use chrono::NaiveDate;
use serde::Serialize;
use trip_planner_sdk::{Activity, Itinerary};

const DATE_FORMAT: &str = "%b %-d, %Y";

/// Display-ready form of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub name: String,
    pub start: String,
    pub end: String,
    pub total_days: i64,
    /// One section per day, in the order the itinerary lists them.
    pub days: Vec<DaySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySection {
    pub day: String,
    pub items: Vec<TimelineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub title: String,
    pub card_title: String,
    pub card_subtitle: String,
    pub detail: String,
    /// Thumbnail of the first image that has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl TimelineView {
    #[must_use]
    pub fn new(itinerary: &Itinerary) -> Self {
        Self {
            name: itinerary.name.clone(),
            start: format_date(itinerary.start_date),
            end: format_date(itinerary.end_date),
            total_days: itinerary.total_days,
            days: itinerary
                .activities
                .iter()
                .map(|plan| DaySection {
                    day: plan.day.clone(),
                    items: plan.activities.iter().map(TimelineItem::new).collect(),
                })
                .collect(),
        }
    }
}

impl TimelineItem {
    fn new(activity: &Activity) -> Self {
        let details = &activity.place_details;
        Self {
            title: activity.time_of_day.to_uppercase(),
            card_title: activity.name.clone(),
            card_subtitle: format!(
                "{}, {} - {}",
                details.city.as_deref().unwrap_or_default(),
                details.state.as_deref().unwrap_or_default(),
                activity.duration
            ),
            detail: activity.description.clone(),
            thumbnail: activity
                .images
                .iter()
                .flatten()
                .find_map(|image| image.thumbnail.clone()),
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_days_in_document_order() {
        let itinerary: Itinerary = serde_json::from_str(
            r#"{
                "name": "Lisbon getaway",
                "start_date": "2024-03-09",
                "end_date": "2024-03-10",
                "total_days": 2,
                "activities": {
                    "2": [{
                        "name": "Belem Tower",
                        "time_of_day": "morning",
                        "duration": "2 hours",
                        "description": "Fortress on the Tagus.",
                        "place_details": {"city": "Lisbon", "state": "Lisbon District"},
                        "images": [{"small": "s.jpg"}, {"thumbnail": "t.jpg"}]
                    }],
                    "1": [{
                        "name": "Alfama",
                        "time_of_day": "evening",
                        "duration": "3 hours",
                        "description": "Old quarter.",
                        "place_details": {}
                    }]
                }
            }"#,
        )
        .expect("valid itinerary");

        let view = TimelineView::new(&itinerary);
        assert_eq!(view.start, "Mar 9, 2024");
        assert_eq!(view.end, "Mar 10, 2024");
        assert_eq!(
            view.days.iter().map(|d| d.day.as_str()).collect::<Vec<_>>(),
            ["2", "1"]
        );

        let belem = &view.days[0].items[0];
        assert_eq!(belem.title, "MORNING");
        assert_eq!(belem.card_title, "Belem Tower");
        assert_eq!(belem.card_subtitle, "Lisbon, Lisbon District - 2 hours");
        assert_eq!(belem.detail, "Fortress on the Tagus.");
        assert_eq!(belem.thumbnail.as_deref(), Some("t.jpg"));

        let alfama = &view.days[1].items[0];
        assert_eq!(alfama.card_subtitle, ",  - 3 hours");
        assert_eq!(alfama.thumbnail, None);
    }
}
