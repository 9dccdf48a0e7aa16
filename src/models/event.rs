use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::money;

/// A read-only event record as the client needs it.
///
/// Built through [`Event::from_value`], an allow-listed projection of the
/// server payload: only the fields below are carried over, which also keeps
/// any circular relationship the backend serializes out of the client state.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Event {
    /// The server-assigned event id.
    pub id: Option<i64>,
    /// The event name (`name`, falling back to `title`).
    pub name: String,
    /// The event description.
    pub description: String,
    /// The schedule start (`startDate`, falling back to `start_date`).
    pub start_date: Option<String>,
    /// The schedule end (`endDate`, falling back to `end_date`).
    pub end_date: Option<String>,
    /// The venue (`location`, falling back to `venue`).
    pub location: String,
    /// The event image URL.
    pub image_url: Option<String>,
    /// The unit ticket price. Missing or malformed values coerce to 0.
    pub price: f64,
    /// The seating capacity, when the server reports one.
    pub capacity: Option<i64>,
    /// The category this event belongs to.
    pub category_id: Option<i64>,
}

impl Event {
    /// Projects a raw server record onto the fields the client depends on.
    pub fn from_value(raw: &Value) -> Event {
        Event {
            id: raw.get("id").and_then(Value::as_i64),
            name: first_string(raw, &["name", "title"]),
            description: first_string(raw, &["description"]),
            start_date: opt_string(raw, &["startDate", "start_date"]),
            end_date: opt_string(raw, &["endDate", "end_date"]),
            location: first_string(raw, &["location", "venue"]),
            image_url: opt_string(raw, &["imageUrl"]),
            price: money::coerce(raw.get("price")),
            capacity: raw.get("capacity").and_then(Value::as_i64),
            category_id: raw.get("categoryId").and_then(Value::as_i64),
        }
    }

    /// Whether booking this event requires no payment.
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    /// The number of seats still open to a booking form, defaulting to 10
    /// when the server does not report a capacity.
    pub fn available_seats(&self) -> i64 {
        self.capacity.unwrap_or(10)
    }
}

/// An event category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    /// The server-assigned category id.
    pub id: Option<i64>,
    /// The category name.
    pub name: String,
    /// The category description.
    #[serde(default)]
    pub description: Option<String>,
}

fn first_string(raw: &Value, keys: &[&str]) -> String {
    opt_string(raw, keys).unwrap_or_default()
}

fn opt_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find_map(|v| v.as_str())
        .map(str::to_string)
}
