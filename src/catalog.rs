use indexmap::IndexMap;
use serde::Deserialize;

/// One activity as the server reports it. Participant order is the
/// server's order and duplicates are kept as-is.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

/// The full activity mapping from the most recent successful fetch,
/// keyed by activity name. Iteration order is the order the server
/// sent; the whole map is replaced on every reload, never patched.
pub type ActivityCatalog = IndexMap<String, Activity>;

impl Activity {
    /// Remaining capacity, recomputed at render time. Not clamped:
    /// an overbooked activity reports a negative count.
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(max: i64, participants: &[&str]) -> Activity {
        Activity {
            description: "desc".to_string(),
            schedule: "sched".to_string(),
            max_participants: max,
            participants: participants.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn spots_left_subtracts_participants() {
        assert_eq!(activity(12, &["a@x.com", "b@x.com"]).spots_left(), 10);
        assert_eq!(activity(5, &[]).spots_left(), 5);
    }

    #[test]
    fn spots_left_goes_negative_when_overbooked() {
        assert_eq!(activity(1, &["a@x.com", "b@x.com", "c@x.com"]).spots_left(), -2);
    }

    #[test]
    fn catalog_deserializes_in_document_order() {
        let raw = r#"{
            "Zeta Club": {"description": "z", "schedule": "s", "max_participants": 3, "participants": []},
            "Alpha Club": {"description": "a", "schedule": "s", "max_participants": 3, "participants": ["a@x.com"]}
        }"#;
        let catalog: ActivityCatalog = serde_json::from_str(raw).expect("catalog parses");
        let names: Vec<&str> = catalog.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zeta Club", "Alpha Club"]);
        assert_eq!(catalog["Alpha Club"].participants, ["a@x.com"]);
    }
}
