use std::fmt;

use crate::catalog::ActivityCatalog;

pub const LOADING_PLACEHOLDER: &str = "Loading activities...";
pub const FETCH_FAILED_NOTICE: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS_PLACEHOLDER: &str = "No participants yet";
pub const SPOTS_LEFT_SUFFIX: &str = " spots left";

/// One entry of the signup selection control; value and label are both
/// the activity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Tag carried by a participant's remove control: the owning activity
/// name and the participant's email, both opaque to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveControl {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    pub remove: RemoveControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantsSection {
    Placeholder(&'static str),
    Roster(Vec<ParticipantRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub availability: String,
    pub participants: ParticipantsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub cards: Vec<ActivityCard>,
    pub options: Vec<SelectOption>,
}

/// The displayed list region. Assigning a new `Loaded` value swaps the
/// whole tree at once; stale cards never coexist with fresh ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListArea {
    Loading,
    Loaded(CatalogView),
    Failed,
}

/// Pure function of a catalog snapshot to the rendered tree: one card
/// and one select option per activity, in the order the server sent.
pub fn render_catalog(catalog: &ActivityCatalog) -> CatalogView {
    let mut cards = Vec::with_capacity(catalog.len());
    let mut options = Vec::with_capacity(catalog.len());

    for (name, activity) in catalog {
        let participants = if activity.participants.is_empty() {
            ParticipantsSection::Placeholder(NO_PARTICIPANTS_PLACEHOLDER)
        } else {
            ParticipantsSection::Roster(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        email: email.clone(),
                        remove: RemoveControl {
                            activity: name.clone(),
                            email: email.clone(),
                        },
                    })
                    .collect(),
            )
        };

        let spots_left = activity.spots_left();
        cards.push(ActivityCard {
            name: name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left,
            availability: format!("{spots_left}{SPOTS_LEFT_SUFFIX}"),
            participants,
        });

        options.push(SelectOption {
            value: name.clone(),
            label: name.clone(),
        });
    }

    CatalogView { cards, options }
}

impl fmt::Display for ActivityCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  Schedule: {}", self.schedule)?;
        writeln!(f, "  Availability: {}", self.availability)?;
        match &self.participants {
            ParticipantsSection::Placeholder(text) => writeln!(f, "  Participants: {text}"),
            ParticipantsSection::Roster(rows) => {
                writeln!(f, "  Participants:")?;
                for row in rows {
                    writeln!(f, "    - {}", row.email)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ListArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListArea::Loading => writeln!(f, "{LOADING_PLACEHOLDER}"),
            ListArea::Failed => writeln!(f, "{FETCH_FAILED_NOTICE}"),
            ListArea::Loaded(view) => {
                for (i, card) in view.cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{Activity, ActivityCatalog};

    fn catalog_of(entries: &[(&str, i64, &[&str])]) -> ActivityCatalog {
        entries
            .iter()
            .map(|(name, max, participants)| {
                (
                    name.to_string(),
                    Activity {
                        description: format!("{name} description"),
                        schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                        max_participants: *max,
                        participants: participants.iter().map(|s| s.to_string()).collect(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn one_card_and_one_option_per_activity_in_order() {
        let catalog = catalog_of(&[
            ("Chess Club", 12, &["a@x.com"]),
            ("Art Studio", 18, &[]),
            ("Debate Team", 16, &["b@x.com", "c@x.com"]),
        ]);

        let view = render_catalog(&catalog);

        assert_eq!(view.cards.len(), 3);
        assert_eq!(view.options.len(), 3);
        let card_names: Vec<&str> = view.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(card_names, ["Chess Club", "Art Studio", "Debate Team"]);
        for option in &view.options {
            assert_eq!(option.value, option.label);
        }
        let option_values: Vec<&str> = view.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(option_values, ["Chess Club", "Art Studio", "Debate Team"]);
    }

    #[test]
    fn empty_roster_renders_placeholder_and_no_remove_controls() {
        let catalog = catalog_of(&[("Art Studio", 18, &[])]);
        let view = render_catalog(&catalog);

        assert_eq!(
            view.cards[0].participants,
            ParticipantsSection::Placeholder(NO_PARTICIPANTS_PLACEHOLDER)
        );
    }

    #[test]
    fn each_participant_row_is_tagged_with_activity_and_email() {
        let catalog = catalog_of(&[("Debate Team", 16, &["a@x.com", "b@x.com", "c@x.com"])]);
        let view = render_catalog(&catalog);

        let ParticipantsSection::Roster(rows) = &view.cards[0].participants else {
            panic!("expected a roster");
        };
        assert_eq!(rows.len(), 3);
        for (row, email) in rows.iter().zip(["a@x.com", "b@x.com", "c@x.com"]) {
            assert_eq!(row.email, email);
            assert_eq!(row.remove.activity, "Debate Team");
            assert_eq!(row.remove.email, email);
        }
    }

    #[test]
    fn duplicate_participants_are_kept() {
        let catalog = catalog_of(&[("Gym Class", 30, &["dup@x.com", "dup@x.com"])]);
        let view = render_catalog(&catalog);

        let ParticipantsSection::Roster(rows) = &view.cards[0].participants else {
            panic!("expected a roster");
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn availability_line_reports_spots_left() {
        let catalog = catalog_of(&[("Chess Club", 10, &["a@x.com"])]);
        let view = render_catalog(&catalog);

        assert_eq!(view.cards[0].spots_left, 9);
        assert_eq!(view.cards[0].availability, "9 spots left");
    }

    #[test]
    fn availability_line_is_not_clamped_at_zero() {
        let catalog = catalog_of(&[("Tiny Club", 1, &["a@x.com", "b@x.com"])]);
        let view = render_catalog(&catalog);

        assert_eq!(view.cards[0].availability, "-1 spots left");
    }

    #[test]
    fn card_text_includes_every_field() {
        let catalog = catalog_of(&[("Chess Club", 10, &["a@x.com"])]);
        let view = render_catalog(&catalog);

        let text = view.cards[0].to_string();
        assert!(text.contains("Chess Club"));
        assert!(text.contains("Chess Club description"));
        assert!(text.contains("Schedule: Fridays, 3:30 PM - 5:00 PM"));
        assert!(text.contains("Availability: 9 spots left"));
        assert!(text.contains("- a@x.com"));
    }

    #[test]
    fn list_area_text_for_each_state() {
        assert!(ListArea::Loading.to_string().contains(LOADING_PLACEHOLDER));
        assert!(ListArea::Failed.to_string().contains(FETCH_FAILED_NOTICE));

        let loaded = ListArea::Loaded(render_catalog(&catalog_of(&[("Chess Club", 10, &[])])));
        assert!(loaded.to_string().contains("Chess Club"));
    }
}
