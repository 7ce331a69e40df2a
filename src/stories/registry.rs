//! Story registry for the catalog screen.

use crate::sample::{story_users, user_columns, User};
use crate::ui::{DataTable, FieldSize, FieldVariant, InputField};

/// Label shared by all input field stories.
const FIELD_LABEL: &str = "Email Address";

/// Placeholder shared by all input field stories.
const FIELD_PLACEHOLDER: &str = "Enter your email";

/// The widget a story belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// The input field.
    InputField,
    /// The data table.
    DataTable,
}

impl Component {
    /// Every component, in catalog order.
    pub const ALL: [Component; 2] = [Component::InputField, Component::DataTable];

    /// Get the display name for this component.
    pub fn display(&self) -> &'static str {
        match self {
            Self::InputField => "InputField",
            Self::DataTable => "DataTable",
        }
    }
}

/// A widget instantiated from a story preset.
#[derive(Debug)]
pub enum StoryWidget {
    /// An input field preset.
    Field(InputField),
    /// A data table preset.
    Table(DataTable<User>),
}

/// A named widget preset.
#[derive(Debug, Clone)]
pub struct Story {
    /// Unique identifier, `component/story-name`.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// The widget this story shows.
    pub component: Component,
    /// What the preset demonstrates.
    pub description: &'static str,
    /// Builds the widget for this story.
    preset: fn() -> StoryWidget,
}

impl Story {
    /// Instantiate the widget for this story.
    pub fn build(&self) -> StoryWidget {
        (self.preset)()
    }
}

fn field() -> InputField {
    InputField::new()
        .with_label(FIELD_LABEL)
        .with_placeholder(FIELD_PLACEHOLDER)
}

fn table() -> DataTable<User> {
    DataTable::new(story_users(), user_columns())
}

/// Registry of all stories.
#[derive(Debug, Clone)]
pub struct StoryRegistry {
    stories: Vec<Story>,
}

impl StoryRegistry {
    /// Create the registry with every built-in story.
    pub fn new() -> Self {
        let stories = vec![
            Story {
                id: "input-field/default",
                title: "Default",
                component: Component::InputField,
                description: "Outlined, medium, empty",
                preset: || StoryWidget::Field(field()),
            },
            Story {
                id: "input-field/invalid-state",
                title: "Invalid State",
                component: Component::InputField,
                description: "Invalid with error text",
                preset: || {
                    StoryWidget::Field(
                        field()
                            .with_invalid(true)
                            .with_error_text("Please enter a valid email address."),
                    )
                },
            },
            Story {
                id: "input-field/disabled-state",
                title: "Disabled State",
                component: Component::InputField,
                description: "Rejects edits",
                preset: || StoryWidget::Field(field().with_disabled(true)),
            },
            Story {
                id: "input-field/filled-variant",
                title: "Filled Variant",
                component: Component::InputField,
                description: "Shaded background",
                preset: || StoryWidget::Field(field().with_variant(FieldVariant::Filled)),
            },
            Story {
                id: "input-field/small-size",
                title: "Small Size",
                component: Component::InputField,
                description: "No padding",
                preset: || StoryWidget::Field(field().with_size(FieldSize::Small)),
            },
            Story {
                id: "input-field/large-size",
                title: "Large Size",
                component: Component::InputField,
                description: "Extra padding",
                preset: || StoryWidget::Field(field().with_size(FieldSize::Large)),
            },
            Story {
                id: "input-field/ghost-variant",
                title: "Ghost Variant",
                component: Component::InputField,
                description: "Underline only",
                preset: || StoryWidget::Field(field().with_variant(FieldVariant::Ghost)),
            },
            Story {
                id: "data-table/default",
                title: "Default",
                component: Component::DataTable,
                description: "Sortable by name and role",
                preset: || StoryWidget::Table(table()),
            },
            Story {
                id: "data-table/with-row-selection",
                title: "With Row Selection",
                component: Component::DataTable,
                description: "Checkbox column and select-all",
                preset: || StoryWidget::Table(table().with_selectable(true)),
            },
            Story {
                id: "data-table/loading-state",
                title: "Loading State",
                component: Component::DataTable,
                description: "Spinner instead of rows",
                preset: || StoryWidget::Table(table().with_loading(true)),
            },
            Story {
                id: "data-table/empty-state",
                title: "Empty State",
                component: Component::DataTable,
                description: "No records",
                preset: || {
                    StoryWidget::Table(DataTable::new(Vec::<User>::new(), user_columns()))
                },
            },
        ];

        Self { stories }
    }

    /// Every story in catalog order.
    pub fn all(&self) -> &[Story] {
        &self.stories
    }

    /// Look up a story by id.
    pub fn get(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Position of a story in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.stories.iter().position(|s| s.id == id)
    }

    /// Stories for one component, in catalog order.
    pub fn for_component(&self, component: Component) -> Vec<&Story> {
        self.stories
            .iter()
            .filter(|s| s.component == component)
            .collect()
    }

    /// Search stories by id, title and component.
    ///
    /// Returns matches sorted by relevance (highest first); ties keep catalog
    /// order. An empty query returns every story.
    pub fn search(&self, query: &str) -> Vec<&Story> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.stories.iter().collect();
        }
        let mut results: Vec<(&Story, i32)> = self
            .stories
            .iter()
            .filter_map(|story| {
                let score = Self::match_score(story, &query);
                (score > 0).then_some((story, score))
            })
            .collect();
        results.sort_by(|a, b| b.1.cmp(&a.1));
        results.into_iter().map(|(story, _)| story).collect()
    }

    fn match_score(story: &Story, query: &str) -> i32 {
        let mut score = 0;
        let title = story.title.to_lowercase();
        if title == query {
            score += 200;
        } else if title.starts_with(query) {
            score += 150;
        } else if title.contains(query) {
            score += 100;
        }
        if story.id.contains(query) {
            score += 50;
        }
        if story.component.display().to_lowercase().contains(query) {
            score += 25;
        }
        if story.description.to_lowercase().contains(query) {
            score += 10;
        }
        score
    }
}

impl Default for StoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::{FieldMessage, TableViewState};

    #[test]
    fn test_registry_lists_every_story() {
        let registry = StoryRegistry::new();
        assert_eq!(registry.all().len(), 11);
        assert_eq!(registry.for_component(Component::InputField).len(), 7);
        assert_eq!(registry.for_component(Component::DataTable).len(), 4);
    }

    #[test]
    fn test_components_cover_catalog() {
        let registry = StoryRegistry::new();
        let grouped: usize = Component::ALL
            .iter()
            .map(|&c| registry.for_component(c).len())
            .sum();
        assert_eq!(grouped, registry.all().len());
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = StoryRegistry::new();
        for (i, story) in registry.all().iter().enumerate() {
            assert_eq!(registry.position(story.id), Some(i));
        }
    }

    #[test]
    fn test_get_unknown_story() {
        assert!(StoryRegistry::new().get("button/default").is_none());
    }

    #[test]
    fn test_invalid_story_shows_error() {
        let registry = StoryRegistry::new();
        let StoryWidget::Field(field) = registry.get("input-field/invalid-state").unwrap().build()
        else {
            panic!("expected a field story");
        };
        assert_eq!(
            field.message(),
            FieldMessage::Error("Please enter a valid email address.")
        );
        assert_eq!(field.label(), FIELD_LABEL);
    }

    #[test]
    fn test_table_story_states() {
        let registry = StoryRegistry::new();
        let state = |id: &str| match registry.get(id).unwrap().build() {
            StoryWidget::Table(table) => table.view_state(),
            StoryWidget::Field(_) => panic!("expected a table story"),
        };
        assert_eq!(state("data-table/default"), TableViewState::Content);
        assert_eq!(state("data-table/loading-state"), TableViewState::Loading);
        assert_eq!(state("data-table/empty-state"), TableViewState::Empty);

        let StoryWidget::Table(table) =
            registry.get("data-table/with-row-selection").unwrap().build()
        else {
            panic!("expected a table story");
        };
        assert!(table.is_selectable());
    }

    #[test]
    fn test_search_ranks_title_matches_first() {
        let registry = StoryRegistry::new();
        let results = registry.search("loading");
        assert_eq!(results[0].id, "data-table/loading-state");

        let results = registry.search("variant");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|s| s.component == Component::InputField));
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let registry = StoryRegistry::new();
        assert_eq!(registry.search("  ").len(), registry.all().len());
        assert!(registry.search("zzz").is_empty());
    }
}
