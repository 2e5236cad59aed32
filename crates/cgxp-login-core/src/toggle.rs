//! Pressed state of toggle buttons, exclusive within a toggle group.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum ToggleKey {
    Group(String),
    Solo(String),
}

impl ToggleKey {
    fn new(group: Option<&str>, action_id: &str) -> Self {
        group.map_or_else(
            || Self::Solo(action_id.to_string()),
            |group| Self::Group(group.to_string()),
        )
    }
}

/// Which action is pressed in each toggle group.
///
/// Ungrouped toggles form single-member groups kept apart from named groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToggleGroups {
    pressed: BTreeMap<ToggleKey, String>,
}

impl ToggleGroups {
    /// Whether `action_id` is pressed.
    #[must_use]
    pub fn is_pressed(&self, group: Option<&str>, action_id: &str) -> bool {
        self.pressed
            .get(&ToggleKey::new(group, action_id))
            .is_some_and(|pressed| pressed == action_id)
    }

    /// Flip `action_id`; pressing it releases whichever action held its group.
    ///
    /// Returns the new pressed state of `action_id`.
    pub fn toggle(&mut self, group: Option<&str>, action_id: &str) -> bool {
        if self.is_pressed(group, action_id) {
            self.release(group, action_id);
            false
        } else {
            self.pressed
                .insert(ToggleKey::new(group, action_id), action_id.to_string());
            true
        }
    }

    /// Release `action_id` if it is pressed.
    pub fn release(&mut self, group: Option<&str>, action_id: &str) {
        if self.is_pressed(group, action_id) {
            self.pressed.remove(&ToggleKey::new(group, action_id));
        }
    }
}
