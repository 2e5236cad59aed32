//! App-wide yewdux store slices.
//!
//! # Design
//! - Toggle state is shared so buttons in one toggle group release each other.
//! - Permalinks are published by the host page and read at redirect time.

use cgxp_login_core::{StaticPermalinks, ToggleGroups};
use yewdux::store::Store;

/// Pressed state of every toggle button on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct ToggleStore {
    /// Pressed action per toggle group.
    pub groups: ToggleGroups,
}

/// Permalinks published by sibling tools, keyed by tool id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct PermalinkStore {
    /// Current permalink per tool id.
    pub links: StaticPermalinks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgxp_login_core::ToolRegistry;

    #[test]
    fn stores_start_empty() {
        assert!(!ToggleStore::default().groups.is_pressed(None, "login"));
        assert!(PermalinkStore::default().links.permalink("permalink").is_none());
    }
}
