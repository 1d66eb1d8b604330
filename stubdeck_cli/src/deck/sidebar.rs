//! Collapsible navigation sidebar

use super::prefs::PreferenceStore;
use stubdeck_common::constants::SIDEBAR_COLLAPSED_KEY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sidebar {
    collapsed: bool,
}

impl Sidebar {
    /// Read the persisted state; storage failures leave the sidebar expanded
    pub fn restore(store: &impl PreferenceStore) -> Self {
        let collapsed = match store.get_item(SIDEBAR_COLLAPSED_KEY) {
            Ok(value) => value.as_deref() == Some("1"),
            Err(e) => {
                tracing::debug!("Could not read sidebar preference: {}", e);
                false
            }
        };
        Self { collapsed }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Invert and persist; storage failures are ignored
    pub fn toggle(&mut self, store: &mut impl PreferenceStore) -> bool {
        self.collapsed = !self.collapsed;
        let value = if self.collapsed { "1" } else { "0" };
        if let Err(e) = store.set_item(SIDEBAR_COLLAPSED_KEY, value) {
            tracing::debug!("Could not persist sidebar preference: {}", e);
        }
        self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::prefs::MemoryStore;

    #[test]
    fn test_toggle_persists() {
        let mut store = MemoryStore::default();
        let mut sidebar = Sidebar::restore(&store);
        assert!(!sidebar.is_collapsed());

        assert!(sidebar.toggle(&mut store));
        assert_eq!(store.items[SIDEBAR_COLLAPSED_KEY], "1");

        assert!(!sidebar.toggle(&mut store));
        assert_eq!(store.items[SIDEBAR_COLLAPSED_KEY], "0");
    }

    #[test]
    fn test_restore() {
        let mut store = MemoryStore::default();
        store.items.insert(SIDEBAR_COLLAPSED_KEY.to_string(), "1".to_string());
        assert!(Sidebar::restore(&store).is_collapsed());

        store.items.insert(SIDEBAR_COLLAPSED_KEY.to_string(), "0".to_string());
        assert!(!Sidebar::restore(&store).is_collapsed());
    }

    #[test]
    fn test_broken_storage_is_ignored() {
        let mut store = MemoryStore::broken();
        let mut sidebar = Sidebar::restore(&store);
        assert!(!sidebar.is_collapsed());
        assert!(sidebar.toggle(&mut store));
        assert!(sidebar.is_collapsed());
    }
}
