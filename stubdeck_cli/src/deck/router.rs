//! Hash-fragment routing between the console views

/// Console views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Mocks,
    Create,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Mocks, View::Create];

    /// Hash fragment addressing this view
    pub fn hash(&self) -> &'static str {
        match self {
            View::Home => "#home",
            View::Mocks => "#mocks",
            View::Create => "#create",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Mocks => "Mocks",
            View::Create => "Create",
        }
    }
}

/// Result of routing one hash
///
/// `view` is what the hash resolves to, with "home" as the fallback. A
/// container is only shown when the fragment names it exactly, so an
/// unknown fragment resolves to home yet shows nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    fragment: String,
    view: View,
    matched: bool,
}

impl Route {
    pub fn from_hash(hash: &str) -> Self {
        let hash = if hash.is_empty() { View::Home.hash() } else { hash };
        let fragment = hash.split_once('?').map_or(hash, |(fragment, _)| fragment);

        let matched = View::ALL.into_iter().find(|view| view.hash() == fragment);

        Self {
            fragment: fragment.to_string(),
            view: matched.unwrap_or(View::Home),
            matched: matched.is_some(),
        }
    }

    /// Fragment without any `?query` suffix
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Whether the container for `view` is shown
    pub fn is_visible(&self, view: View) -> bool {
        self.matched && self.view == view
    }

    /// Whether the navigation entry for `view` is highlighted
    pub fn is_active(&self, view: View) -> bool {
        self.is_visible(view)
    }

    /// Entering the mappings view reloads the list
    pub fn triggers_refresh(&self) -> bool {
        self.is_visible(View::Mocks)
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::from_hash("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_view(hash: &str) -> View {
        Route::from_hash(hash).view()
    }

    #[test]
    fn test_known_hashes() {
        assert_eq!(resolve_view("#home"), View::Home);
        assert_eq!(resolve_view("#mocks"), View::Mocks);
        assert_eq!(resolve_view("#create"), View::Create);
    }

    #[test]
    fn test_query_suffix_ignored() {
        let route = Route::from_hash("#mocks?filter=users");
        assert_eq!(route.fragment(), "#mocks");
        assert_eq!(route.view(), View::Mocks);
        assert!(route.triggers_refresh());
    }

    #[test]
    fn test_unknown_hashes_resolve_home() {
        for hash in ["#bogus", "#Mocks", "#mocks/1", "mocks", "#", "?x=1", "#bogus?mocks"] {
            assert_eq!(resolve_view(hash), View::Home, "hash {:?}", hash);
        }
    }

    #[test]
    fn test_empty_hash_shows_home() {
        let route = Route::from_hash("");
        assert_eq!(route.fragment(), "#home");
        assert!(route.is_visible(View::Home));
        assert!(route.is_active(View::Home));
        assert!(!route.is_visible(View::Mocks));
    }

    #[test]
    fn test_unknown_hash_hides_every_view() {
        let route = Route::from_hash("#bogus");
        assert_eq!(route.view(), View::Home);
        for view in View::ALL {
            assert!(!route.is_visible(view));
            assert!(!route.is_active(view));
        }
        assert!(!route.triggers_refresh());
    }

    #[test]
    fn test_exactly_one_view_visible_for_known_hash() {
        for target in View::ALL {
            let route = Route::from_hash(target.hash());
            let visible: Vec<_> = View::ALL
                .into_iter()
                .filter(|v| route.is_visible(*v))
                .collect();
            assert_eq!(visible, vec![target]);
        }
    }
}
