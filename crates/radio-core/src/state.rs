//! BrowserState — the single state container behind the station browser view.
//!
//! Owned by the view; every mutation goes through a method here and the
//! derived `filtered_view` is recomputed synchronously before it returns.
//! Nothing in here is persisted.

use crate::directory::trending_subset;
use crate::favorites::Favorites;
use crate::filter::{extract_categories, filter_stations, CATEGORY_LIMIT};
use crate::station::Station;

/// Which station set the filter criteria apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Explore,
    Favorites,
    Trending,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Explore, ViewMode::Favorites, ViewMode::Trending];

    pub fn label(self) -> &'static str {
        match self {
            Self::Explore => "Explore",
            Self::Favorites => "Favorites",
            Self::Trending => "Trending",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    all_stations: Vec<Station>,
    filtered_view: Vec<Station>,
    search_text: String,
    selected_category: String,
    favorites: Favorites,
    trending: Vec<Station>,
    trending_names: Vec<String>,
    categories: Vec<String>,
    category_limit: usize,
    mode: ViewMode,
    now_playing: Option<Station>,
}

impl BrowserState {
    pub fn new(trending_names: Vec<String>) -> Self {
        Self {
            all_stations: Vec::new(),
            filtered_view: Vec::new(),
            search_text: String::new(),
            selected_category: String::new(),
            favorites: Favorites::new(),
            trending: Vec::new(),
            trending_names,
            categories: Vec::new(),
            category_limit: CATEGORY_LIMIT,
            mode: ViewMode::Explore,
            now_playing: None,
        }
    }

    pub fn with_category_limit(mut self, limit: usize) -> Self {
        self.category_limit = limit;
        self
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Install a freshly loaded station set.
    ///
    /// Stations without a stream URL are dropped here as well, so the working
    /// set never holds unplayable entries whatever the caller passes in.
    pub fn load(&mut self, stations: Vec<Station>) {
        self.all_stations = stations.into_iter().filter(|s| !s.url.is_empty()).collect();
        self.trending = trending_subset(&self.all_stations, &self.trending_names);
        self.categories = extract_categories(&self.all_stations, self.category_limit);
        self.recompute();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search_text {
            self.search_text = text;
            self.recompute();
        }
    }

    /// Empty string means "All Categories".
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if category != self.selected_category {
            self.selected_category = category;
            self.recompute();
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.recompute();
    }

    /// Toggle `station` in favorites.  Returns `true` if it is now a favorite.
    pub fn toggle_favorite(&mut self, station: &Station) -> bool {
        let now_fav = self.favorites.toggle(station);
        if self.mode == ViewMode::Favorites {
            self.recompute();
        }
        now_fav
    }

    /// Make `station` the now-playing station, replacing any previous one.
    pub fn select(&mut self, station: Station) {
        self.now_playing = Some(station);
    }

    fn recompute(&mut self) {
        let q = self.search_text.as_str();
        let c = self.selected_category.as_str();
        self.filtered_view = match self.mode {
            ViewMode::Explore => filter_stations(&self.all_stations, q, c),
            ViewMode::Favorites => filter_stations(&self.favorites, q, c),
            ViewMode::Trending => filter_stations(&self.trending, q, c),
        };
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn all_stations(&self) -> &[Station] {
        &self.all_stations
    }

    pub fn filtered_view(&self) -> &[Station] {
        &self.filtered_view
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn trending(&self) -> &[Station] {
        &self.trending
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn now_playing(&self) -> Option<&Station> {
        self.now_playing.as_ref()
    }

    pub fn is_now_playing(&self, id: &str) -> bool {
        self.now_playing.as_ref().map_or(false, |s| s.id == id)
    }

    /// True when there is nothing to show.
    pub fn is_empty_view(&self) -> bool {
        self.filtered_view.is_empty()
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
