use serde::Deserialize;

/// One record as returned by the radio-browser `stations/*` endpoints.
///
/// Every field is optional: the directory is crowd-sourced and records with
/// `null` or missing fields are common.  Nothing here is trusted until it has
/// gone through [`retain_playable`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStation {
    #[serde(default)]
    pub stationuuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Comma-separated genre/category labels, e.g. `"pop,hindi,bollywood"`.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub url_resolved: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// A playable station in the working set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Station {
    /// Directory identifier (`stationuuid`).
    pub id: String,
    pub name: String,
    /// Raw comma-separated tag string; empty when the directory had none.
    pub tags: String,
    /// Resolved, directly playable stream URL.  Never empty.
    pub url: String,
    pub favicon: Option<String>,
    pub country: String,
    pub language: String,
    pub codec: String,
    pub bitrate: u32,
    pub homepage: String,
}

impl Station {
    /// Tag string for display, with the same fallback the cards use.
    pub fn genre_label(&self) -> &str {
        if self.tags.trim().is_empty() {
            "Unknown Genre"
        } else {
            &self.tags
        }
    }

    /// Individual tags, trimmed, empties dropped.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}

impl RawStation {
    /// Convert into a [`Station`], or `None` when there is no resolved stream URL.
    pub fn into_station(self) -> Option<Station> {
        let url = self.url_resolved.filter(|u| !u.is_empty())?;
        let id = self
            .stationuuid
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| url.clone());
        Some(Station {
            id,
            name: self.name.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            favicon: self.favicon.filter(|f| !f.trim().is_empty()),
            country: self.country.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            codec: self.codec.unwrap_or_default(),
            bitrate: self.bitrate.unwrap_or(0),
            homepage: self.homepage.unwrap_or_default(),
            url,
        })
    }
}

/// Drop every record without a resolved stream URL, preserving order.
pub fn retain_playable(raw: Vec<RawStation>) -> Vec<Station> {
    raw.into_iter().filter_map(RawStation::into_station).collect()
}
