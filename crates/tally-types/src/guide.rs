use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 1. Catalog entities (owned by the feed)
// ==========================================

/// Streaming provider carrying a group of tracked shows.
///
/// Identity is `id`; everything else is presentation metadata passed through
/// to the header rail. Read-only inside the guide core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Upstream provider identifier.
    pub id: u64,
    /// Display name (e.g., "Hulu").
    pub name: String,
    /// Logo asset reference, if the feed supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_ref: Option<String>,
    /// Brand background color as a hex string (e.g., "#1CE783").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    /// Text color paired with `brand_color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

/// Tracked show as delivered by the feed's silver layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Upstream show identifier.
    pub id: u64,
    pub title: String,
    /// Poster asset reference, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_ref: Option<String>,
    /// Short synopsis, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Upstream community rating (0.0..=10.0), if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    /// First air date of the show itself, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<NaiveDate>,
}

/// Single aired or scheduled episode.
///
/// Belongs to exactly one show. The feed contract allows at most one episode
/// per (show, air_date); the grid tolerates violations but treats them as a
/// data-quality finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Upstream episode identifier.
    pub id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    pub title: String,
    /// Calendar air date in the feed's market timezone.
    pub air_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Watch progress as known at fetch time.
    #[serde(default)]
    pub is_watched: bool,
}

impl Episode {
    /// Conventional "S01E04" style code.
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season_number, self.episode_number)
    }
}

// ==========================================
// 2. Feed payload (wire shape of fetch_guide_window)
// ==========================================

/// One provider's slice of a fetched guide window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSchedule {
    pub provider: Provider,
    pub shows: Vec<ShowSchedule>,
}

/// One show plus the episodes the feed found inside (or near) the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSchedule {
    pub show: Show,
    pub episodes: Vec<Episode>,
}

/// Complete response of the data-fetch collaborator for one window.
///
/// Provider order is meaningful: it is the presentation order decided
/// upstream (e.g., by subscription priority) and the layout builder
/// preserves it as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideWindowPayload {
    pub providers: Vec<ProviderSchedule>,
}

impl GuideWindowPayload {
    pub fn show_count(&self) -> usize {
        self.providers.iter().map(|p| p.shows.len()).sum()
    }

    pub fn episode_count(&self) -> usize {
        self.providers
            .iter()
            .flat_map(|p| &p.shows)
            .map(|s| s.episodes.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

// ==========================================
// 3. Grid artifacts (rebuilt wholesale per load)
// ==========================================

/// One calendar-day column of the date axis.
///
/// `ordinal` is the zero-based offset from the window start and is stable
/// for the lifetime of one loaded window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateColumn {
    pub date: NaiveDate,
    pub ordinal: usize,
}

/// Reload-stable identity of a track.
///
/// Track indices shift whenever the window is rebuilt; the (provider, show)
/// pair does not. Row heights and the expansion state key on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackKey {
    pub provider_id: u64,
    pub show_id: u64,
}

/// One entity-axis row (or column) dedicated to a single show.
///
/// A show listed under two providers produces two distinct tracks; the
/// layout builder never deduplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub show: Show,
    pub provider: Provider,
    /// Position along the entity axis, assigned sequentially per build.
    pub index: usize,
}

impl Track {
    pub fn key(&self) -> TrackKey {
        TrackKey {
            provider_id: self.provider.id,
            show_id: self.show.id,
        }
    }
}

/// Merged header cell covering the contiguous tracks of one provider.
///
/// Spans never overlap and their union covers the whole track range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpan {
    pub provider: Provider,
    pub start_index: usize,
    pub end_index: usize,
}

impl GroupSpan {
    pub fn show_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, track_index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&track_index)
    }
}
