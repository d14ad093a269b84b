use serde::Serialize;
use std::collections::HashMap;
use tally_types::{GroupSpan, ProviderSchedule, Track, TrackKey};

/// Entity-axis layout of one loaded window: the flat track list plus the
/// merged provider header spans.
///
/// Rebuilt wholesale per data load; never mutated in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GuideLayout {
    pub tracks: Vec<Track>,
    pub spans: Vec<GroupSpan>,
    #[serde(skip)]
    key_index: HashMap<TrackKey, usize>,
}

impl GuideLayout {
    fn new(tracks: Vec<Track>, spans: Vec<GroupSpan>) -> Self {
        let mut key_index = HashMap::with_capacity(tracks.len());
        for track in &tracks {
            // A duplicated (provider, show) pairing is an upstream defect;
            // the first occurrence claims the key.
            key_index.entry(track.key()).or_insert(track.index);
        }
        Self {
            tracks,
            spans,
            key_index,
        }
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Current index of the track identified by `key`, if it still exists.
    pub fn track_index_of(&self, key: TrackKey) -> Option<usize> {
        self.key_index.get(&key).copied()
    }

    /// Span containing `track_index`, if any.
    pub fn span_of(&self, track_index: usize) -> Option<&GroupSpan> {
        self.spans.iter().find(|s| s.contains(track_index))
    }
}

/// Build tracks and provider spans from the fetched payload.
///
/// Providers are consumed in upstream order (ordering is a presentation
/// decision made before the payload reaches the grid). Each provider with at
/// least one show contributes one contiguous run of tracks and exactly one
/// span over that run; zero-show providers contribute nothing and occupy no
/// visible row. A show listed under two providers yields two tracks.
///
/// Runs in O(total shows).
pub fn build_layout(providers: &[ProviderSchedule]) -> GuideLayout {
    let mut tracks: Vec<Track> = Vec::new();
    let mut spans: Vec<GroupSpan> = Vec::new();

    for schedule in providers {
        if schedule.shows.is_empty() {
            continue;
        }

        let start_index = tracks.len();
        for show_schedule in &schedule.shows {
            tracks.push(Track {
                show: show_schedule.show.clone(),
                provider: schedule.provider.clone(),
                index: tracks.len(),
            });
        }
        spans.push(GroupSpan {
            provider: schedule.provider.clone(),
            start_index,
            end_index: tracks.len() - 1,
        });
    }

    GuideLayout::new(tracks, spans)
}
