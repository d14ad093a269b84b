use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::sync::LazyLock;

use tally_engine::GuideSource;
use tally_types::{
    Episode, GuideWindowPayload, Provider, ProviderSchedule, Show, ShowSchedule, SourceError,
};

/// Weeks per generated season before the numbering rolls over.
const SEASON_WEEKS: i64 = 10;

struct SeedProvider {
    id: u64,
    name: &'static str,
    brand_color: &'static str,
    text_color: &'static str,
}

struct SeedShow {
    id: u64,
    provider_id: u64,
    title: &'static str,
    overview: &'static str,
    rating: f64,
    weekday: Weekday,
    premiere: NaiveDate,
}

static SEED_PROVIDERS: [SeedProvider; 4] = [
    SeedProvider {
        id: 8,
        name: "Netflix",
        brand_color: "#E50914",
        text_color: "#FFFFFF",
    },
    SeedProvider {
        id: 15,
        name: "Hulu",
        brand_color: "#1CE783",
        text_color: "#040405",
    },
    SeedProvider {
        id: 1899,
        name: "Max",
        brand_color: "#002BE7",
        text_color: "#FFFFFF",
    },
    SeedProvider {
        id: 350,
        name: "Apple TV+",
        brand_color: "#000000",
        text_color: "#FFFFFF",
    },
];

static SEED_SHOWS: LazyLock<Vec<SeedShow>> = LazyLock::new(|| {
    let premiere = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    vec![
        SeedShow {
            id: 66732,
            provider_id: 8,
            title: "Stranger Things",
            overview: "A small town keeps losing people to a place that should not exist.",
            rating: 8.6,
            weekday: Weekday::Wed,
            premiere: premiere(2024, 7, 3),
        },
        SeedShow {
            id: 119051,
            provider_id: 8,
            title: "Wednesday",
            overview: "A deadpan student solves murders her school would rather ignore.",
            rating: 8.4,
            weekday: Weekday::Wed,
            premiere: premiere(2024, 11, 6),
        },
        SeedShow {
            id: 136315,
            provider_id: 15,
            title: "The Bear",
            overview: "A fine-dining chef inherits his family's collapsing sandwich shop.",
            rating: 8.5,
            weekday: Weekday::Thu,
            premiere: premiere(2024, 6, 27),
        },
        SeedShow {
            id: 107113,
            provider_id: 15,
            title: "Only Murders in the Building",
            overview: "Three neighbors turn a death in their building into a podcast.",
            rating: 8.0,
            weekday: Weekday::Tue,
            premiere: premiere(2024, 8, 27),
        },
        SeedShow {
            id: 94997,
            provider_id: 1899,
            title: "House of the Dragon",
            overview: "A royal family argues over a chair and burns a kingdom doing it.",
            rating: 8.3,
            weekday: Weekday::Sun,
            premiere: premiere(2024, 6, 16),
        },
        SeedShow {
            id: 100088,
            provider_id: 1899,
            title: "The Last of Us",
            overview: "Two survivors cross a ruined country that keeps testing them.",
            rating: 8.7,
            weekday: Weekday::Sun,
            premiere: premiere(2025, 4, 13),
        },
        SeedShow {
            id: 95396,
            provider_id: 350,
            title: "Severance",
            overview: "Office workers cannot remember their jobs, or their lives.",
            rating: 8.7,
            weekday: Weekday::Fri,
            premiere: premiere(2025, 1, 17),
        },
        SeedShow {
            id: 95480,
            provider_id: 350,
            title: "Slow Horses",
            overview: "Failed spies handle the cases nobody wants them to touch.",
            rating: 8.2,
            weekday: Weekday::Wed,
            premiere: premiere(2024, 9, 4),
        },
    ]
});

impl SeedProvider {
    fn to_provider(&self) -> Provider {
        Provider {
            id: self.id,
            name: self.name.to_string(),
            logo_ref: None,
            brand_color: Some(self.brand_color.to_string()),
            text_color: Some(self.text_color.to_string()),
        }
    }
}

impl SeedShow {
    fn to_show(&self) -> Show {
        Show {
            id: self.id,
            title: self.title.to_string(),
            poster_ref: None,
            overview: Some(self.overview.to_string()),
            vote_average: Some(self.rating),
            first_air_date: Some(self.premiere),
        }
    }
}

/// First date on or after `date` falling on `weekday`.
fn first_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let offset =
        (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(offset)))
}

/// Weekly episodes of `seed` inside `[start, end]`, numbered from the
/// premiere so any two windows agree on the same air date.
fn episodes_between(seed: &SeedShow, start: NaiveDate, end: NaiveDate) -> Vec<Episode> {
    let mut episodes = Vec::new();
    let from = start.max(seed.premiere);
    let Some(mut current) = first_on_or_after(from, seed.weekday) else {
        return episodes;
    };
    while current <= end {
        let week = (current - seed.premiere).num_days() / 7;
        let season = (week / SEASON_WEEKS) as u32 + 1;
        let number = (week % SEASON_WEEKS) as u32 + 1;
        episodes.push(Episode {
            id: seed.id * 1_000 + week as u64,
            season_number: season,
            episode_number: number,
            title: format!("Episode {}", number),
            air_date: current,
            overview: Some(format!(
                "Season {}, episode {} of {}.",
                season, number, seed.title
            )),
            is_watched: number == 1,
        });
        match current.checked_add_days(Days::new(7)) {
            Some(next) => current = next,
            None => break,
        }
    }
    episodes
}

/// Deterministic offline guide data.
///
/// The same window request always yields the same payload: each seeded show
/// airs weekly from its premiere, seasons roll over every ten episodes, and
/// no clock or network is involved. This is what `--sample` serves and what
/// `init` seeds a fresh data directory from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> Self {
        Self
    }
}

impl GuideSource for SampleSource {
    fn fetch_guide_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        _country: &str,
    ) -> std::result::Result<GuideWindowPayload, SourceError> {
        let providers = SEED_PROVIDERS
            .iter()
            .map(|seed_provider| ProviderSchedule {
                provider: seed_provider.to_provider(),
                shows: SEED_SHOWS
                    .iter()
                    .filter(|s| s.provider_id == seed_provider.id)
                    .map(|seed| ShowSchedule {
                        show: seed.to_show(),
                        episodes: episodes_between(seed, start, end),
                    })
                    .collect(),
            })
            .collect();
        Ok(GuideWindowPayload { providers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fetch(start: NaiveDate, end: NaiveDate) -> GuideWindowPayload {
        SampleSource::new()
            .fetch_guide_window(start, end, "US")
            .unwrap()
    }

    #[test]
    fn identical_requests_yield_identical_payloads() {
        let a = fetch(date(2026, 8, 3), date(2026, 8, 24));
        let b = fetch(date(2026, 8, 3), date(2026, 8, 24));

        assert_eq!(a, b);
        assert!(a.episode_count() > 0);
    }

    #[test]
    fn episodes_stay_inside_the_range_on_their_weekday() {
        let start = date(2026, 8, 3);
        let end = date(2026, 8, 24);
        let payload = fetch(start, end);

        for schedule in &payload.providers {
            for show_schedule in &schedule.shows {
                let seed = SEED_SHOWS
                    .iter()
                    .find(|s| s.id == show_schedule.show.id)
                    .expect("every show comes from the seed table");
                for episode in &show_schedule.episodes {
                    assert!(episode.air_date >= start && episode.air_date <= end);
                    assert_eq!(episode.air_date.weekday(), seed.weekday);
                }
            }
        }
    }

    #[test]
    fn overlapping_windows_agree_on_shared_dates() {
        let a = fetch(date(2026, 8, 3), date(2026, 8, 24));
        let b = fetch(date(2026, 8, 10), date(2026, 9, 7));

        let episodes = |p: &GuideWindowPayload| {
            p.providers
                .iter()
                .flat_map(|s| &s.shows)
                .flat_map(|s| &s.episodes)
                .cloned()
                .collect::<Vec<_>>()
        };
        let from_a = episodes(&a);
        for episode in episodes(&b) {
            if let Some(twin) = from_a.iter().find(|e| e.id == episode.id) {
                assert_eq!(*twin, episode);
            }
        }
    }

    #[test]
    fn seasons_roll_over_every_ten_weeks() {
        // Severance week 9 and week 10 after its 2025-01-17 premiere.
        let payload = fetch(date(2025, 3, 21), date(2025, 3, 28));

        let severance = payload
            .providers
            .iter()
            .flat_map(|s| &s.shows)
            .find(|s| s.show.id == 95396)
            .unwrap();

        let codes: Vec<String> = severance.episodes.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["S01E10", "S02E01"]);
    }

    #[test]
    fn nothing_airs_before_a_premiere() {
        // Window straddles The Last of Us premiere on 2025-04-13.
        let payload = fetch(date(2025, 4, 1), date(2025, 4, 20));

        let last_of_us = payload
            .providers
            .iter()
            .flat_map(|s| &s.shows)
            .find(|s| s.show.id == 100088)
            .unwrap();

        assert_eq!(last_of_us.episodes.len(), 2);
        assert_eq!(last_of_us.episodes[0].air_date, date(2025, 4, 13));
        assert_eq!(last_of_us.episodes[0].code(), "S01E01");
        assert!(last_of_us.episodes[0].is_watched);
        assert_eq!(last_of_us.episodes[1].code(), "S01E02");
        assert!(!last_of_us.episodes[1].is_watched);
    }
}
