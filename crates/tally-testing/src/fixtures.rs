//! Deterministic guide payload builders.
//!
//! Integration tests compose these instead of hand-writing payload JSON so
//! the same entities keep the same ids everywhere.

use chrono::{Days, NaiveDate};
use tally_types::{Episode, GuideWindowPayload, Provider, ProviderSchedule, Show, ShowSchedule};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn days_after(base: NaiveDate, days: u64) -> NaiveDate {
    base.checked_add_days(Days::new(days)).expect("date in range")
}

pub fn days_before(base: NaiveDate, days: u64) -> NaiveDate {
    base.checked_sub_days(Days::new(days)).expect("date in range")
}

pub fn provider(id: u64, name: &str) -> Provider {
    Provider {
        id,
        name: name.to_string(),
        logo_ref: None,
        brand_color: None,
        text_color: None,
    }
}

pub fn branded_provider(id: u64, name: &str, brand_color: &str, text_color: &str) -> Provider {
    Provider {
        id,
        name: name.to_string(),
        logo_ref: None,
        brand_color: Some(brand_color.to_string()),
        text_color: Some(text_color.to_string()),
    }
}

pub fn show(id: u64, title: &str) -> Show {
    Show {
        id,
        title: title.to_string(),
        poster_ref: None,
        overview: None,
        vote_average: None,
        first_air_date: None,
    }
}

pub fn episode(id: u64, season: u32, number: u32, air: NaiveDate) -> Episode {
    Episode {
        id,
        season_number: season,
        episode_number: number,
        title: format!("Episode {}", number),
        air_date: air,
        overview: None,
        is_watched: false,
    }
}

pub fn show_schedule(show: Show, episodes: Vec<Episode>) -> ShowSchedule {
    ShowSchedule { show, episodes }
}

pub fn provider_schedule(provider: Provider, shows: Vec<ShowSchedule>) -> ProviderSchedule {
    ProviderSchedule { provider, shows }
}

pub fn payload(providers: Vec<ProviderSchedule>) -> GuideWindowPayload {
    GuideWindowPayload { providers }
}

/// Two providers, three tracks, five episodes spread around `anchor`.
///
/// The shape every CLI test starts from: Hulu carries "The Bear" and
/// "Shogun", Max carries "House of the Dragon", with air dates at the
/// anchor, a few days out on both sides, and at the default window edges.
pub fn standard_window(anchor: NaiveDate) -> GuideWindowPayload {
    payload(vec![
        provider_schedule(
            branded_provider(1, "Hulu", "#1CE783", "#040405"),
            vec![
                show_schedule(
                    show(101, "The Bear"),
                    vec![
                        episode(1013, 1, 3, days_before(anchor, 2)),
                        episode(1014, 1, 4, days_after(anchor, 5)),
                    ],
                ),
                show_schedule(show(102, "Shogun"), vec![episode(1021, 2, 1, anchor)]),
            ],
        ),
        provider_schedule(
            provider(2, "Max"),
            vec![show_schedule(
                show(201, "House of the Dragon"),
                vec![
                    episode(2012, 3, 2, days_before(anchor, 7)),
                    episode(2013, 3, 3, days_after(anchor, 14)),
                ],
            )],
        ),
    ])
}
