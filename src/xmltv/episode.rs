//! Episode numbering for XMLTV programmes
//!
//! A programme can carry several `<episode-num>` elements, each in its own
//! numbering system. `dd_progid` is derived from the program id alone; the
//! remaining systems come from season/episode data or, failing that, from the
//! New York civil date of the airing.

use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;
use strum::{AsRefStr, Display};

use crate::models::Event;
use crate::utils::time::{LISTINGS_TIMEZONE, civil_date_in_zone};

/// Two characters, eight digits, four digits
static DD_PROGID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.{2}[0-9]{8})([0-9]{4})$").ok());

/// Genres for which only `dd_progid` numbering is emitted
const UNNUMBERED_GENRES: [&str; 2] = ["movie", "sports"];

/// Episode numbering systems, rendered as the `system` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum EpisodeSystem {
    #[strum(serialize = "dd_progid")]
    DdProgid,
    #[strum(serialize = "onscreen")]
    Onscreen,
    #[strum(serialize = "common")]
    Common,
    #[strum(serialize = "xmltv_ns")]
    XmltvNs,
}

/// One `<episode-num>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeNum {
    pub system: EpisodeSystem,
    pub value: String,
}

impl EpisodeNum {
    fn new(system: EpisodeSystem, value: impl Into<String>) -> Self {
        Self {
            system,
            value: value.into(),
        }
    }
}

/// `XX########.####` form of a program id, if it has the expected shape
pub fn dd_progid(program_id: &str) -> Option<String> {
    DD_PROGID_PATTERN
        .as_ref()?
        .captures(program_id)
        .map(|caps| format!("{}.{}", &caps[1], &caps[2]))
}

/// Reads an optionally signed run of leading digits, ignoring whatever
/// follows (`"5a"` reads as 5, `"pilot"` as nothing)
fn parse_number(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}

fn has_unnumbered_genre(event: &Event) -> bool {
    event.program.genres.iter().any(|genre| {
        UNNUMBERED_GENRES
            .iter()
            .any(|skip| genre.eq_ignore_ascii_case(skip))
    })
}

/// Season/episode or date based numbering; `None` for the `xmltv_ns` slot
/// when it cannot be derived.
fn series_numbers(event: &Event) -> (Vec<EpisodeNum>, Option<EpisodeNum>) {
    let program = &event.program;

    match (program.season.as_deref(), program.episode.as_deref()) {
        (Some(season), Some(episode)) => {
            let onscreen = format!("S{season:0>2}E{episode:0>2}");
            let numbers = vec![
                EpisodeNum::new(EpisodeSystem::Onscreen, onscreen.clone()),
                EpisodeNum::new(EpisodeSystem::Common, onscreen),
            ];
            let xmltv_ns = match (parse_number(season), parse_number(episode)) {
                (Some(s), Some(e)) if s >= 1 && e >= 1 => Some(EpisodeNum::new(
                    EpisodeSystem::XmltvNs,
                    format!("{}.{}.", s - 1, e - 1),
                )),
                _ => None,
            };
            (numbers, xmltv_ns)
        }
        (None, Some(episode)) => {
            let xmltv_ns = parse_number(episode).map(|e| {
                let year = civil_date_in_zone(event.start_instant(), LISTINGS_TIMEZONE).year();
                EpisodeNum::new(
                    EpisodeSystem::XmltvNs,
                    format!("{}.{}.0/1", year - 1, e - 1),
                )
            });
            (Vec::new(), xmltv_ns)
        }
        (_, None) if !program.id.is_empty() => {
            let date = civil_date_in_zone(event.start_instant(), LISTINGS_TIMEZONE);
            let mmdd = date.month() * 100 + date.day();
            let xmltv_ns = EpisodeNum::new(
                EpisodeSystem::XmltvNs,
                format!("{}.{:04}.", date.year() - 1, mmdd - 1),
            );
            (Vec::new(), Some(xmltv_ns))
        }
        _ => (Vec::new(), None),
    }
}

/// Ordered `<episode-num>` elements for an event
///
/// `dd_progid` leads, followed by `onscreen` and `common`; `xmltv_ns` is
/// last unless `prioritize_xmltv_ns` moves it to the front.
pub fn episode_numbers(event: &Event, prioritize_xmltv_ns: bool) -> Vec<EpisodeNum> {
    let mut numbers: Vec<EpisodeNum> = dd_progid(&event.program.id)
        .map(|value| EpisodeNum::new(EpisodeSystem::DdProgid, value))
        .into_iter()
        .collect();

    if has_unnumbered_genre(event) {
        return numbers;
    }

    let (series, xmltv_ns) = series_numbers(event);
    numbers.extend(series);

    if let Some(xmltv_ns) = xmltv_ns {
        if prioritize_xmltv_ns {
            numbers.insert(0, xmltv_ns);
        } else {
            numbers.push(xmltv_ns);
        }
    }

    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Program;
    use rstest::rstest;

    fn event(id: &str, season: Option<&str>, episode: Option<&str>, start: &str) -> Event {
        Event {
            start_time: start.to_string(),
            program: Program {
                id: id.to_string(),
                season: season.map(str::to_string),
                episode: episode.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn rendered(numbers: &[EpisodeNum]) -> Vec<String> {
        numbers
            .iter()
            .map(|n| format!("{}={}", n.system, n.value))
            .collect()
    }

    #[rstest]
    #[case("EP123456780123", Some("EP12345678.0123"))]
    #[case("SH000000010000", Some("SH00000001.0000"))]
    #[case("MV012345670000", Some("MV01234567.0000"))]
    #[case("EP12345678012", None)]
    #[case("EP1234567801234", None)]
    #[case("EPX23456780123", None)]
    #[case("", None)]
    fn test_dd_progid(#[case] id: &str, #[case] expected: Option<&str>) {
        assert_eq!(dd_progid(id).as_deref(), expected);
    }

    #[test]
    fn test_season_and_episode() {
        let numbers = episode_numbers(
            &event("EP123456780123", Some("1"), Some("5"), "2024-05-20T04:00Z"),
            false,
        );
        assert_eq!(
            rendered(&numbers),
            vec![
                "dd_progid=EP12345678.0123",
                "onscreen=S01E05",
                "common=S01E05",
                "xmltv_ns=0.4.",
            ]
        );
    }

    #[test]
    fn test_prioritized_xmltv_ns_leads() {
        let numbers = episode_numbers(
            &event("EP123456780123", Some("1"), Some("5"), "2024-05-20T04:00Z"),
            true,
        );
        assert_eq!(
            rendered(&numbers),
            vec![
                "xmltv_ns=0.4.",
                "dd_progid=EP12345678.0123",
                "onscreen=S01E05",
                "common=S01E05",
            ]
        );
    }

    #[rstest]
    #[case::zero_season("0", "3")]
    #[case::non_numeric("Special", "3")]
    fn test_onscreen_without_xmltv_ns(#[case] season: &str, #[case] episode: &str) {
        let numbers = episode_numbers(
            &event("XX", Some(season), Some(episode), "2024-05-20T04:00Z"),
            false,
        );
        assert!(numbers.iter().all(|n| n.system != EpisodeSystem::XmltvNs));
        assert_eq!(numbers.len(), 2);
    }

    #[rstest]
    #[case("5", Some(5))]
    #[case(" 12 ", Some(12))]
    #[case("5a", Some(5))]
    #[case("+3", Some(3))]
    #[case("-2", Some(-2))]
    #[case("3.5", Some(3))]
    #[case("a5", None)]
    #[case("-", None)]
    #[case("", None)]
    fn test_parse_number_reads_leading_digits(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_number(input), expected);
    }

    #[test]
    fn test_episode_with_trailing_text() {
        let numbers = episode_numbers(
            &event("XX", Some("1"), Some("5a"), "2024-05-20T04:00Z"),
            false,
        );
        assert_eq!(
            rendered(&numbers),
            vec!["onscreen=S01E5a", "common=S01E5a", "xmltv_ns=0.4."]
        );
    }

    #[test]
    fn test_long_season_is_not_truncated() {
        let numbers = episode_numbers(
            &event("XX", Some("2024"), Some("117"), "2024-05-20T04:00Z"),
            false,
        );
        assert_eq!(numbers[0].value, "S2024E117");
        assert_eq!(numbers[2].value, "2023.116.");
    }

    #[test]
    fn test_episode_without_season_uses_new_york_year() {
        // 03:00 UTC on New Year's Day is still the previous year in New York
        let numbers = episode_numbers(
            &event("SH000000010000", None, Some("12"), "2024-01-01T03:00Z"),
            false,
        );
        assert_eq!(
            rendered(&numbers),
            vec!["dd_progid=SH00000001.0000", "xmltv_ns=2022.11.0/1"]
        );
    }

    #[test]
    fn test_non_numeric_episode_without_season_is_dropped() {
        let numbers = episode_numbers(&event("XX", None, Some("pilot"), "2024-05-20T04:00Z"), false);
        assert!(numbers.is_empty());
    }

    #[rstest]
    #[case::new_years_day("2024-01-01T17:00Z", "2023.0100.")]
    #[case::spring("2024-05-20T16:00Z", "2023.0519.")]
    #[case::late_evening_utc_rollover("2024-12-01T02:00Z", "2023.1129.")]
    fn test_date_based_numbering(#[case] start: &str, #[case] expected: &str) {
        let numbers = episode_numbers(&event("SH0000", None, None, start), false);
        assert_eq!(rendered(&numbers), vec![format!("xmltv_ns={expected}")]);
    }

    #[test]
    fn test_date_based_numbering_applies_with_season_only() {
        let numbers = episode_numbers(
            &event("SH0000", Some("3"), None, "2024-05-20T16:00Z"),
            false,
        );
        assert_eq!(rendered(&numbers), vec!["xmltv_ns=2023.0519."]);
    }

    #[test]
    fn test_no_numbering_without_program_id_or_episode() {
        let numbers = episode_numbers(&event("", None, None, "2024-05-20T16:00Z"), false);
        assert!(numbers.is_empty());
    }

    #[rstest]
    #[case::movie("movie")]
    #[case::sports("sports")]
    fn test_movie_and_sports_keep_only_dd_progid(#[case] genre: &str) {
        let mut event = event("MV012345670000", Some("1"), Some("5"), "2024-05-20T04:00Z");
        event.program.genres.insert(genre.to_string());
        event.program.genres.insert("drama".to_string());

        let numbers = episode_numbers(&event, true);
        assert_eq!(rendered(&numbers), vec!["dd_progid=MV01234567.0000"]);
    }
}
