//! Genre inference for grid listings.
//!
//! The grid API only sometimes carries explicit genres. Most airings instead
//! carry filter tags such as `filter-comedy`, and a bare episodic listing
//! carries nothing but a series id. The normalizer folds all of these into
//! one lowercase genre set per program.

use std::collections::BTreeSet;

use crate::models::Event;

const FILTER_PREFIX: &str = "filter-";

/// Genre assigned to non-movie listings that belong to a series but have no
/// other genre information.
pub const SERIES_GENRE: &str = "series";

/// Strip a leading `filter-` prefix, case-insensitively
fn strip_filter_prefix(tag: &str) -> &str {
    match tag.get(..FILTER_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(FILTER_PREFIX) => &tag[FILTER_PREFIX.len()..],
        _ => tag,
    }
}

/// Derive the genre set for an event without modifying it
pub fn infer_genres(event: &Event) -> BTreeSet<String> {
    let program = &event.program;

    let mut genres: BTreeSet<String> = program
        .genres
        .iter()
        .map(|genre| genre.to_lowercase())
        .filter(|genre| !genre.is_empty())
        .collect();

    for tag in &event.filter {
        let genre = strip_filter_prefix(tag).to_lowercase();
        if !genre.is_empty() {
            genres.insert(genre);
        }
    }

    if genres.is_empty() && !program.is_movie() {
        let belongs_to_series = program
            .series_id
            .as_deref()
            .is_some_and(|id| !id.is_empty() && id != "0");
        if belongs_to_series {
            genres.insert(SERIES_GENRE.to_string());
        }
    }

    genres
}

/// Populate the event's program genres in place
///
/// Re-running on an already normalized event leaves the set unchanged.
pub fn normalize_genres(event: &mut Event) {
    event.program.genres = infer_genres(event);
}

/// Consume an event and return it with its genres populated
pub fn normalize(mut event: Event) -> Event {
    normalize_genres(&mut event);
    event
}
