use crate::types::{MonthlyAverage, ParkSummary, Review};
use crate::util::{mean, round2};
use chrono::Month;
use log::debug;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

pub const DEFAULT_TOP_N: usize = 10;

pub fn reviews_by_park<'a>(data: &'a [Review], park: &str) -> Vec<&'a Review> {
    data.iter().filter(|r| r.park_matches(park)).collect()
}

pub fn count_by_park_and_location(data: &[Review], park: &str, location: &str) -> usize {
    data.iter()
        .filter(|r| r.park_matches(park) && r.location_contains(location))
        .count()
}

/// Average rating for `park` over periods starting with `year`.
/// `None` when nothing matches.
pub fn avg_rating_by_park_year(data: &[Review], park: &str, year: &str) -> Option<f64> {
    let ratings: Vec<i64> = data
        .iter()
        .filter(|r| r.park_matches(park) && r.period.starts_with(year))
        .map(|r| r.rating)
        .collect();
    mean(&ratings)
}

// Grouping below keys on the raw park/location text: "Paris" and "paris"
// are separate groups.

pub fn count_per_park(data: &[Review]) -> BTreeMap<String, usize> {
    let mut map: BTreeMap<String, usize> = BTreeMap::new();
    for r in data {
        *map.entry(r.park.clone()).or_default() += 1;
    }
    map
}

pub fn avg_rating_per_park(data: &[Review]) -> BTreeMap<String, f64> {
    let mut map: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for r in data {
        map.entry(r.park.clone()).or_default().push(r.rating);
    }
    map.into_iter()
        .filter_map(|(park, ratings)| mean(&ratings).map(|avg| (park, avg)))
        .collect()
}

/// Locations with the best average rating at `park`, best first, at most `top`.
/// Equal averages keep the order in which the locations were first seen.
pub fn top_locations_for_park(data: &[Review], park: &str, top: usize) -> Vec<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<i64>)> = Vec::new();
    for r in data.iter().filter(|r| r.park_matches(park)) {
        let slot = *index.entry(r.location.as_str()).or_insert_with(|| {
            groups.push((r.location.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(r.rating);
    }

    let mut ranked: Vec<(String, f64)> = groups
        .into_iter()
        .filter_map(|(loc, ratings)| mean(&ratings).map(|avg| (loc.to_string(), avg)))
        .collect();
    // `sort_by` is stable, which is what preserves first-seen order on ties.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(top);
    ranked
}

/// Three-letter English abbreviation, e.g. `Jan`.
pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Month number from a `YYYY-MM` period, or `None` if the period is malformed.
fn period_month(period: &str) -> Option<Month> {
    let mut parts = period.split('-');
    let (_, code) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u8 = code.parse().ok()?;
    Month::try_from(n).ok()
}

/// Average rating per calendar month for `park`, always twelve entries Jan..Dec.
/// Months without reviews report 0.0.
pub fn avg_monthly_rating(data: &[Review], park: &str) -> Vec<MonthlyAverage> {
    let mut buckets: [Vec<i64>; 12] = Default::default();
    for r in data.iter().filter(|r| r.park_matches(park)) {
        match period_month(&r.period) {
            Some(m) => buckets[m.number_from_month() as usize - 1].push(r.rating),
            None => debug!("Skipping review {} with malformed period {:?}", r.id, r.period),
        }
    }

    let mut month = Month::January;
    let mut out = Vec::with_capacity(12);
    for ratings in &buckets {
        out.push(MonthlyAverage {
            month: month_abbrev(month),
            average: mean(ratings).unwrap_or(0.0),
        });
        month = month.succ();
    }
    out
}

pub fn avg_rating_per_park_location(data: &[Review]) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut tmp: BTreeMap<&str, BTreeMap<&str, Vec<i64>>> = BTreeMap::new();
    for r in data {
        tmp.entry(r.park.as_str())
            .or_default()
            .entry(r.location.as_str())
            .or_default()
            .push(r.rating);
    }
    tmp.into_iter()
        .map(|(park, locs)| {
            let avgs = locs
                .into_iter()
                .filter_map(|(loc, ratings)| mean(&ratings).map(|avg| (loc.to_string(), avg)))
                .collect();
            (park.to_string(), avgs)
        })
        .collect()
}

/// Per-park totals for export: review count, positive count (rating >= 4),
/// average rounded to two decimals and number of distinct locations.
pub fn park_summary(data: &[Review]) -> BTreeMap<String, ParkSummary> {
    #[derive(Default)]
    struct Acc<'a> {
        reviews: usize,
        positive: usize,
        rating_sum: i64,
        locations: HashSet<&'a str>,
    }

    let acc = data.iter().fold(BTreeMap::<&str, Acc>::new(), |mut map, r| {
        let e = map.entry(r.park.as_str()).or_default();
        e.reviews += 1;
        if r.is_positive() {
            e.positive += 1;
        }
        e.rating_sum += r.rating;
        e.locations.insert(r.location.as_str());
        map
    });

    acc.into_iter()
        .map(|(park, a)| {
            let summary = ParkSummary {
                reviews: a.reviews,
                positive: a.positive,
                avg: round2(a.rating_sum as f64 / a.reviews as f64),
                countries: a.locations.len(),
            };
            (park.to_string(), summary)
        })
        .collect()
}
