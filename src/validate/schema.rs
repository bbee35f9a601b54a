//! Per-record schema validation: raw records → typed records + findings.
//!
//! Every check runs for every record; nothing aborts early. A record with
//! three defects yields three findings. A typed record is returned only when
//! no error-severity defect was found (warnings do not block the upgrade).

use serde::Serialize;
use serde_json::Value;

use crate::dataset::loader::truncate_snippet;
use crate::dataset::model::*;
use crate::validate::findings::{FindingCategory, Findings};

/// Era plausibility bounds (heuristic, warnings only). Approximate and
/// disputed dates are expected in this dataset.
const ANCIENT_MAX_START: i32 = 500;
const CONTEMPORARY_MIN_START: i32 = 1800;

/// Minimum summary length in characters before a quality warning fires.
const MIN_SUMMARY_CHARS: usize = 10;

/// Validate one person record.
pub fn validate_person(raw: &RawPerson, findings: &mut Findings) -> Option<Person> {
    let subject = subject_for(&raw.id, raw);
    let errors_before = findings.error_count();

    let id = require_string(&raw.id, "id", &subject, findings);

    let (ko, en) = match &raw.name {
        None => {
            findings.error(
                FindingCategory::Schema,
                Some(&subject),
                "missing required field: name",
            );
            (None, None)
        }
        Some(name) => {
            let ko = require_string(&name.ko, "name.ko", &subject, findings);
            let en = require_string(&name.en, "name.en", &subject, findings);
            (ko, en)
        }
    };

    let era = parse_enum(
        &raw.era,
        "era",
        Era::parse,
        "ancient, medieval, modern, contemporary",
        &subject,
        findings,
    );
    let category = parse_enum(
        &raw.category,
        "category",
        Category::parse,
        "philosopher, religious_figure, scientist, historical_figure, cultural_figure",
        &subject,
        findings,
    );

    let summary = check_summary(&raw.summary, &subject, findings);
    let period = check_period(&raw.period, era, &subject, findings);
    let location = raw
        .location
        .as_ref()
        .and_then(|loc| check_location(loc, &subject, findings));

    if findings.error_count() != errors_before {
        return None;
    }
    Some(Person {
        id: id?,
        name: PersonName {
            ko: ko?,
            en: en?,
            original: raw.name.as_ref().and_then(|n| n.original.clone()),
        },
        era: era?,
        category: category?,
        period,
        location,
        summary: summary?,
        tags: raw.tags.clone(),
    })
}

/// Validate one entity record. English names are optional for entities.
pub fn validate_entity(raw: &RawEntity, findings: &mut Findings) -> Option<Entity> {
    let subject = subject_for(&raw.id, raw);
    let errors_before = findings.error_count();

    let id = require_string(&raw.id, "id", &subject, findings);

    let ko = match &raw.name {
        None => {
            findings.error(
                FindingCategory::Schema,
                Some(&subject),
                "missing required field: name",
            );
            None
        }
        Some(name) => require_string(&name.ko, "name.ko", &subject, findings),
    };

    let kind = parse_enum(
        &raw.kind,
        "type",
        EntityKind::parse,
        "event, ideology, movement, institution, text, nation, concept, \
         tradition, archetype, art_movement, technology",
        &subject,
        findings,
    );

    let summary = check_summary(&raw.summary, &subject, findings);

    if findings.error_count() != errors_before {
        return None;
    }
    Some(Entity {
        id: id?,
        name: EntityName {
            ko: ko?,
            en: raw.name.as_ref().and_then(|n| n.en.clone()),
        },
        kind: kind?,
        summary: summary?,
        tags: raw.tags.clone(),
    })
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Finding subject: the record's id, or a truncated echo when the id is absent.
fn subject_for<T: Serialize>(id: &Option<String>, raw: &T) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id.clone(),
        _ => truncate_snippet(&serde_json::to_string(raw).unwrap_or_default()),
    }
}

fn require_string(
    value: &Option<String>,
    field: &str,
    subject: &str,
    findings: &mut Findings,
) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => {
            findings.error(
                FindingCategory::Schema,
                Some(subject),
                format!("missing required field: {field}"),
            );
            None
        }
    }
}

fn parse_enum<T>(
    value: &Option<String>,
    field: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &str,
    subject: &str,
    findings: &mut Findings,
) -> Option<T> {
    match value {
        None => {
            findings.error(
                FindingCategory::Schema,
                Some(subject),
                format!("missing required field: {field}"),
            );
            None
        }
        Some(s) => match parse(s) {
            Some(parsed) => Some(parsed),
            None => {
                findings.error(
                    FindingCategory::Schema,
                    Some(subject),
                    format!("invalid {field} \"{s}\" (allowed: {allowed})"),
                );
                None
            }
        },
    }
}

fn check_summary(
    summary: &Option<String>,
    subject: &str,
    findings: &mut Findings,
) -> Option<String> {
    let summary = require_string(summary, "summary", subject, findings)?;
    if summary.trim().chars().count() < MIN_SUMMARY_CHARS {
        findings.warning(
            FindingCategory::Schema,
            Some(subject),
            format!("summary shorter than {MIN_SUMMARY_CHARS} characters"),
        );
    }
    Some(summary)
}

/// Period completeness plus era/start plausibility.
fn check_period(
    period: &Option<RawPeriod>,
    era: Option<Era>,
    subject: &str,
    findings: &mut Findings,
) -> Option<Period> {
    let raw = period.as_ref()?;
    let (start, end) = match (raw.start, raw.end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            findings.warning(
                FindingCategory::Schema,
                Some(subject),
                "incomplete period: start and end years both required",
            );
            return None;
        }
    };

    match era {
        Some(Era::Ancient) if start > ANCIENT_MAX_START => {
            findings.warning(
                FindingCategory::Schema,
                Some(subject),
                format!(
                    "era \"ancient\" is implausible for start year {start} \
                     (expected start <= {ANCIENT_MAX_START})"
                ),
            );
        }
        Some(Era::Contemporary) if start < CONTEMPORARY_MIN_START => {
            findings.warning(
                FindingCategory::Schema,
                Some(subject),
                format!(
                    "era \"contemporary\" is implausible for start year {start} \
                     (expected start >= {CONTEMPORARY_MIN_START})"
                ),
            );
        }
        _ => {}
    }

    Some(Period { start, end })
}

/// Coordinate checks: non-numeric is a warning, out-of-range is an error.
fn check_location(
    location: &RawLocation,
    subject: &str,
    findings: &mut Findings,
) -> Option<GeoPoint> {
    let lat = check_coordinate(&location.lat, "latitude", 90.0, subject, findings);
    let lng = check_coordinate(&location.lng, "longitude", 180.0, subject, findings);
    Some(GeoPoint {
        lat: lat?,
        lng: lng?,
    })
}

fn check_coordinate(
    value: &Option<Value>,
    name: &str,
    bound: f64,
    subject: &str,
    findings: &mut Findings,
) -> Option<f64> {
    let value = match value {
        Some(v) => v,
        None => {
            findings.warning(
                FindingCategory::Schema,
                Some(subject),
                format!("malformed coordinates: {name} missing"),
            );
            return None;
        }
    };
    let number = match value.as_f64() {
        Some(n) => n,
        None => {
            findings.warning(
                FindingCategory::Schema,
                Some(subject),
                format!("malformed coordinates: {name} is not a number"),
            );
            return None;
        }
    };
    if !(-bound..=bound).contains(&number) {
        findings.error(
            FindingCategory::Schema,
            Some(subject),
            format!("{name} {number} out of range [{}, {bound}]", -bound),
        );
        return None;
    }
    Some(number)
}
