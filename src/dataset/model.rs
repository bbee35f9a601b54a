//! Core record types for the encyclopedia datasets.
//!
//! Records come in two shapes: *raw* records deserialized permissively from
//! JSON (every field optional, coordinates kept as loose values), and *typed*
//! records produced by schema validation. Raw records exist so that a record
//! missing half its fields still yields one finding per defect instead of
//! aborting the collection parse.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Closed vocabularies
// ---------------------------------------------------------------------------

/// Historical era of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Ancient,
    Medieval,
    Modern,
    Contemporary,
}

impl Era {
    /// Every allowed era, in chronological order.
    pub const ALL: [Era; 4] = [Era::Ancient, Era::Medieval, Era::Modern, Era::Contemporary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ancient => "ancient",
            Self::Medieval => "medieval",
            Self::Modern => "modern",
            Self::Contemporary => "contemporary",
        }
    }

    /// Parse from the dataset's string form. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Era> {
        Self::ALL.iter().copied().find(|e| e.as_str() == s)
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Philosopher,
    ReligiousFigure,
    Scientist,
    HistoricalFigure,
    CulturalFigure,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Philosopher,
        Category::ReligiousFigure,
        Category::Scientist,
        Category::HistoricalFigure,
        Category::CulturalFigure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Philosopher => "philosopher",
            Self::ReligiousFigure => "religious_figure",
            Self::Scientist => "scientist",
            Self::HistoricalFigure => "historical_figure",
            Self::CulturalFigure => "cultural_figure",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a non-person entity (ideology, event, text, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Event,
    Ideology,
    Movement,
    Institution,
    Text,
    Nation,
    Concept,
    Tradition,
    Archetype,
    ArtMovement,
    Technology,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Event,
        EntityKind::Ideology,
        EntityKind::Movement,
        EntityKind::Institution,
        EntityKind::Text,
        EntityKind::Nation,
        EntityKind::Concept,
        EntityKind::Tradition,
        EntityKind::Archetype,
        EntityKind::ArtMovement,
        EntityKind::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Ideology => "ideology",
            Self::Movement => "movement",
            Self::Institution => "institution",
            Self::Text => "text",
            Self::Nation => "nation",
            Self::Concept => "concept",
            Self::Tradition => "tradition",
            Self::Archetype => "archetype",
            Self::ArtMovement => "art_movement",
            Self::Technology => "technology",
        }
    }

    pub fn parse(s: &str) -> Option<EntityKind> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two node kinds an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Person,
    Entity,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Entity => "entity",
        }
    }

    pub fn parse(s: &str) -> Option<NodeKind> {
        match s {
            "person" => Some(Self::Person),
            "entity" => Some(Self::Entity),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Typed records (post-validation)
// ---------------------------------------------------------------------------

/// Bilingual display name. Korean is the dataset's primary language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonName {
    pub ko: String,
    pub en: String,
    /// Name in the original script (e.g., Greek, classical Chinese).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityName {
    pub ko: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

/// Lifespan or activity period. `end == 0` means "still living / unknown end".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: i32,
    pub end: i32,
}

impl Period {
    /// Whether the end year is the "still living / unknown" sentinel.
    pub fn is_open_ended(&self) -> bool {
        self.end == 0
    }
}

/// Geographic point with validated ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A validated person record.
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub id: String,
    pub name: PersonName,
    pub era: Era,
    pub category: Category,
    pub period: Option<Period>,
    pub location: Option<GeoPoint>,
    pub summary: String,
    pub tags: Vec<String>,
}

/// A validated entity record.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub id: String,
    pub name: EntityName,
    pub kind: EntityKind,
    pub summary: String,
    pub tags: Vec<String>,
}

/// A relationship edge as it feeds analytics: source relates-to target.
///
/// The `kind` string is kept raw; vocabulary membership is only checked when
/// both endpoint kinds are declared on the edge record.
#[derive(Debug, Clone, Serialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: String,
    pub description: Option<String>,
    pub strength: Option<i64>,
}

// ---------------------------------------------------------------------------
// Raw records (pre-validation)
// ---------------------------------------------------------------------------

/// Permissive name shape: every component optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawName {
    pub ko: Option<String>,
    pub en: Option<String>,
    pub original: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawPeriod {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

/// Coordinates kept as loose JSON values so a string where a number belongs
/// becomes a malformed-coordinate warning, not a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocation {
    pub lat: Option<serde_json::Value>,
    pub lng: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPerson {
    pub id: Option<String>,
    pub name: Option<RawName>,
    pub era: Option<String>,
    pub category: Option<String>,
    pub period: Option<RawPeriod>,
    pub location: Option<RawLocation>,
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntity {
    pub id: Option<String>,
    pub name: Option<RawName>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRelationship {
    pub source: Option<String>,
    pub target: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub strength: Option<i64>,
    /// Declared kind of the source endpoint ("person" | "entity").
    #[serde(rename = "sourceType")]
    pub source_kind: Option<String>,
    /// Declared kind of the target endpoint.
    #[serde(rename = "targetType")]
    pub target_kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_round_trips_through_strings() {
        for era in Era::ALL {
            assert_eq!(Era::parse(era.as_str()), Some(era));
        }
        assert_eq!(Era::parse("futuristic"), None);
    }

    #[test]
    fn category_parse_rejects_unknown() {
        assert_eq!(Category::parse("philosopher"), Some(Category::Philosopher));
        assert_eq!(Category::parse("alchemist"), None);
    }

    #[test]
    fn entity_kind_vocabulary_is_closed() {
        assert_eq!(EntityKind::ALL.len(), 11);
        assert_eq!(EntityKind::parse("art_movement"), Some(EntityKind::ArtMovement));
    }

    #[test]
    fn period_open_ended_sentinel() {
        assert!(Period { start: 1950, end: 0 }.is_open_ended());
        assert!(!Period { start: -470, end: -399 }.is_open_ended());
    }

    #[test]
    fn raw_person_tolerates_missing_fields() {
        let raw: RawPerson = serde_json::from_str(r#"{"id": "socrates"}"#).unwrap();
        assert_eq!(raw.id.as_deref(), Some("socrates"));
        assert!(raw.name.is_none());
        assert!(raw.tags.is_empty());
    }

    #[test]
    fn raw_location_keeps_non_numeric_coordinates() {
        let raw: RawLocation =
            serde_json::from_str(r#"{"lat": "37.5", "lng": 126.97}"#).unwrap();
        assert!(raw.lat.unwrap().is_string());
        assert!(raw.lng.unwrap().is_f64());
    }

    #[test]
    fn raw_relationship_reads_camel_case_endpoint_kinds() {
        let raw: RawRelationship = serde_json::from_str(
            r#"{"source": "plato", "target": "academy", "type": "founded", "sourceType": "person", "targetType": "entity"}"#,
        )
        .unwrap();
        assert_eq!(raw.source_kind.as_deref(), Some("person"));
        assert_eq!(raw.kind.as_deref(), Some("founded"));
    }
}
