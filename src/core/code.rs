use serde::{Deserialize, Serialize};

/// Value stored in the roster when a profile has no personality code yet
pub const UNSET_SENTINEL: &str = "NULL";

/// One of the four personality axes, in code position order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    EnergyEI,
    InformationNS,
    DecisionTF,
    LifestyleJP,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::EnergyEI,
        Axis::InformationNS,
        Axis::DecisionTF,
        Axis::LifestyleJP,
    ];

    /// Position of this axis inside a four-letter code
    pub fn position(self) -> usize {
        match self {
            Axis::EnergyEI => 0,
            Axis::InformationNS => 1,
            Axis::DecisionTF => 2,
            Axis::LifestyleJP => 3,
        }
    }

    /// Human-readable axis name shown next to match results
    pub fn label(self) -> &'static str {
        match self {
            Axis::EnergyEI => "Energy (E/I)",
            Axis::InformationNS => "Information (N/S)",
            Axis::DecisionTF => "Decisions (T/F)",
            Axis::LifestyleJP => "Structure (J/P)",
        }
    }

    /// The two opposing letters of this axis
    pub fn letters(self) -> (char, char) {
        match self {
            Axis::EnergyEI => ('E', 'I'),
            Axis::InformationNS => ('N', 'S'),
            Axis::DecisionTF => ('T', 'F'),
            Axis::LifestyleJP => ('J', 'P'),
        }
    }
}

/// A code decomposed into its four axis letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axes([char; 4]);

impl Axes {
    #[inline]
    pub fn get(&self, axis: Axis) -> char {
        self.0[axis.position()]
    }
}

/// Four-letter personality code, or the unset sentinel
///
/// Validity is purely structural: exactly four characters and not `NULL`.
/// Letters are not checked against the axis alphabets, so `ABCD` is a valid
/// code and is compared position by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum PersonalityCode {
    Set(String),
    #[default]
    Unset,
}

impl PersonalityCode {
    /// Parse a raw roster value. Anything structurally wrong becomes `Unset`.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == UNSET_SENTINEL || raw.chars().count() != 4 {
            return PersonalityCode::Unset;
        }
        PersonalityCode::Set(raw.to_string())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, PersonalityCode::Set(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PersonalityCode::Set(code) => Some(code),
            PersonalityCode::Unset => None,
        }
    }

    pub fn axes(&self) -> Option<Axes> {
        let code = self.as_str()?;
        let mut letters = ['\0'; 4];
        for (slot, letter) in letters.iter_mut().zip(code.chars()) {
            *slot = letter;
        }
        Some(Axes(letters))
    }
}

impl From<Option<String>> for PersonalityCode {
    fn from(value: Option<String>) -> Self {
        value
            .map(|raw| PersonalityCode::parse(&raw))
            .unwrap_or(PersonalityCode::Unset)
    }
}

impl From<&str> for PersonalityCode {
    fn from(raw: &str) -> Self {
        PersonalityCode::parse(raw)
    }
}

impl From<PersonalityCode> for Option<String> {
    fn from(value: PersonalityCode) -> Self {
        match value {
            PersonalityCode::Set(code) => Some(code),
            PersonalityCode::Unset => None,
        }
    }
}

impl std::fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str().unwrap_or(UNSET_SENTINEL))
    }
}

/// Axes on which two decomposed codes differ, in axis order
pub fn different_axes(a: &Axes, b: &Axes) -> Vec<Axis> {
    Axis::ALL
        .into_iter()
        .filter(|axis| a.get(*axis) != b.get(*axis))
        .collect()
}

/// Number of axis positions where the two codes differ (0-4)
///
/// Returns `None` when either side is unset.
#[inline]
pub fn mbti_distance(a: &PersonalityCode, b: &PersonalityCode) -> Option<u8> {
    let (a, b) = (a.axes()?, b.axes()?);
    Some(different_axes(&a, &b).len() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> PersonalityCode {
        PersonalityCode::parse(raw)
    }

    #[test]
    fn test_parse_validity() {
        assert!(code("ENFP").is_valid());
        assert!(code("ABCD").is_valid());
        assert!(!code("NULL").is_valid());
        assert!(!code("").is_valid());
        assert!(!code("ENF").is_valid());
        assert!(!code("ENFPX").is_valid());
    }

    #[test]
    fn test_distance_examples() {
        assert_eq!(mbti_distance(&code("ENFP"), &code("ENFP")), Some(0));
        assert_eq!(mbti_distance(&code("ENFP"), &code("INFJ")), Some(2));
        assert_eq!(mbti_distance(&code("ENFP"), &code("ESTP")), Some(2));
        assert_eq!(mbti_distance(&code("ENFP"), &code("ISTJ")), Some(4));
        assert_eq!(mbti_distance(&code("ENFP"), &code("NULL")), None);
    }

    #[test]
    fn test_different_axes_order() {
        let a = code("ENFP").axes().unwrap();
        let b = code("ISFJ").axes().unwrap();
        assert_eq!(
            different_axes(&a, &b),
            vec![Axis::EnergyEI, Axis::InformationNS, Axis::LifestyleJP]
        );
    }

    #[test]
    fn test_serde_round_trip_of_unset() {
        let parsed: PersonalityCode = serde_json::from_str("\"NULL\"").unwrap();
        assert_eq!(parsed, PersonalityCode::Unset);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "null");

        let parsed: PersonalityCode = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, PersonalityCode::Unset);
    }
}
