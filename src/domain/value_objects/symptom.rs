use serde::{Deserialize, Serialize};

/// Symptom tags a citizen can attach to a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Fever,
    Cough,
    Vomiting,
    Diarrhea,
    Headache,
    BodyAche,
    Rash,
    Fatigue,
    BreathingDifficulty,
    SoreThroat,
}

impl Symptom {
    pub const ALL: [Self; 10] = [
        Self::Fever,
        Self::Cough,
        Self::Vomiting,
        Self::Diarrhea,
        Self::Headache,
        Self::BodyAche,
        Self::Rash,
        Self::Fatigue,
        Self::BreathingDifficulty,
        Self::SoreThroat,
    ];

    /// Stable tag used in storage and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fever => "fever",
            Self::Cough => "cough",
            Self::Vomiting => "vomiting",
            Self::Diarrhea => "diarrhea",
            Self::Headache => "headache",
            Self::BodyAche => "body_ache",
            Self::Rash => "rash",
            Self::Fatigue => "fatigue",
            Self::BreathingDifficulty => "breathing_difficulty",
            Self::SoreThroat => "sore_throat",
        }
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Symptom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|symptom| symptom.as_str() == tag)
            .ok_or_else(|| format!("unknown symptom: {s}"))
    }
}
