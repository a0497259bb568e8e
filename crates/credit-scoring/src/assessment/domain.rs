use serde::{Deserialize, Serialize};

use super::intake::ApplicantRecordBuilder;

/// Highest completed schooling, ordered from `Primary` to `Doctorate`.
///
/// Labels travel on the wire exactly as the intake forms capture them. Anything
/// outside the known set is kept verbatim as `Unknown` so a typo is visible in
/// the journal instead of silently scoring as a known level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationLevel {
    Primary,
    Secondary,
    IncompleteHigher,
    CompleteHigher,
    Postgraduate,
    Masters,
    Doctorate,
    Unknown(String),
}

impl EducationLevel {
    pub fn ordered() -> [EducationLevel; 7] {
        [
            EducationLevel::Primary,
            EducationLevel::Secondary,
            EducationLevel::IncompleteHigher,
            EducationLevel::CompleteHigher,
            EducationLevel::Postgraduate,
            EducationLevel::Masters,
            EducationLevel::Doctorate,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            EducationLevel::Primary => "Ensino Fundamental",
            EducationLevel::Secondary => "Ensino Médio",
            EducationLevel::IncompleteHigher => "Superior Incompleto",
            EducationLevel::CompleteHigher => "Superior Completo",
            EducationLevel::Postgraduate => "Pós-Graduação",
            EducationLevel::Masters => "Mestrado",
            EducationLevel::Doctorate => "Doutorado",
            EducationLevel::Unknown(label) => label,
        }
    }

    /// Position in the ordered ladder; `None` for unrecognised labels.
    pub fn rank(&self) -> Option<u8> {
        EducationLevel::ordered()
            .iter()
            .position(|level| level == self)
            .map(|index| index as u8)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EducationLevel::Unknown(_))
    }
}

impl From<String> for EducationLevel {
    fn from(value: String) -> Self {
        match value.trim() {
            "Ensino Fundamental" | "primary" => EducationLevel::Primary,
            "Ensino Médio" | "secondary" => EducationLevel::Secondary,
            "Superior Incompleto" | "incomplete_higher" => EducationLevel::IncompleteHigher,
            "Superior Completo" | "complete_higher" => EducationLevel::CompleteHigher,
            "Pós-Graduação" | "postgraduate" => EducationLevel::Postgraduate,
            "Mestrado" | "masters" => EducationLevel::Masters,
            "Doutorado" | "doctorate" => EducationLevel::Doctorate,
            _ => EducationLevel::Unknown(value),
        }
    }
}

impl From<&str> for EducationLevel {
    fn from(value: &str) -> Self {
        EducationLevel::from(value.to_string())
    }
}

impl From<EducationLevel> for String {
    fn from(value: EducationLevel) -> Self {
        match value {
            EducationLevel::Unknown(label) => label,
            known => known.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    CommonLaw,
    Other(String),
}

impl MaritalStatus {
    pub fn ordered() -> [MaritalStatus; 5] {
        [
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
            MaritalStatus::Widowed,
            MaritalStatus::CommonLaw,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            MaritalStatus::Single => "Solteiro",
            MaritalStatus::Married => "Casado",
            MaritalStatus::Divorced => "Divorciado",
            MaritalStatus::Widowed => "Viúvo",
            MaritalStatus::CommonLaw => "União Estável",
            MaritalStatus::Other(label) => label,
        }
    }
}

impl From<String> for MaritalStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "Solteiro" | "single" => MaritalStatus::Single,
            "Casado" | "married" => MaritalStatus::Married,
            "Divorciado" | "divorced" => MaritalStatus::Divorced,
            "Viúvo" | "widowed" => MaritalStatus::Widowed,
            "União Estável" | "common_law" => MaritalStatus::CommonLaw,
            _ => MaritalStatus::Other(value),
        }
    }
}

impl From<&str> for MaritalStatus {
    fn from(value: &str) -> Self {
        MaritalStatus::from(value.to_string())
    }
}

impl From<MaritalStatus> for String {
    fn from(value: MaritalStatus) -> Self {
        match value {
            MaritalStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Free-form choice drawn from the category catalog (occupation, income source, housing).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryValue(pub String);

impl CategoryValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        CategoryValue(value.to_string())
    }
}

/// Everything collected about one applicant for one evaluation.
///
/// Built once through [`ApplicantRecordBuilder`] (or deserialized through it) and
/// only ever borrowed by the validator and the decision engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ApplicantRecordBuilder")]
pub struct ApplicantRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub age: u8,
    pub education_type: EducationLevel,
    pub marital_status: MaritalStatus,
    pub own_car: bool,
    pub own_property: bool,
    pub own_workphone: bool,
    pub own_phone: bool,
    pub own_email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation_type: Option<CategoryValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_type: Option<CategoryValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing_type: Option<CategoryValue>,
    pub annual_income: f64,
    pub years_working: u32,
    pub years_unemployed: u32,
    pub family_size: u32,
    pub children_count: u32,
}

impl ApplicantRecord {
    pub fn builder() -> ApplicantRecordBuilder {
        ApplicantRecordBuilder::default()
    }

    pub fn monthly_income(&self) -> f64 {
        self.annual_income / 12.0
    }
}

/// Output of the rule-based scorer for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub approved: bool,
    pub score: f64,
    pub max_monthly_commitment: f64,
}
