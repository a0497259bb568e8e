use serde::{Deserialize, Deserializer};

use super::domain::{ApplicantRecord, CategoryValue, EducationLevel, MaritalStatus};

/// Errors raised while assembling an [`ApplicantRecord`] from collected answers.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IntakeError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("annual income must be a finite, non-negative amount (found {0})")]
    InvalidIncome(f64),
    #[error("family size must be at least 1")]
    EmptyFamily,
}

/// Collects answers field by field; `build` yields the immutable record once
/// every required answer is present.
///
/// Flags default to `false` the way an untouched checkbox does. Occupation, income
/// source, and housing are optional because only the classifier form asks for them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicantRecordBuilder {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    age: Option<u8>,
    #[serde(default)]
    education_type: Option<EducationLevel>,
    #[serde(default)]
    marital_status: Option<MaritalStatus>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    own_car: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    own_property: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    own_workphone: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    own_phone: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    own_email: bool,
    #[serde(default)]
    occupation_type: Option<CategoryValue>,
    #[serde(default)]
    income_type: Option<CategoryValue>,
    #[serde(default)]
    housing_type: Option<CategoryValue>,
    #[serde(default)]
    annual_income: Option<f64>,
    #[serde(default)]
    years_working: Option<u32>,
    #[serde(default)]
    years_unemployed: Option<u32>,
    #[serde(default)]
    family_size: Option<u32>,
    #[serde(default)]
    children_count: Option<u32>,
}

impl ApplicantRecordBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn education(mut self, level: impl Into<EducationLevel>) -> Self {
        self.education_type = Some(level.into());
        self
    }

    pub fn marital_status(mut self, status: impl Into<MaritalStatus>) -> Self {
        self.marital_status = Some(status.into());
        self
    }

    pub fn own_car(mut self, value: bool) -> Self {
        self.own_car = value;
        self
    }

    pub fn own_property(mut self, value: bool) -> Self {
        self.own_property = value;
        self
    }

    pub fn own_workphone(mut self, value: bool) -> Self {
        self.own_workphone = value;
        self
    }

    pub fn own_phone(mut self, value: bool) -> Self {
        self.own_phone = value;
        self
    }

    pub fn own_email(mut self, value: bool) -> Self {
        self.own_email = value;
        self
    }

    pub fn occupation(mut self, value: impl Into<CategoryValue>) -> Self {
        self.occupation_type = Some(value.into());
        self
    }

    pub fn income_source(mut self, value: impl Into<CategoryValue>) -> Self {
        self.income_type = Some(value.into());
        self
    }

    pub fn housing(mut self, value: impl Into<CategoryValue>) -> Self {
        self.housing_type = Some(value.into());
        self
    }

    pub fn annual_income(mut self, amount: f64) -> Self {
        self.annual_income = Some(amount);
        self
    }

    /// The classifier form asks for a monthly salary and annualises it.
    pub fn monthly_income(self, amount: f64) -> Self {
        self.annual_income(amount * 12.0)
    }

    pub fn years_working(mut self, years: u32) -> Self {
        self.years_working = Some(years);
        self
    }

    pub fn years_unemployed(mut self, years: u32) -> Self {
        self.years_unemployed = Some(years);
        self
    }

    pub fn family_size(mut self, size: u32) -> Self {
        self.family_size = Some(size);
        self
    }

    pub fn children_count(mut self, count: u32) -> Self {
        self.children_count = Some(count);
        self
    }

    pub fn build(self) -> Result<ApplicantRecord, IntakeError> {
        let annual_income = self
            .annual_income
            .ok_or(IntakeError::MissingField("annual_income"))?;
        if !annual_income.is_finite() || annual_income < 0.0 {
            return Err(IntakeError::InvalidIncome(annual_income));
        }

        let family_size = self
            .family_size
            .ok_or(IntakeError::MissingField("family_size"))?;
        if family_size == 0 {
            return Err(IntakeError::EmptyFamily);
        }

        Ok(ApplicantRecord {
            name: self.name.filter(|name| !name.trim().is_empty()),
            age: self.age.ok_or(IntakeError::MissingField("age"))?,
            education_type: self
                .education_type
                .ok_or(IntakeError::MissingField("education_type"))?,
            marital_status: self
                .marital_status
                .ok_or(IntakeError::MissingField("marital_status"))?,
            own_car: self.own_car,
            own_property: self.own_property,
            own_workphone: self.own_workphone,
            own_phone: self.own_phone,
            own_email: self.own_email,
            occupation_type: self.occupation_type,
            income_type: self.income_type,
            housing_type: self.housing_type,
            annual_income,
            years_working: self
                .years_working
                .ok_or(IntakeError::MissingField("years_working"))?,
            years_unemployed: self
                .years_unemployed
                .ok_or(IntakeError::MissingField("years_unemployed"))?,
            family_size,
            children_count: self
                .children_count
                .ok_or(IntakeError::MissingField("children_count"))?,
        })
    }
}

impl TryFrom<ApplicantRecordBuilder> for ApplicantRecord {
    type Error = IntakeError;

    fn try_from(builder: ApplicantRecordBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// Yes/no answers arrive either as booleans or as the 0/1 flags the classifier form stores.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "expected boolean or 0/1 flag, found {other}"
        ))),
    }
}
