//! Keyword-derived meta features
//!
//! The classifier was trained on 8 extra columns next to the TF-IDF text
//! features. At prediction time those columns are approximated from the
//! posting text with case-insensitive substring checks, first match wins
//! within each category.
//!
//! The numeric encoding uses the character length of each category label.
//! Distinct labels of equal length collide (e.g. "Sales" and "Other" both
//! encode to 5). The trained weights depend on this exact scheme, so it
//! must not be replaced by one-hot encoding without retraining.

use serde::Serialize;

/// Number of columns produced by [`encode_meta`]
pub const META_VECTOR_LEN: usize = 8;

/// Numeric meta columns, in the order the classifier was trained on
pub type MetaVector = [f64; META_VECTOR_LEN];

/// No logo signal exists in plain text
pub const HAS_COMPANY_LOGO: bool = false;

/// Contract type named in the posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Other,
}

impl EmploymentType {
    /// Label used when the model was trained
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Other => "Other",
        }
    }
}

/// Seniority asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequiredExperience {
    Experienced,
    #[serde(rename = "Entry level")]
    EntryLevel,
    #[serde(rename = "Not Specified")]
    NotSpecified,
}

impl RequiredExperience {
    /// Label used when the model was trained
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredExperience::Experienced => "Experienced",
            RequiredExperience::EntryLevel => "Entry level",
            RequiredExperience::NotSpecified => "Not Specified",
        }
    }
}

/// Highest degree mentioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequiredEducation {
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Phd,
    #[serde(rename = "Not Specified")]
    NotSpecified,
}

impl RequiredEducation {
    /// Label used when the model was trained
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredEducation::Bachelors => "Bachelor's",
            RequiredEducation::Masters => "Master's",
            RequiredEducation::Phd => "PhD",
            RequiredEducation::NotSpecified => "Not Specified",
        }
    }
}

/// Sector guessed from keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Industry {
    Software,
    Sales,
    Data,
    Other,
}

impl Industry {
    /// Label used when the model was trained
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Software => "Software",
            Industry::Sales => "Sales",
            Industry::Data => "Data",
            Industry::Other => "Other",
        }
    }
}

/// Role family guessed from keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobFunction {
    Engineering,
    Management,
    Analyst,
    Other,
}

impl JobFunction {
    /// Label used when the model was trained
    pub fn as_str(&self) -> &'static str {
        match self {
            JobFunction::Engineering => "Engineering",
            JobFunction::Management => "Management",
            JobFunction::Analyst => "Analyst",
            JobFunction::Other => "Other",
        }
    }
}

/// Coarse signals derived from keyword presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaFeatures {
    pub telecommuting: bool,
    pub has_company_logo: bool,
    pub has_questions: bool,
    pub employment_type: EmploymentType,
    pub required_experience: RequiredExperience,
    pub required_education: RequiredEducation,
    pub industry: Industry,
    pub function: JobFunction,
}

impl Default for MetaFeatures {
    fn default() -> Self {
        Self {
            telecommuting: false,
            has_company_logo: HAS_COMPANY_LOGO,
            has_questions: false,
            employment_type: EmploymentType::Other,
            required_experience: RequiredExperience::NotSpecified,
            required_education: RequiredEducation::NotSpecified,
            industry: Industry::Other,
            function: JobFunction::Other,
        }
    }
}

/// Derive meta features from raw posting text
///
/// Keyword checks run on a lowercased copy; `has_questions` looks for a
/// literal `?` in the original text. Rule order inside each category is
/// significant: "software developer data team" is `Software`, not `Data`.
pub fn derive_meta_features(text: &str) -> MetaFeatures {
    let desc = text.to_lowercase();
    let has = |needle: &str| desc.contains(needle);

    let employment_type = if has("full time") {
        EmploymentType::FullTime
    } else if has("part time") {
        EmploymentType::PartTime
    } else if has("contract") {
        EmploymentType::Contract
    } else {
        EmploymentType::Other
    };

    let required_experience = if has("years") || has("experience") {
        RequiredExperience::Experienced
    } else if has("fresher") || has("entry level") {
        RequiredExperience::EntryLevel
    } else {
        RequiredExperience::NotSpecified
    };

    let required_education = if has("bachelor") || has("degree") {
        RequiredEducation::Bachelors
    } else if has("master") {
        RequiredEducation::Masters
    } else if has("phd") {
        RequiredEducation::Phd
    } else {
        RequiredEducation::NotSpecified
    };

    let industry = if has("software") || has("developer") {
        Industry::Software
    } else if has("sales") {
        Industry::Sales
    } else if has("data") {
        Industry::Data
    } else {
        Industry::Other
    };

    let function = if has("engineer") {
        JobFunction::Engineering
    } else if has("manager") {
        JobFunction::Management
    } else if has("analyst") {
        JobFunction::Analyst
    } else {
        JobFunction::Other
    };

    MetaFeatures {
        telecommuting: has("remote") || has("work from home"),
        has_company_logo: HAS_COMPANY_LOGO,
        has_questions: text.contains('?'),
        employment_type,
        required_experience,
        required_education,
        industry,
        function,
    }
}

/// Encode meta features into the 8 numeric classifier columns
///
/// Order: telecommuting, has_company_logo, has_questions (each 0/1), then
/// the character length of the employment type, experience, education,
/// industry and function labels.
pub fn encode_meta(meta: &MetaFeatures) -> MetaVector {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    let label_len = |s: &str| s.chars().count() as f64;

    [
        flag(meta.telecommuting),
        flag(meta.has_company_logo),
        flag(meta.has_questions),
        label_len(meta.employment_type.as_str()),
        label_len(meta.required_experience.as_str()),
        label_len(meta.required_education.as_str()),
        label_len(meta.industry.as_str()),
        label_len(meta.function.as_str()),
    ]
}
