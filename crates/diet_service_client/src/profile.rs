//! User profile normalization and request payload shaping.
//!
//! Raw input is collected as strings and only coerced here: blank or
//! non-numeric numeric fields become `None` (never zero, never NaN), and
//! allergen tokens are canonicalized before anything is transmitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Low,
    #[default]
    Moderate,
    High,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Low => "low",
            Activity::Moderate => "moderate",
            Activity::High => "high",
        }
    }
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

impl std::str::FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Activity::Low),
            "moderate" => Ok(Activity::Moderate),
            "high" => Ok(Activity::High),
            other => Err(format!("unknown activity level: {other}")),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, normalized profile record. This is what gets persisted and
/// what the request payloads are projected from.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Profile {
    pub gender: Gender,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<u32>,
    pub activity: Activity,
    pub period: Period,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
}

/// Raw form state: numeric fields exactly as the user typed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub gender: Gender,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub activity: Activity,
    pub period: Period,
    pub allergens: Vec<String>,
    pub dislikes: Vec<String>,
}

impl ProfileDraft {
    /// Prefill a draft from a previously stored profile, the way the form
    /// restores its fields on load.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            gender: profile.gender,
            age: profile.age.map(|v| v.to_string()).unwrap_or_default(),
            weight: profile.weight.map(|v| v.to_string()).unwrap_or_default(),
            height: profile.height.map(|v| v.to_string()).unwrap_or_default(),
            activity: profile.activity,
            period: profile.period,
            allergens: profile.allergens.clone(),
            dislikes: profile.dislikes.clone(),
        }
    }

    /// Coerce the raw form state into the canonical profile.
    pub fn normalize(&self) -> Profile {
        Profile {
            gender: self.gender,
            age: parse_positive_int(&self.age),
            weight: parse_positive_decimal(&self.weight),
            height: parse_positive_int(&self.height),
            activity: self.activity,
            period: self.period,
            allergens: normalize_allergens(&self.allergens),
            dislikes: clean_tags(&self.dislikes),
        }
    }
}

impl Profile {
    /// Payload for `POST /tdee`: body metrics and activity only.
    pub fn tdee_request(&self) -> TdeeRequest {
        TdeeRequest {
            gender: self.gender,
            age: self.age,
            weight: self.weight,
            height: self.height,
            activity: self.activity,
        }
    }

    /// Payload for `POST /optimize`. Dislikes are collected and persisted
    /// but never transmitted for optimization.
    pub fn optimize_request(&self) -> OptimizeRequest {
        OptimizeRequest {
            gender: self.gender,
            age: self.age,
            weight: self.weight,
            height: self.height,
            activity: self.activity,
            allergens: self.allergens.clone(),
            period: self.period,
        }
    }

    /// Per-field lossy restore from a stored JSON value. Absent or
    /// malformed fields fall back to their defaults; this never fails.
    pub fn from_stored(value: &Value) -> Profile {
        let mut profile = Profile::default();
        let Some(obj) = value.as_object() else {
            return profile;
        };
        if let Some(gender) = obj.get("gender").and_then(Value::as_str) {
            if let Ok(gender) = gender.parse() {
                profile.gender = gender;
            }
        }
        profile.age = obj
            .get("age")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0);
        profile.weight = obj
            .get("weight")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite() && *v > 0.0);
        profile.height = obj
            .get("height")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0);
        if let Some(activity) = obj.get("activity").and_then(Value::as_str) {
            if let Ok(activity) = activity.parse() {
                profile.activity = activity;
            }
        }
        if let Some(period) = obj.get("period").and_then(Value::as_str) {
            if let Ok(period) = period.parse() {
                profile.period = period;
            }
        }
        if let Some(list) = obj.get("allergens").and_then(Value::as_array) {
            profile.allergens = normalize_allergens(&string_items(list));
        }
        if let Some(list) = obj.get("dislikes").and_then(Value::as_array) {
            profile.dislikes = clean_tags(&string_items(list));
        }
        profile
    }
}

/// Body of `POST /tdee`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TdeeRequest {
    pub gender: Gender,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<u32>,
    pub activity: Activity,
}

/// Body of `POST /optimize`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OptimizeRequest {
    pub gender: Gender,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<u32>,
    pub activity: Activity,
    pub allergens: Vec<String>,
    pub period: Period,
}

/// Blank, non-numeric and non-positive input all normalize to `None`.
pub fn parse_positive_int(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

pub fn parse_positive_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Lowercase, canonicalize and deduplicate allergen tokens. The token
/// "молоко" maps to "lactose", the form the service filters on. First
/// occurrence wins; insertion order is preserved.
pub fn normalize_allergens(raw: &[String]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let token = tag.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        let token = if token == "молоко" {
            "lactose".to_string()
        } else {
            token
        };
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Trim tags, drop blanks, deduplicate exact repeats preserving order.
fn clean_tags(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn string_items(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
