//! Minimal `DietService` trait, wire types and a reqwest-based client.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod profile;

pub use profile::{Activity, Gender, OptimizeRequest, Period, Profile, ProfileDraft, TdeeRequest};

/// Errors produced by the Diet Service client.
///
/// The service can fail three distinct ways: the transport itself
/// ([`Transport`](DietServiceError::Transport)), a non-2xx status
/// ([`Api`](DietServiceError::Api), carrying the server-provided message or
/// `HTTP {status}` when the body has none), and a 2xx response whose body
/// carries an `error` field ([`Service`](DietServiceError::Service)). All
/// three render to a single user-facing string via `Display`.
#[derive(Debug, Error)]
pub enum DietServiceError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Service(String),
    #[error("decoding response: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// One product/grams row of an optimized ration.
///
/// The nutrient and cost columns are only present when the service returns
/// the richer `items` shape; the plain `diet` mapping carries grams only.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DietEntry {
    pub name: String,
    pub grams: f64,
    pub kcal: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub cost: Option<f64>,
}

impl DietEntry {
    pub fn new(name: impl Into<String>, grams: f64) -> Self {
        Self {
            name: name.into(),
            grams,
            kcal: None,
            protein: None,
            fat: None,
            carbs: None,
            cost: None,
        }
    }

    /// True when any optional nutrient/cost column is filled in.
    pub fn has_details(&self) -> bool {
        self.kcal.is_some()
            || self.protein.is_some()
            || self.fat.is_some()
            || self.carbs.is_some()
            || self.cost.is_some()
    }
}

/// The four macro figures the renderer cares about. The service reports
/// more nutrient keys (vitamins, minerals); those are ignored.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct MacroSummary {
    #[serde(default)]
    pub kcal: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbs: f64,
}

/// Optimization result as returned by `POST /optimize`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DietResult {
    #[serde(default, deserialize_with = "deserialize_diet_entries")]
    pub diet: Vec<DietEntry>,
    pub items: Option<Vec<DietEntry>>,
    pub total_cost: f64,
    pub status: String,
    #[serde(default)]
    pub period: Period,
    pub nutrient_totals: Option<MacroSummary>,
    pub norms: Option<MacroSummary>,
}

impl DietResult {
    /// Rows to display: the richer `items` list when the service sent one,
    /// otherwise the plain `diet` mapping.
    pub fn entries(&self) -> &[DietEntry] {
        match &self.items {
            Some(items) if !items.is_empty() => items,
            _ => &self.diet,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// The `diet` field arrives as a JSON object mapping product name to grams.
/// Deserialize it into an entry list, preserving document order.
fn deserialize_diet_entries<'de, D>(deserializer: D) -> Result<Vec<DietEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DietMapVisitor;

    impl<'de> serde::de::Visitor<'de> for DietMapVisitor {
        type Value = Vec<DietEntry>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of product name to grams")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, grams)) = map.next_entry::<String, f64>()? {
                entries.push(DietEntry::new(name, grams));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(DietMapVisitor)
}

/// Calorie estimate as returned by `POST /tdee`. Only `kcal` is
/// contractual; the service may also report the formula it used.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CalorieEstimate {
    pub kcal: f64,
    pub bmr: Option<f64>,
    pub activity_factor: Option<f64>,
    pub method: Option<String>,
}

/// One row of the product/price table.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Option<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ServiceHealth {
    pub ok: bool,
}

#[async_trait]
pub trait DietService: Send + Sync + 'static {
    /// Estimate the daily calorie norm for the given body metrics.
    async fn estimate_calories(
        &self,
        request: &TdeeRequest,
    ) -> Result<CalorieEstimate, DietServiceError>;

    /// Request a cost-optimized ration honoring the profile restrictions.
    async fn optimize_diet(
        &self,
        request: &OptimizeRequest,
    ) -> Result<DietResult, DietServiceError>;

    async fn list_products(&self) -> Result<Vec<Product>, DietServiceError>;

    async fn update_product_price(
        &self,
        product_id: i64,
        price: f64,
    ) -> Result<(), DietServiceError>;

    async fn health(&self) -> Result<ServiceHealth, DietServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diet_entries_preserve_document_order() {
        let raw = r#"{
            "diet": {"Sardines": 120.5, "Almonds": 30.0, "Oat groats": 210.0},
            "total_cost": 2.41,
            "status": "Optimal",
            "period": "day"
        }"#;
        let result: DietResult = serde_json::from_str(raw).expect("diet result");
        let names: Vec<&str> = result.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Sardines", "Almonds", "Oat groats"]);
        assert_eq!(result.entries()[0].grams, 120.5);
        assert!(!result.entries()[0].has_details());
    }

    #[test]
    fn items_take_precedence_over_diet_map() {
        let raw = r#"{
            "diet": {"Potatoes": 500.0},
            "items": [{"name": "Potatoes", "grams": 500.0, "kcal": 470.0, "cost": 0.5}],
            "total_cost": 0.5,
            "status": "Optimal",
            "period": "week"
        }"#;
        let result: DietResult = serde_json::from_str(raw).expect("diet result");
        assert_eq!(result.entries().len(), 1);
        assert!(result.entries()[0].has_details());
        assert_eq!(result.entries()[0].kcal, Some(470.0));
        assert_eq!(result.period, Period::Week);
    }

    #[test]
    fn empty_diet_map_is_empty_result() {
        let raw = r#"{"diet": {}, "total_cost": 0, "status": "empty"}"#;
        let result: DietResult = serde_json::from_str(raw).expect("diet result");
        assert!(result.is_empty());
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.status, "empty");
        assert_eq!(result.period, Period::Day);
    }

    #[test]
    fn macro_summary_ignores_extra_nutrient_keys() {
        let raw = r#"{
            "kcal": 2210.4, "protein": 62.2, "fat": 49.1, "carbs": 248.6,
            "kj": 9248.3, "A": 0.75, "B1": 0.9, "Fe": 11.0
        }"#;
        let summary: MacroSummary = serde_json::from_str(raw).expect("summary");
        assert_eq!(summary.kcal, 2210.4);
        assert_eq!(summary.carbs, 248.6);
    }

    #[test]
    fn calorie_estimate_tolerates_missing_extras() {
        let estimate: CalorieEstimate =
            serde_json::from_str(r#"{"kcal": 2200}"#).expect("estimate");
        assert_eq!(estimate.kcal, 2200.0);
        assert!(estimate.bmr.is_none());
        assert!(estimate.method.is_none());
    }
}
