//! Nutrient records: measured standard nutrients, brain-relevant nutrients
//! and bioactive compounds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Known macro/micronutrient measurements for a food (name → amount).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardNutrients(pub BTreeMap<String, f64>);

impl StandardNutrients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.0.insert(name.into(), amount);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Omega-3 fatty acid breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Omega3 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dha_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ala_mg: Option<f64>,
    /// Prediction confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Nutrients with known neuro-relevance.
///
/// `omega3` is `Some` only when at least one omega-3 field was actually
/// extracted; it is never a zero-filled placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrainNutrients {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tryptophan_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tyrosine_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b6_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folate_mcg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b12_mcg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_d_mcg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zinc_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selenium_mcg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choline_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omega3: Option<Omega3>,
}

impl BrainNutrients {
    /// Names of the plain (non-omega) nutrient fields.
    pub const FIELDS: [&'static str; 11] = [
        "tryptophan_mg",
        "tyrosine_mg",
        "vitamin_b6_mg",
        "folate_mcg",
        "vitamin_b12_mcg",
        "vitamin_d_mcg",
        "magnesium_mg",
        "zinc_mg",
        "iron_mg",
        "selenium_mcg",
        "choline_mg",
    ];

    /// Set a plain nutrient field by name.
    ///
    /// Returns `false` when `name` is not a known field; the record is left
    /// untouched in that case.
    pub fn set_field(&mut self, name: &str, amount: f64) -> bool {
        let slot = match name {
            "tryptophan_mg" => &mut self.tryptophan_mg,
            "tyrosine_mg" => &mut self.tyrosine_mg,
            "vitamin_b6_mg" => &mut self.vitamin_b6_mg,
            "folate_mcg" => &mut self.folate_mcg,
            "vitamin_b12_mcg" => &mut self.vitamin_b12_mcg,
            "vitamin_d_mcg" => &mut self.vitamin_d_mcg,
            "magnesium_mg" => &mut self.magnesium_mg,
            "zinc_mg" => &mut self.zinc_mg,
            "iron_mg" => &mut self.iron_mg,
            "selenium_mcg" => &mut self.selenium_mcg,
            "choline_mg" => &mut self.choline_mg,
            _ => return false,
        };
        *slot = Some(amount);
        true
    }

    /// True when nothing at all was predicted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of nutrient values set, counting each omega-3 amount.
    pub fn populated_fields(&self) -> usize {
        let plain = [
            self.tryptophan_mg,
            self.tyrosine_mg,
            self.vitamin_b6_mg,
            self.folate_mcg,
            self.vitamin_b12_mcg,
            self.vitamin_d_mcg,
            self.magnesium_mg,
            self.zinc_mg,
            self.iron_mg,
            self.selenium_mcg,
            self.choline_mg,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count();
        let omega3 = self.omega3.as_ref().map_or(0, |o| {
            [o.total_g, o.epa_mg, o.dha_mg, o.ala_mg]
                .iter()
                .filter(|v| v.is_some())
                .count()
        });
        plain + omega3
    }
}

/// Bioactive compound quantities with per-compound confidence.
///
/// Confidence keys carry the `confidence_` prefix of the compound they
/// describe and exist only alongside that compound.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BioactiveCompounds {
    #[serde(default)]
    pub compounds: BTreeMap<String, f64>,
    #[serde(default)]
    pub confidence: BTreeMap<String, f64>,
}

impl BioactiveCompounds {
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Confidence recorded for `compound`, if any.
    pub fn confidence_for(&self, compound: &str) -> Option<f64> {
        self.confidence
            .get(&format!("confidence_{}", compound))
            .copied()
    }
}
