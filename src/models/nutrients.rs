//! Reference catalog of tracked nutrients.
//!
//! The fourteen nutrients the system tracks, with their symbol, measurement
//! unit, and category. Macronutrients are measured in kg/ha and
//! micronutrients in g/ha, with one exception: Silicio is a micronutrient
//! measured in kg/ha, so unit lookups must go through this catalog instead
//! of the category.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agronomic nutrient category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NutrientCategory {
    Macronutrient,
    Micronutrient,
}

/// Unit a nutrient level is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureUnit {
    #[serde(rename = "kg/ha")]
    KilogramsPerHectare,
    #[serde(rename = "g/ha")]
    GramsPerHectare,
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureUnit::KilogramsPerHectare => write!(f, "kg/ha"),
            MeasureUnit::GramsPerHectare => write!(f, "g/ha"),
        }
    }
}

/// One entry of the nutrient reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientInfo {
    pub name: String,
    pub symbol: String,
    pub unit: MeasureUnit,
    pub description: String,
    pub category: NutrientCategory,
}

impl NutrientInfo {
    fn new(
        name: &str,
        symbol: &str,
        unit: MeasureUnit,
        description: &str,
        category: NutrientCategory,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            unit,
            description: description.to_string(),
            category,
        }
    }
}

static REFERENCE_NUTRIENTS: Lazy<Vec<NutrientInfo>> = Lazy::new(|| {
    use MeasureUnit::{GramsPerHectare, KilogramsPerHectare};
    use NutrientCategory::{Macronutrient, Micronutrient};

    vec![
        NutrientInfo::new(
            "Nitrógeno",
            "N",
            KilogramsPerHectare,
            "Esencial para el crecimiento vegetativo y el desarrollo de hojas",
            Macronutrient,
        ),
        NutrientInfo::new(
            "Fósforo",
            "P",
            KilogramsPerHectare,
            "Importante para el desarrollo de raíces y flores",
            Macronutrient,
        ),
        NutrientInfo::new(
            "Potasio",
            "K",
            KilogramsPerHectare,
            "Mejora la resistencia a enfermedades y el rendimiento",
            Macronutrient,
        ),
        NutrientInfo::new(
            "Calcio",
            "Ca",
            KilogramsPerHectare,
            "Fundamental para el desarrollo de células y paredes celulares",
            Macronutrient,
        ),
        NutrientInfo::new(
            "Magnesio",
            "Mg",
            KilogramsPerHectare,
            "Esencial para la fotosíntesis y el metabolismo energético",
            Macronutrient,
        ),
        NutrientInfo::new(
            "Azufre",
            "S",
            KilogramsPerHectare,
            "Importante para la formación de aminoácidos y enzimas",
            Macronutrient,
        ),
        NutrientInfo::new(
            "Cobre",
            "Cu",
            GramsPerHectare,
            "Actúa como cofactor en varias enzimas",
            Micronutrient,
        ),
        NutrientInfo::new(
            "Zinc",
            "Zn",
            GramsPerHectare,
            "Importante para la regulación génica y el crecimiento",
            Micronutrient,
        ),
        NutrientInfo::new(
            "Manganeso",
            "Mn",
            GramsPerHectare,
            "Participa en la fotosíntesis y el metabolismo de carbohidratos",
            Micronutrient,
        ),
        NutrientInfo::new(
            "Boro",
            "B",
            GramsPerHectare,
            "Importante para la pared celular y el transporte de azúcares",
            Micronutrient,
        ),
        NutrientInfo::new(
            "Molibdeno",
            "Mo",
            GramsPerHectare,
            "Esfuerzo en la fijación de nitrógeno y metabolismo del azufre",
            Micronutrient,
        ),
        NutrientInfo::new(
            "Cloro",
            "Cl",
            GramsPerHectare,
            "Importante para la osmoregulación y el rendimiento",
            Micronutrient,
        ),
        NutrientInfo::new(
            "Hierro",
            "Fe",
            GramsPerHectare,
            "Componente clave de las enzimas respiratorias",
            Micronutrient,
        ),
        // Micronutrient measured in kg/ha, unlike the rest of its category.
        NutrientInfo::new(
            "Silicio",
            "Si",
            KilogramsPerHectare,
            "Mejora la estructura de las plantas y su resistencia",
            Micronutrient,
        ),
    ]
});

/// All nutrients known to the system, macronutrients first.
pub fn reference_nutrients() -> &'static [NutrientInfo] {
    &REFERENCE_NUTRIENTS
}

/// Look up a nutrient by name.
pub fn find_nutrient(name: &str) -> Option<&'static NutrientInfo> {
    REFERENCE_NUTRIENTS.iter().find(|n| n.name == name)
}

/// Unit a nutrient is reported in. Unknown nutrients default to kg/ha.
pub fn unit_for(name: &str) -> MeasureUnit {
    find_nutrient(name)
        .map(|n| n.unit)
        .unwrap_or(MeasureUnit::KilogramsPerHectare)
}

/// Whether the named nutrient is a macronutrient.
pub fn is_macronutrient(name: &str) -> bool {
    find_nutrient(name)
        .map(|n| n.category == NutrientCategory::Macronutrient)
        .unwrap_or(false)
}
