//! # Material Estimation
//!
//! Each tracked material is a fixed quantity per unit of effective area,
//! rounded with the rule its unit calls for (whole bags and pieces, one or
//! two decimals for volumes and tonnage).

use serde::{Deserialize, Serialize};

use crate::presets::{MaterialKind, MaterialSpec};

/// Quantity of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialQuantity {
    pub material: MaterialKind,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Quantities for every material the preset tracks, in preset order.
///
/// ## JSON Example
///
/// ```json
/// {
///   "items": [
///     { "material": "Cement", "name": "Cement", "quantity": 1200.0, "unit": "bags" },
///     { "material": "Steel", "name": "Steel", "quantity": 12.0, "unit": "tons" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialBreakdown {
    pub items: Vec<MaterialQuantity>,
}

impl MaterialBreakdown {
    pub fn get(&self, material: MaterialKind) -> Option<&MaterialQuantity> {
        self.items.iter().find(|item| item.material == material)
    }

    /// Quantity of one material, zero when untracked
    pub fn quantity(&self, material: MaterialKind) -> f64 {
        self.get(material).map(|item| item.quantity).unwrap_or(0.0)
    }
}

/// Apply every material thumb rule to the effective area.
pub fn calculate(effective_area: f64, specs: &[MaterialSpec]) -> MaterialBreakdown {
    let items = specs
        .iter()
        .map(|spec| MaterialQuantity {
            material: spec.material,
            name: spec.name.clone(),
            quantity: spec.rounding.apply(effective_area * spec.per_area),
            unit: spec.unit.clone(),
        })
        .collect();

    MaterialBreakdown { items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::EstimationPreset;

    #[test]
    fn test_standard_quantities() {
        let breakdown = calculate(3000.0, &EstimationPreset::standard().materials);
        assert_eq!(breakdown.items.len(), 5);
        assert_eq!(breakdown.quantity(MaterialKind::Cement), 1200.0);
        assert!((breakdown.quantity(MaterialKind::Steel) - 12.0).abs() < 1e-9);
        assert!((breakdown.quantity(MaterialKind::Sand) - 120.0).abs() < 1e-9);
        assert_eq!(breakdown.quantity(MaterialKind::Water), 1500.0);
        assert_eq!(breakdown.quantity(MaterialKind::Bricks), 24000.0);
        assert_eq!(breakdown.get(MaterialKind::Steel).unwrap().unit, "tons");
    }

    #[test]
    fn test_rounding_per_unit() {
        let breakdown = calculate(101.0, &EstimationPreset::standard().materials);
        // 40.4 bags → 41
        assert_eq!(breakdown.quantity(MaterialKind::Cement), 41.0);
        // 0.404 t → 0.40
        assert!((breakdown.quantity(MaterialKind::Steel) - 0.4).abs() < 1e-9);
        // 4.04 m³ → 4.0
        assert!((breakdown.quantity(MaterialKind::Sand) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_compact_quantities() {
        let breakdown = calculate(1800.0, &EstimationPreset::compact().materials);
        assert_eq!(breakdown.quantity(MaterialKind::Cement), 720.0);
        assert_eq!(breakdown.quantity(MaterialKind::Steel), 6840.0);
        assert_eq!(breakdown.quantity(MaterialKind::Bricks), 19800.0);
        assert_eq!(breakdown.quantity(MaterialKind::Water), 0.0);
        assert!(breakdown.get(MaterialKind::Water).is_none());
    }

    #[test]
    fn test_quantities_monotonic_in_area() {
        let specs = &EstimationPreset::standard().materials;
        let mut previous = calculate(0.5, specs);
        for step in 1..500 {
            let current = calculate(step as f64 * 3.3, specs);
            for (before, after) in previous.items.iter().zip(current.items.iter()) {
                assert!(after.quantity >= before.quantity, "{} decreased", after.name);
            }
            previous = current;
        }
    }
}
