//! Fuel categorisation of energy end uses and the CO2e rollup.

use crate::slice::non_blank_block;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use phpp_core::{
    scale_by_area, FuelType, NormalizedDataset, PhppError, PhppResult, RegionFactors, RowSpan,
    ID_COLUMNS,
};
use phpp_sheet::{Row, Table};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Every end-use label the template writes, including the spacing and
/// punctuation variants different template builds produce for one use.
static FUEL_ALIASES: Lazy<HashMap<&'static str, FuelType>> = Lazy::new(|| {
    use FuelType::{Electric, FuelOilNo2, NaturalGas, SolarThermal, Wood};
    HashMap::from([
        ("Electricity dehumidification (HP)", Electric),
        ("Electricity cooling (HP)", Electric),
        ("Other (heating)", Electric),
        ("Electricity (HP compact unit)", Electric),
        ("Electricity (heat pump)", Electric),
        ("District heating: 1-None", Electric),
        ("District heating", Electric),
        ("Wood and other biomass", Wood),
        ("Natural gas / RE gas", NaturalGas),
        ("Boiler", FuelOilNo2),
        ("Heating oil / RE methanol", FuelOilNo2),
        ("Heating oil / Methanol", FuelOilNo2),
        ("Solar thermal system", SolarThermal),
        ("Electricity (direct)", Electric),
        ("Electricity cooling (heat pump)", Electric),
        ("Auxiliary electricity cooling ventilation summer", Electric),
        ("Auxiliary electricity cooling ventilation  summer", Electric),
        ("Auxiliary electricity cooling  ventilation summer", Electric),
        ("Auxiliary electricity cooling, ventilation summer", Electric),
        ("Electricity dehumidification (heat pump)", Electric),
        ("Auxiliary electricity (dehumidification)", Electric),
        ("Aux. electricity (DHW + solar DHW)", Electric),
        ("Dishwashing", Electric),
        ("Clothes Washing", Electric),
        ("Clothes Drying", Electric),
        ("Refrigerator", Electric),
        ("Cooking", Electric),
        ("PHI Lighting", Electric),
        ("PHI Consumer Elec.", Electric),
        ("PHI Small Appliances", Electric),
        ("Phius MEL", Electric),
        ("Phius Int Lighting", Electric),
        ("Phius Ext Lighting", Electric),
        ("Aux Elec", Electric),
    ])
});

/// Site energy rows that repeat the heating, cooling and DHW final energy.
const NON_MEL_SITE_ROWS: [&str; 3] = ["Heating", "Cooling", "DHW"];

/// Fuel of an end-use label.
pub fn fuel_for(label: &str) -> PhppResult<FuelType> {
    FUEL_ALIASES
        .get(label)
        .copied()
        .ok_or_else(|| PhppError::MissingFuelMapping {
            label: label.to_string(),
        })
}

/// What an end use is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    SpaceHeating,
    SpaceCooling,
    Dhw,
    Mel,
}

impl Category {
    /// Label of the category's total row
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::SpaceHeating => "Heating",
            Category::SpaceCooling => "Cooling",
            Category::Dhw => "DHW",
            Category::Mel => "MEL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One energy end use with its annual gross energy per variant (kWh).
#[derive(Debug, Clone, PartialEq)]
pub struct EndUse {
    pub label: String,
    pub category: Category,
    pub fuel: FuelType,
    pub gross_kwh: IndexMap<String, f64>,
}

fn row_label(row: &Row) -> String {
    row.cells[0].text().unwrap_or_default().to_string()
}

fn end_use(
    row: &Row,
    columns: &[String],
    category: Category,
    area: impl Fn(&str) -> PhppResult<f64>,
) -> PhppResult<EndUse> {
    let label = row_label(row);
    let fuel = fuel_for(&label)?;
    let gross_kwh = columns
        .iter()
        .zip(&row.cells)
        .skip(ID_COLUMNS)
        .map(|(variant, cell)| {
            let value = cell.number().unwrap_or(0.0);
            Ok((variant.clone(), scale_by_area(value, area(variant.as_str())?)))
        })
        .collect::<PhppResult<IndexMap<_, _>>>()?;
    Ok(EndUse {
        label,
        category,
        fuel,
        gross_kwh,
    })
}

fn final_energy(
    dataset: &NormalizedDataset,
    span: RowSpan,
    category: Category,
) -> PhppResult<Vec<EndUse>> {
    let block: Table = non_blank_block(dataset.main(), span);
    let tfa = dataset.tfa();
    block
        .rows()
        .iter()
        .map(|row| {
            end_use(row, block.columns(), category, |variant| {
                tfa.get(variant).copied().ok_or_else(|| {
                    PhppError::structural(format!("no floor area for variant '{variant}'"))
                })
            })
        })
        .collect()
}

/// All categorised end uses: heating, cooling and DHW final energy scaled
/// from per-area to annual kWh, then the miscellaneous electric site rows,
/// which are already annual.
pub fn categorized_end_uses(dataset: &NormalizedDataset) -> PhppResult<Vec<EndUse>> {
    let rows = &dataset.schema().rows;
    let mut uses = final_energy(dataset, rows.final_energy_heating, Category::SpaceHeating)?;
    uses.extend(final_energy(dataset, rows.final_energy_cooling, Category::SpaceCooling)?);
    uses.extend(final_energy(dataset, rows.final_energy_dhw, Category::Dhw)?);

    let site = non_blank_block(dataset.main(), rows.site_energy_consumption);
    for row in site.rows() {
        let label = row_label(row);
        if NON_MEL_SITE_ROWS.contains(&label.as_str()) {
            continue;
        }
        uses.push(end_use(row, site.columns(), Category::Mel, |_| Ok(1.0))?);
    }

    debug!(end_uses = uses.len(), "categorised energy end uses");
    Ok(uses)
}

/// CO2e per variant, tons per year.
#[derive(Debug, Clone, PartialEq)]
pub struct Co2eRollup {
    /// Heating, cooling and DHW totals in that order
    pub totals: IndexMap<Category, IndexMap<String, f64>>,
    /// Individual miscellaneous electric uses
    pub mel: Vec<(String, IndexMap<String, f64>)>,
}

/// Multiply every end use by its fuel's factor and sum by category.
pub fn co2e_rollup(
    uses: &[EndUse],
    variants: &[String],
    factors: &RegionFactors,
) -> PhppResult<Co2eRollup> {
    let zeros = || variants.iter().map(|v| (v.clone(), 0.0)).collect::<IndexMap<_, _>>();
    let mut totals: IndexMap<Category, IndexMap<String, f64>> = [
        Category::SpaceHeating,
        Category::SpaceCooling,
        Category::Dhw,
    ]
    .into_iter()
    .map(|c| (c, zeros()))
    .collect();
    let mut mel = Vec::new();

    for item in uses {
        let factor = factors.factor(item.fuel)?;
        let tons: IndexMap<String, f64> = item
            .gross_kwh
            .iter()
            .map(|(v, kwh)| (v.clone(), kwh * factor))
            .collect();
        match item.category {
            Category::Mel => mel.push((item.label.clone(), tons)),
            category => {
                let total = totals.entry(category).or_insert_with(zeros);
                for (v, t) in tons {
                    *total.entry(v).or_insert(0.0) += t;
                }
            }
        }
    }

    Ok(Co2eRollup { totals, mel })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_variants_all_map() {
        for label in [
            "Auxiliary electricity cooling ventilation summer",
            "Auxiliary electricity cooling ventilation  summer",
            "Auxiliary electricity cooling  ventilation summer",
            "Auxiliary electricity cooling, ventilation summer",
        ] {
            assert_eq!(fuel_for(label).unwrap(), FuelType::Electric);
        }
        assert_eq!(FUEL_ALIASES.len(), 34);
        assert_eq!(fuel_for("Boiler").unwrap(), FuelType::FuelOilNo2);
        assert_eq!(fuel_for("Wood and other biomass").unwrap(), FuelType::Wood);
    }

    #[test]
    fn test_unknown_label_is_named() {
        match fuel_for("Geothermal") {
            Err(PhppError::MissingFuelMapping { label }) => assert_eq!(label, "Geothermal"),
            other => panic!("expected MissingFuelMapping, got {other:?}"),
        }
    }
}
