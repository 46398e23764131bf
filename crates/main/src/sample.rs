//! Generated payloads for trying out the renderer.

use serde_json::{json, Map, Value};

const CATEGORIES: &[&str] = &[
    "Food waste",
    "Paper and cardboard",
    "Plastic packaging",
    "Glass",
    "Metal scrap",
    "Electronic waste",
    "Used oil",
    "Construction debris",
    "Textiles",
    "Garden waste",
];

const RECOVERY_METHODS: &[&str] = &["Preparation for reuse", "Recycling", "Composting"];
const DISPOSAL_METHODS: &[&str] = &["Incineration with energy recovery", "Landfilling"];

fn methods(names: &[&str], scale: f64) -> Value {
    let mut map = Map::new();
    for (index, name) in names.iter().enumerate() {
        let onsite = scale * (index as f64 + 1.0) * 12.5;
        let offsite = scale * (index as f64 + 2.0) * 31.25;
        map.insert(
            (*name).to_owned(),
            json!({ "onsite": onsite, "offsite": offsite, "total": onsite + offsite }),
        );
    }
    Value::Object(map)
}

/// A payload with `rows` waste categories and `rows` spill records.
pub fn payload(rows: usize) -> Value {
    let categories: Vec<Value> = (0..rows)
        .map(|index| {
            let base = CATEGORIES[index % CATEGORIES.len()];
            let name = if index < CATEGORIES.len() {
                base.to_owned()
            } else {
                format!("{} ({})", base, index / CATEGORIES.len() + 1)
            };
            let generated = 1250.0 + index as f64 * 173.4;
            json!({
                "category_name": name,
                "generated": generated,
                "diverted": generated * 0.6,
                "directed": generated * 0.4,
            })
        })
        .collect();
    let generated: f64 = (0..rows).map(|index| 1250.0 + index as f64 * 173.4).sum();

    let spills: Vec<Value> = (0..rows)
        .map(|index| {
            json!({
                "spill_type": if index % 2 == 0 { "Oil" } else { "Chemical" },
                "surface_type": if index % 3 == 0 { "Concrete" } else { "Soil" },
                "location": format!("Warehouse {}", index % 4 + 1),
                "volume": 20.0 + index as f64 * 7.5,
                "cleanup_cost": 15000.0 + index as f64 * 2300.0,
            })
        })
        .collect();
    let total_volume: f64 = (0..rows).map(|index| 20.0 + index as f64 * 7.5).sum();
    let total_cost: f64 = (0..rows).map(|index| 15000.0 + index as f64 * 2300.0).sum();

    json!({
        "data": {
            "year": "2024",
            "table_summary": {
                "waste_generated": generated,
                "waste_diverted": generated * 0.6,
                "waste_directed": generated * 0.4,
                "spills": total_volume,
            },
            "waste_composition": {
                "categories": categories,
                "totals": {
                    "generated": generated,
                    "diverted": generated * 0.6,
                    "directed": generated * 0.4,
                },
            },
            "diverted_data": {
                "hazardous": methods(RECOVERY_METHODS, 0.2),
                "non_hazardous": methods(RECOVERY_METHODS, 1.0),
            },
            "directed_data": {
                "hazardous": methods(DISPOSAL_METHODS, 0.3),
                "non_hazardous": methods(DISPOSAL_METHODS, 1.0),
            },
            "spill_data": {
                "records": spills,
                "totals": {
                    "total_volume": total_volume,
                    "total_cleanup_cost": total_cost,
                },
            },
        }
    })
}
