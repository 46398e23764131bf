//! Typed report payload and its normalisation from raw JSON.
//!
//! The upstream API hands over a loosely structured mapping. This module is the
//! only place that inspects that mapping: [`ReportPayload::from_value`] locates
//! the report root once, reads every field leniently and turns empty sections
//! into `None` so that the renderer only ever sees the typed view models below.

use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::format::parse_lenient_f64;

/// Keys that identify the object carrying the report figures.
const REPORT_KEYS: &[&str] = &[
    "year",
    "table_summary",
    "waste_composition",
    "diverted_data",
    "directed_data",
    "spill_data",
];

/// Key under which API envelopes nest their payload.
const ENVELOPE_KEY: &str = "data";

/// Normalised report figures for one reporting year.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportPayload {
    pub year: Option<String>,
    pub summary: TableSummary,
    pub waste_composition: Option<WasteComposition>,
    pub diverted: Option<DisposalBreakdown>,
    pub directed: Option<DisposalBreakdown>,
    pub spills: Option<SpillData>,
}

/// Scalar totals shown on the summary cards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TableSummary {
    pub waste_generated: f64,
    pub waste_diverted: f64,
    pub waste_directed: f64,
    pub spills: f64,
}

impl TableSummary {
    /// Reads each figure from its plain key, or from the `total_`-prefixed one
    /// when the plain key is absent.
    fn from_map(map: &Map<String, Value>) -> Self {
        let figure = |key: &str| {
            map.get(key)
                .or_else(|| map.get(&format!("total_{key}")))
                .map(lenient_number)
                .unwrap_or(0.0)
        };
        Self {
            waste_generated: figure("waste_generated"),
            waste_diverted: figure("waste_diverted"),
            waste_directed: figure("waste_directed"),
            spills: figure("spills"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WasteCategory {
    #[serde(rename = "category_name", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub generated: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub diverted: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub directed: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WasteTotals {
    #[serde(deserialize_with = "lenient_f64")]
    pub generated: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub diverted: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub directed: f64,
}

/// Waste categories in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WasteComposition {
    pub categories: Vec<WasteCategory>,
    pub totals: Option<WasteTotals>,
}

/// Figures of one recovery or disposal method.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MethodFigures {
    pub method: String,
    pub onsite: f64,
    pub offsite: f64,
    pub total: f64,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct RawMethodFigures {
    #[serde(deserialize_with = "lenient_f64")]
    onsite: f64,
    #[serde(deserialize_with = "lenient_f64")]
    offsite: f64,
    #[serde(deserialize_with = "lenient_f64")]
    total: f64,
}

/// Hazardous and non-hazardous method figures sharing one method order.
///
/// Both groups list every method of [`DisposalBreakdown::methods`]; a method
/// absent from one group shows zeros there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisposalBreakdown {
    pub methods: Vec<String>,
    pub hazardous: Vec<MethodFigures>,
    pub non_hazardous: Vec<MethodFigures>,
}

impl DisposalBreakdown {
    /// Sum of every method row across both groups.
    pub fn totals(&self) -> MethodFigures {
        self.hazardous
            .iter()
            .chain(&self.non_hazardous)
            .fold(MethodFigures::default(), |mut acc, row| {
                acc.onsite += row.onsite;
                acc.offsite += row.offsite;
                acc.total += row.total;
                acc
            })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpillRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub spill_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub surface_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub volume: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub cleanup_cost: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpillTotals {
    #[serde(deserialize_with = "lenient_f64")]
    pub total_volume: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_cleanup_cost: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpillData {
    pub records: Vec<SpillRecord>,
    pub totals: Option<SpillTotals>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawWasteComposition {
    categories: Value,
    totals: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDisposal {
    hazardous: Value,
    non_hazardous: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSpillData {
    records: Value,
    totals: Value,
}

impl ReportPayload {
    /// Normalises a raw payload, unwrapping `{"data": ...}` envelopes.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let root = locate_report_root(value)?;

        let year = root.get("year").and_then(value_as_text);
        let summary = section::<Map<String, Value>>(&root, "table_summary")
            .map(|map| TableSummary::from_map(&map))
            .unwrap_or_default();
        let waste_composition =
            section(&root, "waste_composition").and_then(normalize_composition);
        let diverted = section(&root, "diverted_data").and_then(normalize_disposal);
        let directed = section(&root, "directed_data").and_then(normalize_disposal);
        let spills = section(&root, "spill_data").and_then(normalize_spills);

        Ok(Self {
            year,
            summary,
            waste_composition,
            diverted,
            directed,
            spills,
        })
    }

    /// Parses and normalises a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parses and normalises a JSON document read from `reader`.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn locate_report_root(value: Value) -> Result<Map<String, Value>, PayloadError> {
    let mut current = match value {
        Value::Object(map) => map,
        other => return Err(PayloadError::NotAnObject(value_kind(&other))),
    };

    loop {
        if REPORT_KEYS.iter().any(|key| current.contains_key(*key)) {
            return Ok(current);
        }
        match current.remove(ENVELOPE_KEY) {
            Some(Value::Object(inner)) => {
                debug!("unwrapping '{}' envelope around report payload", ENVELOPE_KEY);
                current = inner;
            }
            _ => return Ok(current),
        }
    }
}

/// `null`, `false`, `0`, blank strings and empty arrays or objects.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(true) => false,
    }
}

/// Reads the object under `key` as `T`.
///
/// Missing and falsy values yield `None`, and so does anything that is not an
/// object of the expected shape; the section is then skipped.
fn section<T>(root: &Map<String, Value>, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    let value = root.get(key).filter(|value| !is_falsy(value))?;
    if !value.is_object() {
        debug!("'{}' is {}, not an object; section skipped", key, value_kind(value));
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(section) => Some(section),
        Err(err) => {
            debug!("'{}' has an unexpected shape ({}); section skipped", key, err);
            None
        }
    }
}

/// Object entries of `value` read as `T`; other entries are skipped.
fn object_entries<T>(value: Value, what: &str) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    let items = match value {
        Value::Array(items) => items,
        other => {
            if !is_falsy(&other) {
                debug!("{} are {}, not an array; ignored", what, value_kind(&other));
            }
            return Vec::new();
        }
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                debug!("{} entry {} is {}; skipped", what, index, value_kind(&item));
                return None;
            }
            serde_json::from_value(item)
                .map_err(|err| debug!("{} entry {} skipped: {}", what, index, err))
                .ok()
        })
        .collect()
}

/// A non-empty totals object read as `T`.
fn totals<T>(value: Value) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    match value {
        Value::Object(map) if !map.is_empty() => serde_json::from_value(Value::Object(map))
            .map_err(|err| debug!("totals skipped: {}", err))
            .ok(),
        _ => None,
    }
}

fn method_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn normalize_composition(raw: RawWasteComposition) -> Option<WasteComposition> {
    let categories: Vec<WasteCategory> = object_entries(raw.categories, "waste categories");
    if categories.is_empty() {
        debug!("waste composition has no categories; section skipped");
        return None;
    }

    Some(WasteComposition {
        categories,
        totals: totals(raw.totals),
    })
}

fn normalize_disposal(raw: RawDisposal) -> Option<DisposalBreakdown> {
    let hazardous = method_map(raw.hazardous);
    let non_hazardous = method_map(raw.non_hazardous);

    let mut methods: Vec<String> = hazardous.keys().cloned().collect();
    for key in non_hazardous.keys() {
        if !hazardous.contains_key(key) {
            methods.push(key.clone());
        }
    }

    if methods.is_empty() {
        debug!("disposal breakdown has no methods; section skipped");
        return None;
    }

    let group = |figures: &Map<String, Value>| -> Vec<MethodFigures> {
        methods
            .iter()
            .map(|method| {
                let raw = figures
                    .get(method)
                    .filter(|value| value.is_object())
                    .and_then(|value| serde_json::from_value::<RawMethodFigures>(value.clone()).ok())
                    .unwrap_or_default();
                MethodFigures {
                    method: method.clone(),
                    onsite: raw.onsite,
                    offsite: raw.offsite,
                    total: raw.total,
                }
            })
            .collect()
    };

    let hazardous_rows = group(&hazardous);
    let non_hazardous_rows = group(&non_hazardous);

    Some(DisposalBreakdown {
        hazardous: hazardous_rows,
        non_hazardous: non_hazardous_rows,
        methods,
    })
}

fn normalize_spills(raw: RawSpillData) -> Option<SpillData> {
    let records: Vec<SpillRecord> = object_entries(raw.records, "spill records");
    if records.is_empty() {
        debug!("spill data has no records; section skipped");
        return None;
    }

    Some(SpillData {
        records,
        totals: totals(raw.totals),
    })
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value))
}

/// A number, or a numeric string with separators; anything else is `0.0`.
fn lenient_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_lenient_f64(text),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}
