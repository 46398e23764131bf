use std::fs;
use std::path::Path;

use gri_report::canvas::{Canvas, DrawOp, RecordingCanvas};
use gri_report::fonts::{FontWeight, FONT_SUBDIRECTORY};
use gri_report::{generate_report, ReportBuilder, ReportPayload};
use serde_json::{json, Value};

const MISSING_ASSETS: &str = "/__gri_report_missing_assets__";

fn builder() -> ReportBuilder {
    ReportBuilder::new().with_asset_dir(MISSING_ASSETS)
}

fn payload(value: Value) -> ReportPayload {
    ReportPayload::from_value(value).expect("valid payload")
}

fn record(payload: &ReportPayload) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::new();
    builder()
        .render_on(payload, &mut canvas)
        .expect("render on recording canvas");
    canvas
}

/// Pages holding a text run exactly equal to `text`.
fn pages_with_run(canvas: &RecordingCanvas, text: &str) -> Vec<usize> {
    canvas
        .pages()
        .iter()
        .enumerate()
        .filter(|(_, page)| page.text_runs(text).next().is_some())
        .map(|(index, _)| index)
        .collect()
}

fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("parse rendered PDF")
        .get_pages()
        .len()
}

fn categories(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|index| {
            json!({
                "category_name": format!("Category {index}"),
                "generated": 1234.5,
                "diverted": "1,000.25",
                "directed": 234.25,
            })
        })
        .collect()
}

fn spill_records(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|index| {
            json!({
                "spill_type": "Oil",
                "surface_type": "Concrete",
                "location": format!("Site {index}"),
                "volume": 12.5,
                "cleanup_cost": 4500,
            })
        })
        .collect()
}

fn expected_table_pages(rows: usize, first: usize, continuation: usize) -> usize {
    if rows <= first {
        1
    } else {
        1 + (rows - first + continuation - 1) / continuation
    }
}

#[test]
fn empty_payload_renders_three_pages() {
    let report = builder()
        .render(&ReportPayload::default())
        .expect("render empty payload");

    assert!(report.bytes.starts_with(b"%PDF"));
    assert_eq!(report.page_count, 3);
    assert_eq!(pdf_page_count(&report.bytes), 3);
}

#[test]
fn missing_asset_directory_still_renders() {
    let value = json!({
        "data": {
            "year": 2023,
            "waste_composition": { "categories": categories(5), "totals": {} },
        }
    });
    let bytes = generate_report(value, Path::new(MISSING_ASSETS)).expect("render with fallbacks");

    // Cover, two waste composition pages, outro.
    assert_eq!(pdf_page_count(&bytes), 4);
}

#[test]
fn eleven_categories_put_totals_on_the_second_table_page() {
    let payload = payload(json!({
        "year": "2024",
        "waste_composition": {
            "categories": categories(11),
            "totals": { "generated": 13579.5, "diverted": 11002.75, "directed": 2576.75 },
        },
    }));
    let canvas = record(&payload);

    assert_eq!(canvas.page_count(), 4);
    assert_eq!(pages_with_run(&canvas, "Category 3"), [1]);
    assert_eq!(pages_with_run(&canvas, "Category 4"), [2]);
    assert_eq!(pages_with_run(&canvas, "Category 11"), [2]);
    assert_eq!(pages_with_run(&canvas, "Total"), [2]);
    assert_eq!(pages_with_run(&canvas, "13,579.50"), [2]);
}

#[test]
fn empty_totals_object_draws_no_totals_row() {
    let payload = payload(json!({
        "waste_composition": { "categories": categories(2), "totals": {} },
    }));
    let canvas = record(&payload);

    assert_eq!(canvas.page_count(), 3);
    assert!(pages_with_run(&canvas, "Total").is_empty());
}

#[test]
fn totals_row_uses_the_data_columns() {
    let payload = payload(json!({
        "waste_composition": {
            "categories": categories(1),
            "totals": { "generated": 1234.5, "diverted": 1000.25, "directed": 234.25 },
        },
    }));
    let canvas = record(&payload);
    let page = canvas.page(1).expect("disclosure page");

    let x_of = |text: &str| match page.text_runs(text).next() {
        Some(DrawOp::Text { origin, .. }) => origin.x,
        _ => panic!("'{text}' not drawn"),
    };
    assert!((x_of("Category 1") - x_of("Total")).abs() < 1e-9);

    let weights: Vec<FontWeight> = page
        .text_runs("1,234.50")
        .filter_map(|op| match op {
            DrawOp::Text { weight, .. } => Some(*weight),
            _ => None,
        })
        .collect();
    assert_eq!(weights, [FontWeight::Regular, FontWeight::SemiBold]);
}

#[test]
fn waste_composition_page_count_follows_the_budget() {
    for rows in [1, 3, 4, 11, 12, 19, 20, 27] {
        let payload = payload(json!({
            "waste_composition": { "categories": categories(rows) },
        }));
        let canvas = record(&payload);
        assert_eq!(
            canvas.page_count(),
            2 + expected_table_pages(rows, 3, 8),
            "{rows} categories"
        );
    }
}

#[test]
fn spill_page_count_follows_the_budget() {
    for rows in [1, 7, 8, 16, 17, 25, 26] {
        let payload = payload(json!({
            "spill_data": { "records": spill_records(rows) },
        }));
        let canvas = record(&payload);
        assert_eq!(
            canvas.page_count(),
            3 + expected_table_pages(rows, 7, 9),
            "{rows} spill records"
        );
    }
}

#[test]
fn spill_continuation_pages_skip_the_column_header() {
    let payload = payload(json!({
        "spill_data": {
            "records": spill_records(10),
            "totals": { "total_volume": 125, "total_cleanup_cost": 45000 },
        },
    }));
    let canvas = record(&payload);

    // Cover, disclosure, two spill pages, outro.
    assert_eq!(canvas.page_count(), 5);
    assert_eq!(pages_with_run(&canvas, "Clean-up Cost"), [2]);
    assert_eq!(pages_with_run(&canvas, "Site 7"), [2]);
    assert_eq!(pages_with_run(&canvas, "Site 8"), [3]);
    assert_eq!(pages_with_run(&canvas, "Total"), [3]);
    assert_eq!(pages_with_run(&canvas, "45,000.00"), [3]);
}

#[test]
fn disposal_label_rows_count_toward_the_page_budget() {
    let methods: serde_json::Map<String, Value> = (1..=7)
        .map(|index| {
            (
                format!("Method {index}"),
                json!({ "onsite": 1, "offsite": 2, "total": 3 }),
            )
        })
        .collect();
    let payload = payload(json!({
        "diverted_data": {
            "hazardous": Value::Object(methods.clone()),
            "non_hazardous": Value::Object(methods),
        },
    }));
    let canvas = record(&payload);

    // Label + 7 methods fill the first page exactly; the second group follows.
    assert_eq!(canvas.page_count(), 5);
    assert_eq!(pages_with_run(&canvas, "Hazardous"), [2]);
    assert_eq!(pages_with_run(&canvas, "Non-Hazardous"), [3]);
    assert_eq!(pages_with_run(&canvas, "14"), [3]);
    // Synthetic totals: 14 rows of 3.00.
    assert_eq!(pages_with_run(&canvas, "42.00"), [3]);
}

#[test]
fn sections_are_skipped_when_absent() {
    let payload = payload(json!({
        "directed_data": {
            "hazardous": { "Landfilling": { "onsite": 0, "offsite": 5, "total": 5 } },
        },
    }));
    let canvas = record(&payload);

    assert_eq!(canvas.page_count(), 4);
    assert_eq!(pages_with_run(&canvas, "Waste Directed to Disposal"), [2]);
    assert!(pages_with_run(&canvas, "Waste Diverted from Disposal").is_empty());
    // The method missing from the non-hazardous group still shows, with zeros.
    assert_eq!(
        canvas.page(2).expect("page").text_runs("Landfilling").count(),
        2
    );
}

#[test]
fn header_and_footer_carry_the_payload_year() {
    let payload = payload(json!({ "data": { "data": { "year": "2022" } } }));
    let canvas = record(&payload);

    let footer = "\u{00A9} 2022 Waste Management Platform. All rights reserved.";
    assert_eq!(pages_with_run(&canvas, footer), [1]);
    // The cover repeats the reporting period under its subtitle.
    assert_eq!(
        pages_with_run(&canvas, "All Location \u{2022} Jan 1 \u{2013} Dec 31, 2022"),
        [0, 1]
    );
    assert_eq!(pages_with_run(&canvas, "Waste Management Report 2022"), [0]);
}

#[test]
fn rendering_is_deterministic() {
    let value = json!({
        "year": "2024",
        "table_summary": { "total_waste_generated": 10, "waste_diverted": 6 },
        "waste_composition": { "categories": categories(14) },
        "spill_data": { "records": spill_records(9) },
    });
    let first = record(&payload(value.clone()));
    let second = record(&payload(value));

    assert_eq!(first.page_count(), second.page_count());
    assert_eq!(first.pages(), second.pages());
}

#[test]
fn corrupt_font_files_fall_back_per_weight() {
    let assets = tempfile::tempdir().expect("tempdir");
    let fonts = assets.path().join(FONT_SUBDIRECTORY);
    fs::create_dir_all(&fonts).expect("create fonts dir");
    fs::write(fonts.join(FontWeight::Regular.file_name()), b"not a font").expect("write font");

    let report = ReportBuilder::new()
        .with_asset_dir(assets.path())
        .render(&ReportPayload::default())
        .expect("render with corrupt font");

    assert_eq!(pdf_page_count(&report.bytes), 3);
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_add_an_outline() {
    let payload = payload(json!({
        "waste_composition": { "categories": categories(2) },
    }));
    let report = builder()
        .with_bookmarks(true)
        .render(&payload)
        .expect("render with bookmarks");

    let document = lopdf::Document::load_mem(&report.bytes).expect("parse PDF");
    let root = document
        .trailer
        .get(b"Root")
        .and_then(lopdf::Object::as_reference)
        .expect("catalog reference");
    let catalog = document.get_dictionary(root).expect("catalog");
    assert!(catalog.get(b"Outlines").is_ok());
    assert_eq!(report.sections.len(), 4);
}
