use std::fs;
use std::path::{Path, PathBuf};

use graphdata::{convert, ConvertOptions, PipelineError, SourceCounts};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

const PEOPLE_HEADER: &str = "ID,Name [text],Bio [text],Website [link],Social [link],Connections to institution [text]";
const METHODS_HEADER: &str = "ID,Name [text],Description [text],Step-by-step guide [Numbered list text ],Category [text]";

struct Workspace {
    _dir: TempDir,
    options: ConvertOptions,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("data")).unwrap();

        let options = ConvertOptions {
            data_dir: root.join("data"),
            output_path: root.join("public/data/graphData.json"),
            report_path: root.join("reports/data-report.json"),
            ..ConvertOptions::default()
        };
        Self { _dir: dir, options }
    }

    fn write_source(&self, file: &str, content: &str) {
        fs::write(self.options.data_dir.join(file), content).unwrap();
    }

    fn output(&self) -> &Path {
        &self.options.output_path
    }

    fn report(&self) -> &Path {
        &self.options.report_path
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn lines(rows: &[&str]) -> String {
    let mut out = rows.join("\n");
    out.push('\n');
    out
}

#[test]
fn people_scenario_with_absent_institutions() {
    let ws = Workspace::new();
    ws.write_source(
        "PEOPLE.csv",
        &lines(&[
            PEOPLE_HEADER,
            "p1,Ada Lovelace,Mathematician,https://ada.org,,",
            "p2,Grace Hopper,,https://a.org | https://b.org,@grace,Navy",
            "p3,,Nameless,,,",
        ]),
    );

    let result = convert(&ws.options).unwrap();

    assert_eq!(result.dataset.nodes.len(), 2);
    assert!(result.dataset.nodes.iter().all(|n| n.category == "People"));
    assert!(result.dataset.links.is_empty());
    assert_eq!(
        result.report.counts["PEOPLE.csv"],
        SourceCounts { total: 3, parsed: 2, skipped: 1 }
    );
    assert_eq!(
        result.report.counts["INSTITUTIONS.csv"],
        SourceCounts { total: 0, parsed: 0, skipped: 0 }
    );

    let dataset = read_json(ws.output());
    assert_eq!(
        dataset,
        json!({
            "nodes": [
                {
                    "type": "People",
                    "id": "p1",
                    "name": "Ada Lovelace",
                    "bio": "Mathematician",
                    "websites": ["https://ada.org"]
                },
                {
                    "type": "People",
                    "id": "p2",
                    "name": "Grace Hopper",
                    "connections": "Navy",
                    "social": ["@grace"],
                    "websites": ["https://a.org", "https://b.org"]
                }
            ],
            "links": []
        })
    );

    let report = read_json(ws.report());
    assert_eq!(
        report["skipped_rows"],
        json!([{ "source": "PEOPLE.csv", "row_number": 4, "reason": "missing: name" }])
    );
    assert_eq!(
        report["missing_required_fields"],
        json!([{ "source": "PEOPLE.csv", "row_number": 4, "missing_fields": ["name"] }])
    );
    assert_eq!(report["duplicate_ids"], json!([]));
    assert_eq!(report["counts"]["METHODS.csv"], json!({ "total": 0, "parsed": 0, "skipped": 0 }));
}

#[test]
fn missing_id_and_name_both_named_in_order() {
    let ws = Workspace::new();
    ws.write_source(
        "METHODS.csv",
        &lines(&[METHODS_HEADER, ",,Orphan description,,", ",Named,,,"]),
    );

    let result = convert(&ws.options).unwrap();
    let reasons: Vec<_> = result
        .report
        .skipped_rows
        .iter()
        .map(|s| s.reason.as_str())
        .collect();
    assert_eq!(reasons, vec!["missing: id, name", "missing: id"]);
    assert!(result.dataset.nodes.is_empty());
}

#[test]
fn rows_of_empty_cells_are_reported_not_dropped() {
    let ws = Workspace::new();
    ws.write_source("PEOPLE.csv", "ID,Name [text]\np1,Ada\n,\np2,\n");

    let result = convert(&ws.options).unwrap();
    assert_eq!(
        result.report.counts["PEOPLE.csv"],
        SourceCounts { total: 3, parsed: 1, skipped: 2 }
    );

    let report = read_json(ws.report());
    assert_eq!(
        report["skipped_rows"],
        json!([
            { "source": "PEOPLE.csv", "row_number": 3, "reason": "missing: id, name" },
            { "source": "PEOPLE.csv", "row_number": 4, "reason": "missing: name" }
        ])
    );
    assert_eq!(
        report["missing_required_fields"][0],
        json!({ "source": "PEOPLE.csv", "row_number": 3, "missing_fields": ["id", "name"] })
    );
}

#[test]
fn duplicate_ids_abort_without_writing() {
    let ws = Workspace::new();
    ws.write_source("PEOPLE.csv", &lines(&[PEOPLE_HEADER, "x1,Ada,,,,", "p2,Grace,,,,"]));
    ws.write_source(
        "METHODS.csv",
        &lines(&[METHODS_HEADER, "x1,Shadow method,,,", "m2,Fine,,,", "p2,Also shadow,,,"]),
    );

    let err = convert(&ws.options).unwrap_err();
    match err {
        PipelineError::DuplicateIds { ids, report } => {
            assert_eq!(ids, vec!["x1", "p2"]);
            let reasons: Vec<_> = report.skipped_rows.iter().map(|s| s.reason.clone()).collect();
            assert_eq!(
                reasons,
                vec![
                    "duplicate id \"x1\" (first seen in PEOPLE.csv row 2)".to_string(),
                    "duplicate id \"p2\" (first seen in PEOPLE.csv row 3)".to_string(),
                ]
            );
            assert_eq!(report.skipped_rows[0].source, "METHODS.csv");
            assert_eq!(report.skipped_rows[1].row_number, 4);
        }
        other => panic!("expected duplicate abort, got {other}"),
    }

    assert!(!ws.output().exists());
    assert!(!ws.report().exists());
}

#[test]
fn duplicate_abort_keeps_previous_artifacts_untouched() {
    let ws = Workspace::new();
    ws.write_source("PEOPLE.csv", &lines(&[PEOPLE_HEADER, "p1,Ada,,,,"]));
    convert(&ws.options).unwrap();
    let before = fs::read_to_string(ws.output()).unwrap();

    ws.write_source("PEOPLE.csv", &lines(&[PEOPLE_HEADER, "p1,Ada,,,,", "p1,Again,,,,"]));
    assert!(convert(&ws.options).is_err());

    assert_eq!(fs::read_to_string(ws.output()).unwrap(), before);
}

#[test]
fn reruns_are_byte_identical() {
    let ws = Workspace::new();
    ws.write_source(
        "PEOPLE.csv",
        &lines(&[PEOPLE_HEADER, "p1,Ada,Bio,a|b,,", "p2,Grace,,,,"]),
    );
    ws.write_source("METHODS.csv", &lines(&[METHODS_HEADER, "m1,Mapping,Desc,1. a|2. b,Tools"]));

    convert(&ws.options).unwrap();
    let dataset_1 = fs::read(ws.output()).unwrap();
    let report_1 = fs::read(ws.report()).unwrap();

    convert(&ws.options).unwrap();
    assert_eq!(fs::read(ws.output()).unwrap(), dataset_1);
    assert_eq!(fs::read(ws.report()).unwrap(), report_1);
}

#[test]
fn dataset_is_overwritten_not_merged() {
    let ws = Workspace::new();
    ws.write_source("PEOPLE.csv", &lines(&[PEOPLE_HEADER, "p1,Ada,,,,", "p2,Grace,,,,"]));
    convert(&ws.options).unwrap();

    ws.write_source("PEOPLE.csv", &lines(&[PEOPLE_HEADER, "p3,Hedy,,,,"]));
    convert(&ws.options).unwrap();

    let dataset = read_json(ws.output());
    let ids: Vec<_> = dataset["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["p3"]);
}

#[test]
fn quoted_cells_and_ragged_rows() {
    let ws = Workspace::new();
    ws.write_source(
        "PEOPLE.csv",
        &lines(&[
            PEOPLE_HEADER,
            "p1,\"Lovelace, Ada\",\"Wrote the first program,\nand notes\"",
            "",
            "p2,Grace,,,,,extra,cells",
        ]),
    );

    let result = convert(&ws.options).unwrap();
    let nodes = &result.dataset.nodes;
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name, "Lovelace, Ada");
    assert_eq!(
        nodes[0].get("bio"),
        Some(&graphdata::FieldValue::from("Wrote the first program,\nand notes"))
    );
    assert!(nodes[0].get("websites").is_none());
    assert_eq!(result.report.counts["PEOPLE.csv"].total, 2);
}

#[test]
fn categories_processed_in_declaration_order() {
    let ws = Workspace::new();
    ws.write_source("METHODS.csv", &lines(&[METHODS_HEADER, "m1,Mapping,,,"]));
    ws.write_source("PEOPLE.csv", &lines(&[PEOPLE_HEADER, "p1,Ada,,,,"]));
    ws.write_source(
        "INSTITUTIONS.csv",
        "ID,Name [text],Website [link]\ni1,Museum,https://museum.org\n",
    );

    let result = convert(&ws.options).unwrap();
    let order: Vec<_> = result
        .dataset
        .nodes
        .iter()
        .map(|n| n.category.as_str())
        .collect();
    assert_eq!(order, vec!["People", "Institutions", "Methods"]);
    assert_eq!(
        result.dataset.nodes[1].get("websites"),
        Some(&graphdata::FieldValue::from(vec!["https://museum.org"]))
    );
}

#[test]
fn custom_categories_from_json() {
    let ws = Workspace::new();
    let categories = r#"[{
        "category": "Events",
        "source": "EVENTS.csv",
        "fields": [
            {"key": "id", "required": true},
            {"key": "name", "required": true},
            {"key": "tags", "shape": "list"}
        ],
        "columns": [
            {"label": "Code", "key": "id"},
            {"label": "Title", "key": "name"},
            {"label": "Tags", "key": "tags"},
            {"label": "More tags", "key": "tags"}
        ]
    }]"#;

    let options = ConvertOptions {
        categories: graphdata::transform::categories_from_json(categories).unwrap(),
        ..ws.options.clone()
    };
    ws.write_source("EVENTS.csv", "Code,Title,Tags,More tags\ne1,Launch,launch,press|media\n");

    let result = convert(&options).unwrap();
    assert_eq!(
        serde_json::to_value(&result.dataset.nodes[0]).unwrap(),
        json!({
            "type": "Events",
            "id": "e1",
            "name": "Launch",
            "tags": ["launch", "press", "media"]
        })
    );
    assert_eq!(result.report.counts.len(), 1);
}

#[test]
fn output_directories_are_created() {
    let ws = Workspace::new();
    let nested: PathBuf = ws.options.data_dir.join("deep/er/graph.json");
    let options = ConvertOptions {
        output_path: nested.clone(),
        ..ws.options.clone()
    };

    convert(&options).unwrap();
    assert_eq!(read_json(&nested), json!({ "nodes": [], "links": [] }));
}
