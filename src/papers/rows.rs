use serde_json::Value;

use super::flatten::{flatten_json, KEEP_AS_JSON};
use super::types::{Paper, Row};

/// Paper metadata every derived row starts from.
pub fn paper_info(paper: &Paper) -> Row {
    let mut info = Row::new();
    info.insert("paper_id".into(), Value::String(paper.paper_id.clone()));
    info.insert(
        "title".into(),
        Value::String(paper.title.clone().unwrap_or_default()),
    );
    info.insert(
        "authors".into(),
        Value::String(paper.authors.clone().unwrap_or_default()),
    );
    info.insert(
        "published_date".into(),
        Value::String(paper.published_date.clone().unwrap_or_default()),
    );
    info
}

/// One row per material, each flattened over its paper's metadata.
/// Papers without materials still produce one metadata-only row.
pub fn paper_rows(paper: &Paper) -> Vec<Row> {
    let info = paper_info(paper);
    let materials = paper.materials();
    if materials.is_empty() {
        return vec![info];
    }

    materials
        .iter()
        .map(|material| {
            let mut row = info.clone();
            if let Value::Object(fields) = material {
                row.extend(flatten_json(fields, KEEP_AS_JSON));
            }
            row
        })
        .collect()
}

pub fn derive_rows(papers: &[Paper]) -> Vec<Row> {
    papers.iter().flat_map(paper_rows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paper(output: Value) -> Paper {
        serde_json::from_value(json!({
            "paper_id": "10.1038/nature14964",
            "title": "Conventional superconductivity at 203 K",
            "authors": "Drozdov et al.",
            "published_date": "2015-08-17",
            "output": output,
            "domain": "superconductors",
            "processed": true,
            "screened": true,
            "screen_passed": true
        }))
        .unwrap()
    }

    #[test]
    fn test_row_per_material() {
        let p = paper(json!({"materials": [
            {"material": {"composition": {"H": 3, "S": 1}}, "properties": {"critical_temperature": 203}},
            {"material": {"composition": {"H": 2, "S": 1}}}
        ]}));
        let rows = paper_rows(&p);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["paper_id"], json!("10.1038/nature14964"));
        assert_eq!(rows[0]["material_composition"], json!(r#"{"H":3,"S":1}"#));
        assert_eq!(rows[0]["properties_critical_temperature"], json!(203));
        assert!(rows[1].get("properties_critical_temperature").is_none());
    }

    #[test]
    fn test_metadata_first_in_key_order() {
        let p = paper(json!({"materials": [{"name": "H3S"}]}));
        let rows = paper_rows(&p);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["paper_id", "title", "authors", "published_date", "name"]);
    }

    #[test]
    fn test_paper_without_materials() {
        let rows = paper_rows(&paper(json!({"summary": "nothing extracted"})));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 4);
    }

    #[test]
    fn test_missing_optional_metadata_is_empty_string() {
        let mut p = paper(Value::Null);
        p.authors = None;
        p.published_date = None;
        let rows = derive_rows(&[p]);
        assert_eq!(rows[0]["authors"], json!(""));
        assert_eq!(rows[0]["published_date"], json!(""));
    }

    #[test]
    fn test_null_title_is_empty_cell() {
        let mut p = paper(json!({"materials": [{"name": "H3S"}]}));
        p.title = None;
        let rows = paper_rows(&p);
        assert_eq!(rows[0]["title"], json!(""));
        assert_eq!(rows[0]["name"], json!("H3S"));
    }

    #[test]
    fn test_non_object_material_keeps_metadata_only() {
        let rows = paper_rows(&paper(json!({"materials": ["H3S", null]})));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 4));
    }
}
