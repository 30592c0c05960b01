use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One flattened output row, keys in insertion order.
pub type Row = serde_json::Map<String, Value>;

/// A row of the hosted `papers` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default, deserialize_with = "text")]
    pub paper_id: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub authors: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub published_date: Option<String>,
    /// Analyzer output; `materials` is the array we care about.
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default, deserialize_with = "text")]
    pub domain: String,
    #[serde(default, deserialize_with = "flag")]
    pub processed: bool,
    #[serde(default, deserialize_with = "flag")]
    pub screened: bool,
    #[serde(default, deserialize_with = "flag")]
    pub screen_passed: bool,
}

/// Any JSON scalar as text; null stays absent.
fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    optional_text(d).map(Option::unwrap_or_default)
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

impl Paper {
    /// Entries of `output.materials`, empty when missing or not an array.
    pub fn materials(&self) -> &[Value] {
        self.output
            .as_ref()
            .and_then(|o| o.get("materials"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A research topic partition of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const AVAILABLE_DOMAINS: &[Domain] = &[
    Domain {
        id: "superconductors",
        label: "Superconductors",
        description: "High-temperature superconductivity research",
    },
    Domain {
        id: "semiconductors",
        label: "Semiconductors",
        description: "Semiconductor materials and devices",
    },
    Domain {
        id: "quantum",
        label: "Quantum",
        description: "Quantum materials and phenomena",
    },
    Domain {
        id: "magnets",
        label: "Magnets",
        description: "Magnetic materials and properties",
    },
    Domain {
        id: "energy_storage",
        label: "Energy Storage",
        description: "Battery and energy storage technologies",
    },
];

pub fn find_domain(id: &str) -> Option<&'static Domain> {
    AVAILABLE_DOMAINS.iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paper_deserializes_with_nulls() {
        let paper: Paper = serde_json::from_value(json!({
            "paper_id": "2307.12008v1",
            "title": "LK-99",
            "authors": null,
            "published_date": null,
            "output": {"materials": [{"material": {"name": "Pb10-xCux(PO4)6O"}}]},
            "domain": "superconductors",
            "processed": true,
            "screened": true,
            "screen_passed": true
        }))
        .unwrap();
        assert_eq!(paper.authors, None);
        assert_eq!(paper.materials().len(), 1);
    }

    #[test]
    fn test_materials_not_an_array() {
        let paper: Paper = serde_json::from_value(json!({
            "paper_id": "p1",
            "title": "t",
            "output": {"materials": "none"},
            "domain": "quantum"
        }))
        .unwrap();
        assert!(paper.materials().is_empty());
    }

    #[test]
    fn test_batch_with_null_and_odd_fields_decodes() {
        let papers: Vec<Paper> = serde_json::from_value(json!([
            {"paper_id": "p1", "title": "ok", "authors": "A. Author", "domain": "superconductors",
             "processed": true, "screened": true, "screen_passed": true},
            {"paper_id": 42, "title": null, "authors": ["B", "C"], "domain": null,
             "processed": null, "screened": true, "screen_passed": true}
        ]))
        .unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title.as_deref(), Some("ok"));
        assert_eq!(papers[1].title, None);
        assert_eq!(papers[1].paper_id, "42");
        assert_eq!(papers[1].authors.as_deref(), Some(r#"["B","C"]"#));
        assert_eq!(papers[1].domain, "");
        assert!(!papers[1].processed);
        assert!(papers[1].screened);
    }

    #[test]
    fn test_find_domain() {
        assert_eq!(find_domain("magnets").unwrap().label, "Magnets");
        assert!(find_domain("astrology").is_none());
    }
}
