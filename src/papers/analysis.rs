use std::fmt;

use serde_json::Value;

use super::types::{Paper, Row};

pub const MIN_TEMP_K: f64 = 0.0;
pub const MAX_TEMP_K: f64 = 150.0;
pub const LEGEND_STOPS: [f64; 6] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0];

/// A material with enough data to be plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperconductorPoint {
    pub composition: String,
    pub lattice_a: f64,
    pub lattice_c: f64,
    pub critical_temperature: f64,
    pub oxygen_percentage: Option<f64>,
    pub paper_id: String,
    pub title: String,
    pub published_date: String,
}

impl SuperconductorPoint {
    /// Built from a derived row; `None` unless Tc > 0 and both lattice
    /// parameters are present and non-zero.
    pub fn from_row(row: &Row) -> Option<Self> {
        let critical_temperature = number_field(row, "properties_critical_temperature")?;
        let lattice_a = number_field(row, "material_lattice_parameters_a")?;
        let lattice_c = number_field(row, "material_lattice_parameters_c")?;
        if critical_temperature <= 0.0 {
            return None;
        }

        let composition = row
            .get("material_composition")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self {
            oxygen_percentage: oxygen_percentage(&composition),
            composition,
            lattice_a,
            lattice_c,
            critical_temperature,
            paper_id: string_field(row, "paper_id"),
            title: string_field(row, "title"),
            published_date: string_field(row, "published_date"),
        })
    }

    /// Copper oxides with a known oxygen fraction.
    pub fn is_cuprate(&self) -> bool {
        self.composition.contains("Cu")
            && self.composition.contains('O')
            && self.oxygen_percentage.is_some()
    }

    pub fn color(&self) -> Rgb {
        temperature_color(self.critical_temperature)
    }
}

fn string_field(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Numeric value of a field; zero, blank and unparseable all count as missing.
fn number_field(row: &Row, key: &str) -> Option<f64> {
    as_number(row.get(key)?).filter(|n| *n != 0.0)
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Atomic percentage of oxygen in a composition, rounded to one decimal.
///
/// Accepts an element→count object or its JSON text. Counts may be numbers or
/// numeric strings. `None` when there is no (non-zero) oxygen or the
/// composition cannot be read.
pub fn oxygen_percentage(composition: &str) -> Option<f64> {
    let parsed: Value = serde_json::from_str(composition).ok()?;
    oxygen_percentage_of(&parsed)
}

pub fn oxygen_percentage_of(composition: &Value) -> Option<f64> {
    let elements = match composition {
        Value::Object(map) => map,
        // Some analyzers double-encode the composition.
        Value::String(text) => return oxygen_percentage(text),
        _ => return None,
    };

    let oxygen = elements.get("O").and_then(as_number).filter(|o| *o != 0.0)?;
    let mut total = 0.0;
    for count in elements.values() {
        total += as_number(count)?;
    }

    let pct = oxygen / total * 100.0;
    pct.is_finite().then(|| round_tenths(pct))
}

/// One-decimal rounding of the exact binary value. Exact ties (only
/// possible at .25 and .75) go up.
fn round_tenths(x: f64) -> f64 {
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return (x * 10.0).ceil() / 10.0;
    }
    format!("{:.1}", x).parse().unwrap_or(x)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Blue (cold) to red (hot) across `MIN_TEMP_K..=MAX_TEMP_K`, green peaking mid-range.
pub fn temperature_color(temp: f64) -> Rgb {
    let t = ((temp - MIN_TEMP_K) / (MAX_TEMP_K - MIN_TEMP_K)).clamp(0.0, 1.0);
    let t = if t.is_nan() { 0.0 } else { t };
    Rgb {
        r: (t * 255.0).floor() as u8,
        g: (t.min(1.0 - t) * 150.0).floor() as u8,
        b: ((1.0 - t) * 255.0).floor() as u8,
    }
}

/// Link to the paper: DOI resolver, arXiv abstract, or a Scholar search.
pub fn paper_url(paper_id: &str) -> String {
    let id = paper_id.trim();
    if id.starts_with("10.") && id.contains('/') {
        return format!("https://doi.org/{}", id);
    }
    if let Some(base) = arxiv_base_id(id) {
        return format!("https://arxiv.org/abs/{}", base);
    }
    match reqwest::Url::parse_with_params("https://scholar.google.com/scholar", &[("q", id)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("https://scholar.google.com/scholar?q={}", id),
    }
}

/// `2307.12008v2` -> `2307.12008`
fn arxiv_base_id(id: &str) -> Option<&str> {
    let (base, version) = id.rsplit_once('v')?;
    let numeric_version = !version.is_empty() && version.chars().all(|c| c.is_ascii_digit());
    (numeric_version && !base.is_empty()).then_some(base)
}

pub fn extract_year(date: &str) -> String {
    if date.is_empty() {
        return "Unknown".to_string();
    }
    date.chars().take(4).collect()
}

/// Cut to `max` chars, appending `...` when something was removed.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        let cut: String = title.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

pub fn collect_points(papers: &[Paper]) -> Vec<SuperconductorPoint> {
    super::rows::derive_rows(papers)
        .iter()
        .filter_map(SuperconductorPoint::from_row)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointOrder {
    #[default]
    CriticalTemperature,
    OxygenPercentage,
    PublishedDate,
}

/// Checkbox-style filters applied to already-fetched points.
#[derive(Debug, Clone, Default)]
pub struct PointFilter {
    pub cuprates_only: bool,
    pub min_tc: Option<f64>,
    pub order: PointOrder,
}

impl PointFilter {
    /// Filtered copy, highest value first for the chosen order.
    pub fn apply(&self, points: &[SuperconductorPoint]) -> Vec<SuperconductorPoint> {
        let mut out: Vec<SuperconductorPoint> = points
            .iter()
            .filter(|p| !self.cuprates_only || p.is_cuprate())
            .filter(|p| self.min_tc.map_or(true, |min| p.critical_temperature >= min))
            .cloned()
            .collect();

        match self.order {
            PointOrder::CriticalTemperature => out.sort_by(|a, b| {
                b.critical_temperature.total_cmp(&a.critical_temperature)
            }),
            PointOrder::OxygenPercentage => out.sort_by(|a, b| {
                let key = |p: &SuperconductorPoint| p.oxygen_percentage.unwrap_or(f64::NEG_INFINITY);
                key(b).total_cmp(&key(a))
            }),
            PointOrder::PublishedDate => {
                out.sort_by(|a, b| b.published_date.cmp(&a.published_date))
            }
        }
        out
    }
}
