use super::analysis::collect_points;
use super::types::Paper;

/// Headline numbers for one domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainSummary {
    pub papers: usize,
    pub materials: usize,
    pub papers_without_materials: usize,
    pub plotted_points: usize,
    pub cuprates: usize,
    pub max_critical_temperature: Option<f64>,
}

impl DomainSummary {
    pub fn of(papers: &[Paper]) -> Self {
        let points = collect_points(papers);
        Self {
            papers: papers.len(),
            materials: papers.iter().map(|p| p.materials().len()).sum(),
            papers_without_materials: papers.iter().filter(|p| p.materials().is_empty()).count(),
            plotted_points: points.len(),
            cuprates: points.iter().filter(|p| p.is_cuprate()).count(),
            max_critical_temperature: points
                .iter()
                .map(|p| p.critical_temperature)
                .max_by(f64::total_cmp),
        }
    }
}
