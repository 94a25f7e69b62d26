//! Threshold ladder and narrative synthesis from normalized scorer output.

use super::catalog::{AnomalyCause, ANOMALY_CAUSES};
use crate::model::{ModelKind, ScorerOutput};
use crate::select::DrawSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Severity tiers, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Informational,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Ladder for anomalous results, evaluated high to low. Boundaries are
    /// strict: a score of exactly 85 is High, 86 is Critical.
    pub fn from_score(score: u8) -> Self {
        if score > 85 {
            RiskLevel::Critical
        } else if score > 70 {
            RiskLevel::High
        } else if score > 40 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

/// Final assessment record returned to the caller. The serialized field
/// names are the response contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub description: String,
    pub assessment: String,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub mitre_technique: String,
    pub sparta_classification: String,
}

const NOMINAL_DESCRIPTION: &str =
    "No anomalous behavior detected. All orbital parameters are within expected operational limits.";
const NOMINAL_ASSESSMENT: &str =
    "The satellite appears to be functioning normally. No immediate threats identified.";

pub struct RiskEngine {
    draw: Arc<dyn DrawSource>,
}

impl RiskEngine {
    pub fn new(draw: Arc<dyn DrawSource>) -> Self {
        Self { draw }
    }

    /// Map a scorer verdict to the final assessment. Only the anomaly flag
    /// gates the Informational branch; the score value never does. The
    /// anomaly branch draws its cause uniformly from the catalog,
    /// independent of which feature actually drove the flag.
    pub fn assess(&self, output: &ScorerOutput, model: ModelKind) -> RiskAssessment {
        let risk_score = (output.normalized_score * 100.0).round() as u8;

        if !output.is_anomaly {
            return RiskAssessment {
                description: NOMINAL_DESCRIPTION.to_string(),
                assessment: NOMINAL_ASSESSMENT.to_string(),
                risk_level: RiskLevel::Informational,
                risk_score,
                mitre_technique: "N/A".to_string(),
                sparta_classification: "N/A".to_string(),
            };
        }

        let cause: &AnomalyCause = &ANOMALY_CAUSES[self.draw.pick(ANOMALY_CAUSES.len())];
        RiskAssessment {
            description: cause.description.to_string(),
            assessment: format!("({} Model): {}", model.label(), cause.assessment),
            risk_level: RiskLevel::from_score(risk_score),
            risk_score,
            mitre_technique: cause.mitre_technique.to_string(),
            sparta_classification: cause.sparta_classification.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::FixedDraw;

    fn engine(sequence: Vec<usize>) -> RiskEngine {
        RiskEngine::new(Arc::new(FixedDraw::new(sequence)))
    }

    fn anomalous(score: f64) -> ScorerOutput {
        ScorerOutput {
            is_anomaly: true,
            normalized_score: score,
        }
    }

    #[test]
    fn ladder_boundaries_are_strict() {
        assert_eq!(RiskLevel::from_score(86), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(85), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(71), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(41), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn non_anomalous_is_always_informational() {
        let engine = engine(vec![0]);
        for score in [0.01, 0.5, 0.99] {
            let out = ScorerOutput {
                is_anomaly: false,
                normalized_score: score,
            };
            let assessment = engine.assess(&out, ModelKind::BoostedTree);
            assert_eq!(assessment.risk_level, RiskLevel::Informational);
            assert_eq!(assessment.mitre_technique, "N/A");
            assert_eq!(assessment.sparta_classification, "N/A");
            assert_eq!(assessment.risk_score, (score * 100.0).round() as u8);
        }
    }

    #[test]
    fn anomaly_uses_catalog_entry_and_model_label() {
        let engine = engine(vec![2]);
        let assessment = engine.assess(&anomalous(0.9), ModelKind::OutlierIsolation);
        assert_eq!(assessment.risk_score, 90);
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
        assert_eq!(assessment.description, ANOMALY_CAUSES[2].description);
        assert!(assessment.assessment.starts_with("(Isolation Forest Model): "));
        assert_eq!(assessment.mitre_technique, ANOMALY_CAUSES[2].mitre_technique);
    }

    #[test]
    fn score_rounds_to_integer_percent() {
        let engine = engine(vec![0]);
        assert_eq!(engine.assess(&anomalous(0.854), ModelKind::BoostedTree).risk_score, 85);
        assert_eq!(engine.assess(&anomalous(0.86), ModelKind::BoostedTree).risk_score, 86);
        assert_eq!(
            engine.assess(&anomalous(0.86), ModelKind::BoostedTree).risk_level,
            RiskLevel::Critical
        );
    }

    #[test]
    fn serialized_keys_match_contract() {
        let engine = engine(vec![0]);
        let value = serde_json::to_value(engine.assess(&anomalous(0.5), ModelKind::SequenceConv)).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "assessment",
                "description",
                "mitreTechnique",
                "riskLevel",
                "riskScore",
                "spartaClassification"
            ]
        );
        assert_eq!(object["riskLevel"], "Moderate");
        assert_eq!(object["riskScore"], 50);
    }
}
