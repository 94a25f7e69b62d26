//! Static anomaly-cause catalog: narrative explanations and taxonomy codes
//! keyed by the orbital parameter a perturbation would show up in.

/// One catalog entry. `'static` data, shared read-only by all requests.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyCause {
    pub parameter: &'static str,
    pub description: &'static str,
    pub assessment: &'static str,
    pub mitre_technique: &'static str,
    pub sparta_classification: &'static str,
}

pub const ANOMALY_CAUSES: [AnomalyCause; 4] = [
    AnomalyCause {
        parameter: "inclination",
        description: "Anomalous inclination change detected, inconsistent with station-keeping maneuvers.",
        assessment: "This could indicate a repositioning attempt for surveillance or to approach another asset's orbital slot.",
        mitre_technique: "T0821: Non-Standard Orbit",
        sparta_classification: "C0015: Orbit Degradation/Modification",
    },
    AnomalyCause {
        parameter: "eccentricity",
        description: "Significant, unplanned increase in orbital eccentricity.",
        assessment: "The change suggests a potential engine malfunction or an intentional, aggressive maneuver to alter the orbit's shape, possibly for a rapid fly-by.",
        mitre_technique: "T0815: On-orbit Repositioning",
        sparta_classification: "C0012: Unscheduled Maneuver",
    },
    AnomalyCause {
        parameter: "bstar_drag",
        description: "Erratic fluctuations in the BSTAR drag term observed.",
        assessment: "This may be caused by an unexpected change in the satellite's physical profile (e.g., appendage deployment) or orientation, potentially related to a system malfunction or covert activity.",
        mitre_technique: "T0809: Component Malfunction",
        sparta_classification: "C0021: Physical Signature Modification",
    },
    AnomalyCause {
        parameter: "mean_motion",
        description: "Unusual drift in mean motion detected.",
        assessment: "The satellite's orbital period is changing, suggesting a subtle, continuous thrust or an uncorrected orbital decay, possibly to phase with another object.",
        mitre_technique: "T0820: Non-Standard Attitude",
        sparta_classification: "C0014: Station Keeping Anomaly",
    },
];
