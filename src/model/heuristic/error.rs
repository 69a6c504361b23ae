#[derive(thiserror::Error, Debug)]
pub enum HeuristicError {
    #[error("TypeRequired: a heuristic type must be specified")]
    TypeRequired,
    #[error("GraphRequired: heuristic binding requires a graph")]
    GraphRequired,
    #[error("ProfileRequired: heuristic calibration requires a profile store")]
    ProfileRequired,
    #[error("CostRequired: heuristic calibration requires a cost engine")]
    CostRequired,
    #[error("CoordinatesRequired: this heuristic requires node coordinates")]
    CoordinatesRequired,
    #[error("LatRange: latitude {0} out of range [-90, 90]")]
    LatRange(f64),
    #[error("LonRange: longitude {0} out of range [-180, 180]")]
    LonRange(f64),
    #[error("LandmarkStoreRequired: ALT heuristic requires a landmark store")]
    LandmarkStoreRequired,
    #[error("LandmarkNodeCountMismatch: landmark store has {landmark} nodes, graph has {graph}")]
    LandmarkNodeCountMismatch { landmark: usize, graph: usize },
    #[error("LandmarkEmpty: landmark store has no landmarks")]
    LandmarkEmpty,
    #[error("LandmarkSignatureRequired: landmark store is missing a compatibility signature")]
    LandmarkSignatureRequired,
    #[error("LandmarkSignatureMismatch: landmark signature {landmark:#x} != graph+profile signature {expected:#x}")]
    LandmarkSignatureMismatch { landmark: u64, expected: u64 },
    #[error("CalibrationEmptyGraph: cannot calibrate a lower-bound scale over an empty graph")]
    CalibrationEmptyGraph,
    #[error("CalibrationInvalidBaseWeight: edge {0} has invalid base weight {1}")]
    CalibrationInvalidBaseWeight(u32, f32),
    #[error("CalibrationInvalidTemporalMinimum: profile {0} has invalid minimum multiplier {1}")]
    CalibrationInvalidTemporalMinimum(crate::model::ProfileId, f64),
    #[error("CalibrationInvalidEdgeDistance: edge {0} has invalid distance {1}")]
    CalibrationInvalidEdgeDistance(u32, f64),
    #[error("CalibrationInvalidRatio: edge {0} produced invalid lower-bound ratio {1}")]
    CalibrationInvalidRatio(u32, f64),
    #[error("graph error during heuristic preprocessing: {0}")]
    GraphFailure(#[from] crate::model::graph::GraphError),
}
