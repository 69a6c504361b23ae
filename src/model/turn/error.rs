#[derive(thiserror::Error, Debug)]
pub enum TurnCostError {
    #[error("invalid artifact: turn cost edge id {0} is negative or unrepresentable")]
    NegativeEdgeId(i64),
    #[error("invalid artifact: turn penalty at ({from}, {to}) is NaN")]
    NanPenalty { from: u32, to: u32 },
    #[error("invalid artifact: turn penalty at ({from}, {to}) is negative infinity")]
    NegativeInfinityPenalty { from: u32, to: u32 },
    #[error("invalid artifact: turn penalty at ({from}, {to}) is negative ({value})")]
    NegativePenalty { from: u32, to: u32, value: f32 },
}
