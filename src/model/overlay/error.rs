#[derive(thiserror::Error, Debug)]
pub enum LiveOverlayError {
    #[error("invalid live overlay entry for edge {0}: OK state requires a finite, positive speed_factor, got {1}")]
    BadSpeedFactor(u32, f32),
}
