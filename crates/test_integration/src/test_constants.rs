/// Length of the stored face vectors.
pub const DIMENSION: usize = 512;
/// Calibrated cosine threshold of the configured model.
pub const ARCFACE_COSINE_THRESHOLD: f64 = 0.68;
/// Tolerance for distances computed from `f32` vectors.
pub const DISTANCE_EPSILON: f64 = 1e-4;
