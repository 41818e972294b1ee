use thiserror::Error;

#[derive(Error, Debug)]
pub enum DensityMapError {
    #[error("bases-per-bin window must be positive, got {0}")]
    NonPositiveWindow(f64),
}
