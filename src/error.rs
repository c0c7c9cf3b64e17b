use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Terminal reasons a measurement can fail.
///
/// Exactly one of these is produced when the pipeline stops early; there is
/// no partial result alongside it and no retry. Display messages are the
/// user-facing strings shown to the operator (in Portuguese, like the area
/// label itself).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeasureFailure {
    /// No fiducial marker was detected, so no scale can be established.
    #[error("QR Code não detectado. Não foi possível calcular a escala.")]
    FiducialNotFound,

    /// A scale was established but segmentation produced no foreground contour.
    #[error("Nenhuma folha foi detectada. Tente ajustar os limites de cor.")]
    NoTargetRegion,

    /// The corners and configured side length cannot yield a positive finite
    /// scale.
    #[error("Marcador com geometria degenerada; não foi possível calcular a escala.")]
    DegenerateScale,
}
