#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid {name}: {value:?} (expected a positive integer)")]
    InvalidDimension {
        name: String,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EllipseError {
    #[error("Degenerate ellipse: {major}×{minor} has an empty axis")]
    Degenerate { major: usize, minor: usize },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("Element with id {0:?} not found")]
    MissingHostElement(String),

    #[error("Host rejected update: {0}")]
    Host(String),
}
