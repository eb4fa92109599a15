/// The error type for feature data that cannot be compared.
///
/// A reveal carrying such data is rejected before it touches any game state.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInput {
    EmptySignature,
    SignatureLength { expected: usize, actual: usize },
    DescriptorLength { expected: usize, actual: usize },
    NonFiniteValue,
    UnknownSquare(String),
    MalformedSquare(String),
}

impl std::error::Error for InvalidInput {}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::EmptySignature => write!(f, "The feature signature is empty"),
            InvalidInput::SignatureLength { expected, actual } => write!(
                f,
                "Feature signatures have different lengths ({} vs. {})",
                expected, actual
            ),
            InvalidInput::DescriptorLength { expected, actual } => write!(
                f,
                "Descriptors have different lengths ({} vs. {})",
                expected, actual
            ),
            InvalidInput::NonFiniteValue => {
                write!(f, "Feature data contains a NaN or infinite value")
            }
            InvalidInput::UnknownSquare(square) => {
                write!(f, "Square {} is not part of the board", square)
            }
            InvalidInput::MalformedSquare(square) => {
                write!(f, "'{}' is not a valid square id", square)
            }
        }
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidConfig {
    EmptyBoard,
    OddSquareCount(usize),
    TooManyRows(u8),
    Threshold { name: &'static str, value: f32 },
    ZeroPcaDims,
}

impl std::error::Error for InvalidConfig {}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::EmptyBoard => write!(f, "The board needs at least one row and column"),
            InvalidConfig::OddSquareCount(count) => write!(
                f,
                "The board has {} squares, but every card needs a partner",
                count
            ),
            InvalidConfig::TooManyRows(rows) => {
                write!(f, "The board has {} rows, but rows are labeled A-Z", rows)
            }
            InvalidConfig::Threshold { name, value } => {
                write!(f, "{} must be a non-negative number, got {}", name, value)
            }
            InvalidConfig::ZeroPcaDims => write!(f, "pca_dims must be at least 1"),
        }
    }
}
