//! Structural failures surfaced by the book.
//!
//! Numeric domain violations (non-positive spot or vol, prices below
//! intrinsic, unreachable delta targets) are signaled in-band as NaN and
//! never appear here.

/// Structural errors raised by registries, the portfolio engine, and the
/// transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Name lookup failed in the asset registry.
    UnknownAsset(String),
    /// A position or record referenced a trade id that was never registered.
    UnknownTrade(u64),
    /// A portfolio snapshot referenced a market snapshot id that was never
    /// registered.
    UnknownSnapshot(u64),
    /// A trade id was registered twice.
    DuplicateTrade(u64),
    /// A market snapshot id was registered twice.
    DuplicateSnapshot(u64),
    /// A market snapshot is missing the price of an asset held by the book.
    MissingPrice { asset: String },
    /// A market snapshot is missing the margin rate of a marginal position.
    MissingMarginRate { asset: String },
    /// A history index outside the portfolio state sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// A serialized record could not be resolved into an entity.
    InvalidRecord(String),
}

impl std::fmt::Display for BookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAsset(name) => write!(f, "no asset '{name}' found"),
            Self::UnknownTrade(id) => write!(f, "no trade '{id}' found"),
            Self::UnknownSnapshot(id) => write!(f, "no snapshot '{id}' found"),
            Self::DuplicateTrade(id) => write!(f, "trade '{id}' already registered"),
            Self::DuplicateSnapshot(id) => write!(f, "snapshot '{id}' already registered"),
            Self::MissingPrice { asset } => write!(f, "need price of '{asset}'"),
            Self::MissingMarginRate { asset } => write!(f, "need margin rate of '{asset}'"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "not a valid index = {index}, current length = {len}")
            }
            Self::InvalidRecord(msg) => write!(f, "invalid record: {msg}"),
        }
    }
}

impl std::error::Error for BookError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_piece() {
        assert_eq!(
            BookError::UnknownAsset("AU2412".to_string()).to_string(),
            "no asset 'AU2412' found"
        );
        assert_eq!(
            BookError::MissingPrice {
                asset: "AU2412".to_string()
            }
            .to_string(),
            "need price of 'AU2412'"
        );
        assert_eq!(
            BookError::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "not a valid index = 7, current length = 3"
        );
    }
}
