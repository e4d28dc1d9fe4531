//! Unified Error Model
//!
//! Only the boundaries can fail: parsing keys typed by a user and loading
//! scenario files. The balancer and the calculator never return errors.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketError {
    #[error("CATEGORY/unknown ticket category '{0}'")]
    UnknownCategory(String),

    #[error("PRICE/unknown price category '{0}'")]
    UnknownPriceCategory(String),

    #[error("PRICE/unknown price field '{0}' (expected base or fee)")]
    UnknownPriceField(String),

    #[error("SCENARIO/{0}")]
    Scenario(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),
}
