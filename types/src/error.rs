//! Errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("address must not be empty")]
    EmptyAddress,

    #[error("arithmetic overflow")]
    Overflow,
}
