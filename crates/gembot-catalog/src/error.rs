//! Catalog validation errors

use gembot_types::CatalogKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate code in {kind} catalog: {code}")]
    DuplicateCode { kind: CatalogKind, code: String },

    #[error("Code {code} in {kind} catalog is reserved for the menu")]
    ReservedCode { kind: CatalogKind, code: String },

    #[error("Code {code} appears in both catalogs")]
    CrossCatalogCollision { code: String },

    #[error("Entry \"{name}\" in {kind} catalog has an empty code")]
    EmptyCode { kind: CatalogKind, name: String },
}
