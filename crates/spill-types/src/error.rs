// ─────────────────────────────────────────────────────────────────────
// SCPN Spill Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpillError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Grid rejected: {0}")]
    GridRejected(String),

    #[error("Unknown oil kind: {0}")]
    UnknownOilKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpillResult<T> = Result<T, SpillError>;
