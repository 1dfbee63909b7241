use serde::{Deserialize, Serialize};

/// Health probe payload returned by `GET /health`
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
