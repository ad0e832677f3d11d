//! Data Transfer Objects for API requests and responses.
//!
//! Request fields are `Option`s so that an absent field and an empty one
//! both end up as "Missing parameters." through `validator`. Field names are
//! camelCase on the wire.

pub mod create;
pub mod health;
pub mod manage;

use serde::Serialize;

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{"success": true, "response": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub response: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(response: T) -> Self {
        Self {
            success: true,
            response,
        }
    }
}
