//! Shared response envelope for read-only page data.
//!
//! Admin and public page handlers wrap payloads in `{ "data": ... }`.
//! Mutations go through [`crate::actions::ActionResult`] instead.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
