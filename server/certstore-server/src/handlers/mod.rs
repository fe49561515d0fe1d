pub mod certificates;
pub mod health;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by every DELETE endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    /// ID of the deleted record
    pub id: String,
}
