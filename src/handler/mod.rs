pub mod alerts;
pub mod health;
pub mod logs;

use serde::Serialize;

/// `{"message": "..."}` confirmation body.
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: &'static str,
}
