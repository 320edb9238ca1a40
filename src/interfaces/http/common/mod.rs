pub mod api_response;
pub mod error;
pub mod extract;
pub mod validated_json;

pub use api_response::ApiResponse;
pub use error::{domain_error, ApiError};
pub use extract::{ApiJson, ApiQuery};
pub use validated_json::ValidatedJson;
