use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 255, message = "name is required and at most 255 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InstructorInput {
    #[validate(length(min = 1, max = 255, message = "name is required and at most 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "occupation is required and at most 255 characters"))]
    pub occupation: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub avatar: Option<String>,
}
