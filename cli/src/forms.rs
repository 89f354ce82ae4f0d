use std::fs;
use std::path::Path;

use anyhow::Context;
use rehome_core::{NewAd, CATEGORIES};
use validator::{Validate, ValidationError, ValidationErrors};

/// Maximum accepted image size (1 MB)
pub const MAX_IMAGE_BYTES: u64 = 1_048_576;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Registration input, validated before any request is sent
#[derive(Debug, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
}

/// Create-ad input, validated before any request is sent
#[derive(Debug, Validate)]
pub struct NewAdForm {
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Pet name is required"))]
    pub pet_name: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Pet age must be between 0 and 100"))]
    pub pet_age: f64,
    #[validate(length(min = 1, message = "Pet gender is required"))]
    pub pet_gender: String,
    #[validate(length(min = 1, max = 500, message = "Ad content must be 1 to 500 characters"))]
    pub ad_content: String,
}

impl From<NewAdForm> for NewAd {
    fn from(form: NewAdForm) -> Self {
        NewAd {
            category: form.category,
            pet_name: form.pet_name,
            pet_age: form.pet_age,
            pet_gender: form.pet_gender,
            ad_content: form.ad_content,
        }
    }
}

/// Digits and hyphens only, as the service expects
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let shape_ok = !phone.is_empty()
        && phone.chars().all(|c| c.is_ascii_digit() || c == '-')
        && phone.chars().any(|c| c.is_ascii_digit());

    if shape_ok {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Invalid phone number".into());
        Err(error)
    }
}

/// Match a user-typed category against the known list, ignoring case
pub fn canonical_category(input: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(input))
        .copied()
}

/// Check an image file before it is uploaded: jpg/jpeg/png, at most 1 MB
pub fn validate_image(path: &Path) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        anyhow::bail!("Image must be a jpg, jpeg or png file");
    }

    let metadata = fs::metadata(path)
        .with_context(|| format!("Could not read image file {}", path.display()))?;

    if metadata.len() > MAX_IMAGE_BYTES {
        anyhow::bail!("File size should not exceed 1MB, please select a different image");
    }

    Ok(())
}

/// Flatten validation errors into one display line
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();

    messages.sort();
    messages.join("; ")
}
