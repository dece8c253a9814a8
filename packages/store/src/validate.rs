//! Form validation, run before any request leaves the client.
//!
//! Every rule is a [`ValidationError`] variant; a form collects all of its
//! failures into [`FormErrors`] so each input can show its own message.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::NewDevice;

/// Structured device identifier: `aaaa-1111-bbbb-2222`.
pub const DEVICE_ID_PATTERN: &str = r"^[A-Za-z]{4}-[0-9]{4}-[A-Za-z]{4}-[0-9]{4}$";

/// Minimum length for device and account passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum length for a username at sign-up.
pub const MIN_USERNAME_LENGTH: usize = 3;

static DEVICE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEVICE_ID_PATTERN).expect("valid regex"));
static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").expect("valid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("valid regex"));
// Anything outside ASCII letters and digits counts as a symbol, accents included.
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
});

/// Form fields, as named in messages and used to route errors to inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    DeviceId,
    DeviceName,
    Password,
    Email,
    Username,
    Company,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::DeviceId => "Device ID",
            Field::DeviceName => "Device Name",
            Field::Password => "Password",
            Field::Email => "Email",
            Field::Username => "Username",
            Field::Company => "Company name",
        }
    }
}

/// A single failed rule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Required(Field),

    #[error("Device ID must be in the format: aaaa-1111-bbbb-2222")]
    DeviceIdFormat,

    #[error("{} must be at least {min} characters", .field.label())]
    TooShort { field: Field, min: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one number")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSymbol,

    #[error("Invalid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// The input this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::TooShort { field, .. } => *field,
            ValidationError::DeviceIdFormat => Field::DeviceId,
            ValidationError::MissingUppercase
            | ValidationError::MissingDigit
            | ValidationError::MissingSymbol => Field::Password,
            ValidationError::InvalidEmail => Field::Email,
        }
    }
}

/// All failures of one form submission, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", first_message(.errors))]
pub struct FormErrors {
    errors: Vec<ValidationError>,
}

fn first_message(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The first failing rule for `field`, which is what the input displays.
    pub fn for_field(&self, field: Field) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn validate_device_id(device_id: &str) -> Result<(), ValidationError> {
    if device_id.is_empty() {
        return Err(ValidationError::Required(Field::DeviceId));
    }
    if !DEVICE_ID_RE.is_match(device_id) {
        return Err(ValidationError::DeviceIdFormat);
    }
    Ok(())
}

pub fn validate_device_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required(Field::DeviceName));
    }
    Ok(())
}

/// Strength rules shared by device and account passwords.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required(Field::Password));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::Password,
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if !UPPERCASE_RE.is_match(password) {
        return Err(ValidationError::MissingUppercase);
    }
    if !DIGIT_RE.is_match(password) {
        return Err(ValidationError::MissingDigit);
    }
    if !SYMBOL_RE.is_match(password) {
        return Err(ValidationError::MissingSymbol);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required(Field::Email));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required(Field::Username));
    }
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::Username,
            min: MIN_USERNAME_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_company(company: &str) -> Result<(), ValidationError> {
    if company.trim().is_empty() {
        return Err(ValidationError::Required(Field::Company));
    }
    Ok(())
}

/// Validate the device-creation form.
pub fn validate_new_device(device: &NewDevice) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.check(validate_device_id(&device.device_id));
    errors.check(validate_device_name(&device.device_name));
    errors.check(validate_password(&device.password));
    errors.into_result()
}

/// Validate the login form.
pub fn validate_login(email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.check(validate_email(email));
    errors.check(validate_password(password));
    errors.into_result()
}

/// Validate the sign-up form.
pub fn validate_sign_up(
    company: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    errors.check(validate_company(company));
    errors.check(validate_username(username));
    errors.check(validate_email(email));
    errors.check(validate_password(password));
    errors.into_result()
}
