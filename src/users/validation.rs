use lazy_static::lazy_static;
use regex::Regex;

use crate::users::repo_types::NewUser;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^05\d-\d{7}$").unwrap();
    static ref UPPER_RE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref LOWER_RE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL_RE: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Password rules in check order; all of them must hold.
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let rules: [(&Regex, &'static str); 4] = [
        (&*UPPER_RE, "Password must contain uppercase letter"),
        (&*LOWER_RE, "Password must contain lowercase letter"),
        (&*DIGIT_RE, "Password must contain number"),
        (&*SPECIAL_RE, "Password must contain special character"),
    ];
    rules
        .iter()
        .filter(|(re, _)| !re.is_match(password))
        .map(|(_, msg)| *msg)
        .collect()
}

/// Apply the registration form rules. Errors come out grouped by field in
/// form order, an empty vector means the input passes.
pub fn validate_registration(user: &NewUser) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let mut push = |field, message| errors.push(FieldError { field, message });

    if user.full_name.is_empty() {
        push(Field::FullName, "Full name is required");
    }

    if user.email.is_empty() {
        push(Field::Email, "Email is required");
    } else if !is_valid_email(&user.email) {
        push(Field::Email, "Invalid email format");
    }

    if user.phone.is_empty() {
        push(Field::Phone, "Phone is required");
    } else if !is_valid_phone(&user.phone) {
        push(Field::Phone, "Invalid phone number (05x-xxxxxxx)");
    }

    if user.password.is_empty() {
        push(Field::Password, "Password is required");
    } else {
        for message in password_violations(&user.password) {
            push(Field::Password, message);
        }
    }

    errors
}
