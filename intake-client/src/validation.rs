//! Client-side form validation
//!
//! Same rules and precedence as the server, so a payload accepted here is
//! accepted there. Runs before any network call.

use std::collections::BTreeMap;

use crate::types::ContactPayload;

/// Form field. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Message,
    Phone,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Message, FormField::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Message => "message",
            FormField::Phone => "phone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormError {
    Required,
    Digits,
    Min,
}

impl FormError {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormError::Required => "required",
            FormError::Digits => "digits",
            FormError::Min => "min",
        }
    }
}

/// Field errors for inline indicators. Empty means the form may be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, FormError>);

impl FormErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the field should be marked invalid
    pub fn is_invalid(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: FormField) -> Option<FormError> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FormError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }
}

/// Validate a form payload. Fields are expected trimmed already.
pub fn validate_form(data: &ContactPayload) -> FormErrors {
    let mut errors = BTreeMap::new();

    if data.name.trim().is_empty() {
        errors.insert(FormField::Name, FormError::Required);
    }
    if data.message.trim().is_empty() {
        errors.insert(FormField::Message, FormError::Required);
    }

    let phone = data.phone.trim();
    let phone_error = if phone.is_empty() {
        Some(FormError::Required)
    } else if phone.chars().any(|c| !c.is_ascii_digit()) {
        Some(FormError::Digits)
    } else if phone.len() < 10 {
        Some(FormError::Min)
    } else {
        None
    };
    if let Some(error) = phone_error {
        errors.insert(FormField::Phone, error);
    }

    FormErrors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, phone: &str, message: &str) -> ContactPayload {
        ContactPayload {
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_required_name_and_min_phone() {
        let errors = validate_form(&payload("", "123", "hi"));
        assert_eq!(errors.get(FormField::Name), Some(FormError::Required));
        assert_eq!(errors.get(FormField::Phone), Some(FormError::Min));
        assert!(!errors.is_invalid(FormField::Message));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_digits() {
        let errors = validate_form(&payload("A", "12345abcde", "hi"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Phone), Some(FormError::Digits));
    }

    #[test]
    fn test_valid() {
        assert!(validate_form(&payload("A", "1234567890", "hi")).is_valid());
    }

    #[test]
    fn test_phone_with_plus_or_spaces_is_digits_error() {
        let errors = validate_form(&payload("A", "+7 700 123 45 67", "hi"));
        assert_eq!(errors.get(FormField::Phone), Some(FormError::Digits));
    }
}
