use crate::model::placeholder::{PlaceholderDescriptor, PlaceholderType};
use regex::Regex;

/// Checks every descriptor's filled value against its type rule and returns
/// the collected human-readable errors. Callers block export while the list
/// is non-empty.
pub fn validate(descriptors: &[PlaceholderDescriptor]) -> Vec<String> {
    let email_re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    let mut errors = Vec::new();

    for d in descriptors {
        if d.value.trim().is_empty() {
            errors.push(format!("{} is required", d.label));
            if let Some(note) = d.validation_note.as_deref() {
                if !note.is_empty() {
                    errors.push(format!("{}: {}", d.label, note));
                }
            }
            continue;
        }

        match d.field_type {
            PlaceholderType::Currency | PlaceholderType::Number => {
                let cleaned = d.value.replace([',', '$'], "");
                let ok = cleaned
                    .parse::<f64>()
                    .map(|n| n.is_finite() && n > 0.0)
                    .unwrap_or(false);
                if !ok {
                    errors.push(format!("{} must be a valid positive number", d.label));
                }
            }
            PlaceholderType::Email => {
                if !email_re.is_match(&d.value) {
                    errors.push(format!("{} must be a valid email address", d.label));
                }
            }
            PlaceholderType::Date => {
                if d.value.len() < 3 {
                    errors.push(format!("{} appears to be invalid", d.label));
                }
            }
            PlaceholderType::Text => {
                if d.value.len() < 2 {
                    errors.push(format!("{} appears to be too short", d.label));
                }
            }
            // Free-form by nature; the required check above is enough.
            PlaceholderType::Address | PlaceholderType::Phone => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(label: &str, value: &str, field_type: PlaceholderType) -> PlaceholderDescriptor {
        PlaceholderDescriptor {
            id: label.to_lowercase(),
            label: label.to_string(),
            match_text: "_____".to_string(),
            value: value.to_string(),
            is_filled: !value.trim().is_empty(),
            field_type,
            prompt: None,
            validation_note: None,
        }
    }

    #[test]
    fn empty_value_is_required() {
        let errors = validate(&[descriptor("Client Name", "  ", PlaceholderType::Text)]);
        assert_eq!(errors, vec!["Client Name is required".to_string()]);
    }

    #[test]
    fn empty_value_with_note_adds_combined_error() {
        let mut d = descriptor("Deposit", "", PlaceholderType::Currency);
        d.validation_note = Some("must match the lease schedule".to_string());
        let errors = validate(&[d]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1], "Deposit: must match the lease schedule");
    }

    #[test]
    fn bad_email_names_the_label() {
        let errors = validate(&[descriptor("Contact Email", "not-an-email", PlaceholderType::Email)]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Contact Email"));
    }

    #[test]
    fn currency_accepts_grouped_input() {
        let errors = validate(&[descriptor("Rent", "$1,250.00", PlaceholderType::Currency)]);
        assert!(errors.is_empty());
    }

    #[test]
    fn currency_rejects_zero_and_negative() {
        assert!(!validate(&[descriptor("Rent", "0", PlaceholderType::Currency)]).is_empty());
        assert!(!validate(&[descriptor("Rent", "-5", PlaceholderType::Number)]).is_empty());
    }

    #[test]
    fn short_date_is_invalid() {
        let errors = validate(&[descriptor("Start Date", "1", PlaceholderType::Date)]);
        assert_eq!(errors, vec!["Start Date appears to be invalid".to_string()]);
    }

    #[test]
    fn well_typed_set_has_no_errors() {
        let descriptors = vec![
            descriptor("Client Name", "Jane Doe", PlaceholderType::Text),
            descriptor("Rent", "1250", PlaceholderType::Currency),
            descriptor("Contact Email", "jane@example.com", PlaceholderType::Email),
            descriptor("Start Date", "March 1, 2026", PlaceholderType::Date),
            descriptor("Office Address", "1 Main St", PlaceholderType::Address),
        ];
        assert!(validate(&descriptors).is_empty());
    }
}
