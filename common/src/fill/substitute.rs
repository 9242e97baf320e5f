use crate::model::placeholder::{PlaceholderDescriptor, PlaceholderType};
use num_format::{Locale, ToFormattedString};
use regex::Regex;

/// Replaces placeholder occurrences in `text` with formatted fill values.
///
/// Descriptors sharing the same `match_text` form a group; the k-th literal
/// occurrence of that text is replaced using the k-th descriptor of the group,
/// in descriptor order. Occurrences beyond the group size, and occurrences
/// whose descriptor has an empty value, keep the original text. Pure function:
/// no I/O, inputs untouched, deterministic.
pub fn substitute(text: &str, descriptors: &[PlaceholderDescriptor]) -> String {
    substitute_with(text, descriptors, format_value)
}

/// The positional-assignment core behind [`substitute`].
///
/// `render` turns a descriptor into its replacement string, or `None` to leave
/// the occurrence unchanged. The binary rewrite pass supplies an XML-escaping
/// renderer here so preview and exported file assign duplicate occurrences
/// identically.
pub fn substitute_with(
    text: &str,
    descriptors: &[PlaceholderDescriptor],
    render: impl Fn(&PlaceholderDescriptor) -> Option<String>,
) -> String {
    let mut content = text.to_string();

    for (match_text, group) in group_by_match_text(descriptors) {
        // `regex::escape` output always compiles.
        let re = Regex::new(&regex::escape(match_text)).unwrap();

        let mut occurrence = 0usize;
        let replaced = re.replace_all(&content, |_: &regex::Captures| {
            let rendered = group.get(occurrence).and_then(|d| render(d));
            occurrence += 1;
            match rendered {
                // Label-style fields ("By:", "Name:") keep the label visible,
                // followed by the answer.
                Some(value) if match_text.ends_with(':') => {
                    format!("{} {}", match_text, value)
                }
                Some(value) => value,
                None => match_text.to_string(),
            }
        });
        content = replaced.into_owned();
    }

    content
}

/// Renders a descriptor's replacement value, or `None` when it is unfilled.
/// Currency values get `$` plus comma grouping; everything else is verbatim.
pub fn format_value(descriptor: &PlaceholderDescriptor) -> Option<String> {
    if descriptor.value.trim().is_empty() {
        return None;
    }
    match descriptor.field_type {
        PlaceholderType::Currency => Some(format_currency(&descriptor.value)),
        _ => Some(descriptor.value.clone()),
    }
}

/// `"1234.5"` -> `"$1,234.5"`. Anything that does not survive the digit/dot
/// strip as a parseable number falls back to the raw input.
fn format_currency(raw: &str) -> String {
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !numeric.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
        return raw.to_string();
    }

    let (int_part, frac_part) = match numeric.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (numeric.as_str(), None),
    };
    let grouped = if int_part.is_empty() {
        "0".to_string()
    } else {
        match int_part.parse::<u128>() {
            Ok(n) => n.to_formatted_string(&Locale::en),
            Err(_) => return raw.to_string(),
        }
    };

    match frac_part {
        Some(f) if !f.is_empty() => format!("${}.{}", grouped, f),
        _ => format!("${}", grouped),
    }
}

/// Groups descriptors by identical `match_text`, preserving first-seen order.
fn group_by_match_text(
    descriptors: &[PlaceholderDescriptor],
) -> Vec<(&str, Vec<&PlaceholderDescriptor>)> {
    let mut groups: Vec<(&str, Vec<&PlaceholderDescriptor>)> = Vec::new();
    for d in descriptors {
        if d.match_text.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(m, _)| *m == d.match_text.as_str()) {
            Some((_, members)) => members.push(d),
            None => groups.push((d.match_text.as_str(), vec![d])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(match_text: &str, value: &str, field_type: PlaceholderType) -> PlaceholderDescriptor {
        PlaceholderDescriptor {
            id: format!("{}_0", match_text),
            label: match_text.to_string(),
            match_text: match_text.to_string(),
            value: value.to_string(),
            is_filled: !value.trim().is_empty(),
            field_type,
            prompt: None,
            validation_note: None,
        }
    }

    #[test]
    fn empty_values_leave_text_unchanged() {
        let text = "Agreement by _____ and [Client Name].";
        let descriptors = vec![
            descriptor("_____", "", PlaceholderType::Text),
            descriptor("[Client Name]", "", PlaceholderType::Text),
        ];
        assert_eq!(substitute(text, &descriptors), text);
    }

    #[test]
    fn substitute_is_deterministic() {
        let text = "Payable: $[____] on _____.";
        let descriptors = vec![
            descriptor("$[____]", "200", PlaceholderType::Currency),
            descriptor("_____", "March 1", PlaceholderType::Date),
        ];
        let once = substitute(text, &descriptors);
        let twice = substitute(text, &descriptors);
        assert_eq!(once, twice);
    }

    #[test]
    fn colon_labels_keep_the_label() {
        let descriptors = vec![descriptor("By:", "Jane Doe", PlaceholderType::Text)];
        let out = substitute("Signed.\nBy:\n", &descriptors);
        assert!(out.contains("By: Jane Doe"));
    }

    #[test]
    fn currency_values_are_grouped() {
        let descriptors = vec![descriptor("[Amount]", "1234.5", PlaceholderType::Currency)];
        let out = substitute("Total: [Amount]", &descriptors);
        assert_eq!(out, "Total: $1,234.5");
    }

    #[test]
    fn currency_fallback_keeps_raw_value() {
        let descriptors = vec![descriptor("[Amount]", "ten dollars", PlaceholderType::Currency)];
        let out = substitute("Total: [Amount]", &descriptors);
        assert_eq!(out, "Total: ten dollars");
    }

    #[test]
    fn duplicate_match_text_is_assigned_positionally() {
        let text = "Lessor: _____\nLessee: _____";
        let descriptors = vec![
            descriptor("_____", "A", PlaceholderType::Text),
            descriptor("_____", "B", PlaceholderType::Text),
        ];
        assert_eq!(substitute(text, &descriptors), "Lessor: A\nLessee: B");
    }

    #[test]
    fn surplus_occurrences_stay_unchanged() {
        let text = "_____ and _____ and _____";
        let descriptors = vec![descriptor("_____", "only", PlaceholderType::Text)];
        assert_eq!(substitute(text, &descriptors), "only and _____ and _____");
    }

    #[test]
    fn match_text_with_regex_metacharacters_is_literal() {
        let descriptors = vec![descriptor("$[____]", "500", PlaceholderType::Currency)];
        let out = substitute("Fee of $[____] due.", &descriptors);
        assert_eq!(out, "Fee of $500 due.");
    }

    #[test]
    fn currency_without_decimals() {
        let descriptors = vec![descriptor("[Amount]", "1000000", PlaceholderType::Currency)];
        assert_eq!(substitute("[Amount]", &descriptors), "$1,000,000");
    }

    #[test]
    fn currency_leading_dot_gets_zero() {
        let descriptors = vec![descriptor("[Amount]", ".5", PlaceholderType::Currency)];
        assert_eq!(substitute("[Amount]", &descriptors), "$0.5");
    }
}
