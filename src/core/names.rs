use crate::domain::model::{NameOrder, NamePair};
use crate::domain::ports::FullName;
use crate::utils::error::{Result, RosterError};

/// Trim and collapse internal whitespace.
pub fn tidy(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a free-form full name into a pair.
///
/// A comma form ("Smith, John") is family-first by construction and wins
/// over the configured order. Otherwise the name is split on whitespace:
/// given-first keeps the last token as the family name, family-first keeps
/// the first. Both fields are required, so a single token is an error.
pub fn parse_full_name(raw: &str, order: NameOrder) -> Result<NamePair> {
    let cleaned = tidy(raw);
    if cleaned.is_empty() {
        return Err(RosterError::NameParseError {
            input: raw.to_string(),
            reason: "input is empty".to_string(),
        });
    }

    if let Some((family, given)) = cleaned.split_once(',') {
        let family = tidy(family);
        let given = tidy(given);
        if family.is_empty() || given.is_empty() {
            return Err(RosterError::NameParseError {
                input: raw.to_string(),
                reason: "comma form needs text on both sides".to_string(),
            });
        }
        return Ok(NamePair::new(given, family));
    }

    let tokens: Vec<&str> = cleaned.split(' ').collect();
    match (order, tokens.as_slice()) {
        (_, []) | (_, [_]) => Err(RosterError::NameParseError {
            input: raw.to_string(),
            reason: "a single token cannot fill both name fields".to_string(),
        }),
        (NameOrder::GivenFirst, [given @ .., family]) => {
            Ok(NamePair::new(given.join(" "), *family))
        }
        (NameOrder::FamilyFirst, [family, given @ ..]) => {
            Ok(NamePair::new(given.join(" "), *family))
        }
    }
}

/// Word-wise capitalization. A new word starts after a space, hyphen or
/// apostrophe, so "o'brien" and "smith-jones" come out as expected.
/// Internal capitals ("McDonald") are flattened; normalization is opt-out.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_boundary = true;
    for c in input.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_boundary = c == ' ' || c == '-' || c == '\'';
    }
    out
}

/// Render any name-shaped value in the requested order.
pub fn format_ordered<N: FullName>(name: &N, order: NameOrder) -> String {
    match order {
        NameOrder::GivenFirst => format!("{} {}", name.first_name(), name.last_name()),
        NameOrder::FamilyFirst => format!("{} {}", name.last_name(), name.first_name()),
    }
}
