//! Username derivation from person names.
//!
//! A username is the first letter of the first name followed by the first
//! seven letters of the surname, after German umlauts are transliterated.
//! Two different people can map to the same username; that is accepted.

use chem_model::NameFormat;

/// Number of surname characters kept in a username.
pub const SURNAME_CHARS: usize = 7;

/// Replace umlauts and sharp s with their ASCII transliterations.
pub fn transliterate(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

fn compose(first_name: &str, surname: &str, uppercase: bool) -> Option<String> {
    let initial = first_name.chars().next()?;
    if surname.is_empty() {
        return None;
    }
    let mut username = String::new();
    username.push(initial);
    username.extend(surname.chars().take(SURNAME_CHARS));
    if uppercase {
        username = username.to_uppercase();
    }
    Some(username)
}

/// Username from already split name components.
///
/// Whitespace inside the surname is dropped, so `van Dyke` becomes `vanDyke`.
pub fn username_from_parts(surname: &str, first_name: &str, uppercase: bool) -> Option<String> {
    let surname: String = transliterate(surname)
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    let first_name = transliterate(first_name.trim());
    compose(&first_name, &surname, uppercase)
}

/// Username from a free-text name written in the given format.
///
/// Returns `None` for empty names and for names that do not have exactly two
/// components; the caller decides whether that matters.
pub fn resolve_username(full_name: &str, format: NameFormat, uppercase: bool) -> Option<String> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return None;
    }
    match format {
        NameFormat::LastCommaFirst => {
            let mut parts = full_name.split(',');
            let surname = parts.next()?;
            let first_name = parts.next()?;
            if parts.next().is_some() {
                return None;
            }
            username_from_parts(surname, first_name, uppercase)
        }
        NameFormat::FirstLast => {
            let transliterated = transliterate(full_name);
            let tokens: Vec<&str> = transliterated.split_whitespace().collect();
            let [first_name, surname] = tokens.as_slice() else {
                return None;
            };
            compose(first_name, surname, uppercase)
        }
    }
}
