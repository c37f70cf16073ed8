use super::components::AddressComponents;

/// German postal code: exactly five ASCII digits.
pub fn is_postal_code(text: &str) -> bool {
    text.len() == 5 && text.bytes().all(|b| b.is_ascii_digit())
}

/// Digits followed by at most one ASCII letter (`12`, `12a`).
pub fn is_house_number(text: &str) -> bool {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &text.as_bytes()[digits..];
    digits > 0 && (rest.is_empty() || (rest.len() == 1 && rest[0].is_ascii_alphabetic()))
}

/// Best-effort split of `"Street Number, PLZ City, Country"`.
///
/// Never fails: parts that do not match the expected shape are kept whole
/// (`"Hauptstraße"` stays the street, `"München"` the city). The country
/// falls back to `default_country` when the third part is missing.
pub fn parse_address(text: &str, default_country: &str) -> AddressComponents {
    let mut components = AddressComponents::with_country(default_country);
    let mut parts = text.splitn(3, ',').map(str::trim);

    if let Some(street_part) = parts.next().filter(|part| !part.is_empty()) {
        match street_part.rsplit_once(char::is_whitespace) {
            Some((street, number)) if is_house_number(number) && !street.trim().is_empty() => {
                components.street = street.trim().to_string();
                components.house_number = number.to_string();
            }
            _ => components.street = street_part.to_string(),
        }
    }

    if let Some(city_part) = parts.next().filter(|part| !part.is_empty()) {
        match city_part.split_once(char::is_whitespace) {
            Some((code, city)) if is_postal_code(code) => {
                components.postal_code = code.to_string();
                components.city = city.trim().to_string();
            }
            _ if is_postal_code(city_part) => components.postal_code = city_part.to_string(),
            _ => components.city = city_part.to_string(),
        }
    }

    if let Some(country) = parts.next().filter(|part| !part.is_empty()) {
        components.country = country.to_string();
    }

    components
}
