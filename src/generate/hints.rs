//! Field-name heuristics, one ordered table per node kind.
//!
//! Names are lower-cased and tested against each pattern in table order; the first hit
//! picks the generator. Order is significant (`firstName` must hit the first-name row
//! before the generic `name` row).
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName, ZipCode};
use fake::faker::internet::en::{DomainSuffix, Password, SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use once_cell::sync::Lazy;
use rand::{Rng, RngCore};
use regex::Regex;
use serde_json::{Value, json};

pub type Generate<T> = fn(&mut dyn RngCore) -> T;

pub struct Hint<T> {
    pub label: &'static str,
    pub pattern: Regex,
    pub generate: Generate<T>,
}

pub struct HintTable<T> {
    hints: Vec<Hint<T>>,
}

impl<T> HintTable<T> {
    fn new() -> Self {
        Self { hints: Vec::new() }
    }

    /// Appends a row; patterns are matched case-insensitively.
    fn hint(mut self, label: &'static str, pattern: &str, generate: Generate<T>) -> Self {
        let pattern = Regex::new(&format!("(?i){pattern}")).expect("hint pattern");
        self.hints.push(Hint { label, pattern, generate });
        self
    }

    pub fn first_match(&self, name: &str) -> Option<&Hint<T>> {
        let name = name.to_lowercase();
        self.hints.iter().find(|hint| hint.pattern.is_match(&name))
    }

    pub fn generate(&self, name: &str, rng: &mut dyn RngCore) -> Option<T> {
        self.first_match(name).map(|hint| (hint.generate)(rng))
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.hints.iter().map(|hint| hint.label)
    }
}

// ———————————————————————————————————————————————————————————————————————————
// TABLES
// ———————————————————————————————————————————————————————————————————————————

pub static STRING: Lazy<HintTable<String>> = Lazy::new(|| {
    HintTable::new()
        .hint("email", "email", |rng| SafeEmail().fake_with_rng(rng))
        .hint("first name", "(first[-_ ]?name|fname)", |rng| FirstName().fake_with_rng(rng))
        .hint("last name", "(last[-_ ]?name|lname|surname|family)", |rng| LastName().fake_with_rng(rng))
        .hint("full name", "(full[-_ ]?name|name)", |rng| Name().fake_with_rng(rng))
        .hint("phone", "(phone|mobile|tel)", |rng| PhoneNumber().fake_with_rng(rng))
        .hint("uuid", "uuid|guid|id$", uuid_v4)
        .hint("url", "(url|uri|link)", url)
        .hint("username", "username", |rng| Username().fake_with_rng(rng))
        .hint("password", "password", |rng| Password(10..20).fake_with_rng(rng))
        .hint("image", "(avatar|image|img)", image_url)
        .hint("address", "address", street_address)
        .hint("city", "(city|town)", |rng| CityName().fake_with_rng(rng))
        .hint("zip code", "(zip|postal)", |rng| ZipCode().fake_with_rng(rng))
        .hint("country", "(country)", |rng| CountryName().fake_with_rng(rng))
        .hint("latitude", "(lat|latitude)", |rng| latitude(rng).to_string())
        .hint("longitude", "(lng|longitude)", |rng| longitude(rng).to_string())
        .hint("created", "(createdAt|created|created_at)", |rng| iso(past(rng)))
        .hint("updated", "(updatedAt|updated|updated_at)", |rng| iso(recent(rng)))
        .hint("joined", "(joinedAt|joined|joined_at)", |rng| iso(recent(rng)))
        .hint("deleted", "(deletedAt|deleted|deleted_at)", |rng| iso(recent(rng)))
        .hint("text", "(comment|description|text)", |rng| Paragraph(1..3).fake_with_rng(rng))
});

pub static NUMBER: Lazy<HintTable<Value>> = Lazy::new(|| {
    HintTable::new()
        .hint("latitude", "(lat|latitude)", |rng| json!(latitude(rng)))
        .hint("longitude", "(lng|longitude)", |rng| json!(longitude(rng)))
        .hint("age", "(age)", |rng| json!(rng.gen_range(18..=85)))
});

pub static DATE: Lazy<HintTable<DateTime<Utc>>> = Lazy::new(|| {
    HintTable::new()
        .hint("created", "(createdAt|created|created_at)", past)
        .hint("updated", "(updatedAt|updated|updated_at)", recent)
        .hint("joined", "(joinedAt|joined|joined_at)", recent)
        .hint("deleted", "(deletedAt|deleted|deleted_at)", recent)
        .hint("due", "(due)", future)
});

// ———————————————————————————————————————————————————————————————————————————
// VALUES
// ———————————————————————————————————————————————————————————————————————————

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Somewhere in the last year.
pub fn past(rng: &mut dyn RngCore) -> DateTime<Utc> {
    Utc::now() - TimeDelta::milliseconds(rng.gen_range(1..=YEAR_MS))
}

/// Somewhere in the last day.
pub fn recent(rng: &mut dyn RngCore) -> DateTime<Utc> {
    Utc::now() - TimeDelta::milliseconds(rng.gen_range(1..=DAY_MS))
}

/// Somewhere in the next year.
pub fn future(rng: &mut dyn RngCore) -> DateTime<Utc> {
    Utc::now() + TimeDelta::milliseconds(rng.gen_range(1..=YEAR_MS))
}

/// `2024-05-01T12:00:00.000Z`
pub fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn round(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

fn latitude(rng: &mut dyn RngCore) -> f64 {
    round(rng.gen_range(-90.0..=90.0), 4)
}

fn longitude(rng: &mut dyn RngCore) -> f64 {
    round(rng.gen_range(-180.0..=180.0), 4)
}

fn uuid_v4(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

fn url(rng: &mut dyn RngCore) -> String {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!("https://{host}.{suffix}")
}

fn image_url(rng: &mut dyn RngCore) -> String {
    let seed: String = Word().fake_with_rng(rng);
    format!("https://picsum.photos/seed/{seed}/640/480")
}

fn street_address(rng: &mut dyn RngCore) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn label<T>(table: &HintTable<T>, name: &str) -> Option<&'static str> {
        table.first_match(name).map(|hint| hint.label)
    }

    #[test]
    fn tables_keep_their_order() {
        assert_eq!(STRING.labels().count(), 21);
        assert_eq!(STRING.labels().take(4).collect::<Vec<_>>(), ["email", "first name", "last name", "full name"]);
        assert_eq!(NUMBER.labels().collect::<Vec<_>>(), ["latitude", "longitude", "age"]);
        assert_eq!(DATE.labels().last(), Some("due"));
    }

    #[test]
    fn first_matching_row_wins() {
        assert_eq!(label(&STRING, "userEmail"), Some("email"));
        assert_eq!(label(&STRING, "firstName"), Some("first name"));
        assert_eq!(label(&STRING, "first_name"), Some("first name"));
        assert_eq!(label(&STRING, "surname"), Some("last name"));
        assert_eq!(label(&STRING, "displayName"), Some("full name"));
        // `name` sits above `username` in the table
        assert_eq!(label(&STRING, "username"), Some("full name"));
        assert_eq!(label(&STRING, "userId"), Some("uuid"));
        assert_eq!(label(&STRING, "ID"), Some("uuid"));
        assert_eq!(label(&STRING, "identity"), None);
        assert_eq!(label(&STRING, "hostel"), Some("phone"));
        assert_eq!(label(&STRING, "created_at"), Some("created"));
        assert_eq!(label(&STRING, "title"), None);
    }

    #[test]
    fn number_and_date_rows() {
        assert_eq!(label(&NUMBER, "latitude"), Some("latitude"));
        assert_eq!(label(&NUMBER, "lng"), Some("longitude"));
        assert_eq!(label(&NUMBER, "userAge"), Some("age"));
        assert_eq!(label(&NUMBER, "price"), None);
        assert_eq!(label(&DATE, "dueDate"), Some("due"));
        assert_eq!(label(&DATE, "updatedAt"), Some("updated"));
        assert_eq!(label(&DATE, "birthday"), None);
    }

    #[test]
    fn generated_values_have_the_expected_form() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let email = STRING.generate("email", &mut rng).unwrap();
            assert!(email.contains('@'), "{email}");
            let id = STRING.generate("id", &mut rng).unwrap();
            assert!(uuid::Uuid::parse_str(&id).is_ok(), "{id}");
            let age = NUMBER.generate("age", &mut rng).unwrap().as_i64().unwrap();
            assert!((18..=85).contains(&age));
            let lat = NUMBER.generate("lat", &mut rng).unwrap().as_f64().unwrap();
            assert!((-90.0..=90.0).contains(&lat));
            let created = STRING.generate("createdAt", &mut rng).unwrap();
            let parsed = DateTime::parse_from_rfc3339(&created).unwrap();
            assert!(parsed <= Utc::now());
            assert!(created.ends_with('Z') && created.len() == 24, "{created}");
            assert!(DATE.generate("due", &mut rng).unwrap() > Utc::now());
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round(12.345_67, 2), 12.35);
        assert_eq!(round(-0.000_04, 4), -0.0);
    }
}
