//! Request forms for the cart and checkout pages.
//!
//! Forms deserialize every field as a string and validate afterwards, so a bad
//! value turns into a field error instead of a rejected request.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::CustomerDetails;

pub type FieldErrors = HashMap<String, String>;

pub const PRODUCT_QUANTITY_CHOICES: RangeInclusive<u32> = 1..=10;

const REQUIRED: &str = "This field is required.";

/// `(value, label)` pairs for the quantity select.
pub fn quantity_choices() -> Vec<(u32, String)> {
    PRODUCT_QUANTITY_CHOICES.map(|i| (i, i.to_string())).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct CartAddProductForm {
    #[serde(default)]
    pub quantity: String,

    #[serde(default, rename = "override")]
    pub override_quantity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartAdd {
    pub quantity: NonZeroU32,
    pub override_quantity: bool,
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "off"
    )
}

impl CartAddProductForm {
    pub fn validate(&self) -> Result<CartAdd, FieldErrors> {
        let mut errs: FieldErrors = HashMap::new();

        let raw = self.quantity.trim();
        let quantity = if raw.is_empty() {
            errs.insert("quantity".into(), REQUIRED.into());
            None
        } else {
            match raw.parse::<u32>() {
                Ok(q) if PRODUCT_QUANTITY_CHOICES.contains(&q) => NonZeroU32::new(q),
                _ => {
                    errs.insert(
                        "quantity".into(),
                        format!("Select a valid choice. {raw} is not one of the available choices."),
                    );
                    None
                }
            }
        };

        match quantity {
            Some(quantity) if errs.is_empty() => Ok(CartAdd {
                quantity,
                override_quantity: parse_flag(&self.override_quantity),
            }),
            _ => Err(errs),
        }
    }
}

/// Checkout form field names, in display order.
pub const ORDER_FIELDS: [&str; 6] = [
    "first_name",
    "last_name",
    "email",
    "address",
    "postal_code",
    "city",
];

#[derive(Debug, Default, Clone, Deserialize)]
pub struct OrderCreateForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
}

fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
        .is_match(email)
}

fn check_text(errs: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.is_empty() {
        errs.insert(field.into(), REQUIRED.into());
    } else if value.chars().count() > max_len {
        errs.insert(
            field.into(),
            format!("Ensure this value has at most {max_len} characters."),
        );
    }
}

impl OrderCreateForm {
    /// The submitted values, trimmed, keyed by field name.
    pub fn values(&self) -> Vec<(&'static str, &str)> {
        ORDER_FIELDS
            .iter()
            .copied()
            .zip([
                self.first_name.trim(),
                self.last_name.trim(),
                self.email.trim(),
                self.address.trim(),
                self.postal_code.trim(),
                self.city.trim(),
            ])
            .collect()
    }

    pub fn validate(&self) -> Result<CustomerDetails, FieldErrors> {
        let mut errs: FieldErrors = HashMap::new();

        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        let address = self.address.trim();
        let postal_code = self.postal_code.trim();
        let city = self.city.trim();

        check_text(&mut errs, "first_name", first_name, 50);
        check_text(&mut errs, "last_name", last_name, 50);
        check_text(&mut errs, "email", email, 254);
        if !errs.contains_key("email") && !is_valid_email(email) {
            errs.insert("email".into(), "Enter a valid email address.".into());
        }
        check_text(&mut errs, "address", address, 250);
        check_text(&mut errs, "postal_code", postal_code, 20);
        check_text(&mut errs, "city", city, 100);

        if !errs.is_empty() {
            return Err(errs);
        }

        Ok(CustomerDetails {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            postal_code: postal_code.to_string(),
            city: city.to_string(),
        })
    }
}
