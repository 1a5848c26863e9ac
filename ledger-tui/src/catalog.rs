//! Option lists backing the invoice form.
//!
//! A built-in set is always available; a JSON file replaces any list it
//! defines. The file looks like:
//!
//! ```json
//! {
//!   "customers": [{ "value": "c-1", "label": "Acme Ltd" }],
//!   "currencies": [{ "value": "eur", "label": "Euro" }]
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use combobox::SelectOption;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub customers: Vec<SelectOption>,
    pub currencies: Vec<SelectOption>,
    pub tags: Vec<SelectOption>,
    pub payment_terms: Vec<SelectOption>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|&(value, label)| SelectOption::new(value, label))
        .collect()
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            customers: options(&[
                ("c-acme", "Acme Ltd"),
                ("c-globex", "Globex Corporation"),
                ("c-initech", "Initech"),
                ("c-umbrella", "Umbrella Holdings"),
                ("c-hooli", "Hooli"),
                ("c-wonka", "Wonka Industries"),
                ("c-stark", "Stark Logistics"),
                ("c-wayne", "Wayne Enterprises"),
                ("c-tyrell", "Tyrell Systems"),
                ("c-soylent", "Soylent Foods"),
            ]),
            currencies: options(&[
                ("eur", "EUR - Euro"),
                ("usd", "USD - US Dollar"),
                ("gbp", "GBP - Pound Sterling"),
                ("chf", "CHF - Swiss Franc"),
                ("jpy", "JPY - Japanese Yen"),
            ]),
            tags: options(&[
                ("urgent", "Urgent"),
                ("recurring", "Recurring"),
                ("disputed", "Disputed"),
                ("export", "Export"),
                ("q-close", "Quarter close"),
                ("internal", "Internal"),
            ]),
            payment_terms: options(&[
                ("net-14", "Net 14"),
                ("net-30", "Net 30"),
                ("net-60", "Net 60"),
                ("receipt", "Due on receipt"),
            ]),
        }
    }

    /// Read the catalog at `path`, falling back to built-in data when there is no file.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            log::debug!("no catalog path configured, using built-in catalog");
            return Ok(Self::builtin());
        };

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found, using built-in catalog", path.display());
                return Ok(Self::builtin());
            }
            Err(source) => {
                return Err(AppError::CatalogRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let catalog: Catalog =
            serde_json::from_str(&raw).map_err(|source| AppError::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "loaded catalog from {}: {} customers, {} currencies, {} tags, {} terms",
            path.display(),
            catalog.customers.len(),
            catalog.currencies.len(),
            catalog.tags.len(),
            catalog.payment_terms.len()
        );
        Ok(catalog)
    }

    /// Append a placeholder contact and return it.
    pub fn add_contact(&mut self) -> SelectOption {
        let n = self.customers.len() + 1;
        let contact = SelectOption::new(
            format!("c-{}", Uuid::new_v4()),
            format!("New contact {n}"),
        );
        log::info!("added contact {} ({})", contact.label, contact.value);
        self.customers.push(contact.clone());
        contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let path = std::env::temp_dir().join("ledger-tui-no-such-catalog.json");
        assert_eq!(Catalog::load(Some(&path)).unwrap(), Catalog::builtin());
        assert_eq!(Catalog::load(None).unwrap(), Catalog::builtin());
    }

    #[test]
    fn test_partial_file_keeps_builtin_lists() {
        let path = std::env::temp_dir().join(format!("ledger-tui-{}.json", Uuid::new_v4()));
        fs::write(&path, r#"{"currencies":[{"value":"sek","label":"SEK"}]}"#).unwrap();

        let catalog = Catalog::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(catalog.currencies, vec![SelectOption::new("sek", "SEK")]);
        assert_eq!(catalog.tags, Catalog::builtin().tags);
    }

    #[test]
    fn test_bad_json_reports_path() {
        let path = std::env::temp_dir().join(format!("ledger-tui-{}.json", Uuid::new_v4()));
        fs::write(&path, "{ not json").unwrap();

        let err = Catalog::load(Some(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, AppError::CatalogParse { .. }));
        assert!(err.to_string().contains("ledger-tui-"));
    }

    #[test]
    fn test_add_contact_generates_unique_values() {
        let mut catalog = Catalog::builtin();
        let a = catalog.add_contact();
        let b = catalog.add_contact();
        assert_ne!(a.value, b.value);
        assert_eq!(catalog.customers.last(), Some(&b));
        assert_eq!(b.label, format!("New contact {}", catalog.customers.len()));
    }
}
