use rusqlite::params;
use visited_common::CountryReference;

use super::{Store, StoreError};

impl Store {
    /// Every reference country in scan order.
    pub fn list_countries(&self) -> Result<Vec<CountryReference>, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT country_code, country_name FROM countries ORDER BY rowid")?;
        let countries = stmt
            .query_map([], |row| {
                Ok(CountryReference {
                    country_code: row.get(0)?,
                    country_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(countries)
    }

    pub fn country_count(&self) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Insert reference rows in one transaction, skipping codes already
    /// present. Returns how many rows were added.
    pub fn insert_countries(&self, countries: &[CountryReference]) -> Result<usize, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO countries (country_code, country_name) VALUES (?1, ?2)
                 ON CONFLICT (country_code) DO NOTHING",
            )?;
            for country in countries {
                added += stmt.execute(params![country.country_code, country.country_name])?;
            }
        }
        tx.commit()?;
        Ok(added)
    }
}

/// Parse a `country_code,country_name` list.
///
/// Blank lines and `#` comments are skipped, as is a leading
/// `country_code,country_name` header. Only the first comma separates the
/// columns, so names like `Korea, Republic of` need no quoting; surrounding
/// double quotes are stripped anyway.
pub fn parse_countries(content: &str) -> Result<Vec<CountryReference>, StoreError> {
    let mut countries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if countries.is_empty() && line.eq_ignore_ascii_case("country_code,country_name") {
            continue;
        }

        let (code, name) = line.split_once(',').ok_or_else(|| StoreError::InvalidCountries {
            line: idx + 1,
            reason: "expected `code,name`".to_string(),
        })?;
        let code = code.trim().trim_matches('"');
        let name = name.trim().trim_matches('"');
        if code.is_empty() || name.is_empty() {
            return Err(StoreError::InvalidCountries {
                line: idx + 1,
                reason: "empty code or name".to_string(),
            });
        }

        countries.push(CountryReference::new(code, name));
    }

    Ok(countries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Store {
        let store = Store::open(":memory:").unwrap();
        store
            .insert_countries(&[
                CountryReference::new("FR", "France"),
                CountryReference::new("IN", "India"),
                CountryReference::new("KR", "Korea, Republic of"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_list_countries_in_insert_order() {
        let store = seeded();
        let codes: Vec<String> = store
            .list_countries()
            .unwrap()
            .into_iter()
            .map(|c| c.country_code)
            .collect();
        assert_eq!(codes, vec!["FR", "IN", "KR"]);
    }

    #[test]
    fn test_insert_countries_skips_existing_codes() {
        let store = seeded();
        let added = store
            .insert_countries(&[
                CountryReference::new("FR", "France"),
                CountryReference::new("DE", "Germany"),
            ])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(store.country_count().unwrap(), 4);
    }

    #[test]
    fn test_parse_countries() {
        let content = "country_code,country_name\n\
                       # reference list\n\
                       FR,France\n\
                       \n\
                       KR,\"Korea, Republic of\"\n\
                       BA, Bosnia and Herzegovina \n";
        let countries = parse_countries(content).unwrap();
        assert_eq!(
            countries,
            vec![
                CountryReference::new("FR", "France"),
                CountryReference::new("KR", "Korea, Republic of"),
                CountryReference::new("BA", "Bosnia and Herzegovina"),
            ]
        );
    }

    #[test]
    fn test_parse_countries_rejects_missing_name() {
        let err = parse_countries("FR,France\nDE\n").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCountries { line: 2, .. }));

        let err = parse_countries("FR,\n").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCountries { line: 1, .. }));
    }
}
