//! Loader for the static XML user dataset.
//!
//! The file is read and decoded on every request; nothing is cached.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::User;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset: {0}")]
    Read(#[from] std::io::Error),

    #[error("cannot decode dataset: {0}")]
    Decode(#[from] quick_xml::de::DeError),
}

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(rename = "row", default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    id: i64,
    first_name: String,
    last_name: String,
    age: i64,
    about: String,
    gender: String,
}

impl From<Row> for User {
    fn from(row: Row) -> Self {
        User {
            id: row.id,
            name: format!("{} {}", row.first_name, row.last_name),
            age: row.age,
            about: row.about,
            gender: row.gender,
        }
    }
}

/// Decode `<root><row>...</row></root>` into users, preserving file order.
pub fn parse_users(xml: &str) -> Result<Vec<User>, DatasetError> {
    let root: Root = quick_xml::de::from_str(xml)?;
    Ok(root.rows.into_iter().map(User::from).collect())
}

pub async fn load_users(path: &Path) -> Result<Vec<User>, DatasetError> {
    let xml = tokio::fs::read_to_string(path).await?;
    parse_users(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<root>
  <row>
    <id>0</id>
    <first_name>Boyd</first_name>
    <last_name>Wolf</last_name>
    <age>22</age>
    <about>Nulla cillum enim.</about>
    <gender>male</gender>
  </row>
  <row>
    <id>1</id>
    <first_name>Hilda</first_name>
    <last_name>Mayer</last_name>
    <age>21</age>
    <about>Sit commodo.</about>
    <gender>female</gender>
  </row>
</root>"#;

    #[test]
    fn parse_users_joins_names_and_keeps_order() {
        let users = parse_users(SAMPLE).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 0);
        assert_eq!(users[0].name, "Boyd Wolf");
        assert_eq!(users[1].name, "Hilda Mayer");
        assert_eq!(users[1].age, 21);
        assert_eq!(users[1].gender, "female");
    }

    #[test]
    fn parse_users_accepts_empty_root() {
        let users = parse_users("<root></root>").unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn parse_users_rejects_non_numeric_age() {
        let xml = SAMPLE.replace("<age>22</age>", "<age>old</age>");
        assert!(matches!(parse_users(&xml), Err(DatasetError::Decode(_))));
    }

    #[tokio::test]
    async fn load_users_reports_missing_file() {
        let err = load_users(Path::new("does/not/exist.xml")).await.unwrap_err();
        assert!(matches!(err, DatasetError::Read(_)));
    }

    #[tokio::test]
    async fn bundled_dataset_loads() {
        let users = load_users(Path::new(crate::DEFAULT_DATASET_PATH)).await.unwrap();
        assert_eq!(users.len(), 35);
        assert_eq!(users[5].name, "Glenn Jordan");
    }
}
