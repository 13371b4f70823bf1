//! Conversion between [`Product`] and the attribute record the table stores.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::domain::Product;
use crate::error::StoreError;

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";

pub type Item = HashMap<String, AttributeValue>;

pub fn to_item(product: &Product) -> Item {
    HashMap::from([
        (ID.to_string(), AttributeValue::S(product.id.clone())),
        (NAME.to_string(), AttributeValue::S(product.name.clone())),
        (
            DESCRIPTION.to_string(),
            AttributeValue::S(product.description.clone()),
        ),
    ])
}

/// Reads a product back out of a stored record. Records missing one of the three
/// string attributes are reported as corrupt rather than half-filled.
pub fn from_item(item: &Item) -> Result<Product, StoreError> {
    let id = string_attr(item, ID)?;
    if id.is_empty() {
        return Err(StoreError::CorruptRecord("empty id".to_string()));
    }
    Ok(Product {
        id,
        name: string_attr(item, NAME)?,
        description: string_attr(item, DESCRIPTION)?,
    })
}

fn string_attr(item: &Item, key: &str) -> Result<String, StoreError> {
    match item.get(key) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(StoreError::CorruptRecord(format!(
            "attribute '{}' is not a string",
            key
        ))),
        None => Err(StoreError::CorruptRecord(format!(
            "attribute '{}' is missing",
            key
        ))),
    }
}
