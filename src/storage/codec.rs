//! JSON blob codec for persisted collections.
//!
//! A collection is stored as one JSON array under a single key, e.g.
//! `[{"id":"a","title":"Shirt","image_url":"u","price":10.0,"quantity":1}]`.

use super::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode_blob<T: Serialize>(key: &str, items: &[T]) -> Result<String, StorageError> {
    serde_json::to_string(items).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

pub fn decode_blob<T: DeserializeOwned>(key: &str, blob: &str) -> Result<Vec<T>, StorageError> {
    serde_json::from_str(blob).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartItem;

    #[test]
    fn test_blob_round_trip_preserves_order_and_fields() {
        let items = vec![
            CartItem::new("b", "Mug", "https://img/mug.png", 7.25, 3),
            CartItem::new("a", "Shirt", "https://img/shirt.png", 10.0, 1),
        ];
        let blob = encode_blob("cart", &items).unwrap();
        let decoded: Vec<CartItem> = decode_blob("cart", &blob).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_reads_blob_written_by_the_mobile_app() {
        let blob = r#"[{"id":"1","title":"Camiseta","image_url":"https://x/1.png","price":89.9,"quantity":2}]"#;
        let decoded: Vec<CartItem> = decode_blob("cart", blob).unwrap();
        assert_eq!(
            decoded,
            vec![CartItem::new("1", "Camiseta", "https://x/1.png", 89.9, 2)]
        );
    }

    #[test]
    fn test_malformed_blob_names_the_key() {
        let err = decode_blob::<CartItem>("@GoMarketplace:cartProducts", "{not json")
            .unwrap_err();
        assert!(matches!(err, StorageError::Malformed { ref key, .. } if key == "@GoMarketplace:cartProducts"));
        assert!(err.to_string().contains("@GoMarketplace:cartProducts"));
    }
}
