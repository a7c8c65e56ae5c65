use super::*;

#[test]
fn builtin_catalog_is_valid_and_ordered() {
    let c = Catalog::builtin();
    assert_eq!(c.len(), 6);
    assert!(c.validate().is_ok());
    assert_eq!(c.get(0).unwrap().title, "Mineral Genesis");
    assert_eq!(c.get(5).unwrap().ordinal, 5);
}

#[test]
fn json_round_trip_preserves_records() {
    let c = Catalog::builtin();
    let json = serde_json::to_string(&c).unwrap();
    assert!(json.starts_with('['));
    let back = Catalog::from_json(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn rejects_out_of_order_ordinals_and_empty_titles() {
    let mut records = Catalog::builtin().records().to_vec();
    records.swap(0, 1);
    assert!(Catalog::new(records).is_err());

    let mut records = Catalog::builtin().records().to_vec();
    records[2].title = "  ".to_string();
    assert!(Catalog::new(records).is_err());

    assert!(Catalog::from_json("{not json").is_err());
    assert!(Catalog::new(Vec::new()).unwrap().is_empty());
}
