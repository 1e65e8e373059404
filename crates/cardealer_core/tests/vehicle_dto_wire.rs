use cardealer_core::VehicleDto;
use serde_json::json;

#[test]
fn create_request_without_id_deserializes() {
    let dto: VehicleDto = serde_json::from_value(json!({
        "make": "Ford",
        "model": "Focus",
        "pricePence": 1250000
    }))
    .unwrap();

    assert_eq!(dto.id, None);
    assert_eq!(dto.make.as_deref(), Some("Ford"));
    assert_eq!(dto.price_pence, Some(1_250_000));
    assert_eq!(dto.colour, None);
}

#[test]
fn response_uses_camel_case_and_text_id() {
    let dto = VehicleDto {
        id: Some("3".to_string()),
        make: Some("Ford".to_string()),
        year: Some(2021),
        ..VehicleDto::default()
    };

    let value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["id"], json!("3"));
    assert_eq!(value["make"], json!("Ford"));
    assert_eq!(value["year"], json!(2021));
    assert!(value.get("pricePence").is_some());
    assert!(value.get("price_pence").is_none());
}
