use scorebook_core::{Grade, StudentRecord};

#[test]
fn record_serializes_with_derived_fields() {
    let record = StudentRecord::new("S1", "Kim", 105, -5, 70, 80);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["sno"], "S1");
    assert_eq!(json["korean"], 100);
    assert_eq!(json["english"], 0);
    assert_eq!(json["total"], 250);
    assert_eq!(json["average"], 62.5);
    assert_eq!(json["grade"], "D");
}

#[test]
fn record_deserializes_back_to_equal_value() {
    let record = StudentRecord::new("S2", "Park", 88, 92, 79, 100);

    let json = serde_json::to_string(&record).unwrap();
    let back: StudentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn grade_displays_as_single_letter() {
    assert_eq!(Grade::A.to_string(), "A");
    assert_eq!(Grade::F.to_string(), "F");
    assert_eq!(Grade::from_average(62.5).letter(), "D");
}
