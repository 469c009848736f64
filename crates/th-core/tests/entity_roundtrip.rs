//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use th_core::entities::*;
use th_core::enums::*;
use th_core::palette::LabelColor;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    species_roundtrip,
    SpeciesType,
    SpeciesType {
        id: "spc-a3f8b2c1".into(),
        name: "玉米蛇".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    animal_roundtrip_full,
    Animal,
    Animal {
        id: "ani-0badf00d".into(),
        name: "雪蛇".into(),
        nickname: Some("小白".into()),
        sex: Some(Sex::ProbableFemale),
        traits: vec!["白化".into(), "条纹".into()],
        species_id: "spc-a3f8b2c1".into(),
        container_id: Some("hsg-11111111".into()),
        slot_id: Some("slt-22222222".into()),
        birth_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        weight: Some(312.5),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    animal_roundtrip_minimal,
    Animal,
    Animal {
        id: "ani-0badf00e".into(),
        name: "无名".into(),
        nickname: None,
        sex: None,
        traits: vec![],
        species_id: "spc-a3f8b2c1".into(),
        container_id: None,
        slot_id: None,
        birth_date: None,
        weight: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    container_roundtrip,
    HousingContainer,
    HousingContainer {
        id: "hsg-11111111".into(),
        name: "A 柜".into(),
        kind: ContainerKind::Cabinet,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    slot_roundtrip,
    HousingSlot,
    HousingSlot {
        id: "slt-22222222".into(),
        container_id: "hsg-11111111".into(),
        column: 2,
        row: 4,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    feeding_roundtrip,
    FeedingLog,
    FeedingLog {
        id: "fed-33333333".into(),
        animal_id: "ani-0badf00d".into(),
        fed_at: Utc::now(),
        food: "乳鼠".into(),
        amount: Some(8.0),
        note: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    weight_roundtrip,
    WeightLog,
    WeightLog {
        id: "wgt-44444444".into(),
        animal_id: "ani-0badf00d".into(),
        measured_at: Utc::now(),
        weight: 320.0,
        note: Some("蜕皮后".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    climate_roundtrip,
    ClimateLog,
    ClimateLog {
        id: "clm-55555555".into(),
        animal_id: "ani-0badf00d".into(),
        recorded_at: Utc::now(),
        temperature: 28.5,
        humidity: 60.0,
        note: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(sex_roundtrip, Sex, Sex::ProbableMale);
roundtrip_and_validate!(container_kind_roundtrip, ContainerKind, ContainerKind::Box);
roundtrip_and_validate!(label_color_roundtrip, LabelColor, LabelColor::Geekblue);

#[test]
fn animal_rejects_unknown_sex_in_json() {
    let json = serde_json::json!({
        "id": "ani-1",
        "name": "x",
        "nickname": null,
        "sex": "FAMALE",
        "traits": [],
        "species_id": "spc-1",
        "container_id": null,
        "slot_id": null,
        "birth_date": null,
        "weight": null,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    });
    assert!(serde_json::from_value::<Animal>(json).is_err());
}

#[test]
fn species_display_name_falls_back_to_id() {
    let mut species = SpeciesType {
        id: "spc-1".into(),
        name: "  ".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    assert_eq!(species.display_name(), "spc-1");
    species.name = "球蟒".into();
    assert_eq!(species.display_name(), "球蟒");
}
