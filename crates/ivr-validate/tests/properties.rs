use std::collections::BTreeMap;

use proptest::prelude::*;

use ivr_model::{
    DocumentType, FieldSpec, FieldValue, ManufacturerConfig, TargetField, Transform,
};
use ivr_validate::evaluate;

fn config_of(keys: &[String]) -> ManufacturerConfig {
    ManufacturerConfig {
        id: 1,
        name: "Property Manufacturer".to_string(),
        aliases: vec![],
        document_type: DocumentType::Ivr,
        template_id: "tpl_property".to_string(),
        signature_required: false,
        required_fields: keys.to_vec(),
        field_specs: keys
            .iter()
            .map(|key| {
                (
                    key.clone(),
                    FieldSpec {
                        sources: vec![key.clone()],
                        transform: Transform::None,
                        computation: None,
                        required: true,
                        group: None,
                    },
                )
            })
            .collect(),
        targets: keys
            .iter()
            .map(|key| TargetField {
                canonical: key.clone(),
                output: key.clone(),
            })
            .collect(),
        groups: BTreeMap::new(),
    }
}

proptest! {
    /// Supplying a previously-missing required value never decreases
    /// completeness and never flips a valid result to invalid.
    #[test]
    fn completeness_is_monotone(
        total in 1usize..12,
        filled_mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let keys: Vec<String> = (0..total).map(|i| format!("clinical.field_{i}")).collect();
        let config = config_of(&keys);

        let mut data: BTreeMap<String, FieldValue> = keys
            .iter()
            .zip(&filled_mask)
            .filter(|(_, filled)| **filled)
            .map(|(key, _)| (key.clone(), FieldValue::from("value")))
            .collect();
        let (before_report, before) = evaluate(&data, &config, &[], &[]);

        // Fill one previously-missing key, if any remain.
        if let Some(missing) = keys.iter().find(|key| !data.contains_key(*key)) {
            data.insert(missing.clone(), FieldValue::from("supplied"));
        }
        let (after_report, after) = evaluate(&data, &config, &[], &[]);

        prop_assert!(after.percentage >= before.percentage);
        prop_assert!(after.filled >= before.filled);
        if before_report.valid {
            prop_assert!(after_report.valid);
        }
    }

    /// Percentage stays within [0, 100].
    #[test]
    fn completeness_is_bounded(
        total in 1usize..12,
        filled_mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let keys: Vec<String> = (0..total).map(|i| format!("clinical.field_{i}")).collect();
        let config = config_of(&keys);
        let data: BTreeMap<String, FieldValue> = keys
            .iter()
            .zip(&filled_mask)
            .filter(|(_, filled)| **filled)
            .map(|(key, _)| (key.clone(), FieldValue::from("value")))
            .collect();
        let (_, completeness) = evaluate(&data, &config, &[], &[]);
        prop_assert!((0.0..=100.0).contains(&completeness.percentage));
    }
}
