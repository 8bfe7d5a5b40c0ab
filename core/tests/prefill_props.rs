//! Property tests for the pre-fill composer.

use std::collections::BTreeSet;

use form_core::{
    compose_prefill, EmploymentStatus, FormType, ToolInvocationArgs, DEFAULT_COUNTRY,
};
use proptest::prelude::*;
use serde_json::{Number, Value};

fn keys(value: &Value) -> BTreeSet<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(".{0,12}")
}

fn args_strategy() -> impl Strategy<Value = ToolInvocationArgs> {
    let form_type = proptest::option::of(proptest::sample::select(FormType::ALL.to_vec()));
    let status = proptest::option::of(proptest::sample::select(EmploymentStatus::ALL.to_vec()));
    let income = proptest::option::of(prop_oneof![
        (0u64..10_000_000).prop_map(Number::from),
        (0.0f64..10_000_000.0).prop_map(|v| Number::from_f64(v).unwrap()),
    ]);
    (
        (form_type, text(), text(), text(), text(), text()),
        (text(), text(), text(), text(), income, status),
    )
        .prop_map(
            |(
                (form_type, first_name, last_name, email, phone, country),
                (city, state, address, zip_code, annual_income, employment_status),
            )| ToolInvocationArgs {
                form_type,
                first_name,
                last_name,
                email,
                phone,
                country,
                city,
                state,
                address,
                zip_code,
                annual_income,
                employment_status,
            },
        )
}

proptest! {
    #[test]
    fn prefill_keys_match_argument_keys(args in args_strategy()) {
        let args_value = serde_json::to_value(&args).unwrap();
        let payload_value = serde_json::to_value(compose_prefill(&args)).unwrap();
        prop_assert_eq!(keys(&args_value), keys(&payload_value));
    }

    #[test]
    fn country_defaults_only_when_absent(args in args_strategy()) {
        let payload = compose_prefill(&args);
        match &args.country {
            Some(country) => prop_assert_eq!(&payload.country, country),
            None => prop_assert_eq!(payload.country.as_str(), DEFAULT_COUNTRY),
        }
    }

    #[test]
    fn other_fields_pass_through(args in args_strategy()) {
        let payload = compose_prefill(&args);
        prop_assert_eq!(payload.form_type, args.form_type);
        prop_assert_eq!(payload.first_name, args.first_name);
        prop_assert_eq!(payload.email, args.email);
        prop_assert_eq!(payload.zip_code, args.zip_code);
        prop_assert_eq!(payload.annual_income, args.annual_income);
        prop_assert_eq!(payload.employment_status, args.employment_status);
    }
}
