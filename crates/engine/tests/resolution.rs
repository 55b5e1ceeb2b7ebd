//! Index-code resolution and output naming against the built-in catalogue.

use std::collections::BTreeMap;

use xcalc_engine::{Calculator, EngineConfig, EngineError, IndicatorRegistry, NameResolver, ResolvedCode};
use xcalc_indices::Value;

fn resolver() -> NameResolver<'static> {
    NameResolver::new(IndicatorRegistry::builtin(), "YY")
}

fn resolve(code: &str) -> (&'static str, Option<Value>) {
    let r = resolver().resolve(code).unwrap();
    (r.canonical_id(), r.embedded_value().cloned())
}

#[test]
fn every_registered_id_resolves_to_itself() {
    for d in IndicatorRegistry::builtin().iter() {
        let r = resolver().resolve(d.canonical_id()).unwrap();
        assert_eq!(
            r,
            ResolvedCode::Exact {
                id: d.canonical_id()
            }
        );
    }
}

#[test]
fn placeholder_round_trip() {
    // RX1day is registered in its own right.
    for n in 2..=60 {
        let code = format!("RX{n}day");
        assert_eq!(resolve(&code), ("RXYYday", Some(Value::Int(n))), "{code}");
    }
    assert_eq!(resolve("RX1day"), ("RX1day", None));
}

#[test]
fn negative_defaults_flip_the_sign() {
    assert_eq!(resolve("WI5"), ("WI", Some(Value::Int(-5))));
    assert_eq!(resolve("CSf5"), ("CSf", Some(Value::Int(-5))));
    assert_eq!(resolve("CSx15"), ("CSx", Some(Value::Int(-15))));
}

#[test]
fn stripped_matches() {
    let r = resolver().resolve("SU30").unwrap();
    assert!(matches!(r, ResolvedCode::AlphabeticStripped { id: "SU", .. }));
    assert_eq!(r.embedded_value(), Some(&Value::Int(30)));
    assert_eq!(resolve("GD5"), ("GD", Some(Value::Int(5))));
}

#[test]
fn placeholder_matches() {
    assert_eq!(resolve("CHD30x"), ("CHDYYx", Some(Value::Int(30))));
    assert_eq!(resolve("R95p"), ("RYYp", Some(Value::Int(95))));
    assert_eq!(resolve("R99pTOT"), ("RYYpTOT", Some(Value::Int(99))));
    assert_eq!(resolve("R75pABS"), ("RYYpABS", Some(Value::Int(75))));
    assert_eq!(resolve("RR90p"), ("RRYYp", Some(Value::Int(90))));
    assert_eq!(resolve("R30mm"), ("RYYmm", Some(Value::Int(30))));
    assert_eq!(resolve("R05p"), ("RYYp", Some(Value::Float(0.5))));
}

#[test]
fn stripped_digits_without_a_parameter() {
    for (code, id, n) in [("TG5", "TG", 5), ("RR5", "RR", 5), ("FD3", "FD", 3), ("HWf5", "HWf", 5)] {
        let r = resolver().resolve(code).unwrap();
        assert_eq!(
            r,
            ResolvedCode::AlphabeticStripped {
                id,
                value: Value::Int(n),
            },
            "{code}"
        );
    }
}

#[test]
fn unused_embedded_value_is_not_bound() {
    let calculator = Calculator::new(EngineConfig::new()).unwrap();
    let (resolved, name, params) = calculator.bind("TG5", &BTreeMap::new()).unwrap();
    assert_eq!(resolved.canonical_id(), "TG");
    assert_eq!(name, "TG5");
    assert!(params.args().is_empty());
    assert!(params.dropped().is_empty());
}

#[test]
fn fixed_thresholds_stay_exact() {
    assert_eq!(resolve("R10mm"), ("R10mm", None));
    assert_eq!(resolve("HD17"), ("HD17", None));
}

#[test]
fn unknown_codes() {
    for code in ["XYZ", "TG5p", "HD18", "", "99"] {
        let err = resolver().resolve(code).unwrap_err();
        assert!(
            matches!(err, EngineError::UnknownIndex { code: ref c } if c == code),
            "{code}"
        );
    }
}

#[test]
fn custom_placeholder_token() {
    let registry = IndicatorRegistry::builtin();
    // With a different token no placeholder-style id can match.
    let err = NameResolver::new(registry, "NN").resolve("RX5day").unwrap_err();
    assert!(matches!(err, EngineError::UnknownIndex { .. }));
}

fn name_of(code: &str, overrides: &[(&str, Value)]) -> String {
    let calculator = Calculator::new(EngineConfig::new()).unwrap();
    let overrides: BTreeMap<String, Value> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    calculator.bind(code, &overrides).unwrap().1
}

#[test]
fn output_names() {
    assert_eq!(name_of("RXYYday", &[("window", Value::Int(3))]), "RX3day");
    assert_eq!(name_of("RXYYday", &[]), "RX5day");
    assert_eq!(name_of("RX5day", &[]), "RX5day");
    assert_eq!(name_of("RX5day", &[("window", Value::Int(7))]), "RX7day");
    assert_eq!(name_of("SU", &[("thresh", Value::Int(30))]), "SU30");
    assert_eq!(name_of("SU", &[]), "SU");
    assert_eq!(name_of("SU25", &[("thresh", Value::Int(30))]), "SU30");
    assert_eq!(name_of("WI5", &[]), "WI5");
    assert_eq!(name_of("CHDYYx", &[("thresh", Value::from("35 degC"))]), "CHD35x");
    assert_eq!(name_of("TG", &[("freq", Value::from("MS"))]), "TG");
}
