use std::time::Duration;

use crate::helpers::*;
use macrostate::{MacroError, Macrostate, MacrostateConfig, ProviderKey, RegimeConfig};

#[test]
fn build_requires_a_provider() {
    let err = Macrostate::builder().build().err().expect("no providers");
    assert!(matches!(err, MacroError::InvalidArg(_)));
}

#[test]
fn build_validates_config() {
    let bad = RegimeConfig {
        thresholds: [0.5, -0.5, 1.5],
        ..RegimeConfig::default()
    };
    let err = Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .regime(bad)
        .build()
        .err()
        .expect("invalid thresholds");
    assert!(matches!(err, MacroError::InvalidConfig(_)));
}

#[test]
fn builder_modifiers_land_in_config() {
    let ms = Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .provider_timeout(Duration::from_secs(3))
        .mark_secondary_as_fallback(true)
        .history_years(4)
        .build()
        .unwrap();
    let cfg = ms.config();
    assert_eq!(cfg.ingest.provider_timeout, Duration::from_secs(3));
    assert!(cfg.ingest.mark_secondary_as_fallback);
    assert_eq!(cfg.ingest.history_years, 4);
    assert_eq!(cfg.transforms.long_window, 756);
}

#[test]
fn config_document_replaces_defaults() {
    let cfg = MacrostateConfig::from_json_str(r#"{"transforms": {"long_window": 500}}"#).unwrap();
    let ms = Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .config(cfg)
        .build()
        .unwrap();
    assert_eq!(ms.config().transforms.long_window, 500);
    assert_eq!(ms.config().transforms.short_window, 252);
}

#[test]
fn providers_are_looked_up_by_key() {
    let ms = Macrostate::builder()
        .with_provider(mock("primary"))
        .with_provider(mock("secondary"))
        .build()
        .unwrap();
    assert_eq!(
        ms.provider(ProviderKey::new("secondary")).map(|p| p.name()),
        Some("secondary")
    );
    assert!(ms.provider(ProviderKey::new("nope")).is_none());
}
