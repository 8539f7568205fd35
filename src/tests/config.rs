use crate::prelude::{BaselineWindow, Config, Processor};

#[test]
fn config_deserialization() {
    let cfg: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, Config::default());

    let cfg: Config = serde_json::from_str(
        r#"{
            "threshold_m": 15.0,
            "min_spacing_factor": 0.8,
            "baseline": { "Leading": 10 },
            "annotate_synthesized": false
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.threshold_m, Some(15.0));
    assert_eq!(cfg.min_spacing_factor, 0.8);
    assert_eq!(cfg.baseline, BaselineWindow::Leading(10));
    assert!(!cfg.annotate_synthesized);
    assert_eq!(cfg.coalesce_distance_m, 0.1);
    assert!(Processor::new(cfg).is_ok());

    let cfg: Config = serde_json::from_str(r#"{ "threshold_m": -1.0 }"#).unwrap();
    assert!(Processor::new(cfg).is_err());
}

#[test]
fn summary_serialization() {
    let result = crate::prelude::process("", "", None).unwrap();
    let json = serde_json::to_string(result.summary()).unwrap();
    assert!(json.contains("\"synthesized_count\":0"));
    assert!(json.contains("\"position_format\":\"Dms\""));
}
