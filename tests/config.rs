use anyhow::Result;
use ironnest::NestError;
use ironnest::config::{ENV_KEYS, ENV_MODE, ENV_OUTPUT, ENV_PRETTY, NestConfig};
use ironnest::sink::{SinkMode, SinkOptions};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn loads_from_a_json_file() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let file = tmp.path().join("nest.json");
    fs::write(
        &file,
        r#"{"keys": ["currency", "country"], "output": "docs/result.json", "mode": "best-effort"}"#,
    )?;
    let cfg = NestConfig::from_file(&file)?;
    assert_eq!(cfg.keys, vec!["currency", "country"]);
    assert_eq!(cfg.output, Some(PathBuf::from("docs/result.json")));
    assert_eq!(cfg.mode, SinkMode::BestEffort);
    assert!(!cfg.pretty);
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let file = tmp.path().join("nest.json");
    fs::write(&file, r#"{"kyes": ["city"]}"#)?;
    assert!(NestConfig::from_file(&file).is_err());
    Ok(())
}

#[test]
fn environment_overrides_the_file() -> Result<()> {
    let mut cfg = NestConfig {
        keys: vec!["city".into()],
        ..Default::default()
    };
    cfg.apply_vars(vars(&[
        (ENV_KEYS, "currency, country,"),
        (ENV_OUTPUT, "out.json.gz"),
        (ENV_PRETTY, "yes"),
        (ENV_MODE, "best-effort"),
    ]))?;
    assert_eq!(cfg.keys, vec!["currency", "country"]);
    assert_eq!(cfg.output, Some(PathBuf::from("out.json.gz")));
    assert_eq!(
        cfg.sink_options(),
        SinkOptions {
            pretty: true,
            mode: SinkMode::BestEffort,
            create_dirs: false
        }
    );
    Ok(())
}

#[test]
fn unset_variables_change_nothing() -> Result<()> {
    let mut cfg = NestConfig {
        keys: vec!["city".into()],
        pretty: true,
        ..Default::default()
    };
    let before = cfg.clone();
    cfg.apply_vars(|_| None)?;
    assert_eq!(cfg, before);
    Ok(())
}

#[test]
fn bad_values_are_errors() {
    let mut cfg = NestConfig::default();
    assert!(cfg.apply_vars(vars(&[(ENV_PRETTY, "maybe")])).is_err());
    assert!(cfg.apply_vars(vars(&[(ENV_MODE, "lenient")])).is_err());
}

#[test]
fn empty_key_list_is_rejected() {
    let cfg = NestConfig::default();
    assert!(matches!(
        cfg.grouping_keys(),
        Err(NestError::InvalidKeySpec(_))
    ));
}
