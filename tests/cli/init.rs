use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ Created .msgharvestrc.json\n");

    let content = test.read_file(".msgharvestrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in [
        "defaultCategory",
        "ignoreFile",
        "projectConfigMarker",
        "templateExtensions",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}'", field);
    }

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".msgharvestrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".msgharvestrc.json already exists"));
    assert_eq!(test.read_file(".msgharvestrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_file("templates/index.twig", "{{ 'Hi'|t }}\n")?;

    test.command().arg("init").output()?;
    let output = test.extract_command().output()?;

    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).starts_with("site  1 message\n"));

    Ok(())
}
