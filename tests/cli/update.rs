use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_update_php_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "templates/index.twig",
        "{{ 'Hello'|t }}\n{{ 'New'|t }}\n{{ 'Elsewhere'|t('app') }}\n",
    )?;
    test.write_file(
        "translations/de/site.php",
        "<?php\n\nreturn [\n    'Old' => 'Alt',\n    'Hello' => 'Hallo',\n];\n",
    )?;

    let output = test
        .update_command()
        .args(["--catalog", "translations/de/site.php"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Updated translations/de/site.php: 1 added, 1 removed, 2 messages total\n"
    );
    assert_eq!(
        test.read_file("translations/de/site.php")?,
        "<?php\n\nreturn [\n    'Hello' => 'Hallo',\n    'New' => '',\n];\n"
    );

    Ok(())
}

#[test]
fn test_update_po_keeps_language_and_refreshes_references() -> Result<()> {
    let test = CliTest::with_file("templates/page.twig", "\n{{ 'Hello'|t }}\n")?;
    test.write_file(
        "locale/site.po",
        "msgid \"\"\nmsgstr \"\"\n\"Language: fr\\n\"\n\n#: templates/old.twig:9\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n",
    )?;

    let output = test
        .update_command()
        .args(["--catalog", "locale/site.po"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let po = test.read_file("locale/site.po")?;
    assert!(po.contains("\"Language: fr\\n\""));
    assert!(po.contains("#: templates/page.twig:2\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n"));
    assert!(!po.contains("old.twig"));

    Ok(())
}

#[test]
fn test_update_keeps_messages_when_a_file_fails() -> Result<()> {
    let test = CliTest::with_file("templates/index.twig", "{{ 'Hello'|t }}\n{{ 'New'|t }}\n")?;
    test.write_file("templates/broken.twig", "{{ 'Oops'|t ")?;
    test.write_file(
        "translations/de/site.php",
        "<?php\n\nreturn [\n    'Hello' => 'Hallo',\n    'Old' => 'Alt',\n];\n",
    )?;

    let output = test
        .update_command()
        .args(["--catalog", "translations/de/site.php", "--strict"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "✓ Updated translations/de/site.php: 1 added, 0 removed, 1 kept, 3 messages total\n"
    );
    assert!(stderr(&output).contains("templates/broken.twig"));
    assert_eq!(
        test.read_file("translations/de/site.php")?,
        "<?php\n\nreturn [\n    'Hello' => 'Hallo',\n    'New' => '',\n    'Old' => 'Alt',\n];\n"
    );

    Ok(())
}

#[test]
fn test_update_creates_missing_catalog() -> Result<()> {
    let test = CliTest::with_file("src/Plugin.php", "<?php\nCraft::t('app', 'Save');\n")?;

    let output = test
        .update_command()
        .args(["--catalog", "translations/fr/app.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("translations/fr/app.json")?,
        "{\n  \"Save\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_update_rejects_unknown_format() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .update_command()
        .args(["--catalog", "translations/fr/app.mo"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unsupported catalog format"));

    Ok(())
}
