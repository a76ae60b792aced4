use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

fn sample_project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "templates/index.twig",
        "{# home #}\n<h1>{{ 'Welcome'|t }}</h1>\n<p>{{ 'Log in'|t('app') }}</p>\n",
    )?;
    test.write_file("src/Plugin.php", "<?php\n\necho Craft::t('app', 'Save');\n")?;
    test.write_file("web/js/app.js", "Craft.t('site', 'Loading');\n")?;
    Ok(test)
}

#[test]
fn test_extract_summary() -> Result<()> {
    let test = sample_project()?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "app   2 messages\nsite  2 messages\n✓ Extracted 4 messages in 2 categories from 3 files\n"
    );
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_extract_writes_po_catalogs() -> Result<()> {
    let test = sample_project()?;

    let output = test
        .extract_command()
        .args(["--output-dir", "translations", "--language", "de"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote translations/app.po"));
    assert!(stdout(&output).contains("Wrote translations/site.po"));

    insta::assert_snapshot!(test.read_file("translations/site.po")?, @r##"
    msgid ""
    msgstr ""
    "Content-Type: text/plain; charset=UTF-8\n"
    "Language: de\n"

    #: web/js/app.js:1
    msgid "Loading"
    msgstr ""

    #: templates/index.twig:2
    msgid "Welcome"
    msgstr ""
    "##);

    let app = test.read_file("translations/app.po")?;
    assert!(app.contains("#: templates/index.twig:3\nmsgid \"Log in\""));
    assert!(app.contains("#: src/Plugin.php:3\nmsgid \"Save\""));

    Ok(())
}

#[test]
fn test_extract_writes_php_catalogs() -> Result<()> {
    let test = sample_project()?;

    let output = test
        .extract_command()
        .args(["--output-dir", "translations/de", "--format", "php", "--category", "app"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("translations/de/app.php")?,
        "<?php\n\nreturn [\n    'Log in' => '',\n    'Save' => '',\n];\n"
    );
    assert!(!test.root().join("translations/de/site.php").exists());

    Ok(())
}

#[test]
fn test_category_filter() -> Result<()> {
    let test = sample_project()?;

    let output = test.extract_command().args(["--category", "site"]).output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "site  2 messages\n✓ Extracted 2 messages in 1 category from 3 files\n"
    );

    Ok(())
}

#[test]
fn test_verbose_lists_messages() -> Result<()> {
    let test = sample_project()?;

    let output = test.extract_command().arg("-v").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[app]"));
    assert!(out.contains("\"Save\"  src/Plugin.php:3"));
    assert!(out.contains("\"Welcome\"  templates/index.twig:2"));

    Ok(())
}

#[test]
fn test_single_file() -> Result<()> {
    let test = sample_project()?;

    let output = test.extract_command().arg("src/Plugin.php").output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "app  1 message\n✓ Extracted 1 message in 1 category from 1 file\n"
    );

    Ok(())
}

#[test]
fn test_unsupported_single_file_is_an_error() -> Result<()> {
    let test = CliTest::with_file("README.md", "# Readme\n")?;

    let output = test.extract_command().arg("README.md").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unsupported file type"));

    Ok(())
}

#[test]
fn test_missing_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().arg("nope").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("scan root does not exist"));

    Ok(())
}

#[test]
fn test_broken_file_is_reported_and_skipped() -> Result<()> {
    let test = sample_project()?;
    test.write_file("templates/broken.twig", "{{ 'Oops'|t \n")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("from 4 files"));
    assert!(!stdout(&output).contains("Oops"));
    let err = stderr(&output);
    assert!(err.contains("warning: failed to parse templates/broken.twig"));
    assert!(err.contains("1 file could not be extracted"));

    let strict = test.extract_command().arg("--strict").output()?;
    assert_eq!(strict.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_translateignore_layers() -> Result<()> {
    let test = CliTest::with_file("a/.translateignore", "*.js\n")?;
    test.write_file("a/sub/.translateignore", "!keep.js\n")?;
    test.write_file("a/other.js", "Craft.t('site', 'Other');\n")?;
    test.write_file("a/sub/keep.js", "Craft.t('site', 'Keep');\n")?;

    let output = test.extract_command().args(["-v"]).output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"Keep\"  a/sub/keep.js:1"));
    assert!(!out.contains("Other"));

    Ok(())
}

#[test]
fn test_config_default_category() -> Result<()> {
    let test = CliTest::with_file(".msgharvestrc.json", r#"{ "defaultCategory": "app" }"#)?;
    test.write_file("templates/index.twig", "{{ 'Hi'|t }}\n")?;

    let output = test.extract_command().output()?;
    assert!(stdout(&output).starts_with("app  1 message\n"));

    let output = test
        .extract_command()
        .args(["--default-category", "theme"])
        .output()?;
    assert!(stdout(&output).starts_with("theme  1 message\n"));

    Ok(())
}

#[test]
fn test_project_config_values() -> Result<()> {
    let test = CliTest::with_file(
        "config/project/project.yaml",
        "system:\n  name: Demo\n",
    )?;
    test.write_file(
        "config/project/fields/body--0b9e4a4c-1d8f-4d5e-9a3b-2c1f0e6d7a8b.yaml",
        "name: Body\ninstructions: 'Main content'\nhandle: body\n",
    )?;

    let output = test.extract_command().arg("-v").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains(
        "\"Body\"  config/project/fields/body--0b9e4a4c-1d8f-4d5e-9a3b-2c1f0e6d7a8b.yaml"
    ));
    assert!(out.contains("\"Main content\""));
    assert!(!out.contains("\"body\""));
    assert!(!out.contains("Demo"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["extract", "update", "init"] {
        assert!(out.contains(command), "missing {} in help", command);
    }

    Ok(())
}
