use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn infoset() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("infoset")?)
}

#[test]
fn test_set_then_get() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("item.xml");

    infoset()?
        .arg("set")
        .arg(&file)
        .args(["--part", "Foo", "--field", "Bar", "one"])
        .assert()
        .success();
    infoset()?
        .arg("set")
        .arg(&file)
        .args(["--part", "Foo", "--field", "Bar", "--name", "alpha", "two"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&file)?,
        "<Data><Foo><Bar alpha=\"two\">one</Bar></Foo></Data>"
    );

    infoset()?
        .arg("get")
        .arg(&file)
        .args(["-p", "Foo", "-f", "Bar", "-n", "alpha"])
        .assert()
        .success()
        .stdout("two\n");
    Ok(())
}

#[test]
fn test_get_unset_value_fails_quietly() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("missing.xml");

    infoset()?
        .arg("get")
        .arg(&file)
        .args(["--part", "Foo", "--field", "Bar"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
    assert!(!file.exists());
    Ok(())
}

#[test]
fn test_fmt_canonicalizes() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("item.xml");
    std::fs::write(&file, "<?xml version=\"1.0\"?>\n<Data>\n  <Foo>\n    <Bar a='1' />\n  </Foo>\n</Data>\n")?;

    infoset()?
        .arg("fmt")
        .arg(&file)
        .assert()
        .success()
        .stdout("<Data><Foo><Bar a=\"1\"/></Foo></Data>\n");
    Ok(())
}

#[test]
fn test_fmt_missing_file_is_a_usage_error() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("missing.xml");

    infoset()?
        .arg("fmt")
        .arg(&file)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no data file to format"));
    assert!(!file.exists());
    Ok(())
}

#[test]
fn test_malformed_data_is_an_error() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("item.xml");
    std::fs::write(&file, "<Data><Foo>")?;

    infoset()?
        .arg("get")
        .arg(&file)
        .args(["--part", "Foo", "--field", "Bar"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed").or(predicate::str::contains("unterminated")));
    Ok(())
}
