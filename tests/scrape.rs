use assert_cmd::Command;

fn network_available() -> bool {
    let config = ureq::Agent::config_builder()
        .timeout_connect(Some(std::time::Duration::from_secs(2)))
        .timeout_global(Some(std::time::Duration::from_secs(5)))
        .build();
    let agent = ureq::Agent::new_with_config(config);
    agent
        .get("https://example.com/")
        .call()
        .map(|res| !res.status().is_server_error())
        .unwrap_or(false)
}

#[test]
fn scrape_simple_webpage() -> Result<(), Box<dyn std::error::Error>> {
    if !network_available() {
        eprintln!("skipping scrape_simple_webpage: network unavailable");
        return Ok(());
    }
    let mut cmd = Command::cargo_bin("cite")?;
    let output = cmd.arg("scrape").arg("https://example.com/").output()?;
    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(record["type"], "webpage");
    assert_eq!(record["title"], "Example Domain");
    assert_eq!(record["website"], "example.com");
    assert!(record["accessed_date"].is_string());
    Ok(())
}

#[test]
fn cite_webpage_by_url() -> Result<(), Box<dyn std::error::Error>> {
    if !network_available() {
        eprintln!("skipping cite_webpage_by_url: network unavailable");
        return Ok(());
    }
    let mut cmd = Command::cargo_bin("cite")?;
    cmd.env("NO_COLOR", "1");
    let output = cmd.arg("cite").arg("https://example.com/").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(
        stdout.starts_with("\"Example Domain.\" *example.com*, https://example.com/. Accessed "),
        "unexpected citation. stdout=\n{}",
        stdout
    );
    assert!(
        stderr.contains("✓ 1") && stderr.contains("✗ 0"),
        "stderr summary mismatch. stderr=\n{}",
        stderr
    );
    Ok(())
}

#[test]
fn invalid_source_is_counted_as_failure() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cite")?;
    cmd.env("NO_COLOR", "1");
    let output = cmd
        .arg("cite")
        .arg("not-a-url-or-file")
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(stdout.is_empty(), "stdout should be empty, got=\n{}", stdout);
    assert!(
        stderr.contains("invalid URL not-a-url-or-file") && stderr.contains("✗ 1"),
        "stderr mismatch. stderr=\n{}",
        stderr
    );
    Ok(())
}

#[test]
fn scrape_render_prints_citation() -> Result<(), Box<dyn std::error::Error>> {
    if !network_available() {
        eprintln!("skipping scrape_render_prints_citation: network unavailable");
        return Ok(());
    }
    let mut cmd = Command::cargo_bin("cite")?;
    let output = cmd
        .arg("scrape")
        .arg("https://example.com/")
        .arg("--render")
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(
        stdout.starts_with("\"Example Domain.\" *example.com*, https://example.com/. Accessed "),
        "unexpected citation. stdout=\n{}",
        stdout
    );
    Ok(())
}

#[test]
fn scrape_render_rejects_unsupported_scheme() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cite")?;
    let output = cmd
        .arg("scrape")
        .arg("ftp://example.com/file")
        .arg("--render")
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(
        stderr.contains("unsupported URL scheme \"ftp\""),
        "stderr mismatch. stderr=\n{}",
        stderr
    );
    Ok(())
}
