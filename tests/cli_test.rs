mod common;
mod utils;

use anyhow::Result;
use common::TestEnvironment;

#[test]
fn test_about_prints_banner() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_buildcli_command(&env, &["about"])?;
    assert_eq!(output.exit_code, 0, "about failed: {}", output.stderr);
    assert!(
        output.stdout.lines().any(|l| !l.trim().is_empty()),
        "about printed nothing"
    );
    assert!(output.stdout.contains("BuildCLI"));

    Ok(())
}

#[test]
fn test_about_alias_matches_canonical_name() -> Result<()> {
    let env = TestEnvironment::new()?;

    let by_name = utils::run_buildcli_command(&env, &["about"])?;
    let by_alias = utils::run_buildcli_command(&env, &["-a"])?;
    assert_eq!(by_alias.exit_code, 0, "-a failed: {}", by_alias.stderr);
    assert_eq!(by_name.stdout, by_alias.stdout);

    Ok(())
}

#[test]
fn test_about_output_is_deterministic() -> Result<()> {
    let env = TestEnvironment::new()?;

    let first = utils::run_buildcli_command(&env, &["about"])?;
    let second = utils::run_buildcli_command(&env, &["about"])?;
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn test_about_does_not_touch_the_filesystem() -> Result<()> {
    let env = TestEnvironment::new()?;

    utils::run_buildcli_command(&env, &["about"])?;
    assert_eq!(std::fs::read_dir(env.home())?.count(), 0);
    assert_eq!(std::fs::read_dir(env.config_home())?.count(), 0);

    Ok(())
}

#[test]
fn test_about_ignores_broken_config() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config("this is not toml =")?;

    let output = utils::run_buildcli_command(&env, &["about"])?;
    assert_eq!(output.exit_code, 0, "about failed: {}", output.stderr);

    Ok(())
}

#[test]
fn test_extra_argument_is_a_usage_error() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_buildcli_command(&env, &["about", "unexpected"])?;
    assert_eq!(output.exit_code, 2);
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("unexpected"));

    Ok(())
}

#[test]
fn test_no_command_prints_hint() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_buildcli_command(&env, &[])?;
    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains("--help"));

    Ok(())
}

#[test]
fn test_help_lists_about() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_buildcli_command(&env, &["--help"])?;
    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains("about"));

    Ok(())
}

#[test]
fn test_completions_generate() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_buildcli_command(&env, &["completions", "generate", "zsh"])?;
    assert_eq!(output.exit_code, 0, "completions failed: {}", output.stderr);
    assert!(output.stdout.contains("buildcli"));

    Ok(())
}
