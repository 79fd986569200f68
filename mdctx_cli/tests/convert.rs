mod common;

use clap::Parser;
use mdctx_cli::MdctxCli;
use mdctx_cli::OutputFormat;
use mdctx_core::AnyEmptyResult;
use mdctx_core::MdctxConfig;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn prints_outline_to_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, common::SAMPLE)?;

	let output = common::mdctx_cmd().arg(&input).assert().success();
	let stdout = String::from_utf8(output.get_output().stdout.clone())?;

	assert_eq!(
		stdout,
		"# Root\n  documentation: text one\n  ## Child\n    detail: {A=1, B=2}\n    table: \
		 [{A=1, B=2}]\n"
	);

	Ok(())
}

#[test]
fn json_output_links_every_node_to_its_parent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, common::SAMPLE)?;

	let output = common::mdctx_cmd()
		.arg(&input)
		.arg("--format")
		.arg("json")
		.assert()
		.success();
	let nodes: Vec<Value> = serde_json::from_slice(&output.get_output().stdout)?;

	let types: Vec<&str> = nodes
		.iter()
		.filter_map(|node| node["type"].as_str())
		.collect();
	assert_eq!(
		types,
		vec!["heading", "documentation", "heading", "detail", "detailTable"]
	);

	let parents: Vec<Value> = nodes.iter().map(|node| node["parent"].clone()).collect();
	assert_eq!(
		parents,
		vec![
			Value::Null,
			Value::from(0),
			Value::from(0),
			Value::from(2),
			Value::from(2),
		]
	);

	Ok(())
}

#[test]
fn writes_output_and_eventlog_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	let output = tmp.path().join("out/tree.txt");
	let eventlog = tmp.path().join("out/events.json");
	std::fs::write(&input, "## Fields\n| A | B |\n|---|---|\n| 1 |\n")?;

	common::mdctx_cmd()
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("-e")
		.arg(&eventlog)
		.assert()
		.success()
		.stdout(predicates::str::is_empty())
		.stderr(predicates::str::contains("1 error(s), 0 warning(s)"));

	let tree = std::fs::read_to_string(&output)?;
	assert!(tree.starts_with("## Fields\n"));

	let events: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&eventlog)?)?;
	assert_eq!(events.len(), 1);
	assert_eq!(events[0]["type"], "missingCell");
	assert_eq!(events[0]["header"], "B");

	Ok(())
}

#[test]
fn missing_cells_are_logged_as_errors() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, "## Fields\n| A | B |\n|---|---|\n| 1 |\n")?;

	common::mdctx_cmd()
		.arg(&input)
		.assert()
		.success()
		.stderr(predicates::str::contains("ERROR").and(predicates::str::contains(
			"table cell missing in row 0, column 1 (`B`)",
		)));

	Ok(())
}

#[test]
fn clean_documents_report_no_diagnostics() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, common::SAMPLE)?;

	common::mdctx_cmd()
		.arg(&input)
		.arg("--strict")
		.assert()
		.success()
		.stderr(predicates::str::contains("No diagnostics."));

	Ok(())
}

#[test]
fn strict_mode_fails_when_diagnostics_are_recorded() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, "## Fields\n| A | B |\n|---|---|\n| 1 |\n")?;

	common::mdctx_cmd()
		.arg(&input)
		.arg("--strict")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("strict mode"));

	Ok(())
}

#[test]
fn missing_input_exits_with_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mdctx_cmd()
		.arg(tmp.path().join("absent.md"))
		.assert()
		.code(2);

	Ok(())
}

#[test]
fn no_rows_flag_only_emits_tables() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, common::SAMPLE)?;

	common::mdctx_cmd()
		.arg(&input)
		.arg("--no-rows")
		.assert()
		.success()
		.stdout(
			predicates::str::contains("table: [{A=1, B=2}]")
				.and(predicates::str::contains("detail:").not()),
		);

	Ok(())
}

#[rstest]
#[case::defaults(&["mdctx", "notes.md"], OutputFormat::Text, false, false)]
#[case::json(&["mdctx", "notes.md", "--format", "json"], OutputFormat::Json, false, false)]
#[case::strict(&["mdctx", "notes.md", "--strict"], OutputFormat::Text, true, false)]
#[case::no_rows(&["mdctx", "notes.md", "--no-rows"], OutputFormat::Text, false, true)]
fn parses_flags(
	#[case] argv: &[&str],
	#[case] format: OutputFormat,
	#[case] strict: bool,
	#[case] no_rows: bool,
) -> AnyEmptyResult {
	let cli = MdctxCli::try_parse_from(argv)?;

	assert_eq!(cli.format, format);
	assert_eq!(cli.strict, strict);
	assert_eq!(cli.no_rows, no_rows);

	Ok(())
}

#[test]
fn flags_override_config() -> AnyEmptyResult {
	let config = MdctxConfig::from_toml("[builder]\nemit_rows = true\n")?;
	let cli = MdctxCli::try_parse_from(["mdctx", "docs/notes.md", "--no-rows"])?;

	assert!(!cli.builder_options(&config).emit_rows);
	assert!(!cli.strict(&config));
	assert_eq!(cli.config_root(), std::path::PathBuf::from("docs"));

	Ok(())
}

#[test]
fn bare_input_uses_the_current_directory_for_config() -> AnyEmptyResult {
	let cli = MdctxCli::try_parse_from(["mdctx", "notes.md"])?;
	assert_eq!(cli.config_root(), std::path::PathBuf::from("."));

	Ok(())
}
