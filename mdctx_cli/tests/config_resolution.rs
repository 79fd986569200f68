mod common;

use mdctx_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn config_next_to_input_disables_rows() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, common::SAMPLE)?;
	std::fs::write(tmp.path().join("mdctx.toml"), "[builder]\nemit_rows = false\n")?;

	common::mdctx_cmd()
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::contains("detail:").not());

	Ok(())
}

#[test]
fn dot_config_directory_is_discovered() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, "## Fields\n| A | B |\n|---|---|\n| 1 |\n")?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/mdctx.toml"),
		"[diagnostics]\nstrict = true\n",
	)?;

	common::mdctx_cmd().arg(&input).assert().code(1);

	Ok(())
}

#[test]
fn explicit_config_path_wins() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	let config = tmp.path().join("custom.toml");
	std::fs::write(&input, common::SAMPLE)?;
	std::fs::write(tmp.path().join("mdctx.toml"), "[builder]\nemit_rows = true\n")?;
	std::fs::write(&config, "[builder]\nemit_rows = false\n")?;

	common::mdctx_cmd()
		.arg(&input)
		.arg("--config")
		.arg(&config)
		.assert()
		.success()
		.stdout(predicates::str::contains("detail:").not());

	Ok(())
}

#[test]
fn malformed_config_exits_with_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("notes.md");
	std::fs::write(&input, common::SAMPLE)?;
	std::fs::write(tmp.path().join("mdctx.toml"), "[builder\n")?;

	common::mdctx_cmd()
		.arg(&input)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
