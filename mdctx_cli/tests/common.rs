use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const SAMPLE: &str = "# Root\ntext one\n\n## Child\n| A | B |\n|---|---|\n| 1 | 2 |\n";

pub fn mdctx_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("mdctx"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}
