use crate::helpers::cli_runner::CliRunner;

const COMMANDS: [&str; 8] = [
    "player",
    "blackjack",
    "slots",
    "catalog",
    "optimize",
    "simulate",
    "report",
    "cfg",
];

#[test]
fn help_lists_all_commands() {
    let cli = CliRunner::new();
    let res = cli.run(&["--help"]);
    assert_eq!(res.exit_code, 0);
    for cmd in COMMANDS {
        assert!(res.stdout.contains(cmd), "help should list `{}`", cmd);
    }
}

#[test]
fn version_prints_and_exits_zero() {
    let cli = CliRunner::new();
    let res = cli.run(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("casino"));
}

#[test]
fn unknown_subcommand_shows_usage_on_stderr() {
    let cli = CliRunner::new();
    let res = cli.run(&["roulette"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stdout.is_empty());
    assert!(res.stderr.contains("Commands:"));
    assert!(res.stderr.contains("For full help, run: casino --help"));
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    let cli = CliRunner::new();
    let res = cli.run(&["blackjack", "--id", "a1"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("--stake"));
}

#[test]
fn cfg_prints_json_with_sources() {
    let cli = CliRunner::new();
    let res = cli.run(&["cfg"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let json: serde_json::Value = serde_json::from_str(&res.stdout).expect("cfg prints JSON");
    for key in ["data_file", "max_turns", "minimum_reserve", "spin_cost"] {
        assert!(json[key].get("value").is_some(), "missing {}", key);
        assert!(json[key]["source"].is_string());
    }
}

#[test]
fn catalog_is_ordered_by_expected_gain() {
    let cli = CliRunner::new();
    let res = cli.run(&["catalog"]);
    assert_eq!(res.exit_code, 0);
    let jackpot = res.stdout.find("Slots Jackpot").expect("jackpot listed");
    let conservative = res
        .stdout
        .find("Blackjack Conservative")
        .expect("conservative listed");
    // 0.1 * 2000 * 10 - 0.9 * 2000 = 200 beats 0.48 * 100 - 0.52 * 100 = -4
    assert!(jackpot < conservative);
}
