use crate::helpers::cli_runner::CliRunner;
use casino_engine::optimizer::optimize;

#[test]
fn optimize_from_a_balance() {
    let cli = CliRunner::new();
    let res = cli.run(&["optimize", "--balance", "1000", "--turns", "3"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let expected = optimize(1000, 3, 100);
    assert!(res.stdout.contains(&format!(
        "Profit: +${} | Final balance: ${}",
        expected.profit,
        expected.final_balance()
    )));
    assert!(res.stdout.contains("Explored "));
}

#[test]
fn optimize_with_nothing_affordable() {
    let cli = CliRunner::new();
    let res = cli.run(&["optimize", "--balance", "150"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("No profitable strategy from $150"));
}

#[test]
fn optimize_validates_turns_and_reserve() {
    let cli = CliRunner::new();
    let zero = cli.run(&["optimize", "--balance", "1000", "--turns", "0"]);
    assert_eq!(zero.exit_code, 2);
    let above_cap = cli.run(&["optimize", "--balance", "1000", "--turns", "11"]);
    assert_eq!(above_cap.exit_code, 2);
    let reserve = cli.run(&["optimize", "--balance", "1000", "--reserve=-5"]);
    assert_eq!(reserve.exit_code, 2);
}

#[test]
fn exhaustive_search_finds_the_same_profit() {
    let cli = CliRunner::new();
    let profit_line = |args: &[&str]| {
        let res = cli.run(args);
        assert_eq!(res.exit_code, 0);
        res.stdout
            .lines()
            .find(|l| l.starts_with("Profit:"))
            .map(str::to_string)
    };
    let pruned = profit_line(&["optimize", "--balance", "2500", "--turns", "3"]);
    let full = profit_line(&["optimize", "--balance", "2500", "--turns", "3", "--exhaustive"]);
    assert!(pruned.is_some());
    assert_eq!(pruned, full);
}

#[test]
fn optimize_for_a_player_does_not_change_them() {
    let cli = CliRunner::new();
    cli.register("p1", "Pat", 1000);
    let res = cli.run(&["optimize", "--id", "p1", "--turns", "2"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Pat (P1)"));
    let pat = cli.player("P1");
    assert_eq!(pat.current_balance, 1000);
    assert!(pat.history.is_empty());
}

#[test]
fn simulate_persists_only_with_apply() {
    let cli = CliRunner::new();
    cli.register("p1", "Pat", 1000);

    let dry = cli.run(&["simulate", "--id", "p1", "--turns", "2"]);
    assert_eq!(dry.exit_code, 0);
    assert!(dry.stdout.contains("Run with --apply"));
    assert_eq!(cli.player("P1").current_balance, 1000);

    let applied = cli.run(&["simulate", "--id", "p1", "--turns", "2", "--apply"]);
    assert_eq!(applied.exit_code, 0, "stderr: {}", applied.stderr);
    let expected = optimize(1000, 2, 100);
    let pat = cli.player("P1");
    assert_eq!(pat.current_balance, expected.final_balance());
    assert_eq!(pat.history.len(), expected.path.len() + 1);
    assert_eq!(pat.history.last().unwrap(), "Strategy simulation applied");
}

#[test]
fn optimize_on_part_of_a_player_balance() {
    let cli = CliRunner::new();
    cli.register("p1", "Pat", 5000);
    let res = cli.run(&["optimize", "--id", "p1", "--balance", "1000", "--turns", "2"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Pat (P1) from $1000"));
    let expected = optimize(1000, 2, 100);
    assert!(res.stdout.contains(&format!("Final balance: ${}", expected.final_balance())));

    let over = cli.run(&["optimize", "--id", "p1", "--balance", "5001"]);
    assert_eq!(over.exit_code, 2);
    assert!(over.stderr.contains("exceeds the current balance"));
    assert_eq!(cli.player("P1").current_balance, 5000);
}

#[test]
fn huge_balances_are_rejected_without_panicking() {
    let cli = CliRunner::new();
    let max = i64::MAX.to_string();
    let res = cli.run(&["optimize", "--balance", &max]);
    assert_eq!(res.exit_code, 2);
    let res = cli.run(&["player", "register", "--id", "rich", "--name", "Rich", "--balance", &max]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("balance must be between 0 and"));
}
