use crate::helpers::cli_runner::CliRunner;

#[test]
fn reports_on_an_empty_casino() {
    let cli = CliRunner::new();
    for kind in ["balance", "ranking", "losses", "games"] {
        let res = cli.run(&["report", kind]);
        assert_eq!(res.exit_code, 0);
        assert!(res.stdout.contains("No players registered."), "{}", kind);
    }
}

#[test]
fn unknown_report_kind_is_a_usage_error() {
    let cli = CliRunner::new();
    let res = cli.run(&["report", "jackpots"]);
    assert_eq!(res.exit_code, 2);
}

#[test]
fn balance_and_ranking_reports() {
    let cli = CliRunner::new();
    cli.register("a1", "Ana", 1000);
    cli.register("b2", "Bo", 500);
    cli.run(&["player", "update", "--id", "a1", "--balance", "800"]);
    cli.run(&["player", "update", "--id", "b2", "--balance", "900"]);

    let balance = cli.run(&["report", "balance"]);
    assert_eq!(balance.exit_code, 0);
    assert!(balance.stdout.contains("Total balance: $1700"));
    assert!(balance.stdout.contains("Richest player: Bo ($900)"));

    let ranking = cli.run(&["report", "ranking"]);
    assert!(ranking.stdout.contains("Best player: Bo (+$400)"));
    assert!(ranking.stdout.contains("Net winners: 1"));
    assert!(ranking.stdout.contains("Net losers: 1"));
}

#[test]
fn games_report_counts_slot_spins() {
    let cli = CliRunner::new();
    cli.register("a1", "Ana", 10_000);
    cli.register("b2", "Bo", 10_000);
    cli.run(&["slots", "--id", "a1", "--spins", "3", "--seed", "4"]);
    cli.run(&["slots", "--id", "b2", "--spins", "1", "--seed", "5"]);

    let res = cli.run(&["report", "games"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Slots:\n  Rounds played: 4\n  Unique players: 2"));
    assert!(res.stdout.contains("Most popular: Slots (100.0% of rounds)"));

    let losses = cli.run(&["report", "losses"]);
    assert_eq!(losses.exit_code, 0);
    assert!(losses.stdout.contains("Total losses: "));
}
