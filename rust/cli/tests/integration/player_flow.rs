use crate::helpers::cli_runner::CliRunner;

#[test]
fn register_list_show_update_remove() {
    let cli = CliRunner::new();
    cli.register("ana1", "Ana Torres", 1500);
    cli.register("bo", "Bo", 200);

    let list = cli.run(&["player", "list"]);
    assert_eq!(list.exit_code, 0);
    assert!(list.stdout.contains("ANA1"));
    assert!(list.stdout.contains("Bo"));
    assert!(list.stdout.contains("2 player(s)"));

    let show = cli.run(&["player", "show", "--id", "Ana1"]);
    assert_eq!(show.exit_code, 0);
    assert!(
        show.stdout
            .contains("Player: Ana Torres | ID: ANA1 | Balance: $1500")
    );

    let upd = cli.run(&["player", "update", "--id", "bo", "--balance", "350"]);
    assert_eq!(upd.exit_code, 0, "stderr: {}", upd.stderr);
    let bo = cli.player("BO");
    assert_eq!(bo.current_balance, 350);
    assert_eq!(bo.initial_balance, 200);

    let rm = cli.run(&["player", "remove", "--id", "bo"]);
    assert_eq!(rm.exit_code, 0);
    assert!(rm.stdout.contains("Player removed: Bo (BO)"));
    let list = cli.run(&["player", "list"]);
    assert!(list.stdout.contains("1 player(s)"));
}

#[test]
fn player_file_is_a_pretty_json_array() {
    let cli = CliRunner::new();
    cli.register("a1", "Ana", 100);
    let text = std::fs::read_to_string(cli.data_file()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["id"], "A1");
    assert!(text.contains('\n'));
}

#[test]
fn duplicate_id_is_rejected() {
    let cli = CliRunner::new();
    cli.register("a1", "Ana", 100);
    let res = cli.run(&[
        "player", "register", "--id", "A1", "--name", "Other", "--balance", "5",
    ]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("already exists"));
    assert_eq!(cli.player("A1").name, "Ana");
}

#[test]
fn invalid_ids_and_names_are_rejected() {
    let cli = CliRunner::new();
    let bad_id = cli.run(&[
        "player", "register", "--id", "a b", "--name", "Ana", "--balance", "5",
    ]);
    assert_eq!(bad_id.exit_code, 2);
    let blank_name = cli.run(&[
        "player", "register", "--id", "a1", "--name", "  ", "--balance", "5",
    ]);
    assert_eq!(blank_name.exit_code, 2);
    assert!(!cli.data_file().exists());
}

#[test]
fn history_of_a_new_player_is_empty() {
    let cli = CliRunner::new();
    cli.register("a1", "Ana", 100);
    let res = cli.run(&["player", "history", "--id", "a1"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("No activity recorded."));
}

#[test]
fn unknown_player_exits_two() {
    let cli = CliRunner::new();
    let res = cli.run(&["player", "remove", "--id", "ghost"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Player not found: GHOST"));
}
