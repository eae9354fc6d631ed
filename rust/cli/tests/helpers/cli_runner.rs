use std::io::Cursor;
use std::path::{Path, PathBuf};

use casino_engine::player::Player;
use casino_engine::store::{JsonFileStore, PlayerStore};

#[derive(Debug)]
pub struct CliRunner {
    dir: tempfile::TempDir,
    data: PathBuf,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[allow(dead_code)]
impl CliRunner {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let data = dir.path().join("players.json");
        Self { dir, data }
    }

    pub fn data_file(&self) -> &Path {
        &self.data
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Runs with closed stdin.
    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_with_input(args, "")
    }

    pub fn run_with_input(&self, args: &[&str], input: &str) -> CliResult {
        let data = self.data.to_string_lossy().into_owned();
        let mut argv: Vec<&str> = vec!["casino", "--data", &data];
        argv.extend_from_slice(args);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let exit_code = casino_cli::run_with_input(argv, &mut out, &mut err, &mut stdin);
        CliResult {
            exit_code,
            stdout: String::from_utf8_lossy(&out).into_owned(),
            stderr: String::from_utf8_lossy(&err).into_owned(),
        }
    }

    pub fn register(&self, id: &str, name: &str, balance: i64) {
        let bal = balance.to_string();
        let res = self.run(&[
            "player", "register", "--id", id, "--name", name, "--balance", &bal,
        ]);
        assert_eq!(res.exit_code, 0, "register failed: {}", res.stderr);
    }

    /// Reads a player straight from the data file.
    pub fn player(&self, id: &str) -> Player {
        JsonFileStore::new(&self.data)
            .get(id)
            .unwrap_or_else(|e| panic!("player {} not stored: {}", id, e))
    }
}
