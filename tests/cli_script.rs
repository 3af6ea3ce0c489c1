mod common;

use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{script_command, test_home};

#[test]
fn script_mode_runs_basic_flow() {
    let home = test_home();
    let input = "register \"Ana Souza\" ana@example.com secret\n\
                 add 120 \"Design work\"\n\
                 add 30 Tips\n\
                 goal set 1000 2099-12-31\n\
                 view year\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Welcome, Ana!"))
        .stdout(contains("Total earned this year: $150.00"))
        .stdout(contains("Target: $1,000.00"))
        .stdout(contains("15.0%"));

    let stored = std::fs::read_to_string(home.join("data").join("transactions.json")).unwrap();
    assert!(stored.contains("\"Design work\""));
}

#[test]
fn rejected_input_is_reported_and_shell_continues() {
    let home = test_home();
    let input = "register Ana ana@example.com secret\n\
                 add -5 Refund\n\
                 goal set 100 31/12/2099\n\
                 list\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("amount must be a positive number"))
        .stdout(contains("No income recorded yet."));
}

#[test]
fn data_commands_need_a_signed_in_user() {
    let home = test_home();

    script_command(&home)
        .write_stdin("dashboard\nadd 10 Tips\nexit\n")
        .assert()
        .success()
        .stdout(contains("Not signed in").and(contains("register")));
}

#[test]
fn session_resumes_in_a_new_process() {
    let home = test_home();
    script_command(&home)
        .write_stdin("register Ana ana@example.com secret\nadd 42 Tips\nexit\n")
        .assert()
        .success();

    script_command(&home)
        .write_stdin("list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Tips"))
        .stdout(contains("$42.00"));
}

#[test]
fn config_changes_money_format() {
    let home = test_home();
    let input = "config set locale pt-BR\n\
                 config set currency BRL\n\
                 register Ana ana@example.com secret\n\
                 add 1234,5 Projeto\n\
                 list\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("R$ 1.234,50"));
}
