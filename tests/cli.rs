use assert_cmd::Command;

#[test]
fn a_static_error_exits_with_code_65() {
    let path = std::env::temp_dir().join("lox_cli_static_error.lox");
    std::fs::write(&path, "var a = ;").unwrap();

    Command::cargo_bin("lox").unwrap().arg(&path).assert().code(65);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn a_runtime_error_exits_with_code_70() {
    let path = std::env::temp_dir().join("lox_cli_runtime_error.lox");
    std::fs::write(&path, "print 1 + true;").unwrap();

    Command::cargo_bin("lox").unwrap().arg(&path).assert().code(70);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn a_valid_script_exits_successfully() {
    let path = std::env::temp_dir().join("lox_cli_ok.lox");
    std::fs::write(&path, "print \"ok\";").unwrap();

    Command::cargo_bin("lox").unwrap().arg(&path).assert().success().stdout("ok\n");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn too_many_arguments_exits_with_code_64() {
    Command::cargo_bin("lox").unwrap().arg("a.lox").arg("b.lox").assert().code(64);
}
