use std::{env, process};

use lox::run_file;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        n if n > 2 => {
            println!("Usage: lox [script]");
            process::exit(64);
        }
        2 => run_file(&args[1]),
        _ => lox::run_prompt(),
    }
}
