#[macro_use]
mod common;

tests! {
    clock_returns_a_number:
    "print clock() >= 0;" => "true",
}

tests! {
    program_result_is_the_last_top_level_statements_value:
    "5; 4; 3;" => ,
}
