#[macro_use]
mod common;

tests_err! {
    returning_from_top_level_code_is_a_resolve_error:
    "return 1;" => "Can't return from top-level code.",
}

tests_err! {
    returning_a_value_from_an_initializer_is_a_resolve_error:
    "class T { init() { return 1; } }" => "Can't return a value from an initializer.",
}
