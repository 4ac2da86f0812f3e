#[macro_use]
mod common;

tests! {
    global_variable_is_visible_in_block:
    "var a = 1; { print a; }" => "1.0",
}

tests! {
    redeclaring_a_global_is_allowed:
    "var a = 1; var a = 2; print a;" => "2.0",
}

tests! {
    uninitialized_variable_is_nil:
    "var a; print a;" => "Nil",
}

tests_err! {
    redeclaring_a_local_is_a_resolve_error:
    "{ var a = 1; var a = 2; }" => "Already a variable named 'a' in this scope.",
}

tests_err! {
    using_an_undefined_variable_is_a_runtime_error:
    "print a;" => "Undefined variable 'a'.",
}
