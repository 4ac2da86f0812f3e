#[macro_use]
mod common;

tests! {
    for_loop_desugars_to_a_while_loop:
    "for (var i = 0; i < 3; i = i + 1) print i;" => "0.0", "1.0", "2.0",
}

tests! {
    for_loop_initializer_is_scoped_to_the_loop:
    "var i = \"outer\"; for (var i = 0; i < 1; i = i + 1) print i; print i;" => "0.0", "outer",
}
