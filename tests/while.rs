#[macro_use]
mod common;

tests! {
    while_loop_counts_down:
    "var i = 3; while (i > 0) { print i; i = i - 1; }" => "3.0", "2.0", "1.0",
}
