#[macro_use]
mod common;

tests! {
    init_runs_on_instantiation_and_sets_fields:
    "class Point { init(x, y) { this.x = x; this.y = y; } } \
     var p = Point(1, 2); print p.x; print p.y;" => "1.0", "2.0",
}

tests! {
    init_always_returns_the_instance_even_with_an_empty_return:
    "class Thing { init() { return; } } print Thing();" => "<Thing instance>",
}
