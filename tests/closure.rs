#[macro_use]
mod common;

tests! {
    closure_captures_its_defining_environment_not_the_call_site:
    "var a = \"global\"; var r; { fun g() { return a; } var a = \"local\"; r = g(); } print r;" => "global",
}

tests! {
    counter_closure_keeps_its_own_state:
    "fun makeCounter() { var i = 0; fun count() { i = i + 1; return i; } return count; } \
     var counter = makeCounter(); print counter(); print counter();" => "1.0", "2.0",
}
