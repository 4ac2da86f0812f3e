#[macro_use]
mod common;

tests! {
    method_call_binds_this_to_the_receiver:
    "class Greeter { greet() { return \"hi, \" + this.name; } } \
     var g = Greeter(); g.name = \"sam\"; print g.greet();" => "hi, sam",
}

tests! {
    a_method_retrieved_as_a_value_keeps_its_binding:
    "class Greeter { greet() { return this.name; } } \
     var g = Greeter(); g.name = \"x\"; var m = g.greet; print m();" => "x",
}
