#[macro_use]
mod common;

tests! {
    subclass_inherits_superclass_methods:
    "class Animal { speak() { return \"...\"; } } class Dog < Animal {} print Dog().speak();" => "...",
}

tests! {
    subclass_can_override_a_method:
    "class Animal { speak() { return \"...\"; } } class Dog < Animal { speak() { return \"woof\"; } } \
     print Dog().speak();" => "woof",
}

tests_err! {
    a_class_cannot_inherit_from_itself:
    "class Oops < Oops {}" => "A class can't inherit from itself.",
}

tests_err! {
    inheriting_from_a_non_class_is_a_runtime_error:
    "var NotAClass = 1; class Dog < NotAClass {}" => "Superclass must be a class.",
}
