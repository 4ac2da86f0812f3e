#[macro_use]
mod common;

tests! {
    super_calls_the_overridden_method:
    "class Animal { speak() { return \"...\"; } } \
     class Dog < Animal { speak() { return super.speak() + \"woof\"; } } \
     print Dog().speak();" => "...woof",
}

tests_err! {
    using_super_outside_a_subclass_is_a_resolve_error:
    "class Animal { speak() { return super.speak(); } }" => "Can't use 'super' outside of a class with a superclass.",
}
