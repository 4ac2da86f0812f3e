#[macro_use]
mod common;

tests! {
    class_declaration_and_instantiation:
    "class Bagel {} print Bagel; print Bagel();" => "<class Bagel>", "<Bagel instance>",
}

tests! {
    class_identity_not_structure_drives_equality:
    "class A {} class B {} print A() == A();" => "false",
}
