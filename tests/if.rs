#[macro_use]
mod common;

tests! {
    if_true_branch_runs:
    "if (true) print \"yes\"; else print \"no\";" => "yes",
}

tests! {
    if_false_branch_runs_else:
    "if (false) print \"yes\"; else print \"no\";" => "no",
}

tests! {
    if_without_else_and_false_condition_does_nothing:
    "if (false) print \"yes\";" => ,
}
