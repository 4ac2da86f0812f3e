#[macro_use]
mod common;

tests! {
    function_call_runs_its_body:
    "fun greet(name) { print \"hi \" + name; } greet(\"sam\");" => "hi sam",
}

tests! {
    recursive_function_computes_fibonacci:
    "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } print fib(8);" => "21.0",
}

tests! {
    function_without_return_yields_nil_when_called_as_a_statement:
    "fun noop() {} noop();" => ,
}

tests_err! {
    calling_with_the_wrong_number_of_arguments_is_a_runtime_error:
    "fun f(a, b) { return a; } f(1);" => "Expected 2 arguments but got 1.",
}

tests_err! {
    calling_a_non_callable_is_a_runtime_error:
    "var n = 1; n();" => "Can only call functions and classes.",
}
