use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// An in-memory sink shared between a test and the `Session` it drives, so the test can inspect
/// everything the program printed after the session is done with it.
#[derive(Clone, Default)]
pub struct SharedBuffer(pub Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

/// Runs `$source` through a fresh `Session` and asserts its printed output, one expected line per
/// argument, matches exactly.
#[macro_export]
macro_rules! tests {
    ($name:ident: $source:expr => $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            let expected: Vec<&str> = vec![$($expected),*];
            let expected = if expected.is_empty() { String::new() } else { format!("{}\n", expected.join("\n")) };

            let buffer = $crate::common::SharedBuffer::new();
            let mut session = lox::Session::new(Box::new(buffer.clone()));
            session.run_file_source($source);

            assert_eq!(expected, buffer.contents());
        }
    };
}

/// Runs `$source` in a fresh `lox` subprocess (so the global error flags of one test can never
/// leak into another) and asserts it fails with stderr containing every expected fragment.
#[macro_export]
macro_rules! tests_err {
    ($name:ident: $source:expr => $($expected:expr),+ $(,)?) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let path = std::env::temp_dir().join(concat!(stringify!($name), ".lox"));
            std::fs::write(&path, $source).unwrap();

            let mut cmd = Command::cargo_bin("lox").unwrap();
            let assert = cmd.arg(&path).assert().failure();

            let output = assert.get_output();
            let stderr = String::from_utf8_lossy(&output.stderr);
            $(assert!(stderr.contains($expected), "expected stderr to contain {:?}, got: {}", $expected, stderr);)+

            let _ = std::fs::remove_file(&path);
        }
    };
}
