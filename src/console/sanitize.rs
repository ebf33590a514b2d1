//! Terminal escape stripping for command output.

use vte::{Params, Parser, Perform};

/// Remove terminal control sequences from `input`.
///
/// Printable text, newlines and tabs survive; colours, cursor movement,
/// window-title and device-control strings are dropped along with every
/// other C0 control byte.
pub fn strip_escapes(input: &str) -> String {
    let mut extractor = PlainTextExtractor::default();
    let mut parser = Parser::new();
    parser.advance(&mut extractor, input.as_bytes());
    extractor.output
}

/// VTE performer that keeps only plain text.
#[derive(Default)]
struct PlainTextExtractor {
    output: String,
}

impl Perform for PlainTextExtractor {
    fn print(&mut self, c: char) {
        self.output.push(c);
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\t') {
            self.output.push(byte as char);
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(
        &mut self,
        _params: &Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}
